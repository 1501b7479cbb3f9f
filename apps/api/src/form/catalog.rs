//! Posting catalog — the static configuration behind the application form.
//!
//! The acknowledgment table drives both the rendered checklist and the
//! submission gate: adding a disclosure here is a data change, not a logic
//! change.

use crate::form::models::AckKey;

pub const JOB_TITLE: &str = "Grounds Maintenance Specialist";
pub const COMPANY_NAME: &str = "GreenValley Golf & Country Club";

pub const INTRO_TEXT: &str = "\
Thank you for your interest in joining the GreenValley family. We take immense \
pride in the pristine condition of our course, and our maintenance team is the \
heart of that effort.

This role is vital to our operations. Before you begin, we want to be \
transparent about the nature of the work to ensure it is a perfect fit for you.";

/// One working-condition disclosure the applicant must confirm.
#[derive(Debug, Clone, Copy)]
pub struct Acknowledgment {
    pub key: AckKey,
    pub text: &'static str,
}

/// Ordered disclosure list. Rendering order and the eligibility conjunction
/// both follow this table.
pub const ACKNOWLEDGMENTS: &[Acknowledgment] = &[
    Acknowledgment {
        key: AckKey::Outdoor,
        text: "I understand this position requires working outdoors 95% of the time, \
               in various weather conditions including summer heat, rain, and cold mornings.",
    },
    Acknowledgment {
        key: AckKey::Physical,
        text: "I am comfortable with the physical demands of the job, which include \
               frequent lifting (up to 50lbs), stooping, bending, and long periods on my feet.",
    },
    Acknowledgment {
        key: AckKey::Machinery,
        text: "I am willing to operate heavy maintenance machinery (mowers, aerators, \
               tractors) safely and responsibly (training provided).",
    },
    Acknowledgment {
        key: AckKey::Customers,
        text: "I understand that I will be working around golfers. While most are \
               wonderful, some can be focused or frustrated with their game. I agree to \
               remain kind, professional, and invisible to their play whenever possible.",
    },
    Acknowledgment {
        key: AckKey::Exhaustion,
        text: "I acknowledge that while the work is straightforward, it can be \
               physically exhausting by the end of the day. I am prepared for an active, \
               labor-intensive role.",
    },
];
