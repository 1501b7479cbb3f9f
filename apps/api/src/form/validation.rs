//! Eligibility derivation. Pure reads over `ApplicationState` — nothing here
//! is cached, and nothing here mutates the form.

use serde::Serialize;

use crate::form::catalog::ACKNOWLEDGMENTS;
use crate::form::models::{ApplicationState, PositionType};

/// Derived submit-eligibility and advisory conditions, recomputed on every
/// read of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Eligibility {
    pub all_acknowledged: bool,
    pub can_submit: bool,
    /// Advisory only: part-time is a legal selection that cannot be hired for
    /// right now. Independent of `can_submit`.
    pub show_part_time_notice: bool,
    pub show_acknowledgment_warning: bool,
}

pub fn eligibility(state: &ApplicationState) -> Eligibility {
    let all_acknowledged = ACKNOWLEDGMENTS
        .iter()
        .all(|ack| state.acknowledgments.confirmed(ack.key));

    let contact_complete = !state.first_name.is_empty()
        && !state.last_name.is_empty()
        && !state.email.is_empty()
        && !state.phone.is_empty();

    Eligibility {
        all_acknowledged,
        can_submit: contact_complete
            && state.position_type == PositionType::FullTime
            && all_acknowledged,
        show_part_time_notice: state.position_type == PositionType::PartTime,
        show_acknowledgment_warning: !all_acknowledged,
    }
}
