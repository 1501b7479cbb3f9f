//! Resume reconciliation — merges an extraction result into the live form
//! without discarding anything the applicant typed.

use crate::form::models::{ApplicationState, ParsedResumeData};

/// Merges `parsed` into `state`, field by field.
///
/// Identity and contact fields are replaced whenever the extraction produced a
/// non-empty value — a successful import wins even over prior manual input.
/// The experience summary is prepended to the existing narrative, separated by
/// a blank line. Position preference, start date, references, motivation, and
/// the acknowledgments are never touched.
pub fn apply_parsed_resume(state: &mut ApplicationState, parsed: &ParsedResumeData) {
    fill(&mut state.first_name, parsed.first_name.as_deref());
    fill(&mut state.last_name, parsed.last_name.as_deref());
    fill(&mut state.email, parsed.email.as_deref());
    fill(&mut state.phone, parsed.phone.as_deref());
    fill(&mut state.address, parsed.address.as_deref());

    if let Some(summary) = present(parsed.experience_summary.as_deref()) {
        state.experience = format!("{}\n\n{}", summary, state.experience)
            .trim()
            .to_string();
    }
}

/// Extractors report missing fields as absent or empty strings; both count as
/// "no data".
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn fill(target: &mut String, incoming: Option<&str>) {
    if let Some(value) = present(incoming) {
        *target = value.to_string();
    }
}
