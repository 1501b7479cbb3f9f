use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Employment preference. Only `FullTime` is currently hired for; `PartTime`
/// is a legal selection that surfaces an advisory instead of an error
/// (see `validation`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionType {
    #[serde(rename = "Full-Time")]
    FullTime,
    #[serde(rename = "Part-Time")]
    PartTime,
    #[default]
    #[serde(rename = "")]
    Unset,
}

#[derive(Debug, Error)]
#[error("\"{0}\" is not a recognized position preference")]
pub struct InvalidPositionType(pub String);

impl FromStr for PositionType {
    type Err = InvalidPositionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Full-Time" => Ok(Self::FullTime),
            "Part-Time" => Ok(Self::PartTime),
            "" => Ok(Self::Unset),
            other => Err(InvalidPositionType(other.to_string())),
        }
    }
}

/// Writable form fields. Closed set: an unknown field name fails at the
/// deserialization boundary instead of reaching the state model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    PositionType,
    StartDate,
    Experience,
    References,
    Motivation,
}

/// Working-condition disclosure keys, one per entry in
/// `catalog::ACKNOWLEDGMENTS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AckKey {
    Outdoor,
    Physical,
    Machinery,
    Customers,
    Exhaustion,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Acknowledgments {
    pub outdoor: bool,
    pub physical: bool,
    pub machinery: bool,
    pub customers: bool,
    pub exhaustion: bool,
}

impl Acknowledgments {
    pub fn set(&mut self, key: AckKey, confirmed: bool) {
        match key {
            AckKey::Outdoor => self.outdoor = confirmed,
            AckKey::Physical => self.physical = confirmed,
            AckKey::Machinery => self.machinery = confirmed,
            AckKey::Customers => self.customers = confirmed,
            AckKey::Exhaustion => self.exhaustion = confirmed,
        }
    }

    pub fn confirmed(&self, key: AckKey) -> bool {
        match key {
            AckKey::Outdoor => self.outdoor,
            AckKey::Physical => self.physical,
            AckKey::Machinery => self.machinery,
            AckKey::Customers => self.customers,
            AckKey::Exhaustion => self.exhaustion,
        }
    }
}

/// The live application record. Created once per session from defaults
/// (possibly overlaid by a stored draft), mutated in place by field edits and
/// resume reconciliation, serialized wholesale into the draft store.
///
/// `#[serde(default)]` keeps loads tolerant of older snapshots: missing keys
/// fall back to their defaults, unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationState {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub position_type: PositionType,
    pub start_date: String,
    pub experience: String,
    pub references: String,
    pub motivation: String,
    pub acknowledgments: Acknowledgments,
}

impl ApplicationState {
    /// Overwrites a named field. No validation happens here — eligibility is
    /// derived on read, never enforced at write time. The only failure is a
    /// position value outside its enumeration.
    pub fn update_field(&mut self, field: Field, value: String) -> Result<(), InvalidPositionType> {
        match field {
            Field::FirstName => self.first_name = value,
            Field::LastName => self.last_name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Address => self.address = value,
            Field::PositionType => self.position_type = value.parse()?,
            Field::StartDate => self.start_date = value,
            Field::Experience => self.experience = value,
            Field::References => self.references = value,
            Field::Motivation => self.motivation = value,
        }
        Ok(())
    }

    pub fn update_flag(&mut self, key: AckKey, confirmed: bool) {
        self.acknowledgments.set(key, confirmed);
    }
}

/// Best-effort structured extraction from an uploaded resume. Every field is
/// independently optional; an all-empty result is a valid success. Carries no
/// position preference, no dates, and no acknowledgments — those are never
/// auto-filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedResumeData {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub experience_summary: Option<String>,
}

/// Lifecycle of the optional resume import. At most one import is in flight;
/// `Success` and `Error` are display states a later upload may restart from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Parsing,
    Success,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_fully_blank() {
        let state = ApplicationState::default();
        assert_eq!(state.first_name, "");
        assert_eq!(state.last_name, "");
        assert_eq!(state.email, "");
        assert_eq!(state.phone, "");
        assert_eq!(state.address, "");
        assert_eq!(state.position_type, PositionType::Unset);
        assert_eq!(state.start_date, "");
        assert_eq!(state.experience, "");
        assert_eq!(state.references, "");
        assert_eq!(state.motivation, "");
        assert_eq!(state.acknowledgments, Acknowledgments::default());
    }

    #[test]
    fn test_default_acknowledgments_all_false() {
        let acks = Acknowledgments::default();
        for key in [
            AckKey::Outdoor,
            AckKey::Physical,
            AckKey::Machinery,
            AckKey::Customers,
            AckKey::Exhaustion,
        ] {
            assert!(!acks.confirmed(key));
        }
    }

    #[test]
    fn test_update_field_overwrites_unconditionally() {
        let mut state = ApplicationState::default();
        state
            .update_field(Field::FirstName, "Alex".to_string())
            .unwrap();
        assert_eq!(state.first_name, "Alex");
        state.update_field(Field::FirstName, String::new()).unwrap();
        assert_eq!(state.first_name, "");
    }

    #[test]
    fn test_update_position_type_parses_enumeration() {
        let mut state = ApplicationState::default();
        state
            .update_field(Field::PositionType, "Full-Time".to_string())
            .unwrap();
        assert_eq!(state.position_type, PositionType::FullTime);
        state
            .update_field(Field::PositionType, "Part-Time".to_string())
            .unwrap();
        assert_eq!(state.position_type, PositionType::PartTime);
        state
            .update_field(Field::PositionType, String::new())
            .unwrap();
        assert_eq!(state.position_type, PositionType::Unset);
    }

    #[test]
    fn test_update_position_type_rejects_unknown_value() {
        let mut state = ApplicationState::default();
        let err = state
            .update_field(Field::PositionType, "Seasonal".to_string())
            .unwrap_err();
        assert!(err.to_string().contains("Seasonal"));
        assert_eq!(state.position_type, PositionType::Unset);
    }

    #[test]
    fn test_update_flag_sets_and_clears() {
        let mut state = ApplicationState::default();
        state.update_flag(AckKey::Machinery, true);
        assert!(state.acknowledgments.confirmed(AckKey::Machinery));
        state.update_flag(AckKey::Machinery, false);
        assert!(!state.acknowledgments.confirmed(AckKey::Machinery));
    }

    #[test]
    fn test_position_type_serde_uses_display_labels() {
        assert_eq!(
            serde_json::to_string(&PositionType::FullTime).unwrap(),
            r#""Full-Time""#
        );
        assert_eq!(
            serde_json::to_string(&PositionType::Unset).unwrap(),
            r#""""#
        );
        let parsed: PositionType = serde_json::from_str(r#""Part-Time""#).unwrap();
        assert_eq!(parsed, PositionType::PartTime);
    }

    #[test]
    fn test_field_deserializes_snake_case() {
        let field: Field = serde_json::from_str(r#""first_name""#).unwrap();
        assert_eq!(field, Field::FirstName);
        assert!(serde_json::from_str::<Field>(r#""shoe_size""#).is_err());
    }

    #[test]
    fn test_parsed_resume_data_tolerates_partial_payloads() {
        let parsed: ParsedResumeData =
            serde_json::from_str(r#"{"first_name": "Sam", "experience_summary": ""}"#).unwrap();
        assert_eq!(parsed.first_name.as_deref(), Some("Sam"));
        assert_eq!(parsed.experience_summary.as_deref(), Some(""));
        assert_eq!(parsed.last_name, None);
    }
}
