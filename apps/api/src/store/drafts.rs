//! Single-snapshot draft persistence for the application form.
//!
//! One key, whole-snapshot replace on save. Loading overlays the stored
//! snapshot key-by-key onto defaults: unknown keys are ignored, missing keys
//! keep their default, and a snapshot that fails to parse is discarded
//! silently — resuming a session must never fail because of corrupt local
//! state.

use anyhow::Result;
use tracing::warn;

use crate::form::models::ApplicationState;
use crate::store::KvStore;

pub const DRAFT_KEY: &str = "greenvalley_application_draft";

pub fn save_draft(store: &dyn KvStore, state: &ApplicationState) -> Result<()> {
    let snapshot = serde_json::to_string(state)?;
    store.set(DRAFT_KEY, &snapshot)
}

/// Loads the stored draft overlaid onto defaults, or plain defaults when no
/// usable draft exists.
pub fn load_draft(store: &dyn KvStore) -> ApplicationState {
    let raw = match store.get(DRAFT_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return ApplicationState::default(),
        Err(e) => {
            warn!("draft store unreadable ({e}); starting a blank application");
            return ApplicationState::default();
        }
    };
    // `ApplicationState` derives `#[serde(default)]`, so this parse is the
    // overlay: stored values win per key, everything else defaults.
    match serde_json::from_str(&raw) {
        Ok(state) => state,
        Err(e) => {
            warn!("discarding malformed draft ({e}); starting a blank application");
            ApplicationState::default()
        }
    }
}

pub fn clear_draft(store: &dyn KvStore) -> Result<()> {
    store.delete(DRAFT_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::models::{AckKey, Field, PositionType};
    use crate::store::MemoryKvStore;

    fn populated_state() -> ApplicationState {
        let mut state = ApplicationState::default();
        state
            .update_field(Field::FirstName, "Alex".to_string())
            .unwrap();
        state
            .update_field(Field::Email, "alex@example.com".to_string())
            .unwrap();
        state
            .update_field(Field::PositionType, "Full-Time".to_string())
            .unwrap();
        state
            .update_field(Field::Experience, "Greens crew, two seasons.".to_string())
            .unwrap();
        state.update_flag(AckKey::Outdoor, true);
        state.update_flag(AckKey::Machinery, true);
        state
    }

    #[test]
    fn test_save_then_load_round_trips_field_for_field() {
        let store = MemoryKvStore::default();
        let state = populated_state();
        save_draft(&store, &state).unwrap();
        assert_eq!(load_draft(&store), state);
    }

    #[test]
    fn test_load_without_draft_yields_defaults() {
        let store = MemoryKvStore::default();
        assert_eq!(load_draft(&store), ApplicationState::default());
    }

    #[test]
    fn test_malformed_draft_is_discarded_silently() {
        let store = MemoryKvStore::default();
        store.set(DRAFT_KEY, "][ definitely not json").unwrap();
        assert_eq!(load_draft(&store), ApplicationState::default());
    }

    #[test]
    fn test_partial_snapshot_overlays_onto_defaults() {
        let store = MemoryKvStore::default();
        store
            .set(DRAFT_KEY, r#"{"first_name": "Alex", "position_type": "Part-Time"}"#)
            .unwrap();
        let loaded = load_draft(&store);
        assert_eq!(loaded.first_name, "Alex");
        assert_eq!(loaded.position_type, PositionType::PartTime);
        // missing keys keep their defaults
        assert_eq!(loaded.last_name, "");
        assert!(!loaded.acknowledgments.confirmed(AckKey::Outdoor));
    }

    #[test]
    fn test_unknown_keys_from_a_future_shape_are_ignored() {
        let store = MemoryKvStore::default();
        store
            .set(
                DRAFT_KEY,
                r#"{"first_name": "Alex", "pronouns": "they/them", "schema_version": 9}"#,
            )
            .unwrap();
        let loaded = load_draft(&store);
        assert_eq!(loaded.first_name, "Alex");
    }

    #[test]
    fn test_clear_removes_the_draft() {
        let store = MemoryKvStore::default();
        save_draft(&store, &populated_state()).unwrap();
        clear_draft(&store).unwrap();
        assert_eq!(store.get(DRAFT_KEY).unwrap(), None);
        assert_eq!(load_draft(&store), ApplicationState::default());
    }
}
