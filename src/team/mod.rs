// Team persistence contracts and the saved-team model

use log::warn;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CatalogEntry};
use crate::errors::ParcFermeError;

pub mod storage;
pub use storage::FileTeamStore;

/// The persisted form of a roster: entry ids only, one per slot. The
/// lineup view is rehydrated against the season catalog on load.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SavedTeam {
    pub name: String,
    pub slot_entry_ids: Vec<Option<u64>>,
}

impl SavedTeam {
    pub fn empty(name: &str, slot_count: usize) -> Self {
        Self {
            name: name.to_string(),
            slot_entry_ids: vec![None; slot_count],
        }
    }

    /// Resolve saved ids against the catalog. Ids that are no longer in
    /// the catalog (season churn) hydrate as empty slots rather than
    /// failing the whole load.
    pub fn hydrate(&self, catalog: &Catalog) -> Vec<Option<CatalogEntry>> {
        self.slot_entry_ids
            .iter()
            .map(|saved| {
                saved.and_then(|entry_id| {
                    let entry = catalog.entry_by_id(entry_id).cloned();
                    if entry.is_none() {
                        warn!("saved entry {entry_id} is not in the current catalog, slot left empty");
                    }
                    entry
                })
            })
            .collect()
    }
}

/// Where roster changes are persisted. Either call may fail; the picker
/// applies changes optimistically and rolls back on failure. A single
/// failed attempt is final: no retry, no queuing.
pub trait TeamPersistence: Send + Sync {
    fn add_to_team(&self, entry_id: u64, slot_index: usize) -> Result<(), ParcFermeError>;
    fn remove_from_team(&self, slot_index: usize) -> Result<(), ParcFermeError>;
}

/// Session facts injected by whoever owns the picker. Authentication
/// itself is an external identity concern; this type only carries the
/// answers the launch gate needs.
#[derive(Clone, Copy, Debug)]
pub struct SessionContext {
    pub authenticated: bool,
    pub has_team: bool,
}

impl SessionContext {
    pub fn ensure_can_pick(&self) -> Result<(), ParcFermeError> {
        if !self.authenticated {
            return Err(ParcFermeError::NotAuthenticated);
        }
        if !self.has_team {
            return Err(ParcFermeError::NoTeamYet);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"{
                "season": "2026",
                "drivers": [
                    {"id": 1, "first_name": "Ada", "last_name": "Vos", "country": "NL", "price": 30.5, "points": 112.0}
                ],
                "constructors": [
                    {"id": 100, "name": "Meridian", "country": "GB", "price": 27.0, "points": 150.0}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_hydrate_resolves_known_ids() {
        let team = SavedTeam {
            name: "test".to_string(),
            slot_entry_ids: vec![Some(1), None, Some(100)],
        };
        let slots = team.hydrate(&catalog());
        assert_eq!(slots[0].as_ref().map(|e| e.id()), Some(1));
        assert!(slots[1].is_none());
        assert_eq!(slots[2].as_ref().map(|e| e.id()), Some(100));
    }

    #[test]
    fn test_hydrate_drops_stale_ids() {
        let team = SavedTeam {
            name: "test".to_string(),
            slot_entry_ids: vec![Some(999)],
        };
        let slots = team.hydrate(&catalog());
        assert!(slots[0].is_none());
    }

    #[test]
    fn test_session_gate() {
        let signed_out = SessionContext {
            authenticated: false,
            has_team: true,
        };
        assert!(matches!(
            signed_out.ensure_can_pick(),
            Err(ParcFermeError::NotAuthenticated)
        ));

        let no_team = SessionContext {
            authenticated: true,
            has_team: false,
        };
        assert!(matches!(
            no_team.ensure_can_pick(),
            Err(ParcFermeError::NoTeamYet)
        ));

        let ready = SessionContext {
            authenticated: true,
            has_team: true,
        };
        assert!(ready.ensure_can_pick().is_ok());
    }
}
