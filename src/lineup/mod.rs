use std::collections::HashSet;

use log::warn;

use crate::catalog::{CatalogEntry, SlotRole};
use crate::errors::ParcFermeError;

/// The fixed sequence of roles a roster is made of. The default layout is
/// the standard fantasy game: five driver slots followed by two constructor
/// slots.
#[derive(Clone, Debug)]
pub struct RosterLayout {
    roles: Vec<SlotRole>,
}

impl RosterLayout {
    pub fn new(roles: Vec<SlotRole>) -> Self {
        Self { roles }
    }

    pub fn slot_count(&self) -> usize {
        self.roles.len()
    }

    pub fn role_of(&self, index: usize) -> Option<SlotRole> {
        self.roles.get(index).copied()
    }
}

impl Default for RosterLayout {
    fn default() -> Self {
        Self {
            roles: vec![
                SlotRole::Driver,
                SlotRole::Driver,
                SlotRole::Driver,
                SlotRole::Driver,
                SlotRole::Driver,
                SlotRole::Constructor,
                SlotRole::Constructor,
            ],
        }
    }
}

/// Slot/pool state for one roster. The slot array has a fixed length for
/// the lifetime of the lineup; the pool is the subset of the catalog not
/// currently occupying any slot, in catalog order.
///
/// Entries are tracked by id. Assigning over an occupied slot does NOT
/// return the previous occupant to the pool; only `clear` does, because
/// `clear` rebuilds the pool from the full catalog. Callers that want
/// replace semantics must clear first.
#[derive(Clone, Debug)]
pub struct Lineup {
    catalog: Vec<CatalogEntry>,
    slots: Vec<Option<CatalogEntry>>,
    pool: Vec<CatalogEntry>,
}

impl Lineup {
    /// Build a lineup from the season catalog and optional initial slot
    /// assignments. Short assignment lists are padded with empty slots;
    /// lists longer than `slot_count` are truncated.
    pub fn new(
        catalog: Vec<CatalogEntry>,
        initial_assignments: Vec<Option<CatalogEntry>>,
        slot_count: usize,
    ) -> Self {
        if initial_assignments.len() > slot_count {
            warn!(
                "{} initial assignments for {} slots, truncating",
                initial_assignments.len(),
                slot_count
            );
        }
        let mut slots = initial_assignments;
        slots.truncate(slot_count);
        slots.resize(slot_count, None);

        let pool = Self::pool_for(&catalog, &slots);
        Self {
            catalog,
            slots,
            pool,
        }
    }

    fn pool_for(catalog: &[CatalogEntry], slots: &[Option<CatalogEntry>]) -> Vec<CatalogEntry> {
        let assigned: HashSet<u64> = slots
            .iter()
            .flatten()
            .map(|entry| entry.id())
            .collect();
        catalog
            .iter()
            .filter(|entry| !assigned.contains(&entry.id()))
            .cloned()
            .collect()
    }

    fn check_index(&self, index: usize) -> Result<(), ParcFermeError> {
        if index >= self.slots.len() {
            return Err(ParcFermeError::SlotOutOfRange {
                index,
                slot_count: self.slots.len(),
            });
        }
        Ok(())
    }

    /// Place `entry` in the slot and drop it from the pool. An occupied
    /// slot is silently overwritten. Re-adding an id that is not in the
    /// pool leaves the pool untouched.
    pub fn assign(&mut self, index: usize, entry: CatalogEntry) -> Result<(), ParcFermeError> {
        self.check_index(index)?;
        let entry_id = entry.id();
        self.slots[index] = Some(entry);
        self.pool.retain(|pooled| pooled.id() != entry_id);
        Ok(())
    }

    /// Empty the slot and rebuild the pool from the catalog minus every id
    /// still assigned. Clearing an already-empty slot is a no-op.
    pub fn clear(&mut self, index: usize) -> Result<(), ParcFermeError> {
        self.check_index(index)?;
        self.slots[index] = None;
        self.pool = Self::pool_for(&self.catalog, &self.slots);
        Ok(())
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Option<CatalogEntry>] {
        &self.slots
    }

    pub fn occupant(&self, index: usize) -> Option<&CatalogEntry> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    pub fn pool(&self) -> &[CatalogEntry] {
        &self.pool
    }

    pub fn catalog(&self) -> &[CatalogEntry] {
        &self.catalog
    }

    /// True once every slot is occupied.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_some())
    }
}
