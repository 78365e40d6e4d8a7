use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use log::{debug, error};

use crate::catalog::CatalogEntry;
use crate::errors::ParcFermeError;
use crate::lineup::{Lineup, RosterLayout};
use crate::team::TeamPersistence;

/// How to undo an optimistic mutation if its persistence call fails.
#[derive(Clone, Debug)]
enum Rollback {
    /// undo an add: empty the slot again
    ClearSlot,
    /// undo a remove: put the captured occupant back
    Restore(CatalogEntry),
    /// removing an already-empty slot changed nothing visible
    Nothing,
}

/// Completion report from a persistence worker thread.
struct SlotOutcome {
    slot_index: usize,
    token: u64,
    rollback: Rollback,
    result: Result<(), ParcFermeError>,
}

/// What `poll_outcomes` hands back to the owning component. Failures carry
/// the persistence error so the caller can notify the user; the rollback
/// itself has already been applied (or skipped, for stale outcomes).
#[derive(Debug)]
pub enum PickerNotice {
    Saved {
        slot_index: usize,
    },
    RolledBack {
        slot_index: usize,
        error: ParcFermeError,
    },
    /// The failed operation was already superseded by a newer one on the
    /// same slot; local state was left alone.
    StaleFailure {
        slot_index: usize,
        error: ParcFermeError,
    },
}

/// Coordinates the roster lineup with the team persistence collaborator.
///
/// Mutations are optimistic: the lineup changes immediately and the
/// persistence call runs on a worker thread. Each slot carries a monotonic
/// operation token; a failure only rolls the slot back if its token still
/// matches, so a slow failure can never clobber a newer pick. Completions
/// are delivered through an mpsc channel and applied by `poll_outcomes`,
/// which the owning component calls from its event loop.
pub struct PickerController<P: TeamPersistence + 'static> {
    lineup: Lineup,
    layout: RosterLayout,
    persistence: Arc<P>,
    active_slot: Option<usize>,
    slot_tokens: Vec<u64>,
    outcome_tx: Sender<SlotOutcome>,
    outcome_rx: Receiver<SlotOutcome>,
}

impl<P: TeamPersistence + 'static> PickerController<P> {
    pub fn new(
        catalog: Vec<CatalogEntry>,
        initial_assignments: Vec<Option<CatalogEntry>>,
        layout: RosterLayout,
        persistence: Arc<P>,
    ) -> Self {
        let slot_count = layout.slot_count();
        let lineup = Lineup::new(catalog, initial_assignments, slot_count);
        let (outcome_tx, outcome_rx) = mpsc::channel();
        Self {
            lineup,
            layout,
            persistence,
            active_slot: None,
            slot_tokens: vec![0; slot_count],
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn lineup(&self) -> &Lineup {
        &self.lineup
    }

    pub fn layout(&self) -> &RosterLayout {
        &self.layout
    }

    /// Which slot's selection sheet is open, if any.
    pub fn active_slot(&self) -> Option<usize> {
        self.active_slot
    }

    /// Open the selection sheet for a slot.
    pub fn open_slot(&mut self, slot_index: usize) -> Result<(), ParcFermeError> {
        if slot_index >= self.lineup.slot_count() {
            return Err(ParcFermeError::SlotOutOfRange {
                index: slot_index,
                slot_count: self.lineup.slot_count(),
            });
        }
        self.active_slot = Some(slot_index);
        Ok(())
    }

    /// Close the selection sheet without picking (cancel / escape).
    pub fn close_picker(&mut self) {
        self.active_slot = None;
    }

    /// Pool entries eligible for a slot: unassigned and matching the
    /// slot's role.
    pub fn pool_for_slot(&self, slot_index: usize) -> Vec<&CatalogEntry> {
        let Some(role) = self.layout.role_of(slot_index) else {
            return Vec::new();
        };
        self.lineup
            .pool()
            .iter()
            .filter(|entry| entry.role() == role)
            .collect()
    }

    fn bump_token(&mut self, slot_index: usize) -> u64 {
        self.slot_tokens[slot_index] += 1;
        self.slot_tokens[slot_index]
    }

    fn spawn_persistence<F>(&self, slot_index: usize, token: u64, rollback: Rollback, call: F)
    where
        F: FnOnce(&P) -> Result<(), ParcFermeError> + Send + 'static,
    {
        let persistence = Arc::clone(&self.persistence);
        let outcome_tx = self.outcome_tx.clone();
        thread::spawn(move || {
            let result = call(persistence.as_ref());
            // the controller may have been dropped while we were saving
            if outcome_tx
                .send(SlotOutcome {
                    slot_index,
                    token,
                    rollback,
                    result,
                })
                .is_err()
            {
                debug!("picker gone before persistence outcome for slot {slot_index}");
            }
        });
    }

    /// Optimistically place `entry` in the slot, then persist in the
    /// background. Errors returned here are pre-persistence (bad index,
    /// wrong role for the slot); persistence failures surface later
    /// through `poll_outcomes` after the rollback has been applied.
    pub fn handle_add(
        &mut self,
        slot_index: usize,
        entry: CatalogEntry,
    ) -> Result<(), ParcFermeError> {
        if let Some(expected) = self.layout.role_of(slot_index) {
            if entry.role() != expected {
                return Err(ParcFermeError::SlotRoleMismatch {
                    entry_id: entry.id(),
                    index: slot_index,
                    expected: expected.to_string(),
                });
            }
        }

        let entry_id = entry.id();
        self.lineup.assign(slot_index, entry)?;
        let token = self.bump_token(slot_index);
        if self.active_slot == Some(slot_index) {
            self.active_slot = None;
        }

        self.spawn_persistence(slot_index, token, Rollback::ClearSlot, move |persistence| {
            persistence.add_to_team(entry_id, slot_index)
        });
        Ok(())
    }

    /// Optimistically empty the slot, then persist in the background. The
    /// occupant is captured first so a failed save can restore it.
    pub fn handle_remove(&mut self, slot_index: usize) -> Result<(), ParcFermeError> {
        let captured = self.lineup.occupant(slot_index).cloned();
        self.lineup.clear(slot_index)?;
        let token = self.bump_token(slot_index);

        let rollback = match captured {
            Some(occupant) => Rollback::Restore(occupant),
            None => Rollback::Nothing,
        };
        self.spawn_persistence(slot_index, token, rollback, move |persistence| {
            persistence.remove_from_team(slot_index)
        });
        Ok(())
    }

    /// Drain completed persistence calls, applying rollbacks for failures
    /// whose token still matches the slot. Call this once per event-loop
    /// tick.
    pub fn poll_outcomes(&mut self) -> Vec<PickerNotice> {
        let mut notices = Vec::new();
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            notices.push(self.apply_outcome(outcome));
        }
        notices
    }

    fn apply_outcome(&mut self, outcome: SlotOutcome) -> PickerNotice {
        let slot_index = outcome.slot_index;
        match outcome.result {
            Ok(()) => PickerNotice::Saved { slot_index },
            Err(error) => {
                if self.slot_tokens[slot_index] != outcome.token {
                    debug!("stale persistence failure for slot {slot_index}, ignoring");
                    return PickerNotice::StaleFailure { slot_index, error };
                }
                error!("persistence failed for slot {slot_index}, rolling back: {error}");
                let rolled_back = match outcome.rollback {
                    Rollback::ClearSlot => self.lineup.clear(slot_index),
                    Rollback::Restore(occupant) => self.lineup.assign(slot_index, occupant),
                    Rollback::Nothing => Ok(()),
                };
                if let Err(rollback_error) = rolled_back {
                    // the token matched, so the index cannot have gone bad
                    error!("rollback failed for slot {slot_index}: {rollback_error}");
                }
                PickerNotice::RolledBack { slot_index, error }
            }
        }
    }
}
