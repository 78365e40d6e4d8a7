// File-backed implementation of the team persistence contract

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::debug;

use crate::errors::ParcFermeError;
use crate::team::{SavedTeam, TeamPersistence};

/// Stores one JSON file per team under the application data directory.
/// The current team is kept in memory behind a mutex so persistence calls
/// can come from worker threads while the UI thread reads.
pub struct FileTeamStore {
    storage_path: PathBuf,
    state: Mutex<SavedTeam>,
}

impl FileTeamStore {
    /// Open (or create) the named team with `slot_count` slots in the
    /// given directory. An existing team file wins over the empty default;
    /// its slot list is padded or truncated to `slot_count`.
    pub fn new(
        storage_path: PathBuf,
        team_name: &str,
        slot_count: usize,
    ) -> Result<Self, ParcFermeError> {
        if !storage_path.exists() {
            fs::create_dir_all(&storage_path)
                .map_err(|e| ParcFermeError::TeamIOError { source: e })?;
        }

        let file_path = Self::file_path_for_team(&storage_path, team_name);
        let mut team = if file_path.exists() {
            Self::read_team_file(&file_path)?
        } else {
            SavedTeam::empty(team_name, slot_count)
        };
        team.slot_entry_ids.truncate(slot_count);
        team.slot_entry_ids.resize(slot_count, None);

        Ok(Self {
            storage_path,
            state: Mutex::new(team),
        })
    }

    /// Open the team in the default application data directory.
    pub fn new_default(team_name: &str, slot_count: usize) -> Result<Self, ParcFermeError> {
        Self::new(Self::default_storage_path()?, team_name, slot_count)
    }

    pub fn default_storage_path() -> Result<PathBuf, ParcFermeError> {
        let app_data_dir = dirs::data_dir().ok_or(ParcFermeError::NoDataDir)?;
        Ok(app_data_dir.join("parcferme").join("teams"))
    }

    /// True if a team file already exists for the name, without opening it.
    pub fn team_exists(storage_path: &Path, team_name: &str) -> bool {
        Self::file_path_for_team(storage_path, team_name).exists()
    }

    /// Delete the named team file. Missing files are an error so the CLI
    /// can tell the user nothing was reset.
    pub fn delete_team(storage_path: &Path, team_name: &str) -> Result<(), ParcFermeError> {
        let file_path = Self::file_path_for_team(storage_path, team_name);
        if !file_path.exists() {
            return Err(ParcFermeError::NoSuchTeam {
                name: team_name.to_string(),
            });
        }
        fs::remove_file(file_path).map_err(|e| ParcFermeError::TeamIOError { source: e })
    }

    /// Snapshot of the current saved team.
    pub fn team(&self) -> SavedTeam {
        self.state.lock().expect("team store lock poisoned").clone()
    }

    fn file_path_for_team(storage_path: &Path, team_name: &str) -> PathBuf {
        let filename = format!("{}.json", Self::normalize_team_name(team_name));
        storage_path.join(filename)
    }

    /// Normalize team name for consistent file naming
    fn normalize_team_name(team_name: &str) -> String {
        team_name
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect()
    }

    fn read_team_file(file_path: &Path) -> Result<SavedTeam, ParcFermeError> {
        let content = fs::read_to_string(file_path)
            .map_err(|e| ParcFermeError::TeamIOError { source: e })?;
        serde_json::from_str(&content).map_err(|e| ParcFermeError::TeamSerializeError { source: e })
    }

    fn write_team(&self, team: &SavedTeam) -> Result<(), ParcFermeError> {
        let file_path = Self::file_path_for_team(&self.storage_path, &team.name);
        let file =
            fs::File::create(file_path).map_err(|e| ParcFermeError::TeamIOError { source: e })?;
        serde_json::to_writer_pretty(file, team)
            .map_err(|e| ParcFermeError::TeamSerializeError { source: e })
    }

    fn update_slot(&self, slot_index: usize, entry_id: Option<u64>) -> Result<(), ParcFermeError> {
        let mut state = self.state.lock().expect("team store lock poisoned");
        if slot_index >= state.slot_entry_ids.len() {
            return Err(ParcFermeError::SlotOutOfRange {
                index: slot_index,
                slot_count: state.slot_entry_ids.len(),
            });
        }
        let previous = state.slot_entry_ids[slot_index];
        state.slot_entry_ids[slot_index] = entry_id;
        if let Err(e) = self.write_team(&state) {
            // keep memory and disk in agreement when the write fails
            state.slot_entry_ids[slot_index] = previous;
            return Err(e);
        }
        debug!(
            "team {} slot {} -> {:?}",
            state.name, slot_index, entry_id
        );
        Ok(())
    }
}

impl TeamPersistence for FileTeamStore {
    fn add_to_team(&self, entry_id: u64, slot_index: usize) -> Result<(), ParcFermeError> {
        self.update_slot(slot_index, Some(entry_id))
    }

    fn remove_from_team(&self, slot_index: usize) -> Result<(), ParcFermeError> {
        self.update_slot(slot_index, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_empty_team() {
        let dir = TempDir::new().unwrap();
        let store = FileTeamStore::new(dir.path().to_path_buf(), "Scuderia Test", 7).unwrap();
        let team = store.team();
        assert_eq!(team.name, "Scuderia Test");
        assert_eq!(team.slot_entry_ids, vec![None; 7]);
    }

    #[test]
    fn test_add_remove_round_trip_to_disk() {
        let dir = TempDir::new().unwrap();
        {
            let store = FileTeamStore::new(dir.path().to_path_buf(), "box box", 3).unwrap();
            store.add_to_team(42, 1).unwrap();
        }
        let reopened = FileTeamStore::new(dir.path().to_path_buf(), "box box", 3).unwrap();
        assert_eq!(reopened.team().slot_entry_ids, vec![None, Some(42), None]);

        reopened.remove_from_team(1).unwrap();
        let reopened_again = FileTeamStore::new(dir.path().to_path_buf(), "box box", 3).unwrap();
        assert_eq!(reopened_again.team().slot_entry_ids, vec![None; 3]);
    }

    #[test]
    fn test_normalizes_file_name() {
        let dir = TempDir::new().unwrap();
        let _store = FileTeamStore::new(dir.path().to_path_buf(), "Box Box!", 2).unwrap();
        // created lazily on first write
        let store = FileTeamStore::new(dir.path().to_path_buf(), "Box Box!", 2).unwrap();
        store.add_to_team(1, 0).unwrap();
        assert!(dir.path().join("box_box_.json").exists());
        assert!(FileTeamStore::team_exists(dir.path(), "Box Box!"));
    }

    #[test]
    fn test_out_of_range_slot_rejected() {
        let dir = TempDir::new().unwrap();
        let store = FileTeamStore::new(dir.path().to_path_buf(), "t", 2).unwrap();
        assert!(matches!(
            store.add_to_team(1, 2),
            Err(ParcFermeError::SlotOutOfRange { .. })
        ));
    }

    #[test]
    fn test_delete_team() {
        let dir = TempDir::new().unwrap();
        let store = FileTeamStore::new(dir.path().to_path_buf(), "gone", 2).unwrap();
        store.add_to_team(5, 0).unwrap();
        FileTeamStore::delete_team(dir.path(), "gone").unwrap();
        assert!(!FileTeamStore::team_exists(dir.path(), "gone"));
        assert!(matches!(
            FileTeamStore::delete_team(dir.path(), "gone"),
            Err(ParcFermeError::NoSuchTeam { .. })
        ));
    }

    #[test]
    fn test_existing_team_resized_to_slot_count() {
        let dir = TempDir::new().unwrap();
        {
            let store = FileTeamStore::new(dir.path().to_path_buf(), "resize", 4).unwrap();
            store.add_to_team(9, 3).unwrap();
        }
        let shrunk = FileTeamStore::new(dir.path().to_path_buf(), "resize", 2).unwrap();
        assert_eq!(shrunk.team().slot_entry_ids.len(), 2);
    }
}
