// Integration tests for the file-backed team store and catalog hydration

use parcferme::catalog::Catalog;
use parcferme::errors::ParcFermeError;
use parcferme::team::{FileTeamStore, TeamPersistence};
use tempfile::TempDir;

fn catalog() -> Catalog {
    Catalog::from_json(
        r#"{
            "season": "2026",
            "drivers": [
                {"id": 1, "first_name": "Ada", "last_name": "Vos", "country": "NL", "price": 30.5, "points": 112.0},
                {"id": 2, "first_name": "Luca", "last_name": "Reyes", "country": "ES", "price": 22.0, "points": 80.0}
            ],
            "constructors": [
                {"id": 100, "name": "Meridian", "country": "GB", "price": 27.0, "points": 150.0}
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn test_saved_team_hydrates_into_slots() {
    let dir = TempDir::new().unwrap();
    let store = FileTeamStore::new(dir.path().to_path_buf(), "hydrate", 3).unwrap();
    store.add_to_team(2, 0).unwrap();
    store.add_to_team(100, 2).unwrap();

    let slots = store.team().hydrate(&catalog());
    assert_eq!(slots[0].as_ref().map(|e| e.id()), Some(2));
    assert!(slots[1].is_none());
    assert_eq!(slots[2].as_ref().map(|e| e.display_name()), Some("Meridian".to_string()));
}

#[test]
fn test_stale_saved_ids_hydrate_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = FileTeamStore::new(dir.path().to_path_buf(), "stale", 2).unwrap();
    // id 7 was on the grid last season, not anymore
    store.add_to_team(7, 0).unwrap();
    store.add_to_team(1, 1).unwrap();

    let slots = store.team().hydrate(&catalog());
    assert!(slots[0].is_none());
    assert_eq!(slots[1].as_ref().map(|e| e.id()), Some(1));
}

#[test]
fn test_two_teams_do_not_share_files() {
    let dir = TempDir::new().unwrap();
    let red = FileTeamStore::new(dir.path().to_path_buf(), "red", 2).unwrap();
    let blue = FileTeamStore::new(dir.path().to_path_buf(), "blue", 2).unwrap();
    red.add_to_team(1, 0).unwrap();
    blue.add_to_team(2, 0).unwrap();

    let red_again = FileTeamStore::new(dir.path().to_path_buf(), "red", 2).unwrap();
    let blue_again = FileTeamStore::new(dir.path().to_path_buf(), "blue", 2).unwrap();
    assert_eq!(red_again.team().slot_entry_ids[0], Some(1));
    assert_eq!(blue_again.team().slot_entry_ids[0], Some(2));
}

#[test]
fn test_reset_flow() {
    let dir = TempDir::new().unwrap();
    {
        let store = FileTeamStore::new(dir.path().to_path_buf(), "season pass", 2).unwrap();
        store.add_to_team(1, 1).unwrap();
    }
    assert!(FileTeamStore::team_exists(dir.path(), "season pass"));
    FileTeamStore::delete_team(dir.path(), "season pass").unwrap();
    assert!(!FileTeamStore::team_exists(dir.path(), "season pass"));

    // resetting twice reports the missing team
    assert!(matches!(
        FileTeamStore::delete_team(dir.path(), "season pass"),
        Err(ParcFermeError::NoSuchTeam { .. })
    ));

    // a fresh store starts empty again
    let store = FileTeamStore::new(dir.path().to_path_buf(), "season pass", 2).unwrap();
    assert_eq!(store.team().slot_entry_ids, vec![None, None]);
}
