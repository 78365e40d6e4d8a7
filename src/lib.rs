// Library interface for parcferme
// This allows integration tests to access internal modules

pub mod catalog;
pub mod errors;
pub mod lineup;
pub mod picker;
pub mod team;
pub mod ui;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogEntry, CatalogSupplier, SlotRole};
pub use errors::ParcFermeError;
pub use lineup::{Lineup, RosterLayout};
pub use picker::{PickerController, PickerNotice};
pub use team::{FileTeamStore, SavedTeam, SessionContext, TeamPersistence};
