// Error types for parcferme

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum ParcFermeError {
    // Errors for the roster lineup
    #[snafu(display("Slot index {index} out of range, roster has {slot_count} slots"))]
    SlotOutOfRange { index: usize, slot_count: usize },
    #[snafu(display("Entry {entry_id} does not match the {expected} slot {index}"))]
    SlotRoleMismatch {
        entry_id: u64,
        index: usize,
        expected: String,
    },

    // Errors for the season catalog supplier
    #[snafu(display("Unable to read catalog file: {path}"))]
    CatalogIOError { path: String, source: io::Error },
    #[snafu(display("Error parsing catalog file"))]
    CatalogParseError { source: serde_json::Error },
    #[snafu(display("Catalog contains duplicate entry id {entry_id}"))]
    DuplicateCatalogId { entry_id: u64 },

    // Errors for the team store
    #[snafu(display("Could not find application data directory for the team store"))]
    NoDataDir,
    #[snafu(display("Error reading or writing team file"))]
    TeamIOError { source: io::Error },
    #[snafu(display("Error serializing team file"))]
    TeamSerializeError { source: serde_json::Error },
    #[snafu(display("No saved team named {name}"))]
    NoSuchTeam { name: String },
    #[snafu(display("Team save rejected: {reason}"))]
    PersistenceRejected { reason: String },

    // Session gate errors
    #[snafu(display("Not signed in; sign in before picking a team"))]
    NotAuthenticated,
    #[snafu(display("No team exists yet; create one with --create-team"))]
    NoTeamYet,

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },
}
