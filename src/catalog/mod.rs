use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::ParcFermeError;

/// Season catalog bundled with the binary, used when no `--catalog` file is
/// passed on the command line.
const BUNDLED_CATALOG: &str = include_str!("../../assets/catalog.json");

/// The kind of roster slot an entry can occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotRole {
    Driver,
    Constructor,
}

impl std::fmt::Display for SlotRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotRole::Driver => write!(f, "Driver"),
            SlotRole::Constructor => write!(f, "Constructor"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    /// Fantasy budget price, in millions
    pub price: f32,
    /// Fantasy points scored so far this season
    pub points: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Constructor {
    pub id: u64,
    pub name: String,
    pub country: String,
    pub price: f32,
    pub points: f32,
}

/// A selectable catalog entry. Entries are immutable value records; all
/// lineup bookkeeping compares them by `id`, never by reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CatalogEntry {
    Driver(Driver),
    Constructor(Constructor),
}

impl CatalogEntry {
    pub fn id(&self) -> u64 {
        match self {
            CatalogEntry::Driver(d) => d.id,
            CatalogEntry::Constructor(c) => c.id,
        }
    }

    pub fn role(&self) -> SlotRole {
        match self {
            CatalogEntry::Driver(_) => SlotRole::Driver,
            CatalogEntry::Constructor(_) => SlotRole::Constructor,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            CatalogEntry::Driver(d) => format!("{} {}", d.first_name, d.last_name),
            CatalogEntry::Constructor(c) => c.name.clone(),
        }
    }

    pub fn country(&self) -> &str {
        match self {
            CatalogEntry::Driver(d) => &d.country,
            CatalogEntry::Constructor(c) => &c.country,
        }
    }

    pub fn price(&self) -> f32 {
        match self {
            CatalogEntry::Driver(d) => d.price,
            CatalogEntry::Constructor(c) => c.price,
        }
    }

    pub fn points(&self) -> f32 {
        match self {
            CatalogEntry::Driver(d) => d.points,
            CatalogEntry::Constructor(c) => c.points,
        }
    }
}

/// On-disk catalog document: drivers and constructors listed separately the
/// way the season data is published.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct CatalogDocument {
    season: String,
    drivers: Vec<Driver>,
    constructors: Vec<Constructor>,
}

/// The full season catalog, flattened into a single ordered entry list
/// (drivers first, then constructors, both in published order).
#[derive(Clone, Debug)]
pub struct Catalog {
    pub season: String,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    fn from_document(doc: CatalogDocument) -> Result<Self, ParcFermeError> {
        let entries: Vec<CatalogEntry> = doc
            .drivers
            .into_iter()
            .map(CatalogEntry::Driver)
            .chain(doc.constructors.into_iter().map(CatalogEntry::Constructor))
            .collect();

        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id()) {
                return Err(ParcFermeError::DuplicateCatalogId {
                    entry_id: entry.id(),
                });
            }
        }

        Ok(Self {
            season: doc.season,
            entries,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ParcFermeError> {
        let doc: CatalogDocument = serde_json::from_str(json)
            .map_err(|e| ParcFermeError::CatalogParseError { source: e })?;
        Self::from_document(doc)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn entry_by_id(&self, entry_id: u64) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id() == entry_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Supplies the season catalog to the picker. The fetch may fail, in which
/// case the picker shows a terminal error state and does not retry.
pub trait CatalogSupplier: Send {
    fn fetch_catalog(&self) -> Result<Catalog, ParcFermeError>;
}

/// Reads the catalog from a JSON file on disk.
pub struct JsonCatalogSupplier {
    path: PathBuf,
}

impl JsonCatalogSupplier {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CatalogSupplier for JsonCatalogSupplier {
    fn fetch_catalog(&self) -> Result<Catalog, ParcFermeError> {
        let content = fs::read_to_string(&self.path).map_err(|e| ParcFermeError::CatalogIOError {
            path: format!("{:?}", self.path),
            source: e,
        })?;
        Catalog::from_json(&content)
    }
}

/// Serves the season catalog compiled into the binary.
#[derive(Default)]
pub struct BundledCatalogSupplier;

impl CatalogSupplier for BundledCatalogSupplier {
    fn fetch_catalog(&self) -> Result<Catalog, ParcFermeError> {
        Catalog::from_json(BUNDLED_CATALOG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "season": "2026",
            "drivers": [
                {"id": 1, "first_name": "Ada", "last_name": "Vos", "country": "NL", "price": 30.5, "points": 112.0},
                {"id": 2, "first_name": "Luca", "last_name": "Reyes", "country": "ES", "price": 22.0, "points": 80.0}
            ],
            "constructors": [
                {"id": 100, "name": "Meridian", "country": "GB", "price": 27.0, "points": 150.0}
            ]
        }"#
    }

    #[test]
    fn test_parses_catalog_in_published_order() {
        let catalog = Catalog::from_json(sample_json()).unwrap();
        assert_eq!(catalog.season, "2026");
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.entries()[0].id(), 1);
        assert_eq!(catalog.entries()[1].id(), 2);
        assert_eq!(catalog.entries()[2].id(), 100);
        assert_eq!(catalog.entries()[2].role(), SlotRole::Constructor);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let json = r#"{
            "season": "2026",
            "drivers": [
                {"id": 7, "first_name": "Ada", "last_name": "Vos", "country": "NL", "price": 30.5, "points": 112.0}
            ],
            "constructors": [
                {"id": 7, "name": "Meridian", "country": "GB", "price": 27.0, "points": 150.0}
            ]
        }"#;
        match Catalog::from_json(json) {
            Err(ParcFermeError::DuplicateCatalogId { entry_id }) => assert_eq!(entry_id, 7),
            other => panic!("expected duplicate id error, got {:?}", other.map(|c| c.len())),
        }
    }

    #[test]
    fn test_entry_accessors() {
        let catalog = Catalog::from_json(sample_json()).unwrap();
        let driver = catalog.entry_by_id(1).unwrap();
        assert_eq!(driver.display_name(), "Ada Vos");
        assert_eq!(driver.country(), "NL");
        assert_eq!(driver.price(), 30.5);
        let constructor = catalog.entry_by_id(100).unwrap();
        assert_eq!(constructor.display_name(), "Meridian");
        assert_eq!(constructor.points(), 150.0);
    }

    #[test]
    fn test_bundled_catalog_parses() {
        let catalog = BundledCatalogSupplier.fetch_catalog().unwrap();
        assert!(!catalog.is_empty());
        assert!(
            catalog
                .entries()
                .iter()
                .any(|e| e.role() == SlotRole::Constructor)
        );
    }

    #[test]
    fn test_missing_catalog_file() {
        let supplier = JsonCatalogSupplier::new(PathBuf::from("/nonexistent/catalog.json"));
        assert!(matches!(
            supplier.fetch_catalog(),
            Err(ParcFermeError::CatalogIOError { .. })
        ));
    }
}
