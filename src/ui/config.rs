use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::errors::ParcFermeError;

const CONFIG_FILE_NAME: &str = "config.json";

/// Sort order for the selection sheet.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PoolSort {
    CatalogOrder,
    PriceDescending,
    PointsDescending,
}

impl PoolSort {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::CatalogOrder => "Catalog order",
            Self::PriceDescending => "Price",
            Self::PointsDescending => "Points",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct WindowPosition {
    pub(crate) x: f32,
    pub(crate) y: f32,
}

impl Default for WindowPosition {
    fn default() -> Self {
        Self { x: 0., y: 0. }
    }
}

impl From<WindowPosition> for Pos2 {
    fn from(value: WindowPosition) -> Self {
        Pos2::new(value.x, value.y)
    }
}

impl From<Pos2> for WindowPosition {
    fn from(value: Pos2) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) pool_sort: PoolSort,
    pub(crate) window_position: WindowPosition,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pool_sort: PoolSort::PriceDescending,
            window_position: WindowPosition::default(),
        }
    }
}

impl AppConfig {
    pub(crate) fn from_local_file() -> Option<Self> {
        let config_path = dirs::config_dir()?.join("parcferme").join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let file = std::fs::File::open(config_path).expect("Could not open config file");
            Some(serde_json::from_reader(file).expect("Could not parse config file"))
        } else {
            None
        }
    }

    pub(crate) fn save(&self) -> Result<(), ParcFermeError> {
        let config_path = dirs::config_dir()
            .ok_or(ParcFermeError::NoConfigDir)?
            .join("parcferme")
            .join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            std::fs::create_dir_all(config_path.parent().unwrap())
                .map_err(|e| ParcFermeError::ConfigIOError { source: e })?;
        }

        let file = std::fs::File::create(config_path)
            .map_err(|e| ParcFermeError::ConfigIOError { source: e })?;
        serde_json::to_writer(file, self)
            .map_err(|e| ParcFermeError::ConfigSerializeError { source: e })
    }
}
