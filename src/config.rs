use std::{fs, io::ErrorKind, path::Path, path::PathBuf};

use serde::Deserialize;

use crate::errors::error_types::ErrorTypes;
use crate::map::provider::ProviderKind;

/// Highest zoom level served by the supported tile sources.
pub const MAX_ZOOM: f64 = 19.0;

/// Runtime configuration of the dashboard.
///
/// Every field has a default, so an empty (or missing) `dashboard.json` is a
/// valid configuration. The map access token is never part of it: it is typed
/// by the user and held in memory only.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub provider: ProviderKind,
    /// Initial map center as `(longitude, latitude)`.
    pub center: (f64, f64),
    pub zoom: f64,
    pub init_timeout_secs: u64,
    /// Disk cache for downloaded tiles. `None` disables caching.
    pub tile_cache: Option<PathBuf>,
    /// How long the simulated "Refresh" keeps its spinner running.
    pub refresh_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Mapbox,
            center: (-74.006, 40.7128),
            zoom: 12.0,
            init_timeout_secs: 20,
            tile_cache: Some(".cache".into()),
            refresh_secs: 2,
        }
    }
}

impl DashboardConfig {
    /// Loads the configuration from `path`, then applies environment overrides.
    ///
    /// # Arguments
    /// * `path` - JSON file to read. A missing file yields the defaults.
    ///
    /// # Returns
    /// `Result<DashboardConfig, ErrorTypes>` - The configuration, or a 4xx error
    /// if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ErrorTypes> {
        let config = match fs::read_to_string(path) {
            Ok(data) => Self::from_json(&data)?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                return Err(ErrorTypes::new(
                    400,
                    format!("Failed to read {}: {}", path.display(), err),
                ))
            }
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_json(data: &str) -> Result<Self, ErrorTypes> {
        let config: Self = serde_json::from_str(data)
            .map_err(|e| ErrorTypes::new(401, format!("Invalid configuration: {}", e)))?;
        Ok(config.normalized())
    }

    /// Applies `TRANSIT_MAP_PROVIDER` and `NO_HTTP_CACHE` from `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ErrorTypes>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("TRANSIT_MAP_PROVIDER") {
            self.provider = name.parse()?;
        }
        if lookup("NO_HTTP_CACHE").is_some() {
            self.tile_cache = None;
        }
        Ok(self)
    }

    fn normalized(mut self) -> Self {
        if !self.zoom.is_finite() {
            self.zoom = Self::default().zoom;
        }
        self.zoom = self.zoom.clamp(0.0, MAX_ZOOM);
        self
    }
}
