use std::str::FromStr;

use serde::Deserialize;

use super::{markers::MarkerSpec, token::AccessToken};
use crate::{config::DashboardConfig, data::bus::Coordinates, errors::error_types::ErrorTypes};

/// Identifies a marker placed on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Enum representing the supported map providers.
pub enum ProviderKind {
    Mapbox,
    Thunderforest,
}

impl ProviderKind {
    pub fn label(&self) -> &'static str {
        match self {
            ProviderKind::Mapbox => "Mapbox",
            ProviderKind::Thunderforest => "Thunderforest",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ErrorTypes;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mapbox" => Ok(ProviderKind::Mapbox),
            "thunderforest" => Ok(ProviderKind::Thunderforest),
            other => Err(ErrorTypes::new(
                402,
                format!("Unknown map provider '{}'", other),
            )),
        }
    }
}

/// Initial camera of a freshly created surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSettings {
    pub center: Coordinates,
    pub zoom: f64,
}

impl From<&DashboardConfig> for ViewSettings {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            center: config.center.into(),
            zoom: config.zoom,
        }
    }
}

/// An initialized map widget.
///
/// A surface is exclusively owned by one `MapPanel`. Marker operations are only
/// issued after the surface has been handed over by `MapProvider::load`.
pub trait MapSurface: Send {
    /// Places a marker with its info overlay. Fails for unplaceable positions.
    fn add_marker(&mut self, marker: &MarkerSpec) -> Result<MarkerHandle, ErrorTypes>;

    /// Removes a marker. Unknown handles are ignored.
    fn remove_marker(&mut self, handle: MarkerHandle);

    /// Opens the info overlay of a marker.
    fn show_overlay(&mut self, handle: MarkerHandle);

    fn marker_count(&self) -> usize;

    /// Releases the widget and every marker. Safe to call more than once.
    fn destroy(&mut self);

    /// Draws the surface, its navigation controls and any open overlay.
    fn show(&mut self, ui: &mut egui::Ui);
}

/// A mapping backend able to create surfaces.
///
/// `load` runs on a background worker, so providers must be shareable across
/// threads.
pub trait MapProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Placeholder shown in the token field.
    fn token_hint(&self) -> &str {
        ""
    }

    /// Where users can obtain a token.
    fn signup_url(&self) -> Option<&str> {
        None
    }

    /// Creates a surface centered on `view`, with navigation controls.
    fn load(
        &self,
        token: &AccessToken,
        view: &ViewSettings,
    ) -> Result<Box<dyn MapSurface>, ErrorTypes>;
}
