use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use egui::{Context, Pos2, Ui};
use walkers::{
    sources::{Attribution, TileSource},
    HttpOptions, HttpTiles, Map, MapMemory, Position, TileId, Tiles,
};

use crate::{
    errors::error_types::ErrorTypes,
    map::{
        markers::MarkerSpec,
        provider::{MapProvider, MapSurface, MarkerHandle, ProviderKind, ViewSettings},
        token::AccessToken,
    },
};

use super::{plugins::BusMarkers, windows};

/// Height of the map area, in points.
pub const MAP_HEIGHT: f32 = 320.0;

/// Returns the HTTP options for tile downloads.
///
/// # Arguments
/// * `cache` - Directory for the tile disk cache, if any.
fn http_options(cache: Option<PathBuf>) -> HttpOptions {
    HttpOptions {
        cache: if cfg!(target_os = "android") { None } else { cache },
        ..Default::default()
    }
}

/// Builds the provider selected in the configuration.
pub fn build_provider(
    kind: ProviderKind,
    egui_ctx: Context,
    cache: Option<PathBuf>,
) -> Arc<dyn MapProvider> {
    match kind {
        ProviderKind::Mapbox => Arc::new(MapboxProvider { egui_ctx, cache }),
        ProviderKind::Thunderforest => Arc::new(ThunderforestProvider { egui_ctx, cache }),
    }
}

/// Checks the shape of a Mapbox access token.
///
/// Only public (`pk.`) tokens are accepted: secret tokens must never be shipped
/// to a client.
pub fn check_mapbox_token(token: &AccessToken) -> Result<(), ErrorTypes> {
    let value = token.as_str();
    if value.starts_with("sk.") {
        return Err(ErrorTypes::invalid_token(
            111,
            "Secret Mapbox tokens are not allowed here, use a public (pk.) token".to_string(),
        ));
    }
    let payload = value.strip_prefix("pk.").unwrap_or_default();
    if payload.is_empty() {
        return Err(ErrorTypes::invalid_token(
            110,
            "Mapbox public tokens start with 'pk.'".to_string(),
        ));
    }
    Ok(())
}

/// Checks the shape of a Thunderforest API key (32 hexadecimal characters).
pub fn check_thunderforest_key(token: &AccessToken) -> Result<(), ErrorTypes> {
    let value = token.as_str();
    if value.len() != 32 || !value.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ErrorTypes::invalid_token(
            120,
            "Thunderforest API keys are 32 hexadecimal characters".to_string(),
        ));
    }
    Ok(())
}

/// Mapbox "streets" tiles.
pub struct MapboxProvider {
    egui_ctx: Context,
    cache: Option<PathBuf>,
}

impl MapProvider for MapboxProvider {
    fn name(&self) -> &str {
        ProviderKind::Mapbox.label()
    }

    fn token_hint(&self) -> &str {
        "pk.eyJ1IjoieW91cnVzZXJuYW1lIi..."
    }

    fn signup_url(&self) -> Option<&str> {
        Some("https://mapbox.com/")
    }

    fn load(
        &self,
        token: &AccessToken,
        view: &ViewSettings,
    ) -> Result<Box<dyn MapSurface>, ErrorTypes> {
        check_mapbox_token(token)?;
        let tiles = HttpTiles::with_options(
            walkers::sources::Mapbox {
                style: walkers::sources::MapboxStyle::Streets,
                access_token: token.as_str().to_string(),
                high_resolution: false,
            },
            http_options(self.cache.clone()),
            self.egui_ctx.to_owned(),
        );
        Ok(Box::new(WalkersSurface::new(Box::new(tiles), view)))
    }
}

/// Thunderforest "transport" style, which highlights transit lines.
struct ThunderforestTransport {
    api_key: String,
}

impl TileSource for ThunderforestTransport {
    fn tile_url(&self, tile_id: TileId) -> String {
        format!(
            "https://tile.thunderforest.com/transport/{}/{}/{}.png?apikey={}",
            tile_id.zoom, tile_id.x, tile_id.y, self.api_key
        )
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: "Maps © Thunderforest, Data © OpenStreetMap contributors",
            url: "https://www.thunderforest.com/",
            logo_light: None,
            logo_dark: None,
        }
    }
}

pub struct ThunderforestProvider {
    egui_ctx: Context,
    cache: Option<PathBuf>,
}

impl MapProvider for ThunderforestProvider {
    fn name(&self) -> &str {
        ProviderKind::Thunderforest.label()
    }

    fn token_hint(&self) -> &str {
        "0123456789abcdef0123456789abcdef"
    }

    fn signup_url(&self) -> Option<&str> {
        Some("https://www.thunderforest.com/")
    }

    fn load(
        &self,
        token: &AccessToken,
        view: &ViewSettings,
    ) -> Result<Box<dyn MapSurface>, ErrorTypes> {
        check_thunderforest_key(token)?;
        let tiles = HttpTiles::with_options(
            ThunderforestTransport {
                api_key: token.as_str().to_string(),
            },
            http_options(self.cache.clone()),
            self.egui_ctx.to_owned(),
        );
        Ok(Box::new(WalkersSurface::new(Box::new(tiles), view)))
    }
}

/// A marker placed on a `WalkersSurface`.
pub struct PlacedMarker {
    pub spec: MarkerSpec,
    pub position: Position,
}

/// Marker currently showing its info window, and where it was last drawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct Selection {
    pub handle: Option<MarkerHandle>,
    pub anchor: Option<Pos2>,
}

/// Map surface rendered with the `walkers` widget.
pub struct WalkersSurface {
    tiles: Option<Box<dyn Tiles + Send>>,
    memory: MapMemory,
    center: Position,
    markers: BTreeMap<MarkerHandle, PlacedMarker>,
    next_handle: u64,
    selection: Selection,
}

impl WalkersSurface {
    pub fn new(tiles: Box<dyn Tiles + Send>, view: &ViewSettings) -> Self {
        let mut memory = MapMemory::default();
        if memory.set_zoom(view.zoom as f32).is_err() {
            log::warn!("Ignoring unsupported zoom {}", view.zoom);
        }
        Self {
            tiles: Some(tiles),
            memory,
            center: Position::from_lon_lat(view.center.lon, view.center.lat),
            markers: BTreeMap::new(),
            next_handle: 0,
            selection: Selection::default(),
        }
    }
}

impl MapSurface for WalkersSurface {
    fn add_marker(&mut self, marker: &MarkerSpec) -> Result<MarkerHandle, ErrorTypes> {
        if self.tiles.is_none() {
            return Err(ErrorTypes::marker_sync(
                310,
                "Cannot place markers on a destroyed map".to_string(),
            ));
        }
        marker.position.validate()?;
        self.next_handle += 1;
        let handle = MarkerHandle(self.next_handle);
        self.markers.insert(
            handle,
            PlacedMarker {
                spec: marker.clone(),
                position: Position::from_lon_lat(marker.position.lon, marker.position.lat),
            },
        );
        Ok(handle)
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.markers.remove(&handle);
        if self.selection.handle == Some(handle) {
            self.selection = Selection::default();
        }
    }

    fn show_overlay(&mut self, handle: MarkerHandle) {
        if self.markers.contains_key(&handle) {
            self.selection = Selection {
                handle: Some(handle),
                anchor: None,
            };
        }
    }

    fn marker_count(&self) -> usize {
        self.markers.len()
    }

    fn destroy(&mut self) {
        self.markers.clear();
        self.selection = Selection::default();
        self.tiles = None;
    }

    fn show(&mut self, ui: &mut Ui) {
        let Some(tiles) = self.tiles.as_mut() else {
            ui.label("Map unavailable");
            return;
        };

        windows::zoom(ui, &mut self.memory);

        let layer = BusMarkers::new(&self.markers, &mut self.selection);
        let map = Map::new(Some(tiles.as_mut()), &mut self.memory, self.center).with_plugin(layer);
        ui.allocate_ui(egui::vec2(ui.available_width(), MAP_HEIGHT), |ui| {
            ui.add(map);
        });

        if let Some(marker) = self.selection.handle.and_then(|h| self.markers.get(&h)) {
            if !windows::bus_info(ui, &marker.spec, self.selection.anchor) {
                self.selection = Selection::default();
            }
        }
    }
}
