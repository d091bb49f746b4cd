use std::collections::HashMap;

use super::provider::{MapSurface, MarkerHandle};
use crate::{
    data::bus::{BusPosition, Coordinates},
    errors::error_types::ErrorTypes,
};

/// Text shown in a marker's popup.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoOverlay {
    pub title: String,
    pub lines: Vec<String>,
}

/// Everything a surface needs to place one bus marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub label: String,
    pub position: Coordinates,
    pub overlay: InfoOverlay,
}

impl From<&BusPosition> for MarkerSpec {
    fn from(bus: &BusPosition) -> Self {
        Self {
            label: bus.id.clone(),
            position: bus.coordinates,
            overlay: InfoOverlay {
                title: format!("Bus {}", bus.id),
                lines: vec![bus.location.clone(), bus.summary()],
            },
        }
    }
}

/// Outcome of one marker synchronization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    pub placed: usize,
    /// Buses that could not be placed, with the reason.
    pub skipped: Vec<(String, ErrorTypes)>,
}

/// Markers currently placed on a surface, keyed by bus id.
#[derive(Debug, Default)]
pub struct MarkerSet {
    placed: Vec<(String, MarkerHandle)>,
}

impl MarkerSet {
    /// Replaces every marker on `surface` with one marker per bus.
    ///
    /// Repeated ids keep the last entry. A bus whose marker cannot be placed is
    /// skipped and reported; the remaining buses are still placed.
    pub fn sync(&mut self, surface: &mut dyn MapSurface, buses: &[BusPosition]) -> SyncReport {
        self.clear(surface);

        let mut report = SyncReport::default();
        for bus in latest_by_id(buses) {
            let placed = bus
                .coordinates
                .validate()
                .and_then(|_| surface.add_marker(&MarkerSpec::from(bus)));
            match placed {
                Ok(handle) => {
                    self.placed.push((bus.id.clone(), handle));
                    report.placed += 1;
                }
                Err(err) => {
                    log::warn!("Skipping marker for bus {}: {}", bus.id, err);
                    report.skipped.push((bus.id.clone(), err));
                }
            }
        }
        log::debug!(
            "Synced {} markers ({} skipped)",
            report.placed,
            report.skipped.len()
        );
        report
    }

    /// Removes every marker from `surface`.
    pub fn clear(&mut self, surface: &mut dyn MapSurface) {
        for (_, handle) in self.placed.drain(..) {
            surface.remove_marker(handle);
        }
    }

    pub fn handle(&self, bus_id: &str) -> Option<MarkerHandle> {
        self.placed
            .iter()
            .find(|(id, _)| id == bus_id)
            .map(|(_, handle)| *handle)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.placed.iter().map(|(id, _)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}

/// Keeps the first-seen order of ids but the last-seen entry for each.
fn latest_by_id(buses: &[BusPosition]) -> Vec<&BusPosition> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut latest: Vec<&BusPosition> = Vec::new();
    for bus in buses {
        match slots.get(bus.id.as_str()) {
            Some(&slot) => latest[slot] = bus,
            None => {
                slots.insert(bus.id.as_str(), latest.len());
                latest.push(bus);
            }
        }
    }
    latest
}
