use rand::Rng;

use crate::errors::error_types::ErrorTypes;

/// Largest step, in degrees, a bus moves during one simulated refresh.
const MAX_DRIFT_DEGREES: f64 = 0.002;

#[derive(Debug, Clone, Copy, PartialEq)]
/// Geographic position in degrees.
pub struct Coordinates {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinates {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Checks that the coordinates can be placed on a map.
    ///
    /// # Returns
    /// `Result<(), ErrorTypes>` - A `MarkerSyncFailure` if a value is not finite
    /// or outside the valid longitude/latitude ranges.
    pub fn validate(&self) -> Result<(), ErrorTypes> {
        if !self.lon.is_finite() || !self.lat.is_finite() {
            return Err(ErrorTypes::marker_sync(
                300,
                "Coordinates must be finite numbers".to_string(),
            ));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(ErrorTypes::marker_sync(
                301,
                format!("Longitude {} out of range", self.lon),
            ));
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(ErrorTypes::marker_sync(
                302,
                format!("Latitude {} out of range", self.lat),
            ));
        }
        Ok(())
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Live position of one bus, as shown on the map and in the tracking list.
pub struct BusPosition {
    pub id: String,
    pub location: String,
    pub coordinates: Coordinates,
    pub speed: String,
    pub direction: String,
}

impl BusPosition {
    pub fn new(
        id: &str,
        location: &str,
        coordinates: (f64, f64),
        speed: &str,
        direction: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            location: location.to_string(),
            coordinates: coordinates.into(),
            speed: speed.to_string(),
            direction: direction.to_string(),
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.direction.eq_ignore_ascii_case("stopped")
    }

    /// Secondary line of the tracking list and the info window.
    pub fn summary(&self) -> String {
        format!("{} • {}", self.speed, self.direction)
    }
}

/// Nudges every moving bus by a small random offset.
///
/// Stands in for live telemetry when the user presses "Refresh". Stopped buses
/// keep their coordinates.
pub fn simulate_movement<R: Rng>(buses: &mut [BusPosition], rng: &mut R) {
    for bus in buses.iter_mut().filter(|bus| !bus.is_stopped()) {
        bus.coordinates.lon += rng.gen_range(-MAX_DRIFT_DEGREES..=MAX_DRIFT_DEGREES);
        bus.coordinates.lat += rng.gen_range(-MAX_DRIFT_DEGREES..=MAX_DRIFT_DEGREES);
    }
}
