use egui::Color32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStatus {
    OnTime,
    Delayed,
}

impl RouteStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RouteStatus::OnTime => "On Time",
            RouteStatus::Delayed => "Delayed",
        }
    }

    /// Badge colors as `(background, text)`.
    pub fn colors(&self) -> (Color32, Color32) {
        match self {
            RouteStatus::OnTime => (
                Color32::from_rgb(220, 252, 231),
                Color32::from_rgb(22, 101, 52),
            ),
            RouteStatus::Delayed => (
                Color32::from_rgb(254, 226, 226),
                Color32::from_rgb(153, 27, 27),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    Low,
    Medium,
    High,
}

impl Occupancy {
    /// Classifies a load ratio: above 0.8 is high, above 0.6 is medium.
    pub fn from_ratio(ratio: f32) -> Self {
        if ratio > 0.8 {
            Occupancy::High
        } else if ratio > 0.6 {
            Occupancy::Medium
        } else {
            Occupancy::Low
        }
    }

    pub fn color(&self) -> Color32 {
        match self {
            Occupancy::Low => Color32::from_rgb(34, 197, 94),
            Occupancy::Medium => Color32::from_rgb(234, 179, 8),
            Occupancy::High => Color32::from_rgb(239, 68, 68),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A bus line shown as a card in the routes strip.
pub struct BusRoute {
    pub id: String,
    pub name: String,
    pub status: RouteStatus,
    pub next_arrival: String,
    pub passengers: u32,
    pub capacity: u32,
    pub stops: Vec<String>,
    pub color: Color32,
}

impl BusRoute {
    pub fn occupancy_ratio(&self) -> f32 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.passengers as f32 / self.capacity as f32
    }

    pub fn occupancy(&self) -> Occupancy {
        Occupancy::from_ratio(self.occupancy_ratio())
    }

    /// Stops joined for display, e.g. `City Center → Mall Plaza`.
    pub fn stops_label(&self) -> String {
        self.stops.join(" → ")
    }
}

/// Share of routes running on time, in percent. `None` when there are no routes.
pub fn on_time_percent(routes: &[BusRoute]) -> Option<u32> {
    if routes.is_empty() {
        return None;
    }
    let on_time = routes
        .iter()
        .filter(|route| route.status == RouteStatus::OnTime)
        .count();
    Some((on_time * 100 / routes.len()) as u32)
}
