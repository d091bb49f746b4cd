//! Static sample data shown by the dashboard.

use chrono::{DateTime, Duration, Local};
use egui::Color32;

use super::{
    bus::BusPosition,
    notifications::Notification,
    routes::{BusRoute, RouteStatus},
    searches::{RecentSearch, SearchHistory},
};

pub fn active_buses() -> Vec<BusPosition> {
    vec![
        BusPosition::new("23", "Main St & 5th Ave", (-74.006, 40.7128), "35 km/h", "North"),
        BusPosition::new("15", "University Campus", (-73.9965, 40.7295), "25 km/h", "East"),
        BusPosition::new("42", "Downtown Terminal", (-74.0113, 40.7033), "0 km/h", "Stopped"),
    ]
}

fn route(
    id: &str,
    name: &str,
    status: RouteStatus,
    next_arrival: &str,
    (passengers, capacity): (u32, u32),
    stops: &[&str],
    color: Color32,
) -> BusRoute {
    BusRoute {
        id: id.to_string(),
        name: name.to_string(),
        status,
        next_arrival: next_arrival.to_string(),
        passengers,
        capacity,
        stops: stops.iter().map(|s| s.to_string()).collect(),
        color,
    }
}

pub fn bus_routes() -> Vec<BusRoute> {
    vec![
        route(
            "23",
            "Downtown Express",
            RouteStatus::OnTime,
            "3 min",
            (45, 60),
            &["City Center", "Mall Plaza", "University", "Airport"],
            Color32::from_rgb(37, 99, 235),
        ),
        route(
            "15",
            "Suburban Line",
            RouteStatus::Delayed,
            "8 min",
            (28, 50),
            &["Residential", "School District", "Shopping Center"],
            Color32::from_rgb(249, 115, 22),
        ),
        route(
            "42",
            "Night Service",
            RouteStatus::OnTime,
            "12 min",
            (15, 40),
            &["Downtown", "Hospital", "Train Station"],
            Color32::from_rgb(168, 85, 247),
        ),
        route(
            "08",
            "Metro Connect",
            RouteStatus::OnTime,
            "5 min",
            (52, 70),
            &["Central Hub", "Business District", "Park Avenue"],
            Color32::from_rgb(34, 197, 94),
        ),
        route(
            "31",
            "Campus Shuttle",
            RouteStatus::OnTime,
            "7 min",
            (35, 45),
            &["University Gate", "Library", "Student Center", "Dorms"],
            Color32::from_rgb(59, 130, 246),
        ),
    ]
}

pub fn recent_searches(now: DateTime<Local>) -> SearchHistory {
    let search = |from: &str, to: &str, ago: Duration| RecentSearch {
        from: from.to_string(),
        to: to.to_string(),
        searched_at: now - ago,
    };
    SearchHistory::new(vec![
        search("Downtown Station", "University Campus", Duration::hours(2)),
        search("Airport", "City Center", Duration::hours(26)),
        search("Mall Plaza", "Residential Area", Duration::days(2)),
    ])
}

pub fn notifications(now: DateTime<Local>) -> Vec<Notification> {
    let notification = |id: u32, message: &str, ago: Duration| Notification {
        id,
        message: message.to_string(),
        posted: now - ago,
    };
    vec![
        notification(1, "Bus #23 is running 5 minutes late", Duration::minutes(2)),
        notification(2, "Route 12 service temporarily suspended", Duration::minutes(10)),
        notification(3, "New express route added to downtown", Duration::hours(1)),
    ]
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::data::searches::relative_label;
    use std::collections::HashSet;

    #[test]
    fn test_active_bus_ids_are_unique_and_placeable() {
        let buses = active_buses();
        let ids: HashSet<&str> = buses.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids.len(), buses.len());
        assert!(buses.iter().all(|b| b.coordinates.validate().is_ok()));
    }

    #[test]
    fn test_recent_search_labels() {
        let now = Local::now();
        let labels: Vec<String> = recent_searches(now)
            .entries()
            .iter()
            .map(|s| relative_label(s.searched_at, now))
            .collect();
        assert_eq!(labels, vec!["2 hours ago", "Yesterday", "2 days ago"]);
    }

    #[test]
    fn test_five_routes() {
        assert_eq!(bus_routes().len(), 5);
    }
}
