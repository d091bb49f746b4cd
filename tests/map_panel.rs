use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use transit_dashboard::{
    data::bus::BusPosition,
    errors::error_types::ErrorTypes,
    map::{
        markers::MarkerSpec,
        panel::{MapPanel, PanelStatus},
        provider::{MapProvider, MapSurface, MarkerHandle, ViewSettings},
        token::AccessToken,
    },
};

const WAIT: Duration = Duration::from_secs(5);
/// Extra time spent loading the token "pk.slow".
const SLOW_LOAD: Duration = Duration::from_millis(300);

#[derive(Default)]
struct Stats {
    loads_finished: usize,
    tokens: Vec<String>,
    live_surfaces: usize,
    live_markers: usize,
    placed: Vec<MarkerSpec>,
    overlays: Vec<MarkerHandle>,
}

struct RecordingSurface {
    stats: Arc<Mutex<Stats>>,
    markers: Vec<(MarkerHandle, MarkerSpec)>,
    next: u64,
    destroyed: bool,
}

impl MapSurface for RecordingSurface {
    fn add_marker(&mut self, marker: &MarkerSpec) -> Result<MarkerHandle, ErrorTypes> {
        self.next += 1;
        let handle = MarkerHandle(self.next);
        self.markers.push((handle, marker.clone()));
        let mut stats = self.stats.lock().unwrap();
        stats.live_markers += 1;
        stats.placed.push(marker.clone());
        Ok(handle)
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        let before = self.markers.len();
        self.markers.retain(|(h, _)| *h != handle);
        self.stats.lock().unwrap().live_markers -= before - self.markers.len();
    }

    fn show_overlay(&mut self, handle: MarkerHandle) {
        self.stats.lock().unwrap().overlays.push(handle);
    }

    fn marker_count(&self) -> usize {
        self.markers.len()
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        let mut stats = self.stats.lock().unwrap();
        stats.live_markers -= self.markers.len();
        stats.live_surfaces -= 1;
        self.markers.clear();
    }

    fn show(&mut self, _ui: &mut egui::Ui) {}
}

struct RecordingProvider {
    stats: Arc<Mutex<Stats>>,
    delay: Duration,
}

impl MapProvider for RecordingProvider {
    fn name(&self) -> &str {
        "recording"
    }

    fn load(
        &self,
        token: &AccessToken,
        _view: &ViewSettings,
    ) -> Result<Box<dyn MapSurface>, ErrorTypes> {
        thread::sleep(self.delay);
        if token.as_str() == "pk.slow" {
            thread::sleep(SLOW_LOAD);
        }
        let mut stats = self.stats.lock().unwrap();
        stats.loads_finished += 1;
        stats.tokens.push(token.as_str().to_string());
        if token.as_str() == "rejected" {
            return Err(ErrorTypes::invalid_token(199, "Token rejected".to_string()));
        }
        if token.as_str() == "offline" {
            return Err(ErrorTypes::widget_init(299, "Network down".to_string()));
        }
        stats.live_surfaces += 1;
        Ok(Box::new(RecordingSurface {
            stats: Arc::clone(&self.stats),
            markers: Vec::new(),
            next: 0,
            destroyed: false,
        }))
    }
}

fn panel_with(delay: Duration, timeout: Duration) -> (MapPanel, Arc<Mutex<Stats>>) {
    let stats = Arc::new(Mutex::new(Stats::default()));
    let provider = RecordingProvider {
        stats: Arc::clone(&stats),
        delay,
    };
    let view = ViewSettings {
        center: (-74.006, 40.7128).into(),
        zoom: 12.0,
    };
    (MapPanel::new(Arc::new(provider), view, timeout), stats)
}

fn panel() -> (MapPanel, Arc<Mutex<Stats>>) {
    panel_with(Duration::ZERO, WAIT)
}

fn ready_panel() -> (MapPanel, Arc<Mutex<Stats>>) {
    let (mut panel, stats) = panel();
    panel.initialize("pk.test").unwrap();
    panel.poll_timeout(WAIT);
    assert_eq!(panel.status(), PanelStatus::Ready);
    (panel, stats)
}

/// Polls until the abandoned load has been delivered and released.
fn settle_abandoned_load(panel: &mut MapPanel, stats: &Arc<Mutex<Stats>>) {
    for _ in 0..500 {
        panel.poll();
        {
            let stats = stats.lock().unwrap();
            if stats.loads_finished == 1 && stats.live_surfaces == 0 {
                return;
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
    panic!("abandoned surface was never released");
}

fn three_buses() -> Vec<BusPosition> {
    vec![
        BusPosition::new("23", "Main St & 5th Ave", (-74.006, 40.7128), "35 km/h", "North"),
        BusPosition::new("15", "University Campus", (-73.9965, 40.7295), "25 km/h", "East"),
        BusPosition::new("42", "Downtown Terminal", (-74.0113, 40.7033), "0 km/h", "Stopped"),
    ]
}

#[test]
fn test_starts_uninitialized_with_token_form() {
    let (mut panel, _) = panel();
    assert_eq!(panel.status(), PanelStatus::Uninitialized);
    assert!(panel.shows_token_form());
    assert!(!panel.can_confirm());

    panel.token_input().push_str("pk.abc");
    assert!(panel.can_confirm());
}

#[test]
fn test_confirm_moves_to_initializing_once() {
    let (mut panel, _) = panel_with(Duration::from_millis(100), WAIT);
    panel.token_input().push_str("pk.abc");

    assert!(panel.confirm().is_ok());
    assert_eq!(panel.status(), PanelStatus::Initializing);

    let second = panel.confirm().unwrap_err();
    assert_eq!(second.code(), 201);
    assert_eq!(panel.status(), PanelStatus::Initializing);
    assert!(!panel.can_confirm());
}

#[test]
fn test_empty_token_fails_and_keeps_form() {
    let (mut panel, stats) = panel();
    assert!(!panel.can_confirm());

    let error = panel.initialize("").unwrap_err();

    assert!(matches!(error, ErrorTypes::InvalidToken { .. }));
    assert_eq!(panel.status(), PanelStatus::Failed);
    assert!(panel.shows_token_form());
    thread::sleep(Duration::from_millis(50));
    assert_eq!(stats.lock().unwrap().loads_finished, 0);
}

#[test]
fn test_whitespace_token_reaches_provider_unchanged() {
    let (mut panel, stats) = panel_with(Duration::from_millis(50), WAIT);
    panel.token_input().push_str("   ");
    assert!(panel.can_confirm());

    assert!(panel.confirm().is_ok());
    assert_eq!(panel.status(), PanelStatus::Initializing);

    panel.poll_timeout(WAIT);
    assert_eq!(stats.lock().unwrap().tokens, vec!["   "]);
}

#[test]
fn test_successful_load_places_one_marker_per_bus() {
    let (mut panel, stats) = panel();
    panel.update_buses(&three_buses());
    assert_eq!(panel.marker_count(), 0);

    panel.initialize("pk.test").unwrap();
    panel.poll_timeout(WAIT);

    assert_eq!(panel.status(), PanelStatus::Ready);
    assert_eq!(panel.marker_count(), 3);
    assert_eq!(stats.lock().unwrap().live_markers, 3);
}

#[test]
fn test_markers_are_not_touched_before_ready() {
    let (mut panel, stats) = panel_with(Duration::from_millis(100), WAIT);
    panel.initialize("pk.test").unwrap();

    assert_eq!(panel.sync_markers(&three_buses()).unwrap_err().code(), 203);
    panel.update_buses(&three_buses());
    assert!(stats.lock().unwrap().placed.is_empty());

    panel.poll_timeout(WAIT);
    assert_eq!(panel.marker_count(), 3);
}

#[test]
fn test_single_bus_scenario() {
    let (mut panel, stats) = ready_panel();
    let bus = BusPosition::new("23", "Main St & 5th Ave", (-74.006, 40.7128), "35 km/h", "North");

    let report = panel.sync_markers(&[bus]).unwrap();

    assert_eq!(report.placed, 1);
    assert_eq!(panel.marker_ids(), vec!["23"]);
    let stats = stats.lock().unwrap();
    let marker = stats.placed.last().unwrap();
    assert_eq!(marker.label, "23");
    assert_eq!((marker.position.lon, marker.position.lat), (-74.006, 40.7128));
    let overlay = marker.overlay.lines.join("\n");
    assert!(overlay.contains("Main St & 5th Ave"));
    assert!(overlay.contains("35 km/h"));
}

#[test]
fn test_shrinking_list_leaves_no_stale_markers() {
    let (mut panel, stats) = ready_panel();
    panel.update_buses(&three_buses());
    assert_eq!(panel.marker_count(), 3);

    let only_23: Vec<BusPosition> = three_buses().into_iter().filter(|b| b.id == "23").collect();
    panel.update_buses(&only_23);

    assert_eq!(panel.marker_ids(), vec!["23"]);
    assert_eq!(stats.lock().unwrap().live_markers, 1);
}

#[test]
fn test_empty_sync_clears_and_is_idempotent() {
    let (mut panel, stats) = ready_panel();
    panel.sync_markers(&three_buses()).unwrap();

    panel.sync_markers(&[]).unwrap();
    panel.sync_markers(&[]).unwrap();

    assert_eq!(panel.marker_count(), 0);
    assert_eq!(stats.lock().unwrap().live_markers, 0);
}

#[test]
fn test_repeated_sync_gives_same_count() {
    let (mut panel, stats) = ready_panel();

    let first = panel.sync_markers(&three_buses()).unwrap();
    let second = panel.sync_markers(&three_buses()).unwrap();

    assert_eq!(first.placed, second.placed);
    assert_eq!(panel.marker_count(), 3);
    assert_eq!(stats.lock().unwrap().live_markers, 3);
}

#[test]
fn test_unchanged_list_does_not_rebuild() {
    let (mut panel, stats) = ready_panel();
    panel.update_buses(&three_buses());
    panel.update_buses(&three_buses());

    assert_eq!(stats.lock().unwrap().placed.len(), 3);
}

#[test]
fn test_bad_coordinates_skip_only_that_bus() {
    let (mut panel, _) = ready_panel();
    let mut buses = three_buses();
    buses[1].coordinates.lat = 123.0;

    let report = panel.sync_markers(&buses).unwrap();

    assert_eq!(report.placed, 2);
    assert_eq!(report.skipped[0].0, "15");
    assert_eq!(panel.marker_ids(), vec!["23", "42"]);
}

#[test]
fn test_rejected_load_is_retryable() {
    let (mut panel, _) = panel();
    panel.initialize("rejected").unwrap();
    panel.poll_timeout(WAIT);

    assert_eq!(panel.status(), PanelStatus::Failed);
    let error = panel.error().unwrap();
    assert_eq!(error.code(), 199);
    assert!(error.is_retryable());
    assert!(panel.shows_token_form());

    panel.initialize("pk.good").unwrap();
    panel.poll_timeout(WAIT);
    assert_eq!(panel.status(), PanelStatus::Ready);
}

#[test]
fn test_widget_failure_surfaces_as_failed() {
    let (mut panel, _) = panel();
    panel.initialize("offline").unwrap();
    panel.poll_timeout(WAIT);

    assert!(matches!(
        panel.error(),
        Some(ErrorTypes::WidgetInitFailure { code: 299, .. })
    ));
}

#[test]
fn test_slow_load_times_out_and_late_surface_is_released() {
    let (mut panel, stats) = panel_with(Duration::from_millis(200), Duration::from_millis(20));
    panel.initialize("pk.slow").unwrap();
    thread::sleep(Duration::from_millis(40));
    panel.poll();

    assert_eq!(panel.status(), PanelStatus::Failed);
    assert_eq!(panel.error().unwrap().code(), 204);

    settle_abandoned_load(&mut panel, &stats);
    assert_eq!(panel.status(), PanelStatus::Failed);
}

#[test]
fn test_queued_attempt_is_not_timed_out_behind_abandoned_load() {
    let (mut panel, stats) = panel_with(Duration::ZERO, Duration::from_millis(150));
    panel.initialize("pk.slow").unwrap();
    thread::sleep(Duration::from_millis(20));
    panel.teardown();
    panel.initialize("pk.fast").unwrap();

    thread::sleep(Duration::from_millis(200));
    panel.poll();
    assert_eq!(panel.status(), PanelStatus::Initializing);

    panel.poll_timeout(WAIT);
    assert_eq!(panel.status(), PanelStatus::Ready);
    let stats = stats.lock().unwrap();
    assert_eq!(stats.tokens, vec!["pk.slow", "pk.fast"]);
    assert_eq!(stats.live_surfaces, 1);
}

#[test]
fn test_teardown_in_every_state() {
    let (mut fresh, _) = panel();
    fresh.teardown();
    fresh.teardown();
    assert_eq!(fresh.status(), PanelStatus::Uninitialized);

    let (mut failed, _) = panel();
    let _ = failed.initialize("");
    failed.teardown();
    assert_eq!(failed.status(), PanelStatus::Uninitialized);

    let (mut ready, stats) = ready_panel();
    ready.update_buses(&three_buses());
    ready.teardown();
    assert_eq!(ready.status(), PanelStatus::Uninitialized);
    assert_eq!(ready.marker_count(), 0);
    let stats = stats.lock().unwrap();
    assert_eq!(stats.live_surfaces, 0);
    assert_eq!(stats.live_markers, 0);
}

#[test]
fn test_teardown_while_initializing_releases_late_surface() {
    let (mut panel, stats) = panel_with(Duration::from_millis(100), WAIT);
    panel.initialize("pk.test").unwrap();

    panel.teardown();
    assert_eq!(panel.status(), PanelStatus::Uninitialized);

    settle_abandoned_load(&mut panel, &stats);
    assert_eq!(panel.status(), PanelStatus::Uninitialized);
}

#[test]
fn test_drop_releases_surface() {
    let (mut panel, stats) = ready_panel();
    panel.update_buses(&three_buses());

    drop(panel);

    let stats = stats.lock().unwrap();
    assert_eq!(stats.live_surfaces, 0);
    assert_eq!(stats.live_markers, 0);
}

#[test]
fn test_focus_bus_opens_overlay() {
    let (mut panel, stats) = ready_panel();
    panel.update_buses(&three_buses());

    assert!(panel.focus_bus("15"));
    assert!(!panel.focus_bus("99"));
    assert_eq!(stats.lock().unwrap().overlays.len(), 1);
}
