use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{
    loader::{LoadOutcome, Loader, LoaderEvent, Notifier},
    markers::{MarkerSet, SyncReport},
    provider::{MapProvider, MapSurface, ViewSettings},
    token::AccessToken,
};
use crate::{config::DashboardConfig, data::bus::BusPosition, errors::error_types::ErrorTypes};

/// Lifecycle of the map widget.
pub enum PanelState {
    /// No token confirmed yet; the token form is shown.
    Uninitialized,
    /// A load is queued or running on the worker. `started` is set once the
    /// worker picks the attempt up; the timeout runs from there.
    Initializing {
        attempt: u64,
        started: Option<Instant>,
    },
    /// The surface is up and carries the bus markers.
    Ready {
        surface: Box<dyn MapSurface>,
        markers: MarkerSet,
    },
    /// The last attempt failed; the token form is shown again with the error.
    Failed { error: ErrorTypes },
}

/// Data-less view of `PanelState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelStatus {
    Uninitialized,
    Initializing,
    Ready,
    Failed,
}

/// Owns the map widget, the token entry flow and the bus markers.
pub struct MapPanel {
    state: PanelState,
    token_input: String,
    loader: Loader,
    view: ViewSettings,
    init_timeout: Duration,
    last_attempt: u64,
    buses: Vec<BusPosition>,
    needs_sync: bool,
    last_report: Option<SyncReport>,
}

impl MapPanel {
    pub fn new(
        provider: Arc<dyn MapProvider>,
        view: ViewSettings,
        init_timeout: Duration,
    ) -> Self {
        Self {
            state: PanelState::Uninitialized,
            token_input: String::new(),
            loader: Loader::new(provider),
            view,
            init_timeout,
            last_attempt: 0,
            buses: Vec::new(),
            needs_sync: false,
            last_report: None,
        }
    }

    pub fn from_config(provider: Arc<dyn MapProvider>, config: &DashboardConfig) -> Self {
        Self::new(
            provider,
            ViewSettings::from(config),
            Duration::from_secs(config.init_timeout_secs),
        )
    }

    /// Sets a callback fired when a background load finishes.
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.loader.set_notifier(notifier);
        self
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn status(&self) -> PanelStatus {
        match self.state {
            PanelState::Uninitialized => PanelStatus::Uninitialized,
            PanelState::Initializing { .. } => PanelStatus::Initializing,
            PanelState::Ready { .. } => PanelStatus::Ready,
            PanelState::Failed { .. } => PanelStatus::Failed,
        }
    }

    pub fn provider(&self) -> &dyn MapProvider {
        self.loader.provider()
    }

    pub fn error(&self) -> Option<&ErrorTypes> {
        match &self.state {
            PanelState::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// Text field backing the token form.
    pub fn token_input(&mut self) -> &mut String {
        &mut self.token_input
    }

    pub fn shows_token_form(&self) -> bool {
        matches!(
            self.state,
            PanelState::Uninitialized | PanelState::Failed { .. }
        )
    }

    /// Whether the confirm button should be enabled.
    pub fn can_confirm(&self) -> bool {
        self.shows_token_form() && !self.token_input.is_empty()
    }

    /// Confirms the token typed into the form.
    pub fn confirm(&mut self) -> Result<(), ErrorTypes> {
        let token = self.token_input.clone();
        self.initialize(&token)
    }

    /// Starts creating the map surface with `token`.
    ///
    /// Only accepted from `Uninitialized` or `Failed`. While a load is in flight
    /// or once the map is ready the call is rejected and the state is left
    /// untouched. An empty token moves the panel to `Failed` with an
    /// `InvalidToken` error; any other value goes to the provider unchanged.
    pub fn initialize(&mut self, token: &str) -> Result<(), ErrorTypes> {
        match self.state {
            PanelState::Initializing { .. } => {
                return Err(ErrorTypes::widget_init(
                    201,
                    "Map initialization already in progress".to_string(),
                ))
            }
            PanelState::Ready { .. } => {
                return Err(ErrorTypes::widget_init(
                    202,
                    "Map is already initialized".to_string(),
                ))
            }
            PanelState::Uninitialized | PanelState::Failed { .. } => {}
        }

        let token = match AccessToken::parse(token) {
            Ok(token) => token,
            Err(error) => {
                self.state = PanelState::Failed {
                    error: error.clone(),
                };
                return Err(error);
            }
        };

        self.last_attempt += 1;
        self.loader.start(self.last_attempt, token, self.view);
        self.state = PanelState::Initializing {
            attempt: self.last_attempt,
            started: None,
        };
        Ok(())
    }

    /// Picks up a finished load, if any, and enforces the load timeout.
    ///
    /// Call once per frame. Surfaces from attempts that are no longer current
    /// are destroyed.
    pub fn poll(&mut self) {
        while let Some(event) = self.loader.try_recv() {
            self.handle(event);
        }
        self.check_timeout();
    }

    /// Like `poll`, but waits up to `wait` for a pending load to finish.
    pub fn poll_timeout(&mut self, wait: Duration) {
        let deadline = Instant::now() + wait;
        while let PanelState::Initializing { .. } = self.state {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.loader.recv_timeout(remaining) {
                Some(event) => {
                    self.handle(event);
                    self.check_timeout();
                }
                None => break,
            }
        }
        self.poll();
    }

    fn handle(&mut self, event: LoaderEvent) {
        match event {
            LoaderEvent::Started { attempt, at } => {
                if let PanelState::Initializing {
                    attempt: current,
                    started,
                } = &mut self.state
                {
                    if *current == attempt {
                        *started = Some(at);
                    }
                }
            }
            LoaderEvent::Finished(outcome) => self.adopt(outcome),
        }
    }

    fn adopt(&mut self, outcome: LoadOutcome) {
        let current = match self.state {
            PanelState::Initializing { attempt, .. } => attempt == outcome.attempt,
            _ => false,
        };
        if !current {
            log::debug!("Discarding stale map load (attempt {})", outcome.attempt);
            outcome.discard();
            return;
        }

        match outcome.take() {
            Ok(surface) => {
                log::info!("{} map ready", self.loader.provider().name());
                self.state = PanelState::Ready {
                    surface,
                    markers: MarkerSet::default(),
                };
                self.needs_sync = true;
                self.sync_pending();
            }
            Err(error) => {
                log::error!("Map initialization failed: {}", error);
                self.state = PanelState::Failed { error };
            }
        }
    }

    fn check_timeout(&mut self) {
        if let PanelState::Initializing {
            started: Some(started),
            ..
        } = self.state
        {
            if started.elapsed() >= self.init_timeout {
                log::error!("Map did not load within {:?}", self.init_timeout);
                self.state = PanelState::Failed {
                    error: ErrorTypes::widget_init(
                        204,
                        "The map took too long to load. Check your connection and try again."
                            .to_string(),
                    ),
                };
            }
        }
    }

    /// Hands the panel the caller's current bus list.
    ///
    /// Markers are rebuilt when the list differs from the previous one, or as
    /// soon as the map becomes ready.
    pub fn update_buses(&mut self, buses: &[BusPosition]) {
        if self.buses != buses {
            self.buses = buses.to_vec();
            self.needs_sync = true;
        }
        self.sync_pending();
    }

    fn sync_pending(&mut self) {
        if !self.needs_sync {
            return;
        }
        if let PanelState::Ready { surface, markers } = &mut self.state {
            self.last_report = Some(markers.sync(surface.as_mut(), &self.buses));
            self.needs_sync = false;
        }
    }

    /// Replaces every marker with one marker per bus in `buses`.
    ///
    /// # Returns
    /// `Result<SyncReport, ErrorTypes>` - The placement report, or a
    /// `WidgetInitFailure` when the map is not ready yet.
    pub fn sync_markers(&mut self, buses: &[BusPosition]) -> Result<SyncReport, ErrorTypes> {
        match &mut self.state {
            PanelState::Ready { surface, markers } => {
                let report = markers.sync(surface.as_mut(), buses);
                self.buses = buses.to_vec();
                self.needs_sync = false;
                self.last_report = Some(report.clone());
                Ok(report)
            }
            _ => Err(ErrorTypes::widget_init(
                203,
                "Markers can only be placed once the map is ready".to_string(),
            )),
        }
    }

    pub fn last_report(&self) -> Option<&SyncReport> {
        self.last_report.as_ref()
    }

    pub fn marker_count(&self) -> usize {
        match &self.state {
            PanelState::Ready { markers, .. } => markers.len(),
            _ => 0,
        }
    }

    pub fn marker_ids(&self) -> Vec<String> {
        match &self.state {
            PanelState::Ready { markers, .. } => markers.ids().map(str::to_string).collect(),
            _ => Vec::new(),
        }
    }

    /// Opens the info overlay of a bus. Returns whether the bus is on the map.
    pub fn focus_bus(&mut self, bus_id: &str) -> bool {
        if let PanelState::Ready { surface, markers } = &mut self.state {
            if let Some(handle) = markers.handle(bus_id) {
                surface.show_overlay(handle);
                return true;
            }
        }
        false
    }

    pub fn surface_mut(&mut self) -> Option<&mut dyn MapSurface> {
        match &mut self.state {
            PanelState::Ready { surface, .. } => Some(surface.as_mut()),
            _ => None,
        }
    }

    /// Time spent in the current load, once the worker has started it.
    pub fn loading_for(&self) -> Option<Duration> {
        match self.state {
            PanelState::Initializing {
                started: Some(started),
                ..
            } => Some(started.elapsed()),
            _ => None,
        }
    }

    /// Releases the surface and every marker and returns to `Uninitialized`.
    ///
    /// Safe in any state. A load still in flight is abandoned: its surface is
    /// destroyed when it arrives.
    pub fn teardown(&mut self) {
        match std::mem::replace(&mut self.state, PanelState::Uninitialized) {
            PanelState::Ready {
                mut surface,
                mut markers,
            } => {
                markers.clear(surface.as_mut());
                surface.destroy();
                log::info!("Map torn down");
            }
            PanelState::Initializing { attempt, .. } => {
                log::debug!("Abandoning map load (attempt {})", attempt);
            }
            PanelState::Uninitialized | PanelState::Failed { .. } => {}
        }
        while let Some(event) = self.loader.try_recv() {
            if let LoaderEvent::Finished(outcome) = event {
                outcome.discard();
            }
        }
        self.token_input.clear();
        self.last_report = None;
    }
}

impl Drop for MapPanel {
    fn drop(&mut self) {
        self.teardown();
    }
}
