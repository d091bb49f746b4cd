use std::time::{Duration, Instant};

use egui::{Button, Color32, RichText, Ui};

use crate::{
    data::bus::{simulate_movement, BusPosition},
    map::panel::MapPanel,
};

use super::map;

/// Fake "live update": runs for a fixed time after each refresh.
#[derive(Debug, Clone, Copy)]
pub struct RefreshTimer {
    duration: Duration,
    started: Option<Instant>,
}

impl RefreshTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            started: None,
        }
    }

    /// Starts the timer. Returns `false` if a refresh is already running.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_running(now) {
            return false;
        }
        self.started = Some(now);
        true
    }

    pub fn is_running(&self, now: Instant) -> bool {
        self.started
            .is_some_and(|started| now.duration_since(started) < self.duration)
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let started = self.started?;
        self.duration.checked_sub(now.duration_since(started))
    }
}

/// The "Live Bus Tracking" card: refresh control, map and bus list.
pub struct LiveTracking {
    buses: Vec<BusPosition>,
    map_panel: MapPanel,
    refresh: RefreshTimer,
}

impl LiveTracking {
    pub fn new(map_panel: MapPanel, buses: Vec<BusPosition>, refresh_for: Duration) -> Self {
        Self {
            buses,
            map_panel,
            refresh: RefreshTimer::new(refresh_for),
        }
    }

    pub fn buses(&self) -> &[BusPosition] {
        &self.buses
    }

    fn refresh(&mut self) {
        if self.refresh.start(Instant::now()) {
            simulate_movement(&mut self.buses, &mut rand::thread_rng());
            log::debug!("Refreshed {} bus positions", self.buses.len());
        }
    }

    pub fn show(&mut self, ui: &mut Ui) {
        let now = Instant::now();
        let refreshing = self.refresh.is_running(now);

        ui.horizontal(|ui| {
            ui.heading("Live Bus Tracking");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.add_enabled(!refreshing, Button::new("⟳ Refresh")).clicked() {
                    self.refresh();
                }
                if refreshing {
                    ui.spinner();
                }
                ui.label(RichText::new("● Live").color(Color32::from_rgb(22, 101, 52)));
            });
        });
        if let Some(remaining) = self.refresh.remaining(now) {
            ui.ctx().request_repaint_after(remaining);
        }
        ui.add_space(8.0);

        map::show(ui, &mut self.map_panel, &self.buses);
        ui.add_space(12.0);

        ui.label(RichText::new(format!("⚡ Currently Tracking ({} buses)", self.buses.len())).strong());
        let mut focus = None;
        for bus in &self.buses {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&bus.id).strong().color(Color32::from_rgb(37, 99, 235)));
                    ui.vertical(|ui| {
                        ui.label(&bus.location);
                        ui.label(RichText::new(bus.summary()).small().weak());
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Track").clicked() {
                            focus = Some(bus.id.clone());
                        }
                    });
                });
            });
        }
        if let Some(id) = focus {
            if !self.map_panel.focus_bus(&id) {
                log::info!("Bus {} is not on the map yet", id);
            }
        }
    }
}
