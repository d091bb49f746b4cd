use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use egui::{Context, RichText, ScrollArea, Ui};

use crate::{
    config::DashboardConfig,
    data::{mock, routes::on_time_percent, routes::BusRoute},
    map::panel::MapPanel,
};

use super::{
    header::Header, provider::build_provider, routes, search::SearchSection,
    tracking::LiveTracking,
};

/// Width share of the search column next to the tracking card.
const SEARCH_COLUMN_SHARE: f32 = 1.0 / 3.0;

/// Main application structure.
pub struct DashboardApp {
    header: Header,
    search: SearchSection,
    tracking: LiveTracking,
    routes: Vec<BusRoute>,
}

impl DashboardApp {
    /// Creates a new instance of `DashboardApp`.
    ///
    /// # Arguments
    /// * `egui_ctx` - The Egui context.
    /// * `config` - The loaded dashboard configuration.
    pub fn new(egui_ctx: Context, config: &DashboardConfig) -> Self {
        egui_extras::install_image_loaders(&egui_ctx);

        let provider = build_provider(
            config.provider,
            egui_ctx.to_owned(),
            config.tile_cache.clone(),
        );
        log::info!("Using {} map provider", provider.name());

        let repaint_ctx = egui_ctx.to_owned();
        let map_panel = MapPanel::from_config(provider, config)
            .with_notifier(Arc::new(move || repaint_ctx.request_repaint()));

        let now = Local::now();
        Self {
            header: Header::new(mock::notifications(now)),
            search: SearchSection::new(mock::recent_searches(now)),
            tracking: LiveTracking::new(
                map_panel,
                mock::active_buses(),
                Duration::from_secs(config.refresh_secs),
            ),
            routes: mock::bus_routes(),
        }
    }

    fn quick_stats(&self, ui: &mut Ui) {
        let on_time = on_time_percent(&self.routes)
            .map(|percent| format!("{}%", percent))
            .unwrap_or_else(|| "–".to_string());
        let stats = [
            (self.routes.len().to_string(), "Active Routes"),
            (self.tracking.buses().len().to_string(), "Buses Running"),
            (on_time, "On-Time Performance"),
        ];
        ui.columns(stats.len(), |columns| {
            for (ui, (value, label)) in columns.iter_mut().zip(stats) {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(value).size(24.0).strong());
                    ui.label(RichText::new(label).weak());
                });
            }
        });
    }
}

impl eframe::App for DashboardApp {
    /// Updates the application state.
    ///
    /// # Arguments
    /// * `ctx` - The Egui context.
    /// * `_frame` - The Eframe frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            self.header.show(ui);
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal_top(|ui| {
                    let search_width = ui.available_width() * SEARCH_COLUMN_SHARE;
                    ui.vertical(|ui| {
                        ui.set_width(search_width);
                        self.search.show(ui);
                    });
                    ui.add_space(16.0);
                    ui.vertical(|ui| {
                        ui.set_width(ui.available_width());
                        egui::Frame::group(ui.style()).show(ui, |ui| {
                            self.tracking.show(ui);
                        });
                    });
                });

                ui.add_space(24.0);
                routes::show(ui, &self.routes);
                ui.add_space(24.0);
                self.quick_stats(ui);
            });
        });
    }
}
