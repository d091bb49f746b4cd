use std::time::Duration;

use egui::Ui;

use crate::{
    data::bus::BusPosition,
    map::panel::{MapPanel, PanelStatus},
};

use super::windows;

/// How often a loading map re-checks for completion and timeout.
const LOADING_REPAINT: Duration = Duration::from_millis(250);

/// Draws the map panel for the current frame.
///
/// Hands `buses` to the panel first, so markers follow the caller's list, then
/// shows the token form, the loading spinner or the map itself.
pub fn show(ui: &mut Ui, panel: &mut MapPanel, buses: &[BusPosition]) {
    panel.poll();
    panel.update_buses(buses);

    match panel.status() {
        PanelStatus::Uninitialized | PanelStatus::Failed => windows::token_form(ui, panel),
        PanelStatus::Initializing => {
            windows::loading(ui, panel.loading_for().unwrap_or_default());
            ui.ctx().request_repaint_after(LOADING_REPAINT);
        }
        PanelStatus::Ready => {
            if let Some(surface) = panel.surface_mut() {
                surface.show(ui);
            }
            if let Some(report) = panel.last_report() {
                for (id, error) in &report.skipped {
                    ui.colored_label(
                        egui::Color32::from_rgb(153, 27, 27),
                        format!("Bus {} not shown: {}", id, error.message()),
                    );
                }
            }
        }
    }
}
