use std::time::Duration;

use egui::{vec2, Align2, Button, Color32, Id, Key, Pos2, RichText, TextEdit, Ui, Window};
use walkers::MapMemory;

use crate::map::{markers::MarkerSpec, panel::MapPanel};

use super::provider::MAP_HEIGHT;

/// Offset of the info window from its marker, like a popup above a pin.
const POPUP_OFFSET: egui::Vec2 = egui::Vec2::new(16.0, -70.0);

/// Shows the zoom controls.
///
/// # Arguments
/// * `ui` - The Egui UI.
/// * `map_memory` - The map memory.
pub fn zoom(ui: &mut Ui, map_memory: &mut MapMemory) {
    ui.horizontal(|ui| {
        if ui.button(RichText::new("➕").heading()).clicked() {
            let _ = map_memory.zoom_in();
        }

        if ui.button(RichText::new("➖").heading()).clicked() {
            let _ = map_memory.zoom_out();
        }

        if let Some(position) = map_memory.detached() {
            ui.label(format!("{:.04} {:.04}", position.lon(), position.lat()));
            if ui.button("Recenter").clicked() {
                map_memory.follow_my_position();
            }
        }
    });
}

/// Shows the info window of a bus marker.
///
/// # Returns
/// `bool` - `false` once the user has closed the window.
pub fn bus_info(ui: &Ui, marker: &MarkerSpec, anchor: Option<Pos2>) -> bool {
    let mut open = true;
    let window = Window::new(RichText::new(marker.overlay.title.as_str()).strong())
        .id(Id::new(("bus-info", marker.label.as_str())))
        .collapsible(false)
        .resizable(false)
        .open(&mut open);
    let window = match anchor {
        Some(anchor) => window.fixed_pos(anchor + POPUP_OFFSET),
        None => window.anchor(Align2::RIGHT_TOP, [-10., 10.]),
    };
    window.show(ui.ctx(), |ui| {
        for line in &marker.overlay.lines {
            ui.label(line);
        }
    });
    open
}

/// Shows the access token prompt.
///
/// Confirming (button or Enter) starts the map initialization. The last error,
/// if any, is shown above the button so the user can fix the token and retry.
pub fn token_form(ui: &mut Ui, panel: &mut MapPanel) {
    let provider_name = panel.provider().name().to_string();
    let hint = panel.provider().token_hint().to_string();
    let signup_url = panel.provider().signup_url().map(str::to_string);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_size(vec2(ui.available_width(), MAP_HEIGHT));
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(RichText::new("📍").size(32.0));
            ui.heading(format!("Enter {} Token", provider_name));
            if let Some(url) = &signup_url {
                ui.horizontal(|ui| {
                    ui.label("Get your free token from");
                    ui.hyperlink(url);
                });
            }
            ui.add_space(8.0);

            let response = ui.add(
                TextEdit::singleline(panel.token_input())
                    .hint_text(hint)
                    .desired_width(320.0),
            );
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

            if let Some(error) = panel.error() {
                ui.colored_label(Color32::RED, error.message());
            }

            let clicked = ui
                .add_enabled(panel.can_confirm(), Button::new("Initialize Map"))
                .clicked();
            if (clicked || submitted) && panel.can_confirm() {
                if let Err(err) = panel.confirm() {
                    log::warn!("Token rejected: {}", err);
                }
            }
        });
    });
}

/// Shows the spinner while the map is loading.
pub fn loading(ui: &mut Ui, elapsed: Duration) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_size(vec2(ui.available_width(), MAP_HEIGHT));
        ui.vertical_centered(|ui| {
            ui.add_space(MAP_HEIGHT / 2.0 - 30.0);
            ui.spinner();
            ui.label(RichText::new("Loading map...").weak());
            if elapsed > Duration::from_secs(5) {
                ui.label(RichText::new(format!("{}s", elapsed.as_secs())).small().weak());
            }
        });
    });
}
