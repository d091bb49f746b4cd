use egui::{Color32, RichText, ScrollArea, Ui};

use crate::data::routes::BusRoute;

const CARD_WIDTH: f32 = 300.0;

/// Horizontal strip of route cards.
pub fn show(ui: &mut Ui, routes: &[BusRoute]) {
    ui.horizontal(|ui| {
        ui.heading("Active Bus Routes");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(format!("{} routes active", routes.len()))
                    .color(Color32::from_rgb(37, 99, 235)),
            );
        });
    });

    ScrollArea::horizontal().show(ui, |ui| {
        ui.horizontal_top(|ui| {
            for route in routes {
                route_card(ui, route);
            }
        });
    });
}

fn route_card(ui: &mut Ui, route: &BusRoute) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(CARD_WIDTH);
        ui.horizontal(|ui| {
            ui.label(RichText::new("🚌").size(20.0).color(route.color));
            ui.vertical(|ui| {
                ui.label(RichText::new(format!("Bus {}", route.id)).strong());
                ui.label(RichText::new(&route.name).small().weak());
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let (background, text) = route.status.colors();
                ui.label(
                    RichText::new(route.status.label())
                        .color(text)
                        .background_color(background),
                );
            });
        });
        ui.add_space(6.0);
        ui.label(
            RichText::new(format!("🕑 Next arrival: {}", route.next_arrival))
                .color(Color32::from_rgb(37, 99, 235)),
        );
        ui.horizontal(|ui| {
            ui.label(format!("👥 {}/{} passengers", route.passengers, route.capacity));
            ui.label(RichText::new("●").color(route.occupancy().color()));
        });
        ui.label(RichText::new("📍 Route stops").small().weak());
        ui.label(RichText::new(route.stops_label()).small());
    });
}
