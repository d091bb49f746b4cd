use chrono::Local;
use egui::{Color32, RichText, TextEdit, Ui};

use crate::data::notifications::Notification;

pub struct Header {
    query: String,
    notifications: Vec<Notification>,
}

impl Header {
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self {
            query: String::new(),
            notifications,
        }
    }

    pub fn show(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(" PT ")
                    .strong()
                    .color(Color32::WHITE)
                    .background_color(Color32::from_rgb(37, 99, 235)),
            );
            ui.label(RichText::new("SmartTransit").strong().size(18.0));
            ui.add_space(24.0);

            ui.add(
                TextEdit::singleline(&mut self.query)
                    .hint_text("🔍 Search routes, stops, or destinations...")
                    .desired_width(360.0),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.menu_button("👤", |ui| {
                    ui.label(RichText::new("My Account").strong());
                    ui.separator();
                    for item in ["Profile Settings", "Travel History", "Saved Routes"] {
                        if ui.button(item).clicked() {
                            ui.close_menu();
                        }
                    }
                    ui.separator();
                    if ui.button("Sign Out").clicked() {
                        ui.close_menu();
                    }
                });

                let bell = if self.notifications.is_empty() {
                    "🔔".to_string()
                } else {
                    format!("🔔 {}", self.notifications.len())
                };
                ui.menu_button(bell, |ui| {
                    ui.set_min_width(280.0);
                    ui.label(RichText::new("Notifications").strong());
                    let now = Local::now();
                    for notification in &self.notifications {
                        egui::Frame::group(ui.style()).show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.label(&notification.message);
                            ui.label(RichText::new(notification.age_label(now)).small().weak());
                        });
                    }
                });
            });
        });
    }
}
