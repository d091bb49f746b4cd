use chrono::Local;
use egui::{Button, RichText, TextEdit, Ui};

use crate::data::searches::{relative_label, SearchHistory};

/// "Plan Your Journey" form plus the recent searches list.
pub struct SearchSection {
    from: String,
    to: String,
    history: SearchHistory,
    last_query: Option<(String, String)>,
}

impl SearchSection {
    pub fn new(history: SearchHistory) -> Self {
        Self {
            from: String::new(),
            to: String::new(),
            history,
            last_query: None,
        }
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    /// Records a trip search. Route computation is not available, so the
    /// search only lands in the history.
    pub fn search(&mut self, from: &str, to: &str) -> bool {
        if !self.history.record(from, to, Local::now()) {
            return false;
        }
        log::info!("Searching routes from '{}' to '{}'", from.trim(), to.trim());
        self.last_query = Some((from.trim().to_string(), to.trim().to_string()));
        true
    }

    pub fn show(&mut self, ui: &mut Ui) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.heading("Plan Your Journey");
            ui.add_space(6.0);
            ui.add(
                TextEdit::singleline(&mut self.from)
                    .hint_text("📍 From (Current location)")
                    .desired_width(f32::INFINITY),
            );
            ui.add(
                TextEdit::singleline(&mut self.to)
                    .hint_text("➤ To (Destination)")
                    .desired_width(f32::INFINITY),
            );
            let ready = !self.from.trim().is_empty() && !self.to.trim().is_empty();
            let find = ui.add_enabled(
                ready,
                Button::new(RichText::new("🔍 Find Routes").strong())
                    .min_size(egui::vec2(ui.available_width(), 36.0)),
            );
            if find.clicked() {
                let (from, to) = (self.from.clone(), self.to.clone());
                self.search(&from, &to);
            }
            if let Some((from, to)) = &self.last_query {
                ui.label(RichText::new(format!("Showing routes from {} to {}", from, to)).weak());
            }
        });

        ui.add_space(12.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new("Recent Searches").size(16.0));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add_enabled(!self.history.is_empty(), Button::new("Clear all"))
                        .clicked()
                    {
                        self.history.clear();
                    }
                });
            });

            if self.history.is_empty() {
                ui.label(RichText::new("No recent searches").weak());
            }

            let now = Local::now();
            let mut again = None;
            for entry in self.history.entries() {
                ui.horizontal(|ui| {
                    ui.label("🕑");
                    ui.vertical(|ui| {
                        ui.label(entry.title());
                        ui.label(RichText::new(relative_label(entry.searched_at, now)).small().weak());
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("Search Again").clicked() {
                            again = Some((entry.from.clone(), entry.to.clone()));
                        }
                    });
                });
            }
            if let Some((from, to)) = again {
                self.search(&from, &to);
                self.from = from;
                self.to = to;
            }
        });
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_search_records_and_remembers_query() {
        let mut section = SearchSection::new(SearchHistory::default());
        assert!(section.search(" Airport ", "City Center"));
        assert_eq!(section.history().entries()[0].title(), "Airport → City Center");
        assert_eq!(
            section.last_query,
            Some(("Airport".to_string(), "City Center".to_string()))
        );
    }

    #[test]
    fn test_incomplete_search_is_ignored() {
        let mut section = SearchSection::new(SearchHistory::default());
        assert!(!section.search("Airport", ""));
        assert!(section.last_query.is_none());
    }
}
