use std::collections::BTreeMap;

use egui::{Align2, Color32, FontId, Painter, Response, Stroke};
use walkers::{Plugin, Projector};

use crate::map::provider::MarkerHandle;

use super::provider::{PlacedMarker, Selection};

/// Radius of a bus marker, in points.
const MARKER_RADIUS: f32 = 12.0;

/// Extra distance around a marker that still counts as a click on it.
const CLICK_SLACK: f32 = 4.0;

const MARKER_FILL: Color32 = Color32::from_rgb(37, 99, 235);
const SELECTED_FILL: Color32 = Color32::from_rgb(249, 115, 22);

/// Draws one labelled circle per bus and handles clicks on them.
///
/// A click on a marker selects it, which opens its info window. A click on
/// empty map closes the window.
pub struct BusMarkers<'a> {
    markers: &'a BTreeMap<MarkerHandle, PlacedMarker>,
    selection: &'a mut Selection,
}

impl<'a> BusMarkers<'a> {
    pub fn new(
        markers: &'a BTreeMap<MarkerHandle, PlacedMarker>,
        selection: &'a mut Selection,
    ) -> Self {
        Self { markers, selection }
    }
}

impl Plugin for BusMarkers<'_> {
    fn run(&mut self, response: &Response, painter: Painter, projector: &Projector) {
        if !response.changed() && response.clicked_by(egui::PointerButton::Primary) {
            if let Some(pointer_pos) = response.interact_pointer_pos() {
                let hit = self.markers.iter().find(|(_, marker)| {
                    let screen_pos = projector.project(marker.position).to_pos2();
                    screen_pos.distance(pointer_pos) < MARKER_RADIUS + CLICK_SLACK
                });
                self.selection.handle = hit.map(|(handle, _)| *handle);
            }
        }

        for (handle, marker) in self.markers {
            let screen_pos = projector.project(marker.position).to_pos2();
            let selected = self.selection.handle == Some(*handle);
            if selected {
                self.selection.anchor = Some(screen_pos);
            }

            painter.circle_filled(
                screen_pos,
                MARKER_RADIUS,
                if selected { SELECTED_FILL } else { MARKER_FILL },
            );
            painter.circle_stroke(screen_pos, MARKER_RADIUS, Stroke::new(2.0, Color32::WHITE));
            painter.text(
                screen_pos,
                Align2::CENTER_CENTER,
                &marker.spec.label,
                FontId::proportional(10.0),
                Color32::WHITE,
            );
        }
    }
}
