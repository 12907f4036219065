use crate::presentation::app::BeaconLocatorApp;
use crate::presentation::components::Components;
use eframe::egui;
use std::time::Instant;

pub fn render(app: &mut BeaconLocatorApp, ui: &mut egui::Ui) {
    let now = Instant::now();

    Components::card(ui, "Tracked Beacons", |ui| {
        if app.tracking.tracker.is_empty() {
            ui.label("Nothing ranged yet.");
            return;
        }

        let mut markers: Vec<_> = app.tracking.tracker.markers().collect();
        markers.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        egui::Grid::new("beacon_grid")
            .striped(true)
            .spacing([20.0, 5.0])
            .show(ui, |ui| {
                ui.strong("Label");
                ui.strong("Identifier");
                ui.strong("Distance");
                ui.strong("Last seen");
                ui.end_row();

                for marker in markers {
                    ui.label(&marker.label);
                    ui.monospace(&marker.identifier);
                    ui.label(format!("{:.2} m", marker.distance));
                    ui.label(format!(
                        "{:.1} s ago",
                        now.saturating_duration_since(marker.last_seen).as_secs_f32()
                    ));
                    ui.end_row();
                }
            });
    });

    ui.add_space(10.0);

    ui.horizontal(|ui| {
        if ui.button("Clear").clicked() {
            app.tracking.reset();
        }
    });
}
