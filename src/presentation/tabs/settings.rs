use crate::domain::models::RangingStatus;
use crate::domain::tracker::DistancePolicy;
use crate::presentation::app::BeaconLocatorApp;
use crate::presentation::components::Components;
use eframe::egui;

pub fn render(app: &mut BeaconLocatorApp, ui: &mut egui::Ui) {
    let mut changed = false;

    Components::card(ui, "Tracking", |ui| {
        let config = app.tracking.tracker.config().clone();
        ui.label(format!(
            "Range {:.1} m, expiry {} ms, sweep every {} ms",
            config.max_range, config.expiry_ms, config.sweep_interval_ms
        ));

        ui.horizontal(|ui| {
            ui.label("Beyond range:");
            let mut policy = config.distance_policy;
            ui.radio_value(&mut policy, DistancePolicy::Extrapolate, "Extrapolate");
            ui.radio_value(&mut policy, DistancePolicy::Clamp, "Clamp");
            if policy != config.distance_policy {
                app.tracking.tracker.set_distance_policy(policy);
                app.settings.get_mut().tracker.distance_policy = policy;
                changed = true;
            }
        });
    });

    ui.add_space(10.0);

    Components::card(ui, "Ranging", |ui| {
        let ranging = app.settings.get().ranging.clone();
        egui::Grid::new("ranging_grid")
            .spacing([20.0, 5.0])
            .show(ui, |ui| {
                ui.label("Layout:");
                ui.monospace(&ranging.beacon_layout);
                ui.end_row();
                ui.label("Scan period:");
                ui.label(format!("{} ms", ranging.scan_period_ms));
                ui.end_row();
                ui.label("Between scans:");
                ui.label(format!("{} ms", ranging.between_scan_period_ms));
                ui.end_row();
                ui.label("Source:");
                ui.label(
                    ranging
                        .recording_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "none".to_string()),
                );
                ui.end_row();
            });

        ui.horizontal(|ui| {
            if app.ranging_status == RangingStatus::Ranging {
                if ui.button("Stop Ranging").clicked() {
                    app.stop_ranging();
                }
            } else if ui.button("Start Ranging").clicked() {
                app.start_ranging();
            }
        });
    });

    ui.add_space(10.0);
    ui.label(format!("Settings file: {}", app.settings.path().display()));

    if changed {
        app.save_settings();
    }
}
