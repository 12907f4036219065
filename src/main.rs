mod domain;
mod infrastructure;
mod presentation;

use domain::settings::SettingsService;
use eframe::egui;
use std::path::PathBuf;

fn main() -> Result<(), eframe::Error> {
    let mut settings = SettingsService::new().unwrap_or_else(|e| {
        eprintln!("Settings unavailable, using defaults: {}", e);
        SettingsService::with_path(PathBuf::from("beacon_locator_settings.json"))
    });

    // A recording given on the command line replaces the configured feed
    if let Some(path) = std::env::args_os().nth(1) {
        settings.get_mut().ranging.recording_path = Some(PathBuf::from(path));
    }

    let logging_guard = infrastructure::logging::init_logger(&settings.get().log_settings)
        .map_err(|e| eprintln!("Failed to initialize logging: {}", e))
        .ok();

    tracing::info!("Starting Beacon Locator");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 800.0])
            .with_title("Beacon Locator"),
        ..Default::default()
    };

    eframe::run_native(
        "Beacon Locator",
        options,
        Box::new(move |cc| {
            Ok(Box::new(presentation::BeaconLocatorApp::new(
                cc,
                settings,
                logging_guard,
            )))
        }),
    )
}
