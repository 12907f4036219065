use crate::presentation::app::BeaconLocatorApp;
use crate::presentation::components::Components;
use crate::presentation::theme::BeaconPalette;
use eframe::egui;

/// Metres between the distance guide lines
const GUIDE_STEP: f64 = 1.0;

pub fn render(app: &mut BeaconLocatorApp, ui: &mut egui::Ui) {
    let (text, bg, fg) = Components::ranging_banner(app.ranging_status);
    Components::status_banner(ui, text, bg, fg);

    let rect = ui.available_rect_before_wrap();
    ui.allocate_rect(rect, egui::Sense::hover());

    let palette = BeaconPalette::new(app.is_dark_mode);
    paint_guides(ui, rect, app.tracking.tracker.config().max_range, &palette);
    app.tracking.board.paint(ui, rect, &palette);

    if app.tracking.board.is_empty() {
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "No beacons in range",
            egui::FontId::proportional(16.0),
            palette.grid,
        );
    }
}

/// Horizontal lines every metre, labelled with their distance.
fn paint_guides(ui: &egui::Ui, rect: egui::Rect, max_range: f64, palette: &BeaconPalette) {
    if max_range <= 0.0 {
        return;
    }
    let painter = ui.painter_at(rect);
    let stroke = egui::Stroke::new(1.0, palette.grid);

    let mut distance = 0.0;
    while distance <= max_range {
        let fraction = ((max_range - distance) / max_range) as f32;
        let y = rect.min.y + fraction * rect.height();
        painter.hline(rect.x_range(), y, stroke);
        painter.text(
            egui::pos2(rect.min.x + 4.0, y - 2.0),
            egui::Align2::LEFT_BOTTOM,
            format!("{:.0} m", distance),
            egui::FontId::monospace(11.0),
            palette.grid,
        );
        distance += GUIDE_STEP;
    }
}
