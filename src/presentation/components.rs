use crate::domain::models::{MessageSeverity, RangingStatus};
use eframe::egui;

pub struct Components;

impl Components {
    pub fn card<R>(
        ui: &mut egui::Ui,
        title: &str,
        add_contents: impl FnOnce(&mut egui::Ui) -> R,
    ) -> R {
        let stroke = ui.style().visuals.widgets.noninteractive.bg_stroke;
        let bg = ui.style().visuals.widgets.noninteractive.bg_fill;

        egui::Frame::none()
            .inner_margin(egui::Margin::same(12.0))
            .stroke(stroke)
            .fill(bg)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(title).strong().size(17.0));
                    ui.add_space(6.0);
                    add_contents(ui)
                })
                .inner
            })
            .inner
    }

    pub fn status_banner(
        ui: &mut egui::Ui,
        text: &str,
        bg_color: egui::Color32,
        text_color: egui::Color32,
    ) {
        ui.add_sized(
            [ui.available_width(), 28.0],
            egui::Label::new(
                egui::RichText::new(text)
                    .color(text_color)
                    .background_color(bg_color)
                    .size(15.0)
                    .strong(),
            )
            .wrap_mode(egui::TextWrapMode::Extend),
        );
    }

    /// Banner text and colours for the ranging state.
    pub fn ranging_banner(status: RangingStatus) -> (&'static str, egui::Color32, egui::Color32) {
        match status {
            RangingStatus::Ranging => (
                "RANGING",
                egui::Color32::from_rgb(0, 200, 0),
                egui::Color32::BLACK,
            ),
            RangingStatus::Idle => (
                "IDLE",
                egui::Color32::from_gray(100),
                egui::Color32::WHITE,
            ),
            RangingStatus::Error => (
                "ERROR",
                egui::Color32::from_rgb(255, 50, 50),
                egui::Color32::WHITE,
            ),
        }
    }

    pub fn severity_color(severity: MessageSeverity) -> egui::Color32 {
        match severity {
            MessageSeverity::Info => egui::Color32::from_rgb(0, 150, 220),
            MessageSeverity::Success => egui::Color32::from_rgb(0, 170, 0),
            MessageSeverity::Warning => egui::Color32::from_rgb(220, 160, 0),
            MessageSeverity::Error => egui::Color32::from_rgb(220, 40, 40),
        }
    }
}
