use eframe::egui;

pub struct BeaconPalette {
    pub bg: egui::Color32,
    pub fg: egui::Color32,
    pub stroke: egui::Color32,
    pub grid: egui::Color32,
    pub accent: egui::Color32,
    pub marker_fill: egui::Color32,
    pub marker_outline: egui::Color32,
    pub marker_label: egui::Color32,
}

impl BeaconPalette {
    pub fn new(is_dark: bool) -> Self {
        // Markers look the same in both modes
        let marker_fill = egui::Color32::RED;
        let marker_outline = egui::Color32::BLACK;
        let marker_label = egui::Color32::WHITE;

        if is_dark {
            Self {
                bg: egui::Color32::from_rgb(25, 25, 25),
                fg: egui::Color32::WHITE,
                stroke: egui::Color32::WHITE,
                grid: egui::Color32::from_gray(70),
                accent: egui::Color32::from_rgb(0, 200, 255),
                marker_fill,
                marker_outline,
                marker_label,
            }
        } else {
            Self {
                bg: egui::Color32::from_rgb(245, 245, 245),
                fg: egui::Color32::BLACK,
                stroke: egui::Color32::BLACK,
                grid: egui::Color32::from_gray(200),
                accent: egui::Color32::from_rgb(0, 120, 215),
                marker_fill,
                marker_outline,
                marker_label,
            }
        }
    }
}

pub fn configure_theme(ctx: &egui::Context, is_dark: bool) {
    let mut style = (*ctx.style()).clone();
    let palette = BeaconPalette::new(is_dark);

    style.visuals = if is_dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };

    style
        .text_styles
        .iter_mut()
        .for_each(|(text_style, font_id)| {
            font_id.size = match text_style {
                egui::TextStyle::Heading => 24.0,
                egui::TextStyle::Body | egui::TextStyle::Button => 15.0,
                _ => font_id.size,
            };
        });

    style.spacing.item_spacing = egui::vec2(10.0, 10.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);

    style.visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, palette.stroke);
    style.visuals.widgets.noninteractive.bg_fill = palette.bg;
    style.visuals.selection.bg_fill = palette.accent;
    style.visuals.panel_fill = palette.bg;
    style.visuals.override_text_color = Some(palette.fg);

    ctx.set_style(style);
}
