use egui::Color32;
pub const COLOR_TINT: Color32 = Color32::from_rgb(240, 100, 156);
pub const COLOR_TINT_ACTIVE: Color32 = Color32::from_rgb(131, 100, 144);

pub fn init_styles(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.spacing.button_padding = egui::vec2(6.0, 3.0);
    style.interaction.tooltip_delay = 0.0;
    ctx.set_style(style);
}

/// Highlights the toolbar button of the click mode currently in effect.
pub fn apply_active_mode_style(ui: &mut egui::Ui) {
    let style = &mut ui.style_mut();

    style.visuals.widgets.noninteractive.weak_bg_fill = COLOR_TINT;
    style.visuals.widgets.inactive.weak_bg_fill = COLOR_TINT;
    style.visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, Color32::WHITE);
    style.visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, COLOR_TINT_ACTIVE);
}

pub trait UiMarginExt {
    fn heading_with_margin(&mut self, text: &str);
}

impl UiMarginExt for egui::Ui {
    fn heading_with_margin(&mut self, text: &str) {
        egui::Frame::NONE
            .inner_margin(egui::Margin {
                left: 0,
                right: 0,
                top: 2,
                bottom: 4,
            })
            .show(self, |ui| {
                ui.heading(text);
            });
    }
}
