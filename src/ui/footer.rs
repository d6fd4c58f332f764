use crate::canvas::Canvas;
use crate::types::{AppState, ClickMode};
use egui::Color32;

pub fn draw_footer(ui: &mut egui::Ui, state: &mut AppState, canvas: &Canvas) {
    let width = ui.available_width();

    ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
        draw_view_info(ui, canvas);

        if let Some(image) = canvas.image() {
            ui.separator();
            ui.label(format!(
                "{}×{} · {} ch",
                image.width(),
                image.height(),
                image.channels()
            ));
            if width > 720.0
                && let Some(path) = canvas.path()
            {
                ui.separator();
                let modified = if canvas.is_modified() { " *" } else { "" };
                ui.label(format!("{}{modified}", path.display()));
            }
        }

        if state.click_mode != ClickMode::None {
            ui.separator();
            let hint = match canvas.line_start() {
                Some(_) => "click the end point",
                None => "click the image",
            };
            ui.label(format!("✏ {}: {hint} (Esc to cancel)", state.click_mode.display_name()));
        }

        draw_status(ui, state);
    });
}

fn draw_view_info(ui: &mut egui::Ui, canvas: &Canvas) {
    let zoom = canvas.zoom();
    ui.label(format!("🔍 Zoom: {}x", zoom.scale()))
        .on_hover_text(format!("Level {}", zoom.level()));
    ui.label(format!("Shader: {}", canvas.shader().display_name()));
}

fn draw_status(ui: &mut egui::Ui, state: &mut AppState) {
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        let Some(status) = &state.status else {
            return;
        };
        let color = if status.is_error {
            Color32::from_rgb(255, 110, 110)
        } else {
            ui.visuals().text_color()
        };
        let text = egui::RichText::new(&status.text).color(color);
        if ui.small_button("🗙").on_hover_text("Dismiss").clicked() {
            state.status = None;
            return;
        }
        ui.label(text);
    });
}
