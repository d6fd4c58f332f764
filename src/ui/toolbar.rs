use super::styles;
use crate::canvas::Canvas;
use crate::types::{AppState, ClickMode, Command, HoverMode};

const BUTTON_SIZE: f32 = 28.0;

pub fn draw_toolbar(
    ui: &mut egui::Ui,
    state: &mut AppState,
    canvas: &Canvas,
    commands: &mut Vec<Command>,
) {
    let has_image = canvas.image().is_some();
    let zoom = canvas.zoom();

    ui.horizontal(|ui| {
        if tool_button(ui, "📂", "Open image", true) {
            commands.push(Command::OpenImage);
        }
        if tool_button(ui, "💾", "Save image", has_image) {
            commands.push(Command::SaveImage);
        }
        if tool_button(ui, "🗙", "Quit", true) {
            commands.push(Command::Quit);
        }
        ui.separator();

        if tool_button(ui, "➕", "Zoom in", has_image && zoom.can_zoom_in()) {
            commands.push(Command::ZoomIn);
        }
        if tool_button(ui, "➖", "Zoom out", has_image && zoom.can_zoom_out()) {
            commands.push(Command::ZoomOut);
        }
        ui.separator();

        // Mode buttons stay disabled while their mode is active.
        for (mode, icon) in [(ClickMode::DrawCircle, "⭕"), (ClickMode::DrawLine, "✏")] {
            let active = state.click_mode == mode;
            let clicked = ui
                .scope(|ui| {
                    if active {
                        styles::apply_active_mode_style(ui);
                    }
                    tool_button(ui, icon, mode.display_name(), has_image && !active)
                })
                .inner;
            if clicked {
                commands.push(Command::SetClickMode(mode));
            }
        }
        ui.separator();

        for mode in HoverMode::all() {
            ui.radio_value(&mut state.preferences.hover_mode, *mode, mode.display_name())
                .on_hover_text(mode.hover_text());
        }
        ui.separator();

        let style = &mut state.preferences.shape_style;
        ui.color_edit_button_srgba_unmultiplied(&mut style.stroke)
            .on_hover_text("Stroke color");
        ui.color_edit_button_srgba_unmultiplied(&mut style.fill)
            .on_hover_text("Fill color");
    });
}

fn tool_button(ui: &mut egui::Ui, icon: &str, tooltip: &str, enabled: bool) -> bool {
    ui.add_enabled(
        enabled,
        egui::Button::new(icon).min_size(egui::vec2(BUTTON_SIZE, BUTTON_SIZE)),
    )
    .on_hover_text(tooltip)
    .on_disabled_hover_text(tooltip)
    .clicked()
}
