use crate::canvas::Canvas;
use crate::types::{AppState, ClickMode, Command, ShaderKey};

pub fn draw_menu(
    ui: &mut egui::Ui,
    state: &mut AppState,
    canvas: &Canvas,
    commands: &mut Vec<Command>,
) {
    let has_image = canvas.image().is_some();

    egui::MenuBar::new().ui(ui, |ui| {
        ui.menu_button("File", |ui| {
            draw_file_menu(ui, has_image, commands);
        });
        ui.menu_button("Image", |ui| {
            if ui
                .add_enabled(has_image, egui::Button::new("To grayscale"))
                .clicked()
            {
                commands.push(Command::ToGrayscale);
                ui.close();
            }
            if ui
                .add_enabled(has_image, egui::Button::new("Blur"))
                .on_hover_text("9×9 average filter")
                .clicked()
            {
                commands.push(Command::Blur);
                ui.close();
            }
        });
        ui.menu_button("View", |ui| {
            draw_view_menu(ui, canvas, commands);
        });
        ui.menu_button("Draw", |ui| {
            draw_draw_menu(ui, state, has_image, commands);
        });
        ui.menu_button("Help", |ui| {
            if ui.button("About").clicked() {
                commands.push(Command::ShowAbout);
                ui.close();
            }
        });
    });
}

fn draw_file_menu(ui: &mut egui::Ui, has_image: bool, commands: &mut Vec<Command>) {
    if ui
        .add(egui::Button::new("Open…").shortcut_text("Ctrl+O"))
        .clicked()
    {
        commands.push(Command::OpenImage);
        ui.close();
    }
    if ui
        .add_enabled(
            has_image,
            egui::Button::new("Save…").shortcut_text("Ctrl+S"),
        )
        .clicked()
    {
        commands.push(Command::SaveImage);
        ui.close();
    }
    ui.separator();
    if ui
        .add(egui::Button::new("Quit").shortcut_text("Ctrl+Q"))
        .clicked()
    {
        commands.push(Command::Quit);
        ui.close();
    }
}

fn draw_view_menu(ui: &mut egui::Ui, canvas: &Canvas, commands: &mut Vec<Command>) {
    let zoom = canvas.zoom();
    if ui
        .add_enabled(zoom.can_zoom_in(), egui::Button::new("Zoom in").shortcut_text("+"))
        .clicked()
    {
        commands.push(Command::ZoomIn);
    }
    if ui
        .add_enabled(zoom.can_zoom_out(), egui::Button::new("Zoom out").shortcut_text("-"))
        .clicked()
    {
        commands.push(Command::ZoomOut);
    }
    if ui
        .add(egui::Button::new("Reset zoom").shortcut_text("0"))
        .clicked()
    {
        commands.push(Command::ResetZoom);
        ui.close();
    }

    ui.separator();
    ui.label("Shader");
    for key in ShaderKey::all() {
        if ui
            .radio(canvas.shader() == *key, key.display_name())
            .clicked()
        {
            commands.push(Command::SetShader {
                name: key.name().to_string(),
            });
            ui.close();
        }
    }
}

fn draw_draw_menu(
    ui: &mut egui::Ui,
    state: &mut AppState,
    has_image: bool,
    commands: &mut Vec<Command>,
) {
    for mode in [ClickMode::DrawCircle, ClickMode::DrawLine] {
        let active = state.click_mode == mode;
        if ui
            .add_enabled(
                has_image && !active,
                egui::Button::new(mode.display_name()),
            )
            .clicked()
        {
            commands.push(Command::SetClickMode(mode));
            ui.close();
        }
    }

    ui.separator();
    let style = &mut state.preferences.shape_style;
    ui.checkbox(&mut style.has_strokes, "Strokes");
    ui.checkbox(&mut style.has_fill, "Fill circles");
    ui.horizontal(|ui| {
        ui.label("Radius:");
        ui.add(egui::DragValue::new(&mut style.radius).range(1..=512));
    });
    ui.horizontal(|ui| {
        ui.label("Stroke width:");
        ui.add(egui::DragValue::new(&mut style.stroke_width).range(1..=64));
    });
}
