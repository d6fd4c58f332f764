use crate::canvas::{Canvas, SUBSET_MAGNIFICATION, SUBSET_REGION_SIZE, region_uv, subset_region};
use crate::gpu::Gpu;
use crate::types::{AppState, ClickMode, Command, HoverMode};
use egui::{Color32, CursorIcon, Pos2, Rect, Sense, Stroke, Vec2};

const BACKGROUND: Color32 = Color32::from_gray(64);

pub fn draw_canvas(
    ui: &mut egui::Ui,
    state: &AppState,
    canvas: &Canvas,
    gpu: &Gpu,
    commands: &mut Vec<Command>,
) {
    let Some(display_size) = canvas.display_size() else {
        draw_empty_message(ui);
        return;
    };

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (rect, response) = ui.allocate_exact_size(display_size, Sense::click());
            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 0.0, BACKGROUND);

            if let Some((payload, shown)) = canvas
                .payload(gpu)
                .and_then(|payload| payload.clipped_to(rect, ui.clip_rect()))
            {
                painter.add(payload.into_paint_callback(shown));
            }

            if let Some(start) = canvas.line_start() {
                draw_line_preview(&painter, canvas, rect, start, response.hover_pos());
            }

            if state.click_mode != ClickMode::None && response.hovered() {
                ui.ctx().set_cursor_icon(CursorIcon::Crosshair);
            }

            if response.clicked()
                && state.click_mode != ClickMode::None
                && let Some(pointer) = response.interact_pointer_pos()
                && let Some((x, y)) = canvas.image_position(pointer, rect)
            {
                commands.push(Command::CanvasClicked { x, y });
            }

            let Some(pixel) = response
                .hover_pos()
                .and_then(|pointer| canvas.image_position(pointer, rect))
            else {
                return;
            };

            match state.preferences.hover_mode {
                HoverMode::None => {}
                HoverMode::PixelValue => {
                    response.on_hover_ui_at_pointer(|ui| draw_pixel_tooltip(ui, canvas, pixel));
                }
                HoverMode::ImageSubset => {
                    response.on_hover_ui_at_pointer(|ui| {
                        draw_subset_tooltip(ui, canvas, gpu, pixel)
                    });
                }
            }
        });
}

fn draw_empty_message(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.heading("📁 Drop an image file here or use 'File > Open…'");
    });
}

fn draw_pixel_tooltip(ui: &mut egui::Ui, canvas: &Canvas, pixel: (u32, u32)) {
    let Some(value) = canvas.pixel_at(pixel) else {
        return;
    };
    ui.label(format!("X: {} Y: {}", pixel.0, pixel.1));
    ui.horizontal(|ui| {
        let (swatch, _) = ui.allocate_exact_size(Vec2::splat(14.0), Sense::hover());
        ui.painter().rect_filled(swatch, 2.0, value.to_color32());
        ui.painter().rect_stroke(
            swatch,
            2.0,
            Stroke::new(1.0, Color32::from_gray(48)),
            egui::StrokeKind::Middle,
        );
        ui.label(value.to_string());
    });
}

fn draw_subset_tooltip(ui: &mut egui::Ui, canvas: &Canvas, gpu: &Gpu, pixel: (u32, u32)) {
    let Some(image) = canvas.image() else {
        return;
    };
    let region = subset_region(pixel, image.size(), SUBSET_REGION_SIZE);
    let size = Vec2::new(
        (region[2] - region[0]) as f32,
        (region[3] - region[1]) as f32,
    ) * SUBSET_MAGNIFICATION;

    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    if let Some(payload) = canvas.payload(gpu) {
        ui.painter()
            .add(payload.with_uv(region_uv(region, image.size())).into_paint_callback(rect));
    }
    ui.label(format!("Min: ({}, {})", region[0], region[1]));
    ui.label(format!("Max: ({}, {})", region[2] - 1, region[3] - 1));
}

/// Marks the first endpoint of a pending line and rubber-bands to the pointer.
fn draw_line_preview(
    painter: &egui::Painter,
    canvas: &Canvas,
    rect: Rect,
    start: (u32, u32),
    pointer: Option<Pos2>,
) {
    let scale = canvas.zoom().scale();
    let anchor = rect.min + Vec2::new(start.0 as f32 + 0.5, start.1 as f32 + 0.5) * scale;
    let stroke = Stroke::new(1.5, Color32::WHITE);

    painter.circle_stroke(anchor, 4.0, stroke);
    if let Some(pointer) = pointer {
        painter.line_segment([anchor, pointer], stroke);
    }
}
