mod about;
mod canvas_view;
mod footer;
mod menu;
pub mod styles;
mod toolbar;

pub use about::AboutView;

use crate::canvas::Canvas;
use crate::gpu::Gpu;
use crate::types::{AppState, Command};

pub struct UI;

impl UI {
    pub fn draw_menu(
        ui: &mut egui::Ui,
        state: &mut AppState,
        canvas: &Canvas,
        commands: &mut Vec<Command>,
    ) {
        menu::draw_menu(ui, state, canvas, commands)
    }

    pub fn draw_toolbar(
        ui: &mut egui::Ui,
        state: &mut AppState,
        canvas: &Canvas,
        commands: &mut Vec<Command>,
    ) {
        toolbar::draw_toolbar(ui, state, canvas, commands)
    }

    pub fn draw_canvas(
        ui: &mut egui::Ui,
        state: &AppState,
        canvas: &Canvas,
        gpu: &Gpu,
        commands: &mut Vec<Command>,
    ) {
        canvas_view::draw_canvas(ui, state, canvas, gpu, commands)
    }

    pub fn draw_footer(ui: &mut egui::Ui, state: &mut AppState, canvas: &Canvas) {
        footer::draw_footer(ui, state, canvas)
    }

    pub fn draw_about(ctx: &egui::Context, open: &mut bool, about: &AboutView, gpu: &Gpu) {
        about::draw_about(ctx, open, about, gpu)
    }
}
