#![windows_subsystem = "windows"]
mod app;
mod canvas;
mod error;
mod gpu;
mod image_ops;
mod raster;
mod types;
mod ui;

use app::CanvasApp;
use eframe::egui;

const APP_TITLE: &str = "Image Canvas";

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        renderer: eframe::Renderer::Glow,
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_resizable(false)
            .with_drag_and_drop(true)
            .with_title(APP_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(CanvasApp::new(cc)?))),
    )
}
