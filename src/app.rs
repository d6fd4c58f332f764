use std::path::{Path, PathBuf};

use crate::canvas::Canvas;
use crate::error::AppError;
use crate::gpu::Gpu;
use crate::types::{AppState, AssetPaths, ClickMode, Command};
use crate::ui::{AboutView, UI};
use eframe::egui;
use eframe::glow;
use egui::{Key, Margin, Modifiers};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

pub struct CanvasApp {
    state: AppState,
    canvas: Canvas,
    about: AboutView,
    gpu: Gpu,
}

impl CanvasApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self, AppError> {
        crate::ui::styles::init_styles(&cc.egui_ctx);

        let gl = cc.gl.clone().ok_or(AppError::NoGlContext)?;
        let assets = AssetPaths::from_env();
        let gpu = Gpu::new(gl, &assets)?;

        let mut canvas = Canvas::new();
        let default_image = assets.default_image();
        if let Err(e) = canvas.open(&default_image) {
            log::warn!("Starting without an image: {e}");
        }

        Ok(Self {
            state: AppState::default(),
            canvas,
            about: AboutView::load(&assets),
            gpu,
        })
    }

    fn handle_dropped_files(&self, ctx: &egui::Context, commands: &mut Vec<Command>) {
        let dropped_files = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(dropped_file) = dropped_files.first()
            && let Some(path) = &dropped_file.path
        {
            commands.push(Command::LoadImage { path: path.clone() });
        }
    }

    fn handle_shortcuts(&self, ctx: &egui::Context, commands: &mut Vec<Command>) {
        if ctx.wants_keyboard_input() {
            return;
        }
        ctx.input_mut(|i| {
            if i.consume_key(Modifiers::COMMAND, Key::O) {
                commands.push(Command::OpenImage);
            }
            if i.consume_key(Modifiers::COMMAND, Key::S) {
                commands.push(Command::SaveImage);
            }
            if i.consume_key(Modifiers::COMMAND, Key::Q) {
                commands.push(Command::Quit);
            }
            if i.consume_key(Modifiers::NONE, Key::Plus)
                || i.consume_key(Modifiers::NONE, Key::Equals)
            {
                commands.push(Command::ZoomIn);
            }
            if i.consume_key(Modifiers::NONE, Key::Minus) {
                commands.push(Command::ZoomOut);
            }
            if i.consume_key(Modifiers::NONE, Key::Num0) {
                commands.push(Command::ResetZoom);
            }
            if i.consume_key(Modifiers::NONE, Key::Escape) {
                commands.push(Command::CancelClickMode);
            }
        });
    }

    fn apply_command(&mut self, ctx: &egui::Context, command: Command) {
        log::debug!("Applying {command:?}");
        match command {
            Command::OpenImage => {
                if let Some(path) = self.pick_open_path() {
                    self.load_image(&path);
                }
            }
            Command::LoadImage { path } => self.load_image(&path),
            Command::SaveImage => {
                if self.canvas.image().is_none() {
                    self.state.report_error("Nothing to save: no image is loaded");
                } else if let Some(path) = self.pick_save_path() {
                    self.save_image(&path);
                }
            }
            Command::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            Command::ZoomIn => self.canvas.zoom_in(),
            Command::ZoomOut => self.canvas.zoom_out(),
            Command::ResetZoom => self.canvas.reset_zoom(),
            Command::ToGrayscale => {
                if let Err(e) = self.canvas.to_grayscale() {
                    self.state.report_error(format!("To grayscale failed: {e}"));
                }
            }
            Command::Blur => {
                if let Err(e) = self.canvas.blur() {
                    self.state.report_error(format!("Blur failed: {e}"));
                }
            }
            Command::SetClickMode(mode) => {
                self.canvas.cancel_pending();
                self.state.click_mode = mode;
            }
            Command::CancelClickMode => {
                self.canvas.cancel_pending();
                self.state.click_mode = ClickMode::None;
            }
            Command::SetShader { name } => {
                if let Err(e) = self.canvas.set_shader(self.gpu.programs(), &name) {
                    self.state.report_error(e.to_string());
                }
            }
            Command::CanvasClicked { x, y } => {
                let style = self.state.preferences.shape_style.clone();
                match self.canvas.click(self.state.click_mode, (x, y), &style) {
                    Ok(next) => self.state.click_mode = next,
                    Err(e) => {
                        self.state.click_mode = ClickMode::None;
                        self.state.report_error(format!("Drawing failed: {e}"));
                    }
                }
            }
            Command::ShowAbout => self.state.show_about = true,
        }
    }

    fn load_image(&mut self, path: &Path) {
        match self.canvas.open(path) {
            Ok(()) => {
                self.state.click_mode = ClickMode::None;
                self.state.remember_directory(path);
                self.state.report_info(format!("Opened {}", path.display()));
            }
            Err(e) => self.state.report_error(e.to_string()),
        }
    }

    fn save_image(&mut self, path: &Path) {
        match self.canvas.save(path) {
            Ok(()) => {
                self.state.remember_directory(path);
                self.state.report_info(format!("Saved {}", path.display()));
            }
            Err(e) => self.state.report_error(e.to_string()),
        }
    }

    fn pick_open_path(&self) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new().add_filter("Image files", IMAGE_EXTENSIONS);
        if let Some(dir) = self.state.preferences.dialog_directory() {
            dialog = dialog.set_directory(dir);
        }
        dialog.pick_file()
    }

    fn pick_save_path(&self) -> Option<PathBuf> {
        let file_name = self
            .canvas
            .path()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image.png".to_string());

        let mut dialog = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .add_filter("JPEG", &["jpg", "jpeg"])
            .set_file_name(file_name);
        if let Some(dir) = self.state.preferences.dialog_directory() {
            dialog = dialog.set_directory(dir);
        }
        dialog.save_file()
    }

    fn sync_textures(&mut self) {
        if let Err(e) = self.canvas.sync_texture(&self.gpu) {
            self.state.report_error(e.to_string());
        }
        if self.state.show_about
            && let Err(e) = self.about.sync_texture(&self.gpu)
        {
            log::error!("Failed to upload logo: {e}");
        }
    }
}

impl eframe::App for CanvasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_textures();

        let mut commands = Vec::new();
        self.handle_dropped_files(ctx, &mut commands);
        self.handle_shortcuts(ctx, &mut commands);

        // Top（Menu）
        egui::TopBottomPanel::top("menu_panel").show(ctx, |ui| {
            UI::draw_menu(ui, &mut self.state, &self.canvas, &mut commands);
        });

        // Top（Toolbar）
        egui::TopBottomPanel::top("toolbar_panel").show(ctx, |ui| {
            egui::Frame::NONE
                .inner_margin(Margin::symmetric(0, 4))
                .show(ui, |ui| {
                    UI::draw_toolbar(ui, &mut self.state, &self.canvas, &mut commands);
                });
        });

        // Footer
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            egui::Frame::NONE
                .inner_margin(Margin::symmetric(0, 4))
                .show(ui, |ui| {
                    UI::draw_footer(ui, &mut self.state, &self.canvas);
                });
        });

        // Main（Image）
        egui::CentralPanel::default()
            .frame(
                egui::Frame::default()
                    .inner_margin(0.0)
                    .fill(ctx.style().visuals.window_fill()),
            )
            .show(ctx, |ui| {
                UI::draw_canvas(ui, &self.state, &self.canvas, &self.gpu, &mut commands);
            });

        if self.state.show_about {
            UI::draw_about(ctx, &mut self.state.show_about, &self.about, &self.gpu);
        }

        let has_commands = !commands.is_empty();
        for command in commands {
            self.apply_command(ctx, command);
        }
        self.sync_textures();
        if has_commands {
            ctx.request_repaint();
        }

        // Save preferences
        self.state.check_and_save_preferences();
    }

    fn on_exit(&mut self, _gl: Option<&glow::Context>) {
        self.canvas.release(&self.gpu);
        self.about.release(&self.gpu);
        self.gpu.destroy();
        self.state.check_and_save_preferences();
        log::debug!("CanvasApp exited, GPU resources released");
    }
}
