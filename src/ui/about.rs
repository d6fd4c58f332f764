use super::styles::UiMarginExt;
use crate::error::AppError;
use crate::gpu::{Gpu, Texture};
use crate::raster::Image;
use crate::types::{AssetPaths, ShaderKey};

/// Logo shown in the About window, drawn with the color program through its
/// own texture.
#[derive(Default)]
pub struct AboutView {
    logo: Option<Image>,
    texture: Option<Texture>,
}

impl AboutView {
    pub fn load(assets: &AssetPaths) -> Self {
        let path = assets.logo_image();
        let logo = match Image::load(&path) {
            Ok(image) => Some(image),
            Err(e) => {
                log::warn!("Logo unavailable: {e}");
                None
            }
        };
        Self {
            logo,
            texture: None,
        }
    }

    /// Uploads the logo on first use.
    pub fn sync_texture(&mut self, gpu: &Gpu) -> Result<(), AppError> {
        if self.texture.is_some() {
            return Ok(());
        }
        if let Some(logo) = &self.logo {
            gpu.upload(&mut self.texture, logo)?;
        }
        Ok(())
    }

    pub fn release(&mut self, gpu: &Gpu) {
        gpu.release(&mut self.texture);
    }
}

pub fn draw_about(ctx: &egui::Context, open: &mut bool, about: &AboutView, gpu: &Gpu) {
    egui::Window::new("About")
        .open(open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                if let Some(texture) = &about.texture {
                    let [width, height] = texture.size();
                    let size = egui::vec2(width as f32, height as f32);
                    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
                    if let Some(payload) = gpu.payload(ShaderKey::Color, texture) {
                        ui.painter().add(payload.into_paint_callback(rect));
                    }
                }
                ui.heading_with_margin(env!("CARGO_PKG_NAME"));
                ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                ui.label("Open, annotate and filter raster images.");
            });
        });
}
