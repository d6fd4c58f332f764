//! OpenGL side of the canvas: shader programs, textures and the paint
//! callbacks that draw them inside egui's frame.

pub mod callback;
pub mod program;
pub mod registry;
pub mod texture;

use std::sync::Arc;

use eframe::glow;

pub use callback::{DrawPayload, QuadMesh};
pub use registry::ProgramRegistry;
pub use texture::Texture;

use crate::error::AppError;
use crate::raster::Image;
use crate::types::{AssetPaths, ShaderKey};

/// GL context plus the resources shared by every view.
pub struct Gpu {
    gl: Arc<glow::Context>,
    programs: ProgramRegistry,
    quad: QuadMesh,
}

impl Gpu {
    pub fn new(gl: Arc<glow::Context>, assets: &AssetPaths) -> Result<Self, AppError> {
        let mut programs = ProgramRegistry::load(&gl, assets)?;
        let quad = match QuadMesh::new(&gl) {
            Ok(quad) => quad,
            Err(e) => {
                programs.destroy_all(&gl);
                return Err(e);
            }
        };
        log::info!("Compiled {} shader programs", ShaderKey::all().len());
        Ok(Self { gl, programs, quad })
    }

    pub fn programs(&self) -> &ProgramRegistry {
        &self.programs
    }

    /// Uploads `image` into `slot`, creating the texture on first use.
    pub fn upload(&self, slot: &mut Option<Texture>, image: &Image) -> Result<(), AppError> {
        match slot {
            Some(texture) => texture.set_image(&self.gl, image),
            None => {
                *slot = Some(Texture::new(&self.gl, image)?);
                Ok(())
            }
        }
    }

    pub fn release(&self, slot: &mut Option<Texture>) {
        if let Some(mut texture) = slot.take() {
            texture.destroy(&self.gl);
        }
    }

    /// Payload drawing all of `texture` with the program for `key`, or `None`
    /// when either resource is gone.
    pub fn payload(&self, key: ShaderKey, texture: &Texture) -> Option<DrawPayload> {
        let program = self.programs.program(key).ok()?;
        Some(DrawPayload::full_texture(
            program,
            texture.raw()?,
            self.quad.raw()?,
        ))
    }

    pub fn destroy(&mut self) {
        self.programs.destroy_all(&self.gl);
        self.quad.destroy(&self.gl);
        log::debug!("GPU programs and vertex array released");
    }
}
