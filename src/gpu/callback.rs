use std::sync::Arc;

use eframe::egui_glow;
use eframe::glow::{self, HasContext as _};
use egui::{Pos2, Rect};

use crate::error::AppError;

/// Empty vertex array for the attribute-less quad drawn by `basic.vert`; the
/// corners come from `gl_VertexID`.
#[derive(Debug)]
pub struct QuadMesh {
    vertex_array: Option<glow::VertexArray>,
}

impl QuadMesh {
    pub fn new(gl: &glow::Context) -> Result<Self, AppError> {
        let vertex_array = unsafe { gl.create_vertex_array() }.map_err(AppError::Gl)?;
        Ok(Self {
            vertex_array: Some(vertex_array),
        })
    }

    pub fn raw(&self) -> Option<glow::VertexArray> {
        self.vertex_array
    }

    pub fn destroy(&mut self, gl: &glow::Context) {
        if let Some(vertex_array) = self.vertex_array.take() {
            unsafe { gl.delete_vertex_array(vertex_array) };
        }
    }
}

/// Everything one deferred draw needs, copied out of the view that queued it.
/// Each paint callback owns its own payload, so any number of them can be
/// pending in a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawPayload {
    pub program: glow::Program,
    pub texture: glow::Texture,
    pub vertex_array: glow::VertexArray,
    /// Normalized texture region to sample, origin top-left.
    pub uv: Rect,
}

impl DrawPayload {
    pub fn full_texture(
        program: glow::Program,
        texture: glow::Texture,
        vertex_array: glow::VertexArray,
    ) -> Self {
        Self {
            program,
            texture,
            vertex_array,
            uv: Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
        }
    }

    pub fn with_uv(self, uv: Rect) -> Self {
        Self { uv, ..self }
    }

    /// Restricts a payload that would cover `rect` to the part of it inside
    /// `visible`, narrowing the UV region to match. Returns the payload with
    /// the rect it should be painted over, or `None` when nothing is visible.
    ///
    /// egui_glow sets the GL viewport to the whole callback rect, and GL clamps
    /// viewports to `GL_MAX_VIEWPORT_DIMS`, so a deeply zoomed image must not
    /// be handed over in full.
    pub fn clipped_to(self, rect: Rect, visible: Rect) -> Option<(Self, Rect)> {
        let shown = rect.intersect(visible);
        if !shown.is_positive() || !rect.is_positive() {
            return None;
        }
        let to_uv = |p: Pos2| {
            Pos2::new(
                self.uv.min.x + (p.x - rect.min.x) / rect.width() * self.uv.width(),
                self.uv.min.y + (p.y - rect.min.y) / rect.height() * self.uv.height(),
            )
        };
        let uv = Rect::from_min_max(to_uv(shown.min), to_uv(shown.max));
        Some((self.with_uv(uv), shown))
    }

    /// Wraps the payload in a callback painted over `rect`. egui_glow sets the
    /// GL viewport to `rect` before calling it and restores its own state after.
    pub fn into_paint_callback(self, rect: Rect) -> egui::PaintCallback {
        egui::PaintCallback {
            rect,
            callback: Arc::new(egui_glow::CallbackFn::new(move |info, painter| {
                let viewport = info.viewport_in_pixels();
                let size = [viewport.width_px as f32, viewport.height_px as f32];
                self.draw(painter.gl(), size);
            })),
        }
    }

    fn draw(&self, gl: &glow::Context, viewport_size: [f32; 2]) {
        let [width, height] = viewport_size;
        let transformation = orthographic(0.0, width, height, 0.0);
        unsafe {
            gl.use_program(Some(self.program));
            gl.bind_vertex_array(Some(self.vertex_array));
            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));

            let location = |name: &str| gl.get_uniform_location(self.program, name);
            gl.uniform_matrix_4_f32_slice(
                location("u_transformation").as_ref(),
                false,
                &transformation,
            );
            gl.uniform_2_f32(location("u_size").as_ref(), width, height);
            gl.uniform_4_f32(
                location("u_uv_rect").as_ref(),
                self.uv.min.x,
                self.uv.min.y,
                self.uv.max.x,
                self.uv.max.y,
            );
            gl.uniform_1_i32(location("u_texture").as_ref(), 0);

            gl.draw_arrays(glow::TRIANGLE_STRIP, 0, 4);
        }
    }
}

/// Column-major 2D orthographic projection (near -1, far 1). With
/// `bottom > top` the y axis points down, matching screen coordinates.
pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32) -> [f32; 16] {
    let mut m = [0.0; 16];
    m[0] = 2.0 / (right - left);
    m[5] = 2.0 / (top - bottom);
    m[10] = -1.0;
    m[12] = -(right + left) / (right - left);
    m[13] = -(top + bottom) / (top - bottom);
    m[15] = 1.0;
    m
}
