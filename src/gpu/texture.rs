use eframe::glow::{self, HasContext as _};

use crate::error::AppError;
use crate::raster::Image;

/// GPU copy of an [`Image`]. Gray images upload as a single `R8` channel
/// swizzled so that it samples as gray.
#[derive(Debug)]
pub struct Texture {
    raw: Option<glow::Texture>,
    size: [u32; 2],
    channels: u8,
}

impl Texture {
    pub fn new(gl: &glow::Context, image: &Image) -> Result<Self, AppError> {
        let raw = unsafe { gl.create_texture() }.map_err(AppError::Gl)?;
        let mut texture = Self {
            raw: Some(raw),
            size: [0, 0],
            channels: 0,
        };
        texture.set_image(gl, image)?;
        Ok(texture)
    }

    /// Replaces the texture's contents with `image`, recreating the GL object
    /// if it was already released.
    pub fn set_image(&mut self, gl: &glow::Context, image: &Image) -> Result<(), AppError> {
        let raw = match self.raw {
            Some(raw) => raw,
            None => {
                let raw = unsafe { gl.create_texture() }.map_err(AppError::Gl)?;
                self.raw = Some(raw);
                raw
            }
        };

        let [width, height] = image.size();
        let (internal_format, format) = if image.is_gray() {
            (glow::R8, glow::RED)
        } else {
            (glow::RGBA8, glow::RGBA)
        };

        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(raw));
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::NEAREST as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::NEAREST as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );
            let swizzle = channel_swizzle(image.is_gray());
            for (parameter, source) in [
                glow::TEXTURE_SWIZZLE_R,
                glow::TEXTURE_SWIZZLE_G,
                glow::TEXTURE_SWIZZLE_B,
            ]
            .into_iter()
            .zip(swizzle)
            {
                gl.tex_parameter_i32(glow::TEXTURE_2D, parameter, source as i32);
            }
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                internal_format as i32,
                width as i32,
                height as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(image.as_bytes())),
            );
            gl.bind_texture(glow::TEXTURE_2D, None);
        }

        self.size = image.size();
        self.channels = image.channels();
        log::debug!(
            "Uploaded {}×{} texture ({} channel(s))",
            width,
            height,
            self.channels
        );
        Ok(())
    }

    pub fn raw(&self) -> Option<glow::Texture> {
        self.raw
    }

    pub fn size(&self) -> [u32; 2] {
        self.size
    }

    pub(crate) fn take_raw(&mut self) -> Option<glow::Texture> {
        self.raw.take()
    }

    pub fn destroy(&mut self, gl: &glow::Context) {
        if let Some(raw) = self.take_raw() {
            unsafe { gl.delete_texture(raw) };
        }
    }

    #[cfg(test)]
    pub(crate) fn from_raw(raw: glow::Texture, size: [u32; 2]) -> Self {
        Self {
            raw: Some(raw),
            size,
            channels: 4,
        }
    }
}

/// Sources of the sampled red, green and blue components. A gray texture
/// repeats its single channel so every program sees it as gray.
fn channel_swizzle(is_gray: bool) -> [u32; 3] {
    if is_gray {
        [glow::RED, glow::RED, glow::RED]
    } else {
        [glow::RED, glow::GREEN, glow::BLUE]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    #[test]
    fn releasing_twice_yields_handle_once() {
        let raw = glow::NativeTexture(NonZeroU32::new(3).unwrap());
        let mut texture = Texture::from_raw(raw, [4, 4]);

        assert_eq!(texture.take_raw(), Some(raw));
        assert_eq!(texture.take_raw(), None);
        assert_eq!(texture.raw(), None);
        assert_eq!(texture.size(), [4, 4]);
    }

    #[test]
    fn gray_textures_repeat_red_into_every_color_component() {
        assert_eq!(channel_swizzle(true), [glow::RED; 3]);
        assert_eq!(channel_swizzle(false), [glow::RED, glow::GREEN, glow::BLUE]);
    }
}
