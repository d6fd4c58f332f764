use std::fmt;
use std::path::Path;

use egui::Color32;
use image::{DynamicImage, GrayImage, ImageFormat, RgbaImage};

use crate::error::ImageError;

/// Pixel storage of an [`Image`]. Gray images keep a single channel so the
/// monochrome shader can show them without a conversion pass.
#[derive(Clone, Debug, PartialEq)]
pub enum Pixels {
    Gray(GrayImage),
    Rgba(RgbaImage),
}

/// In-memory raster owned by a view. Edits never mutate an `Image`; they build
/// a new one that replaces the old.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pixels: Pixels,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelValue {
    Gray(u8),
    Rgba([u8; 4]),
}

impl PixelValue {
    pub fn to_color32(self) -> Color32 {
        match self {
            PixelValue::Gray(v) => Color32::from_gray(v),
            PixelValue::Rgba([r, g, b, a]) => Color32::from_rgba_unmultiplied(r, g, b, a),
        }
    }
}

impl fmt::Display for PixelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelValue::Gray(v) => write!(f, "Gray: {v}"),
            PixelValue::Rgba([r, g, b, a]) => write!(f, "R: {r} G: {g} B: {b} A: {a}"),
        }
    }
}

impl Image {
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self {
            pixels: Pixels::Rgba(pixels),
        }
    }

    pub fn from_gray(pixels: GrayImage) -> Self {
        Self {
            pixels: Pixels::Gray(pixels),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Image, ImageError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| ImageError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let color = img.color();
        let image = if !color.has_color() && !color.has_alpha() {
            Image::from_gray(img.to_luma8())
        } else {
            Image::from_rgba(img.to_rgba8())
        };

        log::info!(
            "Loaded {} ({}×{}, {} channel(s))",
            path.display(),
            image.width(),
            image.height(),
            image.channels()
        );
        Ok(image)
    }

    /// Saves in the format implied by the extension. JPEG has no alpha, so
    /// RGBA images are flattened to RGB for it.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ImageError> {
        let path = path.as_ref();
        let to_save_error = |source| ImageError::Save {
            path: path.to_path_buf(),
            source,
        };

        let dynamic = match &self.pixels {
            Pixels::Gray(gray) => DynamicImage::ImageLuma8(gray.clone()),
            Pixels::Rgba(rgba) => DynamicImage::ImageRgba8(rgba.clone()),
        };
        let format = ImageFormat::from_path(path).map_err(to_save_error)?;
        let dynamic = match (format, dynamic) {
            (ImageFormat::Jpeg, DynamicImage::ImageRgba8(rgba)) => {
                DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba).to_rgb8())
            }
            (_, dynamic) => dynamic,
        };

        dynamic
            .save_with_format(path, format)
            .map_err(to_save_error)?;
        log::info!("Saved image to {}", path.display());
        Ok(())
    }

    pub fn pixels(&self) -> &Pixels {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        match &self.pixels {
            Pixels::Gray(p) => p.width(),
            Pixels::Rgba(p) => p.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match &self.pixels {
            Pixels::Gray(p) => p.height(),
            Pixels::Rgba(p) => p.height(),
        }
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width(), self.height()]
    }

    pub fn channels(&self) -> u8 {
        match &self.pixels {
            Pixels::Gray(_) => 1,
            Pixels::Rgba(_) => 4,
        }
    }

    pub fn is_gray(&self) -> bool {
        matches!(self.pixels, Pixels::Gray(_))
    }

    /// Raw row-major bytes, tightly packed (`channels()` bytes per pixel).
    pub fn as_bytes(&self) -> &[u8] {
        match &self.pixels {
            Pixels::Gray(p) => p.as_raw(),
            Pixels::Rgba(p) => p.as_raw(),
        }
    }

    pub fn pixel_at(&self, x: u32, y: u32) -> Result<PixelValue, ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(match &self.pixels {
            Pixels::Gray(p) => PixelValue::Gray(p.get_pixel(x, y).0[0]),
            Pixels::Rgba(p) => PixelValue::Rgba(p.get_pixel(x, y).0),
        })
    }
}
