use std::path::{Path, PathBuf};

use egui::{Pos2, Rect, Vec2};

use crate::error::{AppError, ImageError, ShaderError};
use crate::gpu::{DrawPayload, Gpu, ProgramRegistry, Texture};
use crate::image_ops::ImageOps;
use crate::raster::{Image, PixelValue};
use crate::types::{ClickMode, ShaderKey, ShapeStyle};

pub const MIN_ZOOM_LEVEL: i32 = -8;
pub const MAX_ZOOM_LEVEL: i32 = 8;

/// Side, in image pixels, of the region shown by the image-subset tooltip.
pub const SUBSET_REGION_SIZE: u32 = 32;
/// Magnification of the image-subset tooltip.
pub const SUBSET_MAGNIFICATION: f32 = 4.0;

/// Power-of-two zoom. Keeping the exponent instead of the factor makes
/// zoom-in/zoom-out pairs cancel exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Zoom {
    level: i32,
}

impl Zoom {
    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn scale(&self) -> f32 {
        2f32.powi(self.level)
    }

    pub fn can_zoom_in(&self) -> bool {
        self.level < MAX_ZOOM_LEVEL
    }

    pub fn can_zoom_out(&self) -> bool {
        self.level > MIN_ZOOM_LEVEL
    }

    pub fn zoom_in(&mut self) {
        self.level = (self.level + 1).min(MAX_ZOOM_LEVEL);
    }

    pub fn zoom_out(&mut self) {
        self.level = (self.level - 1).max(MIN_ZOOM_LEVEL);
    }

    pub fn reset(&mut self) {
        self.level = 0;
    }
}

/// The view holding the active image and its texture.
#[derive(Default)]
pub struct Canvas {
    image: Option<Image>,
    path: Option<PathBuf>,
    texture: Option<Texture>,
    texture_dirty: bool,
    modified: bool,
    zoom: Zoom,
    shader: ShaderKey,
    line_start: Option<(u32, u32)>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, path: &Path) -> Result<(), ImageError> {
        let image = Image::load(path)?;
        self.set_image(image, Some(path.to_path_buf()));
        Ok(())
    }

    /// Makes `image` the current image. Gray images are shown with the
    /// monochrome program, everything else in color.
    pub fn set_image(&mut self, image: Image, path: Option<PathBuf>) {
        self.shader = if image.is_gray() {
            ShaderKey::Monochrome
        } else {
            ShaderKey::Color
        };
        self.image = Some(image);
        self.path = path;
        self.texture_dirty = true;
        self.modified = false;
        self.line_start = None;
        self.zoom.reset();
    }

    pub fn save(&mut self, path: &Path) -> Result<(), ImageError> {
        let image = self.image.as_ref().ok_or(ImageError::NoImage)?;
        image.save(path)?;
        self.path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    pub fn to_grayscale(&mut self) -> Result<(), ImageError> {
        self.replace_image(ImageOps::to_grayscale)?;
        self.shader = ShaderKey::Monochrome;
        Ok(())
    }

    pub fn blur(&mut self) -> Result<(), ImageError> {
        self.replace_image(ImageOps::blur)
    }

    pub fn draw_circle(&mut self, center: (u32, u32), style: &ShapeStyle) -> Result<(), ImageError> {
        self.replace_image(|image| ImageOps::draw_circle(image, center, style))
    }

    pub fn draw_line(
        &mut self,
        from: (u32, u32),
        to: (u32, u32),
        style: &ShapeStyle,
    ) -> Result<(), ImageError> {
        self.replace_image(|image| ImageOps::draw_line(image, from, to, style))
    }

    /// Applies a click at image pixel `pos` in `mode` and returns the mode that
    /// should follow. A line needs two clicks; the first only records its start.
    pub fn click(
        &mut self,
        mode: ClickMode,
        pos: (u32, u32),
        style: &ShapeStyle,
    ) -> Result<ClickMode, ImageError> {
        match mode {
            ClickMode::None => Ok(ClickMode::None),
            ClickMode::DrawCircle => {
                self.draw_circle(pos, style)?;
                Ok(ClickMode::None)
            }
            ClickMode::DrawLine => match self.line_start.take() {
                None => {
                    self.line_start = Some(pos);
                    Ok(ClickMode::DrawLine)
                }
                Some(start) => {
                    self.draw_line(start, pos, style)?;
                    Ok(ClickMode::None)
                }
            },
        }
    }

    pub fn line_start(&self) -> Option<(u32, u32)> {
        self.line_start
    }

    pub fn cancel_pending(&mut self) {
        self.line_start = None;
    }

    fn replace_image(&mut self, edit: impl FnOnce(&Image) -> Image) -> Result<(), ImageError> {
        let current = self.image.as_ref().ok_or(ImageError::NoImage)?;
        let edited = edit(current);
        self.image = Some(edited);
        self.texture_dirty = true;
        self.modified = true;
        Ok(())
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn zoom_in(&mut self) {
        self.zoom.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.zoom.zoom_out();
    }

    pub fn reset_zoom(&mut self) {
        self.zoom.reset();
    }

    pub fn shader(&self) -> ShaderKey {
        self.shader
    }

    /// Selects the program named `name`. On failure the current selection is
    /// kept.
    pub fn set_shader(
        &mut self,
        programs: &ProgramRegistry,
        name: &str,
    ) -> Result<ShaderKey, ShaderError> {
        let key = programs.resolve(name)?;
        self.shader = key;
        Ok(key)
    }

    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// On-screen size of the image at the current zoom.
    pub fn display_size(&self) -> Option<Vec2> {
        let image = self.image.as_ref()?;
        let [width, height] = image.size();
        Some(Vec2::new(width as f32, height as f32) * self.zoom.scale())
    }

    /// Image pixel under `pointer`, given where the image was laid out.
    pub fn image_position(&self, pointer: Pos2, image_rect: Rect) -> Option<(u32, u32)> {
        let image = self.image.as_ref()?;
        let local = (pointer - image_rect.min) / self.zoom.scale();
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let (x, y) = (local.x.floor() as u32, local.y.floor() as u32);
        (x < image.width() && y < image.height()).then_some((x, y))
    }

    pub fn pixel_at(&self, pos: (u32, u32)) -> Option<PixelValue> {
        self.image.as_ref()?.pixel_at(pos.0, pos.1).ok()
    }

    /// Uploads the image if it changed since the last upload.
    pub fn sync_texture(&mut self, gpu: &Gpu) -> Result<(), AppError> {
        if !self.needs_upload() {
            return Ok(());
        }
        if let Some(image) = &self.image {
            gpu.upload(&mut self.texture, image)?;
        }
        self.texture_dirty = false;
        Ok(())
    }

    pub fn needs_upload(&self) -> bool {
        self.texture_dirty
    }

    pub fn payload(&self, gpu: &Gpu) -> Option<DrawPayload> {
        gpu.payload(self.shader, self.texture.as_ref()?)
    }

    pub fn release(&mut self, gpu: &Gpu) {
        gpu.release(&mut self.texture);
        self.texture_dirty = self.image.is_some();
    }
}

/// Region of `region_size`² pixels centered on `center`, shifted to stay
/// inside an image of `image_size`. Returned as `[x0, y0, x1, y1]` with
/// exclusive upper bounds.
pub fn subset_region(center: (u32, u32), image_size: [u32; 2], region_size: u32) -> [u32; 4] {
    let axis = |c: u32, len: u32| {
        let size = region_size.min(len);
        let start = c.saturating_sub(size / 2).min(len - size);
        (start, start + size)
    };
    let (x0, x1) = axis(center.0, image_size[0]);
    let (y0, y1) = axis(center.1, image_size[1]);
    [x0, y0, x1, y1]
}

/// Normalized texture coordinates of a pixel region.
pub fn region_uv(region: [u32; 4], image_size: [u32; 2]) -> Rect {
    let [w, h] = [image_size[0] as f32, image_size[1] as f32];
    Rect::from_min_max(
        Pos2::new(region[0] as f32 / w, region[1] as f32 / h),
        Pos2::new(region[2] as f32 / w, region[3] as f32 / h),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::registry::tests::fake_registry;
    use image::{Rgba, RgbaImage};

    fn canvas_with(width: u32, height: u32) -> Canvas {
        let mut canvas = Canvas::new();
        let image = Image::from_rgba(RgbaImage::from_pixel(width, height, Rgba([9, 8, 7, 255])));
        canvas.set_image(image, None);
        canvas
    }

    #[test]
    fn zoom_round_trip_restores_scale() {
        let mut zoom = Zoom::default();
        let original = zoom.scale();
        for _ in 0..5 {
            zoom.zoom_in();
        }
        assert_eq!(zoom.scale(), 32.0);
        for _ in 0..5 {
            zoom.zoom_out();
        }
        assert_eq!(zoom.scale(), original);

        for _ in 0..3 {
            zoom.zoom_out();
        }
        for _ in 0..3 {
            zoom.zoom_in();
        }
        assert_eq!(zoom.scale(), original);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut zoom = Zoom::default();
        for _ in 0..20 {
            zoom.zoom_in();
        }
        assert_eq!(zoom.level(), MAX_ZOOM_LEVEL);
        assert!(!zoom.can_zoom_in());
        zoom.reset();
        assert_eq!(zoom.scale(), 1.0);
    }

    #[test]
    fn edits_without_image_fail() {
        let mut canvas = Canvas::new();
        assert!(matches!(canvas.blur(), Err(ImageError::NoImage)));
        assert!(matches!(canvas.to_grayscale(), Err(ImageError::NoImage)));
        assert!(matches!(
            canvas.save(Path::new("/tmp/never.png")),
            Err(ImageError::NoImage)
        ));
    }

    #[test]
    fn grayscale_switches_to_monochrome_and_marks_dirty() {
        let mut canvas = canvas_with(8, 8);
        assert_eq!(canvas.shader(), ShaderKey::Color);
        canvas.sync_texture_for_test();

        canvas.to_grayscale().unwrap();
        assert_eq!(canvas.shader(), ShaderKey::Monochrome);
        assert!(canvas.needs_upload());
        assert!(canvas.is_modified());
        assert_eq!(canvas.image().unwrap().channels(), 1);
    }

    #[test]
    fn gray_image_opens_with_monochrome_shader() {
        let mut canvas = Canvas::new();
        canvas.set_image(Image::from_gray(image::GrayImage::new(4, 4)), None);
        assert_eq!(canvas.shader(), ShaderKey::Monochrome);
    }

    #[test]
    fn unknown_shader_keeps_selection() {
        let programs = fake_registry(&[ShaderKey::Color, ShaderKey::Grayscale]);
        let mut canvas = canvas_with(4, 4);

        assert_eq!(
            canvas.set_shader(&programs, "grayscale").unwrap(),
            ShaderKey::Grayscale
        );
        assert!(canvas.set_shader(&programs, "monochrome").is_err());
        assert!(canvas.set_shader(&programs, "no-such-effect").is_err());
        assert_eq!(canvas.shader(), ShaderKey::Grayscale);
    }

    #[test]
    fn image_position_honors_zoom() {
        let mut canvas = canvas_with(10, 10);
        let rect = Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(10.0, 10.0));
        assert_eq!(canvas.image_position(Pos2::new(103.5, 59.9), rect), Some((3, 9)));
        assert_eq!(canvas.image_position(Pos2::new(110.0, 50.0), rect), None);
        assert_eq!(canvas.image_position(Pos2::new(99.0, 50.0), rect), None);

        canvas.zoom_in();
        assert_eq!(canvas.display_size(), Some(Vec2::new(20.0, 20.0)));
        assert_eq!(canvas.image_position(Pos2::new(107.0, 61.0), rect), Some((3, 5)));
    }

    #[test]
    fn line_needs_two_clicks() {
        let mut canvas = canvas_with(20, 20);
        let style = ShapeStyle::default();

        let next = canvas.click(ClickMode::DrawLine, (2, 2), &style).unwrap();
        assert_eq!(next, ClickMode::DrawLine);
        assert_eq!(canvas.line_start(), Some((2, 2)));
        assert!(!canvas.is_modified());

        let next = canvas.click(ClickMode::DrawLine, (17, 17), &style).unwrap();
        assert_eq!(next, ClickMode::None);
        assert_eq!(canvas.line_start(), None);
        assert!(canvas.is_modified());
    }

    #[test]
    fn cancel_discards_pending_line_start() {
        let mut canvas = canvas_with(20, 20);
        let style = ShapeStyle::default();
        canvas.click(ClickMode::DrawLine, (4, 4), &style).unwrap();
        assert_eq!(canvas.line_start(), Some((4, 4)));

        canvas.cancel_pending();
        assert_eq!(canvas.line_start(), None);

        // The next click starts a new line instead of finishing the old one.
        let next = canvas.click(ClickMode::DrawLine, (9, 9), &style).unwrap();
        assert_eq!(next, ClickMode::DrawLine);
        assert!(!canvas.is_modified());
    }

    #[test]
    fn new_image_resets_zoom_and_pending_line() {
        let mut canvas = canvas_with(20, 20);
        canvas.zoom_in();
        canvas.zoom_in();
        canvas
            .click(ClickMode::DrawLine, (1, 1), &ShapeStyle::default())
            .unwrap();

        canvas.set_image(Image::from_rgba(RgbaImage::new(5, 5)), None);
        assert_eq!(canvas.zoom().level(), 0);
        assert_eq!(canvas.line_start(), None);
        assert_eq!(canvas.display_size(), Some(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn open_resets_zoom() {
        let path = std::env::temp_dir().join(format!("image_canvas_open_{}.png", std::process::id()));
        Image::from_rgba(RgbaImage::new(3, 2)).save(&path).unwrap();

        let mut canvas = canvas_with(20, 20);
        canvas.zoom_out();
        canvas.open(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(canvas.zoom().level(), 0);
        assert_eq!(canvas.path(), Some(path.as_path()));
    }

    #[test]
    fn circle_click_returns_to_no_mode() {
        let mut canvas = canvas_with(50, 50);
        let next = canvas
            .click(ClickMode::DrawCircle, (25, 25), &ShapeStyle::default())
            .unwrap();
        assert_eq!(next, ClickMode::None);
        assert!(canvas.needs_upload());
    }

    #[test]
    fn save_clears_modified_flag() {
        let path = std::env::temp_dir().join(format!("image_canvas_save_{}.png", std::process::id()));
        let mut canvas = canvas_with(6, 6);
        canvas.blur().unwrap();
        assert!(canvas.is_modified());

        canvas.save(&path).unwrap();
        assert!(!canvas.is_modified());
        assert_eq!(canvas.path(), Some(path.as_path()));

        let mut reopened = Canvas::new();
        reopened.open(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(reopened.image(), canvas.image());
    }

    #[test]
    fn failed_open_keeps_current_image() {
        let mut canvas = canvas_with(3, 3);
        let before = canvas.image().cloned();
        assert!(canvas.open(Path::new("/nonexistent/image.png")).is_err());
        assert_eq!(canvas.image().cloned(), before);
    }

    #[test]
    fn subset_region_is_clamped_to_image() {
        assert_eq!(subset_region((50, 50), [100, 100], 32), [34, 34, 66, 66]);
        assert_eq!(subset_region((2, 98), [100, 100], 32), [0, 68, 32, 100]);
        assert_eq!(subset_region((5, 5), [10, 12], 32), [0, 0, 10, 12]);
    }

    #[test]
    fn region_uv_normalizes() {
        let uv = region_uv([0, 25, 50, 100], [100, 100]);
        assert_eq!(uv.min, Pos2::new(0.0, 0.25));
        assert_eq!(uv.max, Pos2::new(0.5, 1.0));
    }

    impl Canvas {
        fn sync_texture_for_test(&mut self) {
            self.texture_dirty = false;
        }
    }
}
