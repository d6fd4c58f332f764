use image::{GrayImage, Luma, Pixel, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_polygon_mut};
use imageproc::filter::box_filter;
use imageproc::point::Point;

use crate::raster::{Image, Pixels};
use crate::types::ShapeStyle;

/// Side of the square averaging window used by [`ImageOps::blur`].
pub const BLUR_KERNEL_SIZE: u32 = 9;

const MASK_ON: Luma<u8> = Luma([255]);
const MASK_OFF: Luma<u8> = Luma([0]);

pub struct ImageOps;

impl ImageOps {
    /// Single-channel luminance copy. Gray input is returned unchanged, alpha
    /// is dropped.
    pub fn to_grayscale(image: &Image) -> Image {
        match image.pixels() {
            Pixels::Gray(_) => image.clone(),
            Pixels::Rgba(rgba) => Image::from_gray(image::imageops::grayscale(rgba)),
        }
    }

    /// Box average over a `BLUR_KERNEL_SIZE`² window, per channel.
    pub fn blur(image: &Image) -> Image {
        let radius = BLUR_KERNEL_SIZE / 2;
        match image.pixels() {
            Pixels::Gray(gray) => Image::from_gray(box_filter(gray, radius, radius)),
            Pixels::Rgba(rgba) => {
                let channels: Vec<GrayImage> = (0..4)
                    .map(|c| {
                        let plane = GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
                            Luma([rgba.get_pixel(x, y).0[c]])
                        });
                        box_filter(&plane, radius, radius)
                    })
                    .collect();
                Image::from_rgba(RgbaImage::from_fn(rgba.width(), rgba.height(), |x, y| {
                    Rgba([
                        channels[0].get_pixel(x, y).0[0],
                        channels[1].get_pixel(x, y).0[0],
                        channels[2].get_pixel(x, y).0[0],
                        channels[3].get_pixel(x, y).0[0],
                    ])
                }))
            }
        }
    }

    /// Composites a circle centered on `center` (image pixels) into a copy of
    /// `image`: the disc in the fill color, then a ring of `stroke_width`
    /// straddling the radius in the stroke color.
    pub fn draw_circle(image: &Image, center: (u32, u32), style: &ShapeStyle) -> Image {
        let mut output = image.clone();
        let center = (center.0 as i32, center.1 as i32);
        let radius = style.radius as i32;

        if style.has_fill {
            let mut mask = Self::empty_mask(image);
            draw_filled_circle_mut(&mut mask, center, radius, MASK_ON);
            Self::composite(&mut output, &mask, style.fill);
        }

        if style.has_strokes && style.stroke_width > 0 {
            let half = style.stroke_width as i32 / 2;
            let outer = radius + half;
            let inner = outer - style.stroke_width as i32;
            let mut mask = Self::empty_mask(image);
            draw_filled_circle_mut(&mut mask, center, outer, MASK_ON);
            if inner >= 0 {
                draw_filled_circle_mut(&mut mask, center, inner, MASK_OFF);
            }
            Self::composite(&mut output, &mask, style.stroke);
        }

        output
    }

    /// Composites a line segment of `stroke_width` with round caps into a copy
    /// of `image`. Strokes must be enabled; otherwise the copy is unchanged.
    pub fn draw_line(
        image: &Image,
        from: (u32, u32),
        to: (u32, u32),
        style: &ShapeStyle,
    ) -> Image {
        let mut output = image.clone();
        if !style.has_strokes || style.stroke_width == 0 {
            return output;
        }

        let start = (from.0 as f32, from.1 as f32);
        let end = (to.0 as f32, to.1 as f32);
        let mut mask = Self::empty_mask(image);

        if style.stroke_width == 1 {
            draw_line_segment_mut(&mut mask, start, end, MASK_ON);
        } else {
            let half = style.stroke_width as f32 / 2.0;
            let (dx, dy) = (end.0 - start.0, end.1 - start.1);
            let length = (dx * dx + dy * dy).sqrt();
            if length >= 1.0 {
                let (nx, ny) = (-dy / length * half, dx / length * half);
                let corner = |x: f32, y: f32| Point::new(x.round() as i32, y.round() as i32);
                let polygon = [
                    corner(start.0 + nx, start.1 + ny),
                    corner(end.0 + nx, end.1 + ny),
                    corner(end.0 - nx, end.1 - ny),
                    corner(start.0 - nx, start.1 - ny),
                ];
                draw_polygon_mut(&mut mask, &polygon, MASK_ON);
            }
            let cap = half.floor() as i32;
            draw_filled_circle_mut(&mut mask, (from.0 as i32, from.1 as i32), cap, MASK_ON);
            draw_filled_circle_mut(&mut mask, (to.0 as i32, to.1 as i32), cap, MASK_ON);
        }

        Self::composite(&mut output, &mask, style.stroke);
        output
    }

    fn empty_mask(image: &Image) -> GrayImage {
        GrayImage::new(image.width(), image.height())
    }

    /// Alpha-blends `color` over every pixel of `image` that is set in `mask`.
    fn composite(image: &mut Image, mask: &GrayImage, color: [u8; 4]) {
        let alpha = color[3] as f32 / 255.0;
        let blend = |dst: u8, src: u8| -> u8 {
            (src as f32 * alpha + dst as f32 * (1.0 - alpha)).round() as u8
        };

        *image = match image.pixels() {
            Pixels::Rgba(rgba) => {
                let mut rgba = rgba.clone();
                for (x, y, pixel) in rgba.enumerate_pixels_mut() {
                    if mask.get_pixel(x, y).0[0] == 0 {
                        continue;
                    }
                    let [r, g, b, a] = pixel.0;
                    let out_alpha = (color[3] as f32 + a as f32 * (1.0 - alpha)).round();
                    *pixel = Rgba([
                        blend(r, color[0]),
                        blend(g, color[1]),
                        blend(b, color[2]),
                        out_alpha.min(255.0) as u8,
                    ]);
                }
                Image::from_rgba(rgba)
            }
            Pixels::Gray(gray) => {
                let luma = Rgba(color).to_luma().0[0];
                let mut gray = gray.clone();
                for (x, y, pixel) in gray.enumerate_pixels_mut() {
                    if mask.get_pixel(x, y).0[0] != 0 {
                        *pixel = Luma([blend(pixel.0[0], luma)]);
                    }
                }
                Image::from_gray(gray)
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> Image {
        Image::from_rgba(RgbaImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([250, 10, 10, 255])
            } else {
                Rgba([10, 10, 250, 255])
            }
        }))
    }

    fn opaque_style() -> ShapeStyle {
        ShapeStyle {
            stroke: [0, 255, 0, 255],
            fill: [255, 255, 255, 255],
            stroke_width: 2,
            radius: 6,
            has_strokes: true,
            has_fill: true,
        }
    }

    #[test]
    fn grayscale_is_idempotent() {
        let once = ImageOps::to_grayscale(&checker(16, 16));
        let twice = ImageOps::to_grayscale(&once);

        assert_eq!(once.channels(), 1);
        assert_eq!(once.as_bytes(), twice.as_bytes());
    }

    #[test]
    fn grayscale_keeps_dimensions() {
        let gray = ImageOps::to_grayscale(&checker(7, 3));
        assert_eq!(gray.size(), [7, 3]);
    }

    #[test]
    fn blur_leaves_uniform_image_unchanged() {
        let flat = Image::from_rgba(RgbaImage::from_pixel(20, 12, Rgba([40, 80, 120, 255])));
        assert_eq!(ImageOps::blur(&flat), flat);

        let flat_gray = Image::from_gray(GrayImage::from_pixel(10, 10, Luma([99])));
        assert_eq!(ImageOps::blur(&flat_gray), flat_gray);
    }

    #[test]
    fn blur_averages_checkerboard() {
        let blurred = ImageOps::blur(&checker(32, 32));
        let crate::raster::PixelValue::Rgba([r, _, b, _]) = blurred.pixel_at(16, 16).unwrap()
        else {
            panic!("expected rgba pixel");
        };
        assert!((120..=140).contains(&r), "red channel {r}");
        assert!((120..=140).contains(&b), "blue channel {b}");
    }

    #[test]
    fn circle_fills_center_and_strokes_rim() {
        let source = Image::from_rgba(RgbaImage::from_pixel(40, 40, Rgba([0, 0, 0, 255])));
        let drawn = ImageOps::draw_circle(&source, (20, 20), &opaque_style());

        assert_eq!(
            drawn.pixel_at(20, 20).unwrap().to_color32(),
            egui::Color32::WHITE
        );
        assert_eq!(
            drawn.pixel_at(26, 20).unwrap(),
            crate::raster::PixelValue::Rgba([0, 255, 0, 255])
        );
        assert_eq!(
            drawn.pixel_at(2, 2).unwrap(),
            crate::raster::PixelValue::Rgba([0, 0, 0, 255])
        );
    }

    #[test]
    fn circle_returns_new_image_and_leaves_source_untouched() {
        let source = checker(30, 30);
        let before = source.clone();
        let drawn = ImageOps::draw_circle(&source, (15, 15), &opaque_style());

        assert_eq!(source, before);
        assert_ne!(drawn, source);
    }

    #[test]
    fn circle_without_fill_keeps_inside() {
        let source = Image::from_gray(GrayImage::from_pixel(40, 40, Luma([0])));
        let style = ShapeStyle {
            has_fill: false,
            ..opaque_style()
        };
        let drawn = ImageOps::draw_circle(&source, (20, 20), &style);

        assert_eq!(drawn.pixel_at(20, 20).unwrap(), crate::raster::PixelValue::Gray(0));
        assert_ne!(drawn.pixel_at(26, 20).unwrap(), crate::raster::PixelValue::Gray(0));
    }

    #[test]
    fn line_marks_pixels_along_segment_only() {
        let source = Image::from_rgba(RgbaImage::from_pixel(30, 30, Rgba([0, 0, 0, 255])));
        let style = ShapeStyle {
            stroke_width: 3,
            ..opaque_style()
        };
        let drawn = ImageOps::draw_line(&source, (5, 15), (25, 15), &style);

        let green = crate::raster::PixelValue::Rgba([0, 255, 0, 255]);
        assert_eq!(drawn.pixel_at(15, 15).unwrap(), green);
        assert_eq!(drawn.pixel_at(15, 16).unwrap(), green);
        assert_eq!(
            drawn.pixel_at(15, 25).unwrap(),
            crate::raster::PixelValue::Rgba([0, 0, 0, 255])
        );
    }

    #[test]
    fn line_without_strokes_is_noop() {
        let source = checker(10, 10);
        let style = ShapeStyle {
            has_strokes: false,
            ..opaque_style()
        };
        assert_eq!(ImageOps::draw_line(&source, (0, 0), (9, 9), &style), source);
    }

    #[test]
    fn translucent_stroke_blends() {
        let source = Image::from_rgba(RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255])));
        let style = ShapeStyle {
            stroke: [200, 100, 0, 128],
            stroke_width: 1,
            ..opaque_style()
        };
        let drawn = ImageOps::draw_line(&source, (0, 5), (9, 5), &style);

        assert_eq!(
            drawn.pixel_at(4, 5).unwrap(),
            crate::raster::PixelValue::Rgba([100, 50, 0, 255])
        );
    }
}
