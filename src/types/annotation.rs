use serde::{Deserialize, Serialize};

/// What a click on the canvas does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickMode {
    #[default]
    None,
    DrawCircle,
    DrawLine,
}

impl ClickMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            ClickMode::None => "Select",
            ClickMode::DrawCircle => "Draw circle",
            ClickMode::DrawLine => "Draw line",
        }
    }
}

/// What the canvas shows in a tooltip while the pointer is over the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HoverMode {
    #[default]
    None,
    ImageSubset,
    PixelValue,
}

impl HoverMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            HoverMode::None => "None",
            HoverMode::ImageSubset => "Image subset",
            HoverMode::PixelValue => "Pixel value",
        }
    }

    pub fn hover_text(&self) -> &'static str {
        match self {
            HoverMode::None => "Show nothing on hover",
            HoverMode::ImageSubset => "Show image subset on hover",
            HoverMode::PixelValue => "Show hovered pixel value",
        }
    }

    pub fn all() -> &'static [HoverMode] {
        &[HoverMode::None, HoverMode::ImageSubset, HoverMode::PixelValue]
    }
}

/// Colors are unmultiplied RGBA.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub stroke: [u8; 4],
    pub fill: [u8; 4],
    pub stroke_width: u32,
    pub radius: u32,
    pub has_strokes: bool,
    pub has_fill: bool,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke: [230, 40, 40, 255],
            fill: [250, 210, 60, 160],
            stroke_width: 3,
            radius: 20,
            has_strokes: true,
            has_fill: true,
        }
    }
}
