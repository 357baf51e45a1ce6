use crate::fonts::FontFace;
use crate::metrics::{Point, Rect, Rgb};

/// A page-sized canvas in layout units (top-left origin, y down).
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    fn stroke_rect(&mut self, rect: Rect, color: Rgb, width: f32);
    fn line(&mut self, from: Point, to: Point, color: Rgb, width: f32);
    /// `origin` is the top of the text's line box; text never wraps.
    fn text(&mut self, origin: Point, text: &str, font: FontFace, font_size: f32, color: Rgb);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillRect { rect: Rect, color: Rgb },
    StrokeRect { rect: Rect, color: Rgb, width: f32 },
    Line { from: Point, to: Point, color: Rgb, width: f32 },
    Text { origin: Point, text: String, font: FontFace, font_size: f32, color: Rgb },
}

/// Records drawing calls so layouts can be inspected without an output device.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    /// Largest y touched by any operation.
    pub fn lowest_y(&self) -> f32 {
        self.ops
            .iter()
            .map(|op| match op {
                DrawOp::FillRect { rect, .. } | DrawOp::StrokeRect { rect, .. } => rect.bottom(),
                DrawOp::Line { from, to, .. } => from.y.max(to.y),
                DrawOp::Text { origin, font, font_size, .. } => {
                    origin.y + font_size * font.line_height_ratio()
                }
            })
            .fold(0.0, f32::max)
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb, width: f32) {
        self.ops.push(DrawOp::StrokeRect { rect, color, width });
    }

    fn line(&mut self, from: Point, to: Point, color: Rgb, width: f32) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn text(&mut self, origin: Point, text: &str, font: FontFace, font_size: f32, color: Rgb) {
        self.ops.push(DrawOp::Text {
            origin,
            text: text.to_string(),
            font,
            font_size,
            color,
        });
    }
}
