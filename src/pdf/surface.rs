use pdf_writer::{Content, Name, Str};

use crate::fonts::{FontFace, to_winansi_bytes};
use crate::metrics::{LayoutMetrics, Point, Rect, Rgb};
use crate::surface::Surface;

/// One page's content stream. Layout units (y down) become PDF points
/// (y up) here and nowhere else.
pub(crate) struct PdfSurface {
    content: Content,
    scale: f32,
    page_height_pt: f32,
}

fn rgb(color: Rgb) -> (f32, f32, f32) {
    let [r, g, b] = color;
    (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

impl PdfSurface {
    pub(crate) fn new(metrics: &LayoutMetrics) -> Self {
        Self {
            content: Content::new(),
            scale: metrics.pdf_scale,
            page_height_pt: metrics.page_height * metrics.pdf_scale,
        }
    }

    fn x(&self, x: f32) -> f32 {
        x * self.scale
    }

    fn y(&self, y: f32) -> f32 {
        self.page_height_pt - y * self.scale
    }

    /// `rect` in layout units as a PDF rect (x, bottom, width, height).
    fn pdf_rect(&self, rect: Rect) -> (f32, f32, f32, f32) {
        (
            self.x(rect.x),
            self.y(rect.bottom()),
            rect.width * self.scale,
            rect.height * self.scale,
        )
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.content.finish().to_vec()
    }
}

impl Surface for PdfSurface {
    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let (x, y, w, h) = self.pdf_rect(rect);
        let (r, g, b) = rgb(color);
        self.content.save_state();
        self.content.set_fill_rgb(r, g, b);
        self.content.rect(x, y, w, h);
        self.content.fill_nonzero();
        self.content.restore_state();
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb, width: f32) {
        let (x, y, w, h) = self.pdf_rect(rect);
        let (r, g, b) = rgb(color);
        self.content.save_state();
        self.content.set_line_width(width);
        self.content.set_stroke_rgb(r, g, b);
        self.content.rect(x, y, w, h);
        self.content.stroke();
        self.content.restore_state();
    }

    fn line(&mut self, from: Point, to: Point, color: Rgb, width: f32) {
        let (r, g, b) = rgb(color);
        let (x1, y1, x2, y2) = (self.x(from.x), self.y(from.y), self.x(to.x), self.y(to.y));
        self.content.save_state();
        self.content.set_line_width(width);
        self.content.set_stroke_rgb(r, g, b);
        self.content.move_to(x1, y1);
        self.content.line_to(x2, y2);
        self.content.stroke();
        self.content.restore_state();
    }

    fn text(&mut self, origin: Point, text: &str, font: FontFace, font_size: f32, color: Rgb) {
        let bytes = to_winansi_bytes(text);
        if bytes.is_empty() {
            return;
        }
        // Center the glyph band (ascender + descender) in the line box.
        let leading = (font.line_height_ratio() - 1.0) / 2.0;
        let baseline = origin.y + font_size * (font.ascender_ratio() + leading);
        let (r, g, b) = rgb(color);
        let (x, y) = (self.x(origin.x), self.y(baseline));

        self.content.save_state();
        self.content.set_fill_rgb(r, g, b);
        self.content.begin_text();
        self.content
            .set_font(Name(font.pdf_name().as_bytes()), font_size * self.scale);
        self.content.next_line(x, y);
        self.content.show(Str(&bytes));
        self.content.end_text();
        self.content.restore_state();
    }
}
