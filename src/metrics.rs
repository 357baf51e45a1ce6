//! Geometry shared by the paginator and the section renderers.
//!
//! Coordinates are layout units with the origin at the page's top-left corner
//! and y growing downward. The PDF sink converts to points with
//! [`LayoutMetrics::pdf_scale`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fonts::FontFace;
use crate::model::ReportType;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

pub const COLUMN_COUNT: usize = 7;

/// Table column headings, left to right.
pub const COLUMN_TITLES: [&str; COLUMN_COUNT] = [
    "Code",
    "Subject",
    "Credits",
    "Marks",
    "Percent",
    "Grade",
    "GPA",
];

/// Page geometry and vertical space budget.
///
/// Every block height includes the spacing below it, so the paginator can
/// stack blocks by adding heights and the renderers report exactly what was
/// reserved for them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    /// Code, name, credit, marks, percentage, grade, GPA.
    pub column_widths: [f32; COLUMN_COUNT],
    pub cell_padding: f32,
    pub row_height: f32,
    pub table_header_height: f32,
    pub semester_title_height: f32,
    pub semester_summary_height: f32,
    pub overall_summary_height: f32,
    pub document_header_height: f32,
    /// Band at the bottom of the printable area owned by the footer.
    pub footer_reserved_height: f32,
    pub title_font_size: f32,
    pub heading_font_size: f32,
    pub body_font_size: f32,
    pub footer_font_size: f32,
    /// PDF points per layout unit. 0.72 maps 850x1100 onto US Letter.
    pub pdf_scale: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            page_width: 850.0,
            page_height: 1100.0,
            margin_top: 50.0,
            margin_bottom: 50.0,
            margin_left: 50.0,
            margin_right: 50.0,
            column_widths: [80.0, 250.0, 60.0, 100.0, 80.0, 60.0, 60.0],
            cell_padding: 5.0,
            row_height: 25.0,
            table_header_height: 30.0,
            semester_title_height: 38.0,
            semester_summary_height: 50.0,
            overall_summary_height: 60.0,
            document_header_height: 170.0,
            footer_reserved_height: 70.0,
            title_font_size: 20.0,
            heading_font_size: 13.0,
            body_font_size: 10.0,
            footer_font_size: 8.5,
            pdf_scale: 0.72,
        }
    }
}

impl LayoutMetrics {
    /// The page rectangle inside the margins.
    pub fn printable(&self) -> Rect {
        Rect::new(
            self.margin_left,
            self.margin_top,
            self.page_width - self.margin_left - self.margin_right,
            self.page_height - self.margin_top - self.margin_bottom,
        )
    }

    /// Lowest y any content block may reach; the footer band lies below it.
    pub fn content_bottom(&self) -> f32 {
        self.printable().bottom() - self.footer_reserved_height
    }

    pub fn content_height(&self) -> f32 {
        self.content_bottom() - self.margin_top
    }

    pub fn table_width(&self) -> f32 {
        self.column_widths.iter().sum()
    }

    /// Left edge of the table, centered in the printable area.
    pub fn table_left(&self) -> f32 {
        let p = self.printable();
        p.x + ((p.width - self.table_width()) / 2.0).max(0.0)
    }

    /// Left edge of each column.
    pub fn column_offsets(&self) -> [f32; COLUMN_COUNT] {
        let mut offsets = [0.0; COLUMN_COUNT];
        let mut x = self.table_left();
        for (offset, width) in offsets.iter_mut().zip(self.column_widths) {
            *offset = x;
            x += width;
        }
        offsets
    }

    /// Semester title + table header + one data row.
    pub fn atomic_unit_height(&self) -> f32 {
        self.semester_title_height + self.table_header_height + self.row_height
    }

    /// Smallest semester fragment the paginator may have to place on an empty
    /// page: the atomic unit plus the summary that travels with a last row.
    pub fn min_fragment_height(&self) -> f32 {
        self.atomic_unit_height() + self.semester_summary_height
    }

    pub fn measure(&self, text: &str, font: FontFace, font_size: f32) -> Size {
        Size {
            width: font.text_width(text, font_size),
            height: font_size * font.line_height_ratio(),
        }
    }

    /// Shorten `text` with a trailing ellipsis until it fits `max_width`.
    pub fn fit_text(&self, text: &str, font: FontFace, font_size: f32, max_width: f32) -> String {
        if font.text_width(text, font_size) <= max_width {
            return text.to_string();
        }
        let ellipsis = '\u{2026}';
        let mut chars: Vec<char> = text.chars().collect();
        while !chars.is_empty() {
            chars.pop();
            let candidate: String = chars.iter().chain(std::iter::once(&ellipsis)).collect();
            if font.text_width(&candidate, font_size) <= max_width {
                return candidate;
            }
        }
        String::new()
    }

    /// Parse a layout override document; fields it omits keep their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(Error::LayoutJson)
    }

    /// Reject values no page geometry can work with. Block heights, page
    /// size, font sizes and the PDF scale must be positive; margins and
    /// padding must not be negative. Everything must be finite.
    fn check_values(&self) -> Result<()> {
        let positive = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("row_height", self.row_height),
            ("table_header_height", self.table_header_height),
            ("semester_title_height", self.semester_title_height),
            ("semester_summary_height", self.semester_summary_height),
            ("overall_summary_height", self.overall_summary_height),
            ("document_header_height", self.document_header_height),
            ("title_font_size", self.title_font_size),
            ("heading_font_size", self.heading_font_size),
            ("body_font_size", self.body_font_size),
            ("footer_font_size", self.footer_font_size),
            ("pdf_scale", self.pdf_scale),
        ];
        let non_negative = [
            ("margin_top", self.margin_top),
            ("margin_bottom", self.margin_bottom),
            ("margin_left", self.margin_left),
            ("margin_right", self.margin_right),
            ("footer_reserved_height", self.footer_reserved_height),
            ("cell_padding", self.cell_padding),
        ];
        let bad_positive = positive
            .into_iter()
            .find(|&(_, v)| !v.is_finite() || v <= 0.0);
        let bad_non_negative = non_negative
            .into_iter()
            .find(|&(_, v)| !v.is_finite() || v < 0.0);
        if let Some((field, value)) = bad_positive.or(bad_non_negative) {
            return Err(Error::InvalidMetric { field, value });
        }
        if let Some(&value) = self
            .column_widths
            .iter()
            .find(|w| !w.is_finite() || **w <= 0.0)
        {
            return Err(Error::InvalidMetric {
                field: "column_widths",
                value,
            });
        }
        Ok(())
    }

    /// Fail when some block the report needs could never be placed, even on
    /// an otherwise empty page.
    pub fn validate(&self, report: ReportType) -> Result<()> {
        self.check_values()?;
        let available = self.content_height();
        let mut needed = self.min_fragment_height().max(self.document_header_height);
        if report.is_full() {
            needed = needed.max(self.overall_summary_height);
        }
        if needed > available {
            return Err(Error::PageTooSmall { needed, available });
        }
        Ok(())
    }
}

pub type Rgb = [u8; 3];

/// Colors handed to the section renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub text: Rgb,
    pub muted_text: Rgb,
    pub title_bar_fill: Rgb,
    pub title_bar_text: Rgb,
    pub table_header_fill: Rgb,
    pub table_header_text: Rgb,
    pub zebra_fill: Rgb,
    pub border: Rgb,
    pub summary_fill: Rgb,
    pub info_box_fill: Rgb,
    pub border_width: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            text: [0x21, 0x21, 0x21],
            muted_text: [0x60, 0x60, 0x60],
            title_bar_fill: [0x1F, 0x3A, 0x5F],
            title_bar_text: [0xFF, 0xFF, 0xFF],
            table_header_fill: [0xD6, 0xE0, 0xEC],
            table_header_text: [0x1F, 0x3A, 0x5F],
            zebra_fill: [0xF3, 0xF6, 0xF9],
            border: [0xB0, 0xB8, 0xC4],
            summary_fill: [0xEE, 0xF2, 0xE6],
            info_box_fill: [0xF7, 0xF7, 0xF7],
            border_width: 0.75,
        }
    }
}
