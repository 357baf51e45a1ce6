use crate::fonts::FontFace;
use crate::metrics::{COLUMN_COUNT, COLUMN_TITLES, Point, Rect};
use crate::model::SubjectResult;
use crate::surface::Surface;

use super::{Align, SectionRenderer};

/// Text alignment per column: code and name read left, the grade letter is
/// centered and numbers are right-aligned.
const COLUMN_ALIGN: [Align; COLUMN_COUNT] = [
    Align::Left,
    Align::Left,
    Align::Right,
    Align::Right,
    Align::Right,
    Align::Center,
    Align::Right,
];

impl SectionRenderer<'_> {
    /// Cell rectangles of one table row starting at `top_left`.
    fn cell_rects(&self, top_left: Point, height: f32) -> [Rect; COLUMN_COUNT] {
        let mut x = top_left.x;
        self.metrics.column_widths.map(|w| {
            let rect = Rect::new(x, top_left.y, w, height);
            x += w;
            rect
        })
    }

    fn stroke_cells(&self, surface: &mut impl Surface, cells: &[Rect]) {
        for cell in cells {
            surface.stroke_rect(*cell, self.style.border, self.style.border_width);
        }
    }

    pub fn draw_table_header(&self, surface: &mut impl Surface, top_left: Point) -> f32 {
        let m = self.metrics;
        let h = m.table_header_height;
        let cells = self.cell_rects(top_left, h);

        surface.fill_rect(
            Rect::new(top_left.x, top_left.y, m.table_width(), h),
            self.style.table_header_fill,
        );
        for ((cell, title), align) in cells.iter().zip(COLUMN_TITLES).zip(COLUMN_ALIGN) {
            self.text_in(
                surface,
                *cell,
                title,
                FontFace::Bold,
                m.body_font_size,
                self.style.table_header_text,
                align,
            );
        }
        self.stroke_cells(surface, &cells);
        h
    }

    /// One data row; `alternate` rows get the zebra background.
    pub fn draw_subject_row(
        &self,
        surface: &mut impl Surface,
        top_left: Point,
        subject: &SubjectResult,
        alternate: bool,
    ) -> f32 {
        let m = self.metrics;
        let h = m.row_height;
        let cells = self.cell_rects(top_left, h);

        if alternate {
            surface.fill_rect(
                Rect::new(top_left.x, top_left.y, m.table_width(), h),
                self.style.zebra_fill,
            );
        }

        let values = subject_cells(subject);
        for ((cell, value), align) in cells.iter().zip(&values).zip(COLUMN_ALIGN) {
            self.text_in(
                surface,
                *cell,
                value,
                FontFace::Regular,
                m.body_font_size,
                self.style.text,
                align,
            );
        }
        self.stroke_cells(surface, &cells);
        h
    }
}

fn subject_cells(subject: &SubjectResult) -> [String; COLUMN_COUNT] {
    [
        subject.code.clone(),
        subject.name.clone(),
        subject.credit_hours.to_string(),
        format!("{}/{}", format_marks(subject.obtained_marks), subject.total_marks),
        format!("{:.1}%", subject.percentage),
        subject.grade_letter.clone(),
        format!("{:.2}", subject.gpa),
    ]
}

/// Whole marks print without a fractional part.
fn format_marks(marks: f64) -> String {
    if marks.fract() == 0.0 {
        format!("{marks:.0}")
    } else {
        format!("{marks:.1}")
    }
}
