//! Stateless drawing of the transcript's sections.
//!
//! Each `draw_*` function paints one block at the given anchor and returns the
//! height it consumed, which is the height the paginator reserved for it.

mod table;

use chrono::NaiveDate;

use crate::fonts::FontFace;
use crate::layout::{Block, PagePlan};
use crate::metrics::{LayoutMetrics, Point, Rect, Rgb, Style};
use crate::model::{SemesterData, Student, TranscriptData};
use crate::surface::Surface;

/// Document-level text that is not part of the transcript data.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    /// Printed under the document title when non-empty.
    pub institution: String,
    pub signature_label: String,
    /// Printed in every footer. Fixed per job so re-rendering is deterministic.
    pub generated_on: NaiveDate,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            institution: String::new(),
            signature_label: "Controller of Examinations".to_string(),
            generated_on: chrono::Local::now().date_naive(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Align {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy)]
pub struct SectionRenderer<'a> {
    pub metrics: &'a LayoutMetrics,
    pub style: &'a Style,
    pub options: &'a RenderOptions,
}

const DOC_TITLE: &str = "ACADEMIC TRANSCRIPT";
const HEADER_TITLE_BAND: f32 = 56.0;
const BLOCK_GAP: f32 = 14.0;
const TITLE_BAR_GAP: f32 = 6.0;

impl<'a> SectionRenderer<'a> {
    pub fn new(metrics: &'a LayoutMetrics, style: &'a Style, options: &'a RenderOptions) -> Self {
        Self {
            metrics,
            style,
            options,
        }
    }

    /// Single-line text inside `rect`, vertically centered and clipped to the
    /// rect's width (minus cell padding) with an ellipsis.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn text_in(
        &self,
        surface: &mut impl Surface,
        rect: Rect,
        text: &str,
        font: FontFace,
        font_size: f32,
        color: Rgb,
        align: Align,
    ) {
        let pad = self.metrics.cell_padding;
        let max_w = (rect.width - 2.0 * pad).max(0.0);
        let fitted = self.metrics.fit_text(text, font, font_size, max_w);
        if fitted.is_empty() {
            return;
        }
        let size = self.metrics.measure(&fitted, font, font_size);
        let x = match align {
            Align::Left => rect.x + pad,
            Align::Center => rect.x + (rect.width - size.width) / 2.0,
            Align::Right => rect.right() - pad - size.width,
        };
        let y = rect.y + (rect.height - size.height) / 2.0;
        surface.text(Point::new(x, y), &fitted, font, font_size, color);
    }

    pub fn draw_document_header(
        &self,
        surface: &mut impl Surface,
        top_left: Point,
        student: &Student,
    ) -> f32 {
        let m = self.metrics;
        let s = self.style;
        let width = m.printable().width;
        let height = m.document_header_height;

        let title = Rect::new(top_left.x, top_left.y, width, m.title_font_size * 1.4);
        self.text_in(surface, title, DOC_TITLE, FontFace::Bold, m.title_font_size, s.text, Align::Center);
        if !self.options.institution.is_empty() {
            let band = Rect::new(top_left.x, title.bottom(), width, HEADER_TITLE_BAND - title.height);
            self.text_in(
                surface,
                band,
                &self.options.institution,
                FontFace::Regular,
                m.heading_font_size,
                s.muted_text,
                Align::Center,
            );
        }

        let info = Rect::new(
            top_left.x,
            top_left.y + HEADER_TITLE_BAND,
            width,
            (height - HEADER_TITLE_BAND - BLOCK_GAP).max(0.0),
        );
        surface.fill_rect(info, s.info_box_fill);
        surface.stroke_rect(info, s.border, s.border_width);

        let left = [
            ("Name", student.name.as_str()),
            ("Roll No.", student.roll_number.as_str()),
            ("National ID", student.national_id.as_str()),
        ];
        let right = [
            ("Program", student.program.as_str()),
            ("Department", student.department.as_str()),
        ];
        let pitch = info.height / left.len() as f32;
        let half = width / 2.0;
        let label_w = 90.0;
        for (col, fields) in [&left[..], &right[..]].into_iter().enumerate() {
            let x = info.x + col as f32 * half;
            for (row, (label, value)) in fields.iter().enumerate() {
                let y = info.y + row as f32 * pitch;
                self.text_in(
                    surface,
                    Rect::new(x, y, label_w, pitch),
                    &format!("{label}:"),
                    FontFace::Bold,
                    m.body_font_size,
                    s.text,
                    Align::Left,
                );
                self.text_in(
                    surface,
                    Rect::new(x + label_w, y, half - label_w, pitch),
                    value,
                    FontFace::Regular,
                    m.body_font_size,
                    s.text,
                    Align::Left,
                );
            }
        }
        height
    }

    pub fn draw_semester_title(
        &self,
        surface: &mut impl Surface,
        top_left: Point,
        semester: &SemesterData,
    ) -> f32 {
        let m = self.metrics;
        let s = self.style;
        let bar = Rect::new(
            top_left.x,
            top_left.y,
            m.table_width(),
            (m.semester_title_height - TITLE_BAR_GAP).max(0.0),
        );
        surface.fill_rect(bar, s.title_bar_fill);
        self.text_in(
            surface,
            bar,
            &semester.name,
            FontFace::Bold,
            m.heading_font_size,
            s.title_bar_text,
            Align::Left,
        );
        if let Some(period) = semester_period(semester) {
            self.text_in(
                surface,
                bar,
                &period,
                FontFace::Regular,
                m.body_font_size,
                s.title_bar_text,
                Align::Right,
            );
        }
        m.semester_title_height
    }

    pub fn draw_semester_summary(
        &self,
        surface: &mut impl Surface,
        top_left: Point,
        semester: &SemesterData,
    ) -> f32 {
        let m = self.metrics;
        let s = self.style;
        let box_rect = Rect::new(
            top_left.x,
            top_left.y + TITLE_BAR_GAP,
            m.table_width(),
            (m.semester_summary_height - TITLE_BAR_GAP - BLOCK_GAP).max(0.0),
        );
        surface.fill_rect(box_rect, s.summary_fill);
        surface.stroke_rect(box_rect, s.border, s.border_width);
        self.text_in(
            surface,
            box_rect,
            &format!("Credit Hours: {}", semester.semester_credit_hours),
            FontFace::Bold,
            m.body_font_size,
            s.text,
            Align::Left,
        );
        self.text_in(
            surface,
            box_rect,
            &format!("Semester GPA: {:.2}", semester.semester_gpa),
            FontFace::Bold,
            m.body_font_size,
            s.text,
            Align::Right,
        );
        m.semester_summary_height
    }

    pub fn draw_overall_summary(
        &self,
        surface: &mut impl Surface,
        top_left: Point,
        transcript: &TranscriptData,
    ) -> f32 {
        let m = self.metrics;
        let s = self.style;
        let box_rect = Rect::new(
            top_left.x,
            top_left.y + TITLE_BAR_GAP,
            m.table_width(),
            (m.overall_summary_height - TITLE_BAR_GAP - BLOCK_GAP / 2.0).max(0.0),
        );
        surface.fill_rect(box_rect, s.summary_fill);
        surface.stroke_rect(box_rect, s.title_bar_fill, s.border_width * 2.0);
        self.text_in(
            surface,
            box_rect,
            "CUMULATIVE RESULT",
            FontFace::Bold,
            m.heading_font_size,
            s.table_header_text,
            Align::Left,
        );
        self.text_in(
            surface,
            box_rect,
            &format!(
                "Total Credit Hours: {}    CGPA: {:.2}",
                transcript.total_credit_hours, transcript.overall_gpa
            ),
            FontFace::Bold,
            m.heading_font_size,
            s.text,
            Align::Right,
        );
        m.overall_summary_height
    }

    /// Footer band at the bottom of `page_bounds`: generation date, page
    /// number and a signature line.
    pub fn draw_footer(&self, surface: &mut impl Surface, page_bounds: Rect, page_number: usize) -> f32 {
        let m = self.metrics;
        let s = self.style;
        let h = m.footer_reserved_height;
        let band = Rect::new(page_bounds.x, page_bounds.bottom() - h, page_bounds.width, h);

        surface.line(
            Point::new(band.x, band.y + 8.0),
            Point::new(band.right(), band.y + 8.0),
            s.border,
            s.border_width,
        );

        let text_row = Rect::new(band.x, band.y + 12.0, band.width / 3.0, 20.0);
        let generated = format!("Generated on {}", self.options.generated_on.format("%d %B %Y"));
        self.text_in(surface, text_row, &generated, FontFace::Regular, m.footer_font_size, s.muted_text, Align::Left);
        let center = Rect::new(band.x + band.width / 3.0, text_row.y, band.width / 3.0, 20.0);
        self.text_in(
            surface,
            center,
            &format!("Page {page_number}"),
            FontFace::Regular,
            m.footer_font_size,
            s.muted_text,
            Align::Center,
        );

        let sig_w = 170.0_f32.min(band.width / 3.0);
        let sig_y = band.bottom() - 20.0;
        surface.line(
            Point::new(band.right() - sig_w, sig_y),
            Point::new(band.right(), sig_y),
            s.text,
            s.border_width,
        );
        self.text_in(
            surface,
            Rect::new(band.right() - sig_w, sig_y, sig_w, 20.0),
            &self.options.signature_label,
            FontFace::Regular,
            m.footer_font_size,
            s.muted_text,
            Align::Center,
        );
        h
    }

    /// Paint a planned page, then its footer.
    pub fn paint_page(&self, surface: &mut impl Surface, plan: &PagePlan, transcript: &TranscriptData) {
        let m = self.metrics;
        let page_x = m.printable().x;
        let table_x = m.table_left();

        for placed in &plan.blocks {
            let consumed = match placed.block {
                Block::DocumentHeader => {
                    self.draw_document_header(surface, Point::new(page_x, placed.top), &transcript.student)
                }
                Block::SemesterTitle { semester } => self.draw_semester_title(
                    surface,
                    Point::new(table_x, placed.top),
                    &transcript.semesters[semester],
                ),
                Block::TableHeader { .. } => self.draw_table_header(surface, Point::new(table_x, placed.top)),
                Block::SubjectRow {
                    semester,
                    subject,
                    alternate,
                } => self.draw_subject_row(
                    surface,
                    Point::new(table_x, placed.top),
                    &transcript.semesters[semester].subjects[subject],
                    alternate,
                ),
                Block::SemesterSummary { semester } => self.draw_semester_summary(
                    surface,
                    Point::new(table_x, placed.top),
                    &transcript.semesters[semester],
                ),
                Block::OverallSummary => {
                    self.draw_overall_summary(surface, Point::new(table_x, placed.top), transcript)
                }
            };
            debug_assert!(
                (consumed - placed.height).abs() < 0.01,
                "{:?} drew {consumed} but {} was reserved",
                placed.block,
                placed.height
            );
        }

        self.draw_footer(surface, m.printable(), plan.page_number);
    }
}

fn semester_period(semester: &SemesterData) -> Option<String> {
    let fmt = |d: NaiveDate| d.format("%d %b %Y").to_string();
    match (semester.start_date, semester.end_date) {
        (Some(start), Some(end)) => Some(format!("{} to {}", fmt(start), fmt(end))),
        (Some(start), None) => Some(format!("From {}", fmt(start))),
        (None, Some(end)) => Some(format!("Until {}", fmt(end))),
        (None, None) => None,
    }
}
