//! Page-by-page pagination of a transcript.
//!
//! [`Paginator`] plans one page at a time into a [`PagePlan`]: the blocks that
//! fit, in top-to-bottom order, with their vertical positions. Planning never
//! touches a drawing surface; [`Paginator::render_page`] plans and then paints
//! the plan through a [`SectionRenderer`].

mod cursor;

pub use cursor::{LayoutState, PageCursor};

use std::ops::Range;

use crate::error::{Error, Result};
use crate::metrics::LayoutMetrics;
use crate::model::{ReportType, TranscriptData};
use crate::sections::SectionRenderer;
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Block {
    DocumentHeader,
    SemesterTitle { semester: usize },
    TableHeader { semester: usize },
    SubjectRow {
        semester: usize,
        subject: usize,
        alternate: bool,
    },
    SemesterSummary { semester: usize },
    OverallSummary,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedBlock {
    pub block: Block,
    pub top: f32,
    pub height: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PagePlan {
    /// 1-based.
    pub page_number: usize,
    pub blocks: Vec<PlacedBlock>,
    /// True when another page must follow this one.
    pub more: bool,
}

impl PagePlan {
    /// `(semester, subject)` of every row on this page, in drawing order.
    pub fn rows(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.blocks.iter().filter_map(|p| match p.block {
            Block::SubjectRow {
                semester, subject, ..
            } => Some((semester, subject)),
            _ => None,
        })
    }

    pub fn contains(&self, block: Block) -> bool {
        self.blocks.iter().any(|p| p.block == block)
    }
}

pub struct Paginator<'a> {
    transcript: &'a TranscriptData,
    metrics: &'a LayoutMetrics,
    report: ReportType,
    semesters: Range<usize>,
    cursor: PageCursor,
}

impl<'a> Paginator<'a> {
    /// Start a render job. Data and geometry are checked up front so a bad
    /// input fails before any page is produced.
    pub fn new(
        transcript: &'a TranscriptData,
        report: ReportType,
        metrics: &'a LayoutMetrics,
    ) -> Result<Self> {
        transcript.validate(report)?;
        metrics.validate(report)?;
        Ok(Self {
            transcript,
            metrics,
            report,
            semesters: transcript.semester_range(report),
            cursor: PageCursor::new(),
        })
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub fn is_done(&self) -> bool {
        self.cursor.is_done()
    }

    fn subject_count(&self, semester: usize) -> usize {
        self.transcript.semesters[semester].subjects.len()
    }

    /// Height that must be free before anything of `state` is placed,
    /// including content that has to stay on the same page with it.
    fn required_height(&self, state: LayoutState, table_header_on_page: bool) -> f32 {
        let m = self.metrics;
        match state {
            LayoutState::Start | LayoutState::DocumentHeader => m.document_header_height,
            LayoutState::SemesterTitle { semester } => {
                let summary = if self.subject_count(semester) == 1 {
                    m.semester_summary_height
                } else {
                    0.0
                };
                m.atomic_unit_height() + summary
            }
            LayoutState::TableRows { semester, subject } => {
                let header = if table_header_on_page {
                    0.0
                } else {
                    m.table_header_height
                };
                let summary = if subject + 1 == self.subject_count(semester) {
                    m.semester_summary_height
                } else {
                    0.0
                };
                header + m.row_height + summary
            }
            LayoutState::SemesterSummary { .. } => m.semester_summary_height,
            LayoutState::OverallSummary => m.overall_summary_height,
            LayoutState::Done => 0.0,
        }
    }

    /// Plan the next page and advance the cursor past everything on it.
    pub fn next_page(&mut self) -> Result<PagePlan> {
        if self.cursor.is_done() {
            return Err(Error::JobFinished);
        }

        let m = self.metrics;
        let page_number = self.cursor.page_number + 1;
        let bottom = m.content_bottom();
        let last_semester = self.semesters.end - 1;
        let mut state = match self.cursor.state {
            LayoutState::Start => LayoutState::DocumentHeader,
            other => other,
        };
        let mut y = m.margin_top;
        let mut blocks = Vec::new();
        let mut table_header_on_page = false;

        let place = |blocks: &mut Vec<PlacedBlock>, y: &mut f32, block: Block, height: f32| {
            log::debug!("page {page_number}: {block:?} at y={:.1} h={height:.1}", *y);
            blocks.push(PlacedBlock {
                block,
                top: *y,
                height,
            });
            *y += height;
        };

        while state != LayoutState::Done {
            let needed = self.required_height(state, table_header_on_page);
            if needed > bottom - y {
                log::trace!(
                    "page {page_number}: break before {state:?} (needs {needed:.1}, {:.1} left)",
                    bottom - y
                );
                break;
            }

            state = match state {
                LayoutState::Start | LayoutState::DocumentHeader => {
                    place(&mut blocks, &mut y, Block::DocumentHeader, m.document_header_height);
                    LayoutState::SemesterTitle {
                        semester: self.semesters.start,
                    }
                }
                LayoutState::SemesterTitle { semester } => {
                    place(
                        &mut blocks,
                        &mut y,
                        Block::SemesterTitle { semester },
                        m.semester_title_height,
                    );
                    table_header_on_page = false;
                    LayoutState::TableRows {
                        semester,
                        subject: 0,
                    }
                }
                LayoutState::TableRows { semester, subject } => {
                    if !table_header_on_page {
                        place(
                            &mut blocks,
                            &mut y,
                            Block::TableHeader { semester },
                            m.table_header_height,
                        );
                        table_header_on_page = true;
                    }
                    place(
                        &mut blocks,
                        &mut y,
                        Block::SubjectRow {
                            semester,
                            subject,
                            alternate: subject % 2 == 1,
                        },
                        m.row_height,
                    );
                    if subject + 1 == self.subject_count(semester) {
                        LayoutState::SemesterSummary { semester }
                    } else {
                        LayoutState::TableRows {
                            semester,
                            subject: subject + 1,
                        }
                    }
                }
                LayoutState::SemesterSummary { semester } => {
                    place(
                        &mut blocks,
                        &mut y,
                        Block::SemesterSummary { semester },
                        m.semester_summary_height,
                    );
                    LayoutState::after_semester(semester, last_semester, self.report.is_full())
                }
                LayoutState::OverallSummary => {
                    place(&mut blocks, &mut y, Block::OverallSummary, m.overall_summary_height);
                    LayoutState::Done
                }
                LayoutState::Done => LayoutState::Done,
            };
        }

        // Unreachable with metrics that passed `LayoutMetrics::validate`.
        if blocks.is_empty() {
            return Err(Error::PageTooSmall {
                needed: self.required_height(state, false),
                available: m.content_height(),
            });
        }

        self.cursor.page_number = page_number;
        self.cursor.state = state;
        let more = !self.cursor.is_done();
        log::debug!(
            "page {page_number}: {} blocks, {:.1} units used, more={more}",
            blocks.len(),
            y - m.margin_top
        );

        Ok(PagePlan {
            page_number,
            blocks,
            more,
        })
    }

    /// Produce one page on `surface`. Returns whether another page is needed.
    pub fn render_page<S: Surface>(
        &mut self,
        surface: &mut S,
        renderer: &SectionRenderer<'_>,
    ) -> Result<bool> {
        let plan = self.next_page()?;
        renderer.paint_page(surface, &plan, self.transcript);
        Ok(plan.more)
    }
}

/// Lazy, finite page sequence. Stops after the last page or after the first
/// error.
impl Iterator for Paginator<'_> {
    type Item = Result<PagePlan>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.is_done() {
            return None;
        }
        let page = self.next_page();
        if page.is_err() {
            self.cursor.state = LayoutState::Done;
        }
        Some(page)
    }
}

/// Plan every page of a document before any drawing happens.
pub fn plan_document(
    transcript: &TranscriptData,
    report: ReportType,
    metrics: &LayoutMetrics,
) -> Result<Vec<PagePlan>> {
    Paginator::new(transcript, report, metrics)?.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SemesterData, Student, SubjectResult};

    fn one_subject_transcript() -> TranscriptData {
        TranscriptData {
            student: Student {
                name: "Sana Iqbal".to_string(),
                roll_number: "BSSE-22-003".to_string(),
                national_id: "42101-1111111-2".to_string(),
                program: "BS Software Engineering".to_string(),
                department: "Software Engineering".to_string(),
            },
            semesters: vec![SemesterData {
                name: "Fall 2022".to_string(),
                start_date: None,
                end_date: None,
                subjects: vec![SubjectResult {
                    code: "SE101".to_string(),
                    name: "Programming Fundamentals".to_string(),
                    credit_hours: 4,
                    total_marks: 100,
                    obtained_marks: 88.0,
                    percentage: 88.0,
                    gpa: 4.0,
                    grade_letter: "A".to_string(),
                }],
                semester_gpa: 4.0,
                semester_credit_hours: 4,
            }],
            overall_gpa: 4.0,
            total_credit_hours: 4,
        }
    }

    #[test]
    fn stalled_page_reports_page_too_small() {
        let t = one_subject_transcript();
        // 170 units of content: the document header fits, the 193-unit
        // semester fragment (title, table header, row and summary) never does.
        let m = LayoutMetrics {
            page_height: 340.0,
            semester_summary_height: 100.0,
            ..LayoutMetrics::default()
        };
        assert!(m.validate(ReportType::Semester(0)).is_err());

        let mut paginator = Paginator {
            transcript: &t,
            metrics: &m,
            report: ReportType::Semester(0),
            semesters: t.semester_range(ReportType::Semester(0)),
            cursor: PageCursor::new(),
        };
        let first = paginator.next_page().unwrap();
        assert_eq!(first.blocks.len(), 1);
        assert!(first.more);

        match paginator.next_page() {
            Err(Error::PageTooSmall { needed, available }) => {
                assert_eq!(needed, m.min_fragment_height());
                assert_eq!(available, 170.0);
            }
            other => panic!("expected PageTooSmall, got {other:?}"),
        }
        assert_eq!(paginator.cursor().page_number(), 1);
    }
}
