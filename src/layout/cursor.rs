/// Where the render job stands: the next unit of content to place.
///
/// `TableRows` carries the first subject not yet drawn, so resuming a
/// semester on a new page continues at exactly that row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutState {
    Start,
    DocumentHeader,
    SemesterTitle { semester: usize },
    TableRows { semester: usize, subject: usize },
    SemesterSummary { semester: usize },
    OverallSummary,
    Done,
}

impl LayoutState {
    /// State following a semester's summary box.
    pub(crate) fn after_semester(semester: usize, last_semester: usize, full_report: bool) -> Self {
        if semester < last_semester {
            LayoutState::SemesterTitle {
                semester: semester + 1,
            }
        } else if full_report {
            LayoutState::OverallSummary
        } else {
            LayoutState::Done
        }
    }
}

/// Traversal state of one render job. Each job owns its own cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageCursor {
    pub(crate) page_number: usize,
    pub(crate) state: LayoutState,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageCursor {
    pub fn new() -> Self {
        Self {
            page_number: 0,
            state: LayoutState::Start,
        }
    }

    /// Number of the last page produced (0 before the first page).
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == LayoutState::Done
    }

    pub fn header_drawn(&self) -> bool {
        !matches!(self.state, LayoutState::Start | LayoutState::DocumentHeader)
    }

    /// `(semester, subject)` of the next row to draw, while inside a table.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self.state {
            LayoutState::SemesterTitle { semester } => Some((semester, 0)),
            LayoutState::TableRows { semester, subject } => Some((semester, subject)),
            _ => None,
        }
    }
}
