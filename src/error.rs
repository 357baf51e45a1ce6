/// Result type alias for transcript layout operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// The page geometry cannot hold the smallest placeable fragment.
    #[error("Page too small: {needed:.1} layout units needed, {available:.1} available")]
    PageTooSmall { needed: f32, available: f32 },

    /// A layout metric that no page geometry can work with, such as a
    /// negative block height or a non-finite page size.
    #[error("Invalid layout metric {field}: {value}")]
    InvalidMetric { field: &'static str, value: f32 },

    /// The layout override document could not be decoded.
    #[error("Invalid layout metrics: {0}")]
    LayoutJson(serde_json::Error),

    /// A page was requested after the render job reached its terminal state.
    #[error("Render job already finished: no further pages can be produced")]
    JobFinished,

    #[error("Transcript has no semesters")]
    NoSemesters,

    #[error("Semester {index} ({name}) has no subjects")]
    EmptySemester { index: usize, name: String },

    #[error("Semester index {index} out of range (transcript has {count} semesters)")]
    SemesterOutOfRange { index: usize, count: usize },
}

impl Error {
    /// Page geometry and layout override errors. Retrying with the same metrics fails the same way.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::PageTooSmall { .. } | Error::InvalidMetric { .. } | Error::LayoutJson(_)
        )
    }

    /// Errors caused by the transcript handed in by the producer.
    pub fn is_upstream_data(&self) -> bool {
        matches!(
            self,
            Error::Json(_)
                | Error::NoSemesters
                | Error::EmptySemester { .. }
                | Error::SemesterOutOfRange { .. }
        )
    }
}
