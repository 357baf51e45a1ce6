mod error;
mod fonts;
pub mod layout;
mod metrics;
mod model;
mod pdf;
pub mod sections;
pub mod surface;

pub use error::{Error, Result};
pub use fonts::FontFace;
pub use layout::{Block, LayoutState, PageCursor, PagePlan, Paginator, PlacedBlock, plan_document};
pub use metrics::{COLUMN_COUNT, COLUMN_TITLES, LayoutMetrics, Point, Rect, Rgb, Size, Style};
pub use model::{
    ReportType, SemesterData, Student, SubjectResult, TranscriptData, load_transcript,
    parse_transcript,
};
pub use sections::{RenderOptions, SectionRenderer};

use std::path::Path;
use std::time::Instant;

/// Everything besides the transcript that shapes the output.
#[derive(Clone, Debug, Default)]
pub struct RenderConfig {
    pub metrics: LayoutMetrics,
    pub style: Style,
    pub options: RenderOptions,
}

pub fn generate_bytes(
    transcript: &TranscriptData,
    report: ReportType,
    config: &RenderConfig,
) -> Result<Vec<u8>> {
    pdf::render(
        transcript,
        report,
        &config.metrics,
        &config.style,
        &config.options,
    )
}

/// Render with default geometry and styling and write the PDF to `output`.
pub fn generate(transcript: &TranscriptData, report: ReportType, output: &Path) -> Result<()> {
    generate_with(transcript, report, &RenderConfig::default(), output)
}

pub fn generate_with(
    transcript: &TranscriptData,
    report: ReportType,
    config: &RenderConfig,
    output: &Path,
) -> Result<()> {
    let t0 = Instant::now();

    let bytes = generate_bytes(transcript, report, config)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_render.as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}
