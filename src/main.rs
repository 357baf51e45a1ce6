use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use transcript_pdf::{LayoutMetrics, RenderConfig, ReportType};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Report {
    /// Every semester followed by the cumulative result
    Full,
    /// One semester, selected with --semester
    Semester,
}

#[derive(Parser)]
#[command(name = "transcript-pdf", version, about = "Render a student transcript (JSON) as a paginated PDF")]
struct Cli {
    /// Transcript JSON file
    input: PathBuf,

    /// Output PDF path (defaults to the input path with a .pdf extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Report::Full)]
    report: Report,

    /// Semester number (1-based) for semester reports
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..), required_if_eq("report", "semester"))]
    semester: Option<u32>,

    /// JSON file overriding layout metrics; missing fields keep their defaults
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Institution name printed under the title
    #[arg(long, env = "TRANSCRIPT_INSTITUTION")]
    institution: Option<String>,

    /// Caption under the footer signature line
    #[arg(long, env = "TRANSCRIPT_SIGNATURE")]
    signature: Option<String>,

    /// Generation date printed in the footer (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn report_type(&self) -> ReportType {
        match (self.report, self.semester) {
            (Report::Semester, Some(n)) => ReportType::Semester(n as usize - 1),
            (Report::Full, Some(n)) => {
                log::warn!("--semester {n} ignored: full reports include every semester");
                ReportType::Full
            }
            _ => ReportType::Full,
        }
    }
}

fn run(cli: Cli) -> transcript_pdf::Result<()> {
    let transcript = transcript_pdf::load_transcript(&cli.input)?;
    let report = cli.report_type();

    let mut config = RenderConfig::default();
    if let Some(path) = &cli.layout {
        let text = std::fs::read_to_string(path)?;
        config.metrics = LayoutMetrics::from_json(&text)?;
    }
    if let Some(institution) = cli.institution {
        config.options.institution = institution;
    }
    if let Some(signature) = cli.signature {
        config.options.signature_label = signature;
    }
    if let Some(date) = cli.date {
        config.options.generated_on = date;
    }

    let output = cli
        .output
        .unwrap_or_else(|| cli.input.with_extension("pdf"));
    log::info!("Rendering {} -> {}", cli.input.display(), output.display());
    transcript_pdf::generate_with(&transcript, report, &config, &output)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semester_report_is_zero_based() {
        let cli = Cli::try_parse_from(["transcript-pdf", "in.json", "--report", "semester", "--semester", "2"])
            .unwrap();
        assert_eq!(cli.report_type(), ReportType::Semester(1));
    }

    #[test]
    fn semester_is_required_for_semester_reports() {
        assert!(Cli::try_parse_from(["transcript-pdf", "in.json", "--report", "semester"]).is_err());
    }

    #[test]
    fn semester_with_full_report_renders_everything() {
        let cli = Cli::try_parse_from(["transcript-pdf", "in.json", "--semester", "3"]).unwrap();
        assert_eq!(cli.report_type(), ReportType::Full);
    }
}
