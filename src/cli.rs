use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "drive-riskr",
    about = "Score driver risk from fleet driving-event reports and estimate fuel/CO2 impact",
    version
)]
pub struct Cli {
    /// Driving-event report to analyze (CSV export of the fleet spreadsheet)
    pub input: PathBuf,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// CSV output path; use without value to default to risk-report.csv
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "risk-report.csv")]
    pub out: Option<PathBuf>,

    /// Show every driver and the fleet-wide behavior breakdown
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Csv,
}
