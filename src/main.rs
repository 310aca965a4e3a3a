//! `drive-riskr` — score driver risk from fleet driving-event reports and
//! estimate fuel/CO2/financial impact.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load and normalize the driving-event report ([`loader`]).
//! 3. Aggregate per driver and derive penalty/safety scores ([`analysis`]).
//! 4. Project fuel, CO2, and financial impact ([`impact`]).
//! 5. Render the requested report ([`report`]).
//!
//! Only a load failure aborts the run; schema gaps (missing columns,
//! unrecognized fuel types) are compensated with the defaults documented in
//! [`schema`] and reported as warnings.

mod analysis;
mod cli;
mod impact;
mod loader;
mod models;
mod report;
mod schema;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use cli::{Cli, ReportFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = loader::load_csv(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;

    if !cli.quiet {
        for gap in &loaded.gaps {
            eprintln!("  {} {}", "⚠".yellow(), gap);
        }
        eprintln!(
            "  {} {} rows normalized from {}",
            "→".cyan(),
            loaded.records.len(),
            cli.input.display()
        );
    }

    let stats = analysis::analyze_driver_risk(&loaded.records);
    let impacts = impact::calculate_impact(stats);

    // Resolve effective report format: --out implies CSV
    let report_format = match &cli.out {
        Some(_) => ReportFormat::Csv,
        None => cli.report,
    };
    let out_path = cli
        .out
        .unwrap_or_else(|| std::path::PathBuf::from("risk-report.csv"));

    match report_format {
        ReportFormat::Terminal => {
            report::terminal::render(&impacts, &loaded.records, &cli.input, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&impacts)?);
        }
        ReportFormat::Csv => {
            report::csv::render(&impacts, &out_path)?;
            if !cli.quiet {
                eprintln!("  {} report written to {}", "✓".green(), out_path.display());
            }
        }
    }

    Ok(())
}
