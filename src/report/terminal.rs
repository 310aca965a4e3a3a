use std::path::Path;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{Behavior, DriverImpact, DrivingRecord};
use crate::schema;

/// Drivers shown in the ranking table unless `--verbose` is set.
const RANKING_LIMIT: usize = 10;

/// Render a colored terminal report: fleet summary, risk ranking, and (with
/// `--verbose`) the fleet-wide behavior breakdown.
pub fn render(
    impacts: &[DriverImpact],
    records: &[DrivingRecord],
    path: &Path,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let drivers = impacts.len();
    let total_distance: f64 = records.iter().map(|r| r.distance_km).sum();
    let total_fuel: f64 = impacts.iter().map(|i| i.fuel_wasted_l).sum();
    let total_co2: f64 = impacts.iter().map(|i| i.co2_kg).sum();
    let total_loss: f64 = impacts.iter().map(|i| i.financial_loss_krw).sum();

    if quiet {
        println!(
            "Drivers: {}  Fuel wasted: {:.1} L  CO2: {:.1} kg  Loss: {:.0} KRW",
            drivers, total_fuel, total_co2, total_loss
        );
        return Ok(());
    }

    println!("\n {} v{}", "drive-riskr".bold(), env!("CARGO_PKG_VERSION"));
    println!(" Analyzing: {}\n", path.display());

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "FLEET SUMMARY".bold());
    println!(" │  {:<48} │", format!("Vehicles analyzed  : {}", drivers));
    println!(
        " │  {:<48} │",
        format!("Total distance     : {:.0} km", total_distance)
    );
    println!(
        " │  {:<48} │",
        format!("Est. fuel wasted   : {:.1} L", total_fuel)
    );
    println!(
        " │  {:<48} │",
        format!("Est. CO2 emitted   : {:.1} kg", total_co2)
    );
    println!(
        " │  {:<48} │",
        format!("Est. financial loss: {:.0} KRW", total_loss)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if drivers > 0 {
        let shown = if verbose { drivers } else { drivers.min(RANKING_LIMIT) };
        println!(
            " {} Driver ranking by risk ({} of {}):\n",
            "[RANKING]".red().bold(),
            shown,
            drivers
        );
        render_ranking(impacts, shown);
        println!();
    }

    if verbose {
        println!(" {} Fleet-wide events by behavior:\n", "[BEHAVIORS]".cyan().bold());
        render_behavior_breakdown(impacts);
        println!();
    }

    Ok(())
}

fn render_ranking(impacts: &[DriverImpact], limit: usize) {
    // Riskiest drivers first.
    let mut ranked: Vec<&DriverImpact> = impacts.iter().collect();
    ranked.sort_by(|a, b| {
        b.stats
            .total_penalty
            .partial_cmp(&a.stats.total_penalty)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Driver").add_attribute(Attribute::Bold),
            Cell::new("Fuel").add_attribute(Attribute::Bold),
            Cell::new("Penalty").add_attribute(Attribute::Bold),
            Cell::new("Safety").add_attribute(Attribute::Bold),
            Cell::new("Fuel Wasted (L)").add_attribute(Attribute::Bold),
            Cell::new("CO2 (kg)").add_attribute(Attribute::Bold),
            Cell::new("Loss (KRW)").add_attribute(Attribute::Bold),
        ]);

    for (rank, impact) in ranked.iter().take(limit).enumerate() {
        let score = impact.stats.safety_score;
        let score_color = if score >= 80.0 {
            Color::Green
        } else if score >= 60.0 {
            Color::Yellow
        } else {
            Color::Red
        };

        table.add_row(vec![
            Cell::new(rank + 1).set_alignment(CellAlignment::Right),
            Cell::new(&impact.stats.driver_name),
            Cell::new(&impact.stats.fuel_type),
            Cell::new(format!("{:.1}", impact.stats.total_penalty))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.0}", score))
                .fg(score_color)
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", impact.fuel_wasted_l)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", impact.co2_kg)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.0}", impact.financial_loss_krw))
                .set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{}", table);
}

fn render_behavior_breakdown(impacts: &[DriverImpact]) {
    let mut totals: Vec<(Behavior, f64)> = Behavior::ALL
        .iter()
        .map(|&b| {
            let sum = impacts
                .iter()
                .map(|i| i.stats.events.get(&b).copied().unwrap_or(0.0))
                .sum();
            (b, sum)
        })
        .collect();
    totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Behavior").add_attribute(Attribute::Bold),
            Cell::new("Label").add_attribute(Attribute::Bold),
            Cell::new("Events").add_attribute(Attribute::Bold),
            Cell::new("Penalty/event").add_attribute(Attribute::Bold),
        ]);

    for (behavior, count) in totals {
        table.add_row(vec![
            Cell::new(behavior.to_string()),
            Cell::new(schema::spec(behavior).label_ko),
            Cell::new(format!("{:.1}", count)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.0}", schema::spec(behavior).penalty))
                .set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{}", table);
}
