use std::path::Path;

use anyhow::Result;

use crate::models::{Behavior, DriverImpact};

/// Write the impact table as a flat CSV for downstream dashboards.
///
/// One row per driver: identity, the 11 behavior totals under their
/// canonical keys, then scores and impact estimates.
pub fn render(impacts: &[DriverImpact], out_path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(out_path)?;

    let mut header = vec![
        "driver_id".to_string(),
        "driver_name".to_string(),
        "fuel_type".to_string(),
    ];
    header.extend(Behavior::ALL.iter().map(|b| b.to_string()));
    header.extend([
        "total_penalty".to_string(),
        "safety_score".to_string(),
        "fuel_wasted_l".to_string(),
        "co2_kg".to_string(),
        "financial_loss_krw".to_string(),
    ]);
    writer.write_record(&header)?;

    for impact in impacts {
        let mut row = vec![
            impact.stats.driver_id.clone(),
            impact.stats.driver_name.clone(),
            impact.stats.fuel_type.clone(),
        ];
        for b in Behavior::ALL {
            row.push(format!("{}", impact.stats.events.get(&b).copied().unwrap_or(0.0)));
        }
        row.push(format!("{}", impact.stats.total_penalty));
        row.push(format!("{}", impact.stats.safety_score));
        row.push(format!("{}", impact.fuel_wasted_l));
        row.push(format!("{}", impact.co2_kg));
        row.push(format!("{}", impact.financial_loss_krw));
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
