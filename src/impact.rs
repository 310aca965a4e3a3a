//! Convert per-driver event totals into estimated fuel, CO2, and financial
//! impact.

use crate::models::{Behavior, DriverImpact, DriverStats, EventCounts};
use crate::schema;

/// Extend each driver aggregate with impact estimates.
///
/// Pure map: same cardinality and order as the input. Fuel-type lookups fall
/// back to the registry defaults for unrecognized values.
pub fn calculate_impact(stats: Vec<DriverStats>) -> Vec<DriverImpact> {
    stats
        .into_iter()
        .map(|stats| {
            let fuel_wasted_l = fuel_wasted_liters(&stats.events);
            let co2_kg = fuel_wasted_l * schema::co2_factor(&stats.fuel_type);
            let financial_loss_krw = fuel_wasted_l * schema::fuel_price(&stats.fuel_type);
            DriverImpact {
                stats,
                fuel_wasted_l,
                co2_kg,
                financial_loss_krw,
            }
        })
        .collect()
}

/// Sum the per-event fuel-loss estimates, converting ml to liters.
fn fuel_wasted_liters(events: &EventCounts) -> f64 {
    Behavior::ALL
        .iter()
        .map(|&b| events.get(&b).copied().unwrap_or(0.0) * schema::spec(b).fuel_loss_ml / 1000.0)
        .sum()
}
