//! Group normalized records per driver and derive penalty and safety scores.

use std::collections::BTreeMap;

use crate::models::{Behavior, DriverStats, DrivingRecord, EventCounts};
use crate::schema;

/// Scale factor turning penalty points into safety-score deductions.
/// Heuristic, kept in sync with the original report's score card.
const PENALTY_TO_SCORE: f64 = 0.1;

/// Aggregate records into one [`DriverStats`] per driver.
///
/// Grouping is by the full `(driver_id, driver_name, fuel_type)` tuple: the
/// same id reported with an inconsistent name or fuel type forms separate
/// groups rather than being merged further. Empty input yields an empty
/// result. Output is ordered by group key.
pub fn analyze_driver_risk(records: &[DrivingRecord]) -> Vec<DriverStats> {
    let mut groups: BTreeMap<(String, String, String), EventCounts> = BTreeMap::new();

    for record in records {
        let key = (
            record.driver_id.clone(),
            record.driver_name.clone(),
            record.fuel_type.clone(),
        );
        let totals = groups.entry(key).or_insert_with(Behavior::zeroed_counts);
        for (&behavior, &count) in &record.events {
            *totals.entry(behavior).or_insert(0.0) += count;
        }
    }

    groups
        .into_iter()
        .map(|((driver_id, driver_name, fuel_type), events)| {
            let total_penalty = total_penalty(&events);
            DriverStats {
                driver_id,
                driver_name,
                fuel_type,
                events,
                total_penalty,
                safety_score: safety_score(total_penalty),
            }
        })
        .collect()
}

/// Penalty-weighted sum of event counts.
pub fn total_penalty(events: &EventCounts) -> f64 {
    Behavior::ALL
        .iter()
        .map(|&b| events.get(&b).copied().unwrap_or(0.0) * schema::spec(b).penalty)
        .sum()
}

/// Safety score: 100 minus scaled penalty, floored at 0. No upper clamp is
/// applied; zero penalty is the natural maximum.
pub fn safety_score(total_penalty: f64) -> f64 {
    (100.0 - total_penalty * PENALTY_TO_SCORE).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, fuel: &str, events: &[(Behavior, f64)]) -> DrivingRecord {
        let mut counts = Behavior::zeroed_counts();
        for &(b, n) in events {
            counts.insert(b, n);
        }
        DrivingRecord {
            driver_id: id.to_string(),
            driver_name: id.to_string(),
            fuel_type: fuel.to_string(),
            distance_km: 0.0,
            events: counts,
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(analyze_driver_risk(&[]).is_empty());
    }

    #[test]
    fn test_worked_example() {
        // Speeding (20 pts, 100 ml) x2 + SuddenAcceleration (10 pts, 50 ml) x1.
        let stats = analyze_driver_risk(&[record(
            "A",
            "Diesel",
            &[(Behavior::Speeding, 2.0), (Behavior::SuddenAcceleration, 1.0)],
        )]);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].total_penalty, 50.0);
        assert_eq!(stats[0].safety_score, 95.0);
    }

    #[test]
    fn test_rows_with_same_key_merge() {
        let stats = analyze_driver_risk(&[
            record("A", "Diesel", &[(Behavior::Speeding, 1.0)]),
            record("A", "Diesel", &[(Behavior::Speeding, 2.5)]),
        ]);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].events[&Behavior::Speeding], 3.5);
    }

    #[test]
    fn test_same_id_different_fuel_stays_separate() {
        let stats = analyze_driver_risk(&[
            record("A", "Diesel", &[(Behavior::Speeding, 1.0)]),
            record("A", "Gasoline", &[(Behavior::Speeding, 1.0)]),
        ]);
        assert_eq!(stats.len(), 2);
    }

    #[test]
    fn test_counts_conserved_through_grouping() {
        let records = vec![
            record("A", "Diesel", &[(Behavior::Speeding, 1.5), (Behavior::SuddenStop, 2.0)]),
            record("B", "Diesel", &[(Behavior::Speeding, 0.5)]),
            record("A", "Diesel", &[(Behavior::SuddenStop, 1.0)]),
        ];
        let stats = analyze_driver_risk(&records);

        for b in Behavior::ALL {
            let input: f64 = records.iter().map(|r| r.events[&b]).sum();
            let output: f64 = stats.iter().map(|s| s.events[&b]).sum();
            assert!((input - output).abs() < 1e-9, "{b} not conserved");
        }
    }

    #[test]
    fn test_score_floors_at_zero() {
        let stats = analyze_driver_risk(&[record(
            "A",
            "Diesel",
            &[(Behavior::LongTermSpeeding, 1000.0)],
        )]);
        assert_eq!(stats[0].safety_score, 0.0);
    }

    #[test]
    fn test_score_non_increasing_in_penalty() {
        let mut last = f64::INFINITY;
        for penalty in [0.0, 10.0, 50.0, 500.0, 1000.0, 5000.0] {
            let score = safety_score(penalty);
            assert!(score <= last);
            assert!((0.0..=100.0).contains(&score));
            last = score;
        }
    }
}
