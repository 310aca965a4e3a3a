//! Static registry of the 11 risky-driving behaviors and the fuel-type
//! lookup tables.
//!
//! All values here are fixed at compile time; there is no runtime
//! configuration surface. Unrecognized fuel types fall back to the documented
//! gasoline-bucket defaults rather than zero, so an imperfect source still
//! produces a best-effort report.

use crate::models::Behavior;

/// Scoring and impact parameters for one behavior.
#[derive(Debug, Clone, Copy)]
pub struct BehaviorSpec {
    /// Penalty points per event, summed into the driver's penalty score.
    pub penalty: f64,
    /// Estimated fuel wasted per event, in milliliters.
    pub fuel_loss_ml: f64,
    /// Column label used by the source spreadsheet (Korean).
    pub label_ko: &'static str,
}

/// Look up the spec for a behavior.
pub fn spec(behavior: Behavior) -> &'static BehaviorSpec {
    match behavior {
        Behavior::Speeding => &BehaviorSpec {
            penalty: 20.0,
            fuel_loss_ml: 100.0,
            label_ko: "과속",
        },
        Behavior::LongTermSpeeding => &BehaviorSpec {
            penalty: 30.0,
            fuel_loss_ml: 200.0,
            label_ko: "장기과속",
        },
        Behavior::SuddenAcceleration => &BehaviorSpec {
            penalty: 10.0,
            fuel_loss_ml: 50.0,
            label_ko: "급가속",
        },
        Behavior::SuddenStart => &BehaviorSpec {
            penalty: 10.0,
            fuel_loss_ml: 50.0,
            label_ko: "급출발",
        },
        Behavior::SuddenDeceleration => &BehaviorSpec {
            penalty: 10.0,
            fuel_loss_ml: 10.0,
            label_ko: "급감속",
        },
        Behavior::SuddenStop => &BehaviorSpec {
            penalty: 10.0,
            fuel_loss_ml: 10.0,
            label_ko: "급정지",
        },
        Behavior::SuddenLeftTurn => &BehaviorSpec {
            penalty: 15.0,
            fuel_loss_ml: 20.0,
            label_ko: "급좌회전",
        },
        Behavior::SuddenRightTurn => &BehaviorSpec {
            penalty: 15.0,
            fuel_loss_ml: 20.0,
            label_ko: "급우회전",
        },
        Behavior::SuddenUTurn => &BehaviorSpec {
            penalty: 20.0,
            fuel_loss_ml: 30.0,
            label_ko: "급유턴",
        },
        Behavior::SuddenOvertaking => &BehaviorSpec {
            penalty: 25.0,
            fuel_loss_ml: 40.0,
            label_ko: "급앞지르기",
        },
        Behavior::SuddenLaneChange => &BehaviorSpec {
            penalty: 10.0,
            fuel_loss_ml: 10.0,
            label_ko: "급진로변경",
        },
    }
}

/// Reverse lookup: source column label → behavior.
pub fn behavior_for_label(label: &str) -> Option<Behavior> {
    Behavior::ALL
        .iter()
        .copied()
        .find(|&b| spec(b).label_ko == label)
}

/// Fuel type assumed when the source has no fuel-type column
/// (commercial fleets are predominantly diesel).
pub const DEFAULT_FUEL_TYPE: &str = "Diesel";

/// CO2 factor applied to fuel types missing from the table (gasoline bucket).
pub const DEFAULT_CO2_KG_PER_L: f64 = 2.30;

/// Price applied to fuel types missing from the table (gasoline bucket).
pub const DEFAULT_PRICE_KRW_PER_L: f64 = 1600.0;

/// CO2 emitted per liter of fuel burned, in kilograms.
pub fn co2_factor(fuel_type: &str) -> f64 {
    match fuel_type {
        "Diesel" => 2.68,
        "Gasoline" => 2.30,
        _ => DEFAULT_CO2_KG_PER_L,
    }
}

/// Average fuel price, in KRW per liter.
pub fn fuel_price(fuel_type: &str) -> f64 {
    match fuel_type {
        "Diesel" => 1500.0,
        "Gasoline" => 1600.0,
        _ => DEFAULT_PRICE_KRW_PER_L,
    }
}
