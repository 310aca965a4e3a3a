use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Event totals keyed by behavior. Normalized records always carry all 11
/// behaviors (missing source columns are zero-filled by the loader).
pub type EventCounts = BTreeMap<Behavior, f64>;

/// The 11 recognized risky-driving behaviors.
///
/// The set is fixed; penalty weights, fuel-loss estimates, and the localized
/// column labels live in [`crate::schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Behavior {
    Speeding,
    LongTermSpeeding,
    SuddenAcceleration,
    SuddenStart,
    SuddenDeceleration,
    SuddenStop,
    SuddenLeftTurn,
    SuddenRightTurn,
    SuddenUTurn,
    SuddenOvertaking,
    SuddenLaneChange,
}

impl Behavior {
    /// All behaviors in canonical order.
    pub const ALL: [Behavior; 11] = [
        Behavior::Speeding,
        Behavior::LongTermSpeeding,
        Behavior::SuddenAcceleration,
        Behavior::SuddenStart,
        Behavior::SuddenDeceleration,
        Behavior::SuddenStop,
        Behavior::SuddenLeftTurn,
        Behavior::SuddenRightTurn,
        Behavior::SuddenUTurn,
        Behavior::SuddenOvertaking,
        Behavior::SuddenLaneChange,
    ];

    /// Zero-filled event map covering every behavior.
    pub fn zeroed_counts() -> EventCounts {
        Behavior::ALL.iter().map(|&b| (b, 0.0)).collect()
    }
}

impl std::fmt::Display for Behavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Behavior::Speeding => write!(f, "Speeding"),
            Behavior::LongTermSpeeding => write!(f, "Long Term Speeding"),
            Behavior::SuddenAcceleration => write!(f, "Sudden Acceleration"),
            Behavior::SuddenStart => write!(f, "Sudden Start"),
            Behavior::SuddenDeceleration => write!(f, "Sudden Deceleration"),
            Behavior::SuddenStop => write!(f, "Sudden Stop"),
            Behavior::SuddenLeftTurn => write!(f, "Sudden Left Turn"),
            Behavior::SuddenRightTurn => write!(f, "Sudden Right Turn"),
            Behavior::SuddenUTurn => write!(f, "Sudden U-Turn"),
            Behavior::SuddenOvertaking => write!(f, "Sudden Overtaking"),
            Behavior::SuddenLaneChange => write!(f, "Sudden Lane Change"),
        }
    }
}

/// One normalized source row: a per-vehicle trip summary with a resolved
/// driver identity and a complete event map.
///
/// `distance_km` is carried through for the fleet summary only; the scoring
/// pipeline never reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrivingRecord {
    pub driver_id: String,
    pub driver_name: String,
    pub fuel_type: String,
    pub distance_km: f64,
    pub events: EventCounts,
}

/// Per-driver aggregate: summed event counts plus the derived scores.
///
/// Invariants: `total_penalty` is the penalty-weighted sum of `events`;
/// `safety_score = max(0, 100 - total_penalty * 0.1)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverStats {
    pub driver_id: String,
    pub driver_name: String,
    pub fuel_type: String,
    pub events: EventCounts,
    pub total_penalty: f64,
    pub safety_score: f64,
}

/// Final output row: driver aggregate extended with the estimated
/// environmental and financial impact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverImpact {
    #[serde(flatten)]
    pub stats: DriverStats,
    /// Estimated fuel wasted by risky events, in liters.
    pub fuel_wasted_l: f64,
    /// Estimated CO2 emitted by the wasted fuel, in kilograms.
    pub co2_kg: f64,
    /// Estimated financial loss from the wasted fuel, in KRW.
    pub financial_loss_krw: f64,
}
