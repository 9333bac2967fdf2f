//! Non-biometric behavioral features and their numeric encoding.
//!
//! Features describe movement style and context only; no facial data,
//! voiceprints, or other biometric identifiers can be represented here.

mod similarity;

pub use similarity::similarity;

use serde::{Deserialize, Serialize};

/// Coarse time-of-day bucket for an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    fn code(self) -> f64 {
        match self {
            TimeOfDay::Morning => 0.0,
            TimeOfDay::Afternoon => 1.0,
            TimeOfDay::Evening => 2.0,
            TimeOfDay::Night => 3.0,
        }
    }
}

/// Abstract location zone inside the home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Kitchen,
    LivingRoom,
    Bedroom,
    Bathroom,
}

impl Zone {
    fn code(self) -> f64 {
        match self {
            Zone::Kitchen => 0.0,
            Zone::LivingRoom => 1.0,
            Zone::Bedroom => 2.0,
            Zone::Bathroom => 3.0,
        }
    }

    /// Stable string form, usable as a pattern-store zone key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Kitchen => "kitchen",
            Zone::LivingRoom => "living_room",
            Zone::Bedroom => "bedroom",
            Zone::Bathroom => "bathroom",
        }
    }
}

/// Gait/movement character during the observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementPattern {
    Steady,
    Variable,
    Stationary,
}

impl MovementPattern {
    fn code(self) -> f64 {
        match self {
            MovementPattern::Steady => 0.0,
            MovementPattern::Variable => 1.0,
            MovementPattern::Stationary => 2.0,
        }
    }
}

/// One behavioral feature record, extracted upstream from raw sensors.
/// Immutable value type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BehavioralFeatures {
    /// Movement speed in m/s (0.5–2.0 typical human range)
    pub movement_speed: f64,
    /// Rough height estimate in meters, not precise
    pub height_estimate: f64,
    pub time_of_day: TimeOfDay,
    pub zone: Zone,
    pub movement_pattern: MovementPattern,
}

impl BehavioralFeatures {
    pub const DIM: usize = 5;

    /// Encode to a fixed-dimension numeric vector for similarity comparison.
    ///
    /// Categorical fields map to fixed ordinal codes. Whether ordinal
    /// distance between codes carries semantic meaning is questionable;
    /// the encoding is isolated here so a one-hot scheme could replace it
    /// without touching the similarity computation.
    pub fn encode(&self) -> [f64; Self::DIM] {
        [
            self.movement_speed,
            self.height_estimate,
            self.time_of_day.code(),
            self.zone.code(),
            self.movement_pattern.code(),
        ]
    }
}
