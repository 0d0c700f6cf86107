//! The structured verdict returned by the model.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Highest threat level the rubric allows.
pub const MAX_THREAT_LEVEL: u8 = 10;

/// Security verdict for a set of frames.
///
/// Field order is the output key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AnalysisResult {
    pub vehicle_detected: bool,
    pub person_detected: bool,
    pub license_plates: Vec<String>,
    pub possible_vehicle_accident: bool,
    pub smoke_detected: bool,
    pub fire_detected: bool,
    pub firearm_detected: bool,
    #[validate(range(max = 10))]
    pub threat_level: u8,
    pub summary: String,
}

impl AnalysisResult {
    /// Pretty JSON with 2-space indentation, keys in declaration order.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn threat(&self) -> ThreatLevel {
        ThreatLevel::from_score(self.threat_level)
    }

    /// Whether any of the hazard flags is set.
    pub fn any_hazard(&self) -> bool {
        self.possible_vehicle_accident
            || self.smoke_detected
            || self.fire_detected
            || self.firearm_detected
    }
}

/// Rubric bands the prompt asks the model to score against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ThreatLevel {
    /// 0-2: normal activity.
    Normal,
    /// 3-4: loitering, unusual behavior.
    Minor,
    /// 5-6: aggressive behavior, unsafe driving.
    Moderate,
    /// 7-8: weapons visible, active conflict, fire/smoke.
    High,
    /// 9-10: active shooter, major accident, widespread danger.
    Critical,
}

impl ThreatLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => Self::Normal,
            3..=4 => Self::Minor,
            5..=6 => Self::Moderate,
            7..=8 => Self::High,
            _ => Self::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Minor => "minor",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
