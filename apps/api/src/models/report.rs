use serde::{Deserialize, Serialize};

/// One phase of the projected journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub title: String,
    pub timeframe: String,
    pub description: String,
    /// Absent on the wire renders as an empty list.
    #[serde(default)]
    pub milestones: Vec<String>,
}

/// The structured simulation output, whether AI-derived or offline-estimated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub summary: String,
    /// 0 – 100
    pub feasibility: u8,
    pub time_to_achieve: String,
    pub financial_impact: String,
    pub advantages: Vec<String>,
    pub challenges: Vec<String>,
    pub recommendations: Vec<String>,
    pub timeline: Vec<TimelineEvent>,
}

impl SimulationReport {
    pub fn feasibility_band(&self) -> FeasibilityBand {
        FeasibilityBand::from_score(self.feasibility)
    }
}

/// Qualitative bucket for a feasibility score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeasibilityBand {
    HighlyFeasible,
    Feasible,
    Challenging,
    Difficult,
    VeryDifficult,
}

impl FeasibilityBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => FeasibilityBand::HighlyFeasible,
            60..=79 => FeasibilityBand::Feasible,
            40..=59 => FeasibilityBand::Challenging,
            20..=39 => FeasibilityBand::Difficult,
            _ => FeasibilityBand::VeryDifficult,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeasibilityBand::HighlyFeasible => "Highly Feasible",
            FeasibilityBand::Feasible => "Feasible",
            FeasibilityBand::Challenging => "Challenging",
            FeasibilityBand::Difficult => "Difficult",
            FeasibilityBand::VeryDifficult => "Very Difficult",
        }
    }
}
