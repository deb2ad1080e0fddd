//! Offline estimator: deterministic, network-free report generation.
//!
//! Used as the terminal fallback of the simulation pipeline. Pure function of
//! the request: same input, identical output.

use crate::models::{ScenarioRequest, SimulationReport};
use crate::simulation::defaults::{
    default_timeline, fallback_summary, owned, DEFAULT_ADVANTAGES, DEFAULT_CHALLENGES,
    DEFAULT_FINANCIAL_IMPACT, DEFAULT_RECOMMENDATIONS, DEFAULT_TIME_TO_ACHIEVE,
};

/// Feasibility heuristic: `round(50 + (risk / 10) * 20)`.
/// Spans 52 (risk 1) to 70 (risk 10).
pub fn offline_feasibility(risk_tolerance: u8) -> u8 {
    let risk_factor = f64::from(risk_tolerance) / 10.0;
    (50.0 + risk_factor * 20.0).round() as u8
}

pub fn estimate_report(request: &ScenarioRequest) -> SimulationReport {
    SimulationReport {
        summary: fallback_summary(request.scenario()),
        feasibility: offline_feasibility(request.risk_tolerance()),
        time_to_achieve: DEFAULT_TIME_TO_ACHIEVE.to_string(),
        financial_impact: DEFAULT_FINANCIAL_IMPACT.to_string(),
        advantages: owned(&DEFAULT_ADVANTAGES),
        challenges: owned(&DEFAULT_CHALLENGES),
        recommendations: owned(&DEFAULT_RECOMMENDATIONS),
        timeline: default_timeline(),
    }
}
