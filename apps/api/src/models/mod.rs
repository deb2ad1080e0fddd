pub mod report;
pub mod scenario;

pub use report::{FeasibilityBand, SimulationReport, TimelineEvent};
pub use scenario::{Category, ScenarioForm, ScenarioRequest, Timeframe, ValidationError};
