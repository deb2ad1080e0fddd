// Scenario simulation: completion call, response coercion, offline fallback.
// All provider calls go through llm_client; nothing here talks HTTP directly.

pub mod coercer;
pub mod defaults;
pub mod handlers;
pub mod inspiration;
pub mod offline;
pub mod orchestrator;
