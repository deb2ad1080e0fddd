//! Response coercion: turns untrusted completion text into a complete `SimulationReport`.
//!
//! Only a reply that cannot be parsed as a JSON object is fatal. Every field
//! is then resolved on its own: either the model's value or the literal
//! default, so a single bad field never discards the rest of the reply.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::models::{ScenarioRequest, SimulationReport, TimelineEvent};
use crate::simulation::defaults::{
    default_summary, default_timeline, owned, DEFAULT_ADVANTAGES, DEFAULT_CHALLENGES,
    DEFAULT_FINANCIAL_IMPACT, DEFAULT_PHASE_DESCRIPTION, DEFAULT_PHASE_MILESTONES,
    DEFAULT_PHASE_TIMEFRAME, DEFAULT_PHASE_TITLE, DEFAULT_RECOMMENDATIONS,
    DEFAULT_TIME_TO_ACHIEVE,
};

#[derive(Debug, Error)]
pub enum MalformedResponseError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("response JSON is {0}, expected an object")]
    NotAnObject(&'static str),
}

/// Outcome of resolving a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<T> {
    Value(T),
    Default(T),
}

impl<T> Resolved<T> {
    pub fn into_inner(self) -> T {
        match self {
            Resolved::Value(v) | Resolved::Default(v) => v,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Resolved::Default(_))
    }

    fn or_default_with(value: Option<T>, default: impl FnOnce() -> T) -> Self {
        match value {
            Some(v) => Resolved::Value(v),
            None => Resolved::Default(default()),
        }
    }
}

/// Returns the slice between the first `{` and the last `}` (inclusive),
/// or the whole text when no such pair exists.
pub fn extract_json_candidate(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(first), Some(last)) if last > first => &text[first..=last],
        _ => text,
    }
}

/// Coerces raw completion text into a report for `request`.
pub fn coerce_report(
    raw: &str,
    request: &ScenarioRequest,
) -> Result<SimulationReport, MalformedResponseError> {
    let candidate = extract_json_candidate(raw);
    let parsed: Value = serde_json::from_str(candidate)?;
    let object = match parsed {
        Value::Object(map) => map,
        other => return Err(MalformedResponseError::NotAnObject(json_kind(&other))),
    };

    let summary = Resolved::or_default_with(text_field(&object, "summary"), || {
        default_summary(request.scenario())
    });
    let feasibility = Resolved::or_default_with(feasibility_field(&object), || {
        request.risk_tolerance().saturating_mul(10)
    });
    let time_to_achieve = Resolved::or_default_with(text_field(&object, "timeToAchieve"), || {
        DEFAULT_TIME_TO_ACHIEVE.to_string()
    });
    let financial_impact = Resolved::or_default_with(text_field(&object, "financialImpact"), || {
        DEFAULT_FINANCIAL_IMPACT.to_string()
    });
    let advantages = Resolved::or_default_with(list_field(&object, "advantages"), || {
        owned(&DEFAULT_ADVANTAGES)
    });
    let challenges = Resolved::or_default_with(list_field(&object, "challenges"), || {
        owned(&DEFAULT_CHALLENGES)
    });
    let recommendations = Resolved::or_default_with(list_field(&object, "recommendations"), || {
        owned(&DEFAULT_RECOMMENDATIONS)
    });
    let timeline = Resolved::or_default_with(timeline_field(&object), default_timeline);

    let defaulted: Vec<&str> = [
        ("summary", summary.is_default()),
        ("feasibility", feasibility.is_default()),
        ("timeToAchieve", time_to_achieve.is_default()),
        ("financialImpact", financial_impact.is_default()),
        ("advantages", advantages.is_default()),
        ("challenges", challenges.is_default()),
        ("recommendations", recommendations.is_default()),
        ("timeline", timeline.is_default()),
    ]
    .into_iter()
    .filter_map(|(name, defaulted)| defaulted.then_some(name))
    .collect();
    if !defaulted.is_empty() {
        debug!(fields = ?defaulted, "Defaulted missing or malformed report fields");
    }

    Ok(SimulationReport {
        summary: summary.into_inner(),
        feasibility: feasibility.into_inner(),
        time_to_achieve: time_to_achieve.into_inner(),
        financial_impact: financial_impact.into_inner(),
        advantages: advantages.into_inner(),
        challenges: challenges.into_inner(),
        recommendations: recommendations.into_inner(),
        timeline: timeline.into_inner(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Per-field resolution
// ────────────────────────────────────────────────────────────────────────────

/// Non-blank strings are kept; numbers and booleans are stringified.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(scalar_text)
}

/// Numbers are rounded; strings are read like a leading-integer parse
/// ("82", " 75% likely"). Out-of-range values are clamped into 0..=100.
fn feasibility_field(object: &Map<String, Value>) -> Option<u8> {
    let raw = match object.get("feasibility")? {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite())?.round(),
        Value::String(s) => parse_leading_int(s)? as f64,
        _ => return None,
    };
    Some(raw.clamp(0.0, 100.0) as u8)
}

fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    // Saturate absurdly long digit runs; the value is clamped afterwards anyway.
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * magnitude)
}

fn string_items(items: &[Value]) -> Vec<String> {
    items.iter().filter_map(scalar_text).collect()
}

/// A list is accepted only if it is an array with at least one usable item.
fn list_field(object: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    match object.get(key) {
        Some(Value::Array(items)) => Some(string_items(items)).filter(|v| !v.is_empty()),
        _ => None,
    }
}

fn timeline_field(object: &Map<String, Value>) -> Option<Vec<TimelineEvent>> {
    match object.get("timeline") {
        Some(Value::Array(items)) if !items.is_empty() => {
            Some(items.iter().map(coerce_event).collect())
        }
        _ => None,
    }
}

fn coerce_event(value: &Value) -> TimelineEvent {
    let empty = Map::new();
    let event = value.as_object().unwrap_or(&empty);

    let milestones = match event.get("milestones") {
        Some(Value::Array(items)) => string_items(items),
        _ => owned(&DEFAULT_PHASE_MILESTONES),
    };

    TimelineEvent {
        title: text_field(event, "title").unwrap_or_else(|| DEFAULT_PHASE_TITLE.to_string()),
        timeframe: text_field(event, "timeframe")
            .unwrap_or_else(|| DEFAULT_PHASE_TIMEFRAME.to_string()),
        description: text_field(event, "description")
            .unwrap_or_else(|| DEFAULT_PHASE_DESCRIPTION.to_string()),
        milestones,
    }
}
