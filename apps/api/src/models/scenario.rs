//! Scenario input: the validated request a user submits for simulation.
//!
//! `ScenarioForm` is the loosely-typed wire shape; `ScenarioRequest` is only
//! obtainable through validation, so every request the orchestrator sees
//! already satisfies the form rules.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Minimum length (in characters) of the free-text fields.
pub const MIN_TEXT_LEN: usize = 10;
pub const MIN_RISK_TOLERANCE: u8 = 1;
pub const MAX_RISK_TOLERANCE: u8 = 10;

// ────────────────────────────────────────────────────────────────────────────
// Enumerated fields
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Career,
    Business,
    Education,
    Travel,
    Lifestyle,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Career,
        Category::Business,
        Category::Education,
        Category::Travel,
        Category::Lifestyle,
        Category::Other,
    ];

    /// Wire value, also used in export filenames.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Career => "career",
            Category::Business => "business",
            Category::Education => "education",
            Category::Travel => "travel",
            Category::Lifestyle => "lifestyle",
            Category::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Career => "Career",
            Category::Business => "Business",
            Category::Education => "Education",
            Category::Travel => "Travel",
            Category::Lifestyle => "Lifestyle",
            Category::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "6months")]
    SixMonths,
    #[serde(rename = "1year")]
    OneYear,
    #[serde(rename = "2years")]
    TwoYears,
    #[serde(rename = "5years")]
    FiveYears,
    #[serde(rename = "10years")]
    TenYears,
}

impl Timeframe {
    pub const ALL: [Timeframe; 5] = [
        Timeframe::SixMonths,
        Timeframe::OneYear,
        Timeframe::TwoYears,
        Timeframe::FiveYears,
        Timeframe::TenYears,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::SixMonths => "6months",
            Timeframe::OneYear => "1year",
            Timeframe::TwoYears => "2years",
            Timeframe::FiveYears => "5years",
            Timeframe::TenYears => "10years",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::SixMonths => "6 Months",
            Timeframe::OneYear => "1 Year",
            Timeframe::TwoYears => "2 Years",
            Timeframe::FiveYears => "5 Years",
            Timeframe::TenYears => "10+ Years",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Validation errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All form-rule violations for one submission. Never empty when returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{}", summarize(.fields))]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }
}

fn summarize(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

// ────────────────────────────────────────────────────────────────────────────
// Validated request
// ────────────────────────────────────────────────────────────────────────────

/// A submitted scenario. Immutable; construct via `new` or `ScenarioForm::validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRequest {
    scenario: String,
    category: Category,
    current_situation: String,
    timeframe: Timeframe,
    risk_tolerance: u8,
}

impl ScenarioRequest {
    pub fn new(
        scenario: impl Into<String>,
        category: Category,
        current_situation: impl Into<String>,
        timeframe: Timeframe,
        risk_tolerance: i64,
    ) -> Result<Self, ValidationError> {
        let scenario = scenario.into();
        let current_situation = current_situation.into();
        let mut fields = Vec::new();

        check_min_len(&mut fields, "scenario", &scenario, "Scenario");
        check_min_len(
            &mut fields,
            "currentSituation",
            &current_situation,
            "Current situation",
        );
        let risk = check_risk(&mut fields, risk_tolerance);

        match risk {
            Some(risk_tolerance) if fields.is_empty() => Ok(Self {
                scenario,
                category,
                current_situation,
                timeframe,
                risk_tolerance,
            }),
            _ => Err(ValidationError { fields }),
        }
    }

    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn current_situation(&self) -> &str {
        &self.current_situation
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn risk_tolerance(&self) -> u8 {
        self.risk_tolerance
    }
}

fn check_min_len(fields: &mut Vec<FieldError>, field: &'static str, value: &str, label: &str) {
    if value.chars().count() < MIN_TEXT_LEN {
        fields.push(FieldError {
            field,
            message: format!("{label} must be at least {MIN_TEXT_LEN} characters."),
        });
    }
}

fn check_risk(fields: &mut Vec<FieldError>, value: i64) -> Option<u8> {
    let in_range = (MIN_RISK_TOLERANCE as i64..=MAX_RISK_TOLERANCE as i64).contains(&value);
    if in_range {
        Some(value as u8)
    } else {
        fields.push(FieldError {
            field: "riskTolerance",
            message: format!(
                "Risk tolerance must be a whole number between {MIN_RISK_TOLERANCE} and {MAX_RISK_TOLERANCE}."
            ),
        });
        None
    }
}

/// Raw submission as received over the wire. Every field is optional so that
/// all problems can be reported together instead of failing on the first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioForm {
    pub scenario: Option<Value>,
    pub category: Option<Value>,
    pub current_situation: Option<Value>,
    pub timeframe: Option<Value>,
    pub risk_tolerance: Option<Value>,
}

impl ScenarioForm {
    pub fn validate(self) -> Result<ScenarioRequest, ValidationError> {
        let mut fields = Vec::new();

        let scenario = take_text(&mut fields, "scenario", self.scenario, "Scenario");
        let current_situation = take_text(
            &mut fields,
            "currentSituation",
            self.current_situation,
            "Current situation",
        );

        let category = match select_value(self.category.as_ref()) {
            None => {
                fields.push(FieldError {
                    field: "category",
                    message: "Please select a category.".to_string(),
                });
                None
            }
            Some(raw) => {
                let parsed = Category::parse(raw);
                if parsed.is_none() {
                    fields.push(FieldError {
                        field: "category",
                        message: format!("Unknown category '{raw}'."),
                    });
                }
                parsed
            }
        };

        let timeframe = match select_value(self.timeframe.as_ref()) {
            None => {
                fields.push(FieldError {
                    field: "timeframe",
                    message: "Please select a timeframe.".to_string(),
                });
                None
            }
            Some(raw) => {
                let parsed = Timeframe::parse(raw);
                if parsed.is_none() {
                    fields.push(FieldError {
                        field: "timeframe",
                        message: format!("Unknown timeframe '{raw}'."),
                    });
                }
                parsed
            }
        };

        // Sliders post whole numbers; 7.0 is accepted, 7.5 and "7" are not.
        let risk_raw = self.risk_tolerance.as_ref().and_then(|v| {
            v.as_i64().or_else(|| {
                v.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.is_finite())
                    .map(|f| f as i64)
            })
        });
        let risk_tolerance = match risk_raw {
            Some(value) => check_risk(&mut fields, value),
            None => {
                fields.push(FieldError {
                    field: "riskTolerance",
                    message: format!(
                        "Risk tolerance must be a whole number between {MIN_RISK_TOLERANCE} and {MAX_RISK_TOLERANCE}."
                    ),
                });
                None
            }
        };

        match (scenario, current_situation, category, timeframe, risk_tolerance) {
            (
                Some(scenario),
                Some(current_situation),
                Some(category),
                Some(timeframe),
                Some(risk_tolerance),
            ) if fields.is_empty() => {
                Ok(ScenarioRequest {
                    scenario,
                    category,
                    current_situation,
                    timeframe,
                    risk_tolerance,
                })
            }
            _ => Err(ValidationError { fields }),
        }
    }
}

/// Free-text field: absent or null reads as empty, any other non-string is rejected.
fn take_text(
    fields: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<Value>,
    label: &str,
) -> Option<String> {
    let text = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(_) => {
            fields.push(FieldError {
                field,
                message: format!("{label} must be text."),
            });
            return None;
        }
    };
    check_min_len(fields, field, &text, label);
    Some(text)
}

/// Selection fields: empty strings and non-strings count as "nothing selected".
fn select_value(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|v| !v.is_empty())
}
