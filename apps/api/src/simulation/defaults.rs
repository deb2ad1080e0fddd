//! Literal fallback content shared by the response coercer and the offline estimator.

use crate::models::TimelineEvent;

pub const DEFAULT_TIME_TO_ACHIEVE: &str = "1-3 years";
pub const DEFAULT_FINANCIAL_IMPACT: &str = "Variable impact depending on execution";

pub const DEFAULT_ADVANTAGES: [&str; 5] = [
    "Personal growth opportunity",
    "Potential for new skills development",
    "Possible increased satisfaction",
    "New networking opportunities",
    "Breaking out of comfort zone",
];

pub const DEFAULT_CHALLENGES: [&str; 5] = [
    "Initial adjustment period",
    "Potential financial uncertainty",
    "Learning curve",
    "Need for new skills",
    "Possible resistance from others",
];

pub const DEFAULT_RECOMMENDATIONS: [&str; 6] = [
    "Create a detailed action plan",
    "Build a financial safety net",
    "Connect with others in similar paths",
    "Start with small steps",
    "Develop a fallback plan",
    "Review your progress regularly and adjust course",
];

// Per-phase defaults for timeline entries with missing fields.
pub const DEFAULT_PHASE_TITLE: &str = "Phase";
pub const DEFAULT_PHASE_TIMEFRAME: &str = "TBD";
pub const DEFAULT_PHASE_DESCRIPTION: &str = "Details to be determined.";
pub const DEFAULT_PHASE_MILESTONES: [&str; 2] = ["Plan next steps", "Evaluate progress"];

struct PhaseTemplate {
    title: &'static str,
    timeframe: &'static str,
    description: &'static str,
    milestones: [&'static str; 3],
}

const DEFAULT_TIMELINE: [PhaseTemplate; 5] = [
    PhaseTemplate {
        title: "Research & Planning",
        timeframe: "First 3 months",
        description: "Gather information and create a detailed plan.",
        milestones: [
            "Complete research",
            "Create action plan",
            "Identify resources needed",
        ],
    },
    PhaseTemplate {
        title: "Preparation",
        timeframe: "Months 3-6",
        description: "Develop necessary skills and prepare for transition.",
        milestones: ["Acquire initial skills", "Build network", "Prepare resources"],
    },
    PhaseTemplate {
        title: "Initial Implementation",
        timeframe: "Months 6-12",
        description: "Begin implementing your plan with first concrete steps.",
        milestones: [
            "Take first major step",
            "Evaluate initial progress",
            "Make adjustments as needed",
        ],
    },
    PhaseTemplate {
        title: "Growth & Stabilization",
        timeframe: "Year 2",
        description: "Expand efforts and establish stability.",
        milestones: [
            "Reach sustainable level",
            "Develop consistent systems",
            "Expand reach",
        ],
    },
    PhaseTemplate {
        title: "Mastery",
        timeframe: "Years 3+",
        description: "Achieve expertise and optimize for long-term success.",
        milestones: [
            "Reach expert level",
            "Establish reputation",
            "Achieve target goals",
        ],
    },
];

/// Summary used when the AI reply omits one.
pub fn default_summary(scenario: &str) -> String {
    format!("Your scenario \"{scenario}\" has been analyzed based on your current situation.")
}

/// Summary for a fully offline report; states that it is a fallback result.
pub fn fallback_summary(scenario: &str) -> String {
    format!(
        "{} This is a fallback simulation as we couldn't process the AI response correctly.",
        default_summary(scenario)
    )
}

pub fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn default_timeline() -> Vec<TimelineEvent> {
    DEFAULT_TIMELINE
        .iter()
        .map(|phase| TimelineEvent {
            title: phase.title.to_string(),
            timeframe: phase.timeframe.to_string(),
            description: phase.description.to_string(),
            milestones: owned(&phase.milestones),
        })
        .collect()
}
