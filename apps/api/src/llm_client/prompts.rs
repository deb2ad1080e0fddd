// Prompt constants for the scenario simulation call.

use crate::models::ScenarioRequest;

/// System prompt: constrains the model to a bare JSON object.
pub const SIMULATION_SYSTEM: &str = "You are an expert scenario simulator that analyzes \
    \"what if\" scenarios and provides realistic projections. \
    You ALWAYS respond with valid JSON objects that match the exact structure requested. \
    Your responses NEVER include any explanatory text before or after the JSON. \
    Do NOT use markdown code fences.";

/// Simulation prompt template.
/// Replace: {category}, {timeframe}, {risk_tolerance}, {current_situation}, {scenario}
pub const SIMULATION_PROMPT_TEMPLATE: &str = r#"Analyze this "what if" scenario and provide a realistic projection:

SCENARIO DETAILS:
- Dream Scenario: {scenario}
- Category: {category}
- Current Situation: {current_situation}
- Timeframe: {timeframe}
- Risk Tolerance (1-10): {risk_tolerance}

Respond ONLY with a JSON object using this EXACT structure:

{
  "summary": "A 2-3 sentence overview of the simulation results",
  "feasibility": 75,
  "timeToAchieve": "Estimated time to achieve the goal (e.g., '1-2 years')",
  "financialImpact": "Description of the financial implications",
  "advantages": [
    "First advantage",
    "Second advantage",
    "Third advantage",
    "Fourth advantage",
    "Fifth advantage"
  ],
  "challenges": [
    "First challenge",
    "Second challenge",
    "Third challenge",
    "Fourth challenge",
    "Fifth challenge"
  ],
  "recommendations": [
    "First recommendation",
    "Second recommendation",
    "Third recommendation",
    "Fourth recommendation",
    "Fifth recommendation",
    "Sixth recommendation"
  ],
  "timeline": [
    {
      "title": "Phase 1 Title",
      "timeframe": "Timeframe for this phase",
      "description": "Description of what happens in this phase",
      "milestones": ["First milestone", "Second milestone", "Third milestone"]
    },
    {
      "title": "Phase 2 Title",
      "timeframe": "Timeframe for this phase",
      "description": "Description of what happens in this phase",
      "milestones": ["First milestone", "Second milestone", "Third milestone"]
    }
  ]
}

RULES:
1. "feasibility" is an integer from 0 to 100
2. Provide between 2 and 5 timeline phases
3. Make the simulation realistic, data-informed, and tailored to the specific scenario
4. Consider market trends, skill development time, financial implications, and practical challenges

IMPORTANT: Your response must be ONLY the JSON object with no additional text or explanation."#;

/// Fills the simulation template with the request fields.
///
/// Substitution is a single pass over the template, so placeholder-looking
/// text inside the user's free text is never expanded.
pub fn build_simulation_prompt(request: &ScenarioRequest) -> String {
    let risk = request.risk_tolerance().to_string();
    let mut prompt = String::with_capacity(SIMULATION_PROMPT_TEMPLATE.len() + 512);
    let mut rest = SIMULATION_PROMPT_TEMPLATE;

    while let Some(open) = rest.find('{') {
        prompt.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let value = tail
            .find('}')
            .and_then(|close| placeholder(&tail[..close], request, &risk).map(|v| (v, close)));
        match value {
            Some((value, close)) => {
                prompt.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                prompt.push('{');
                rest = tail;
            }
        }
    }
    prompt.push_str(rest);
    prompt
}

fn placeholder<'a>(name: &str, request: &'a ScenarioRequest, risk: &'a str) -> Option<&'a str> {
    match name {
        "scenario" => Some(request.scenario()),
        "category" => Some(request.category().label()),
        "current_situation" => Some(request.current_situation()),
        "timeframe" => Some(request.timeframe().label()),
        "risk_tolerance" => Some(risk),
        _ => None,
    }
}
