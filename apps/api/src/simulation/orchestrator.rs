//! Simulation orchestrator: completion call → coercion → report, with offline fallback.
//!
//! Flow: `CompletionProvider::complete_scenario` → `coerce_report` → `SimulationReport`.
//! Each failure point has exactly one recovery action (the offline estimator);
//! the network call is never retried. This function cannot fail.

use serde::Serialize;
use tracing::{info, warn};

use crate::llm_client::CompletionProvider;
use crate::models::{ScenarioRequest, SimulationReport};
use crate::simulation::coercer::coerce_report;
use crate::simulation::offline::estimate_report;

/// Where a report came from. Informational only; never changes the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSource {
    Ai,
    Offline,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub report: SimulationReport,
    pub source: ReportSource,
}

pub async fn run_simulation(
    provider: &dyn CompletionProvider,
    request: &ScenarioRequest,
) -> SimulationOutcome {
    info!(
        category = request.category().as_str(),
        timeframe = request.timeframe().as_str(),
        risk = request.risk_tolerance(),
        "Running scenario simulation"
    );

    let raw = match provider.complete_scenario(request).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Completion call failed, using offline estimate: {e}");
            return offline(request);
        }
    };

    match coerce_report(&raw, request) {
        Ok(report) => {
            info!(feasibility = report.feasibility, "Simulation report built from AI reply");
            SimulationOutcome {
                report,
                source: ReportSource::Ai,
            }
        }
        Err(e) => {
            warn!(
                "Malformed completion reply, using offline estimate: {e} (raw: {:?})",
                raw.chars().take(120).collect::<String>()
            );
            offline(request)
        }
    }
}

fn offline(request: &ScenarioRequest) -> SimulationOutcome {
    SimulationOutcome {
        report: estimate_report(request),
        source: ReportSource::Offline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::llm_client::CompletionError;
    use crate::models::{Category, Timeframe};

    /// Canned provider that counts calls.
    struct StubProvider {
        reply: Result<&'static str, u16>,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn replying(text: &'static str) -> Self {
            Self {
                reply: Ok(text),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CompletionProvider for StubProvider {
        async fn complete_scenario(
            &self,
            _request: &ScenarioRequest,
        ) -> Result<String, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Ok(text) => Ok(text.to_string()),
                Err(status) => Err(CompletionError::Api {
                    status,
                    message: "unavailable".to_string(),
                }),
            }
        }
    }

    fn sailing_request() -> ScenarioRequest {
        ScenarioRequest::new(
            "What if I quit my job to sail around the world?",
            Category::Travel,
            "I work a 9-to-5 desk job and have savings.",
            Timeframe::TwoYears,
            7,
        )
        .unwrap()
    }

    fn assert_structurally_complete(report: &SimulationReport) {
        assert!(!report.summary.is_empty());
        assert!(report.feasibility <= 100);
        assert!(!report.time_to_achieve.is_empty());
        assert!(!report.financial_impact.is_empty());
        assert!(!report.advantages.is_empty());
        assert!(!report.challenges.is_empty());
        assert!(!report.recommendations.is_empty());
        assert!(!report.timeline.is_empty());
        for event in &report.timeline {
            assert!(!event.title.is_empty());
            assert!(!event.timeframe.is_empty());
            assert!(!event.description.is_empty());
        }
    }

    #[tokio::test]
    async fn test_provider_unavailable_yields_offline_report() {
        let provider = StubProvider::failing(503);
        let outcome = run_simulation(&provider, &sailing_request()).await;

        assert_eq!(outcome.source, ReportSource::Offline);
        assert_eq!(outcome.report.feasibility, 64);
        assert_eq!(outcome.report.timeline.len(), 5);
        assert!(outcome
            .report
            .summary
            .contains("What if I quit my job to sail around the world?"));
        // No retry of the network call
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_malformed_reply_yields_offline_report() {
        let provider = StubProvider::replying("I'm sorry, I can't produce JSON today.");
        let outcome = run_simulation(&provider, &sailing_request()).await;

        assert_eq!(outcome.source, ReportSource::Offline);
        assert_eq!(outcome.report, estimate_report(&sailing_request()));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_partial_reply_is_coerced_not_discarded() {
        let provider = StubProvider::replying("Sure! {\"feasibility\": 35, \"timeToAchieve\": \"3 years\"}");
        let outcome = run_simulation(&provider, &sailing_request()).await;

        assert_eq!(outcome.source, ReportSource::Ai);
        assert_eq!(outcome.report.feasibility, 35);
        assert_eq!(outcome.report.time_to_achieve, "3 years");
        assert_structurally_complete(&outcome.report);
    }

    #[tokio::test]
    async fn test_every_reply_shape_produces_complete_report() {
        let replies = [
            "",
            "{}",
            "[]",
            "{\"timeline\": [1, 2]}",
            "{\"advantages\": {\"a\": 1}, \"feasibility\": \"NaN\"}",
            "prefix { broken } suffix",
            "{\"summary\": 42, \"timeline\": [{}]}",
        ];
        for reply in replies {
            let provider = StubProvider::replying(reply);
            let outcome = run_simulation(&provider, &sailing_request()).await;
            assert_structurally_complete(&outcome.report);
        }
        assert_structurally_complete(
            &run_simulation(&StubProvider::failing(500), &sailing_request())
                .await
                .report,
        );
    }
}
