//! PDF export: an ordered list of rendering strategies tried in priority order.
//!
//! Default order: `HtmlSnapshotStrategy` (styled HTML rasterized by a headless
//! converter), then `DirectDrawStrategy` (explicit drawing primitives, no
//! external dependency). The first strategy that yields bytes wins; failures
//! are logged and never escape `PdfExporter::export`.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{Category, SimulationReport};

pub mod direct_draw;
pub mod handlers;
pub mod html_snapshot;
pub mod text_metrics;

pub use direct_draw::DirectDrawStrategy;
pub use html_snapshot::HtmlSnapshotStrategy;

pub const PDF_MIME: &str = "application/pdf";

// Text shared by every strategy so the outputs match.
pub const DOCUMENT_TITLE: &str = "Dream Scenario Simulation";
pub const DOCUMENT_AUTHOR: &str = "Dream Scenario Simulator";
pub const SECTION_SUMMARY: &str = "Summary";
pub const SECTION_METRICS: &str = "Key Metrics";
pub const SECTION_PROS_CONS: &str = "Key Advantages & Challenges";
pub const SECTION_RECOMMENDATIONS: &str = "Recommendations";
pub const SECTION_TIMELINE: &str = "Journey Timeline";
pub const COLUMN_ADVANTAGES: &str = "Key Advantages";
pub const COLUMN_CHALLENGES: &str = "Potential Challenges";
pub const METRIC_HEADERS: [&str; 3] = ["Feasibility", "Time to Achieve", "Financial Impact"];
pub const MILESTONES_HEADING: &str = "Key Milestones:";
pub const FOOTER_TEXT: &str = "Generated by Dream Scenario Simulator \u{2022} Powered by AI";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to start converter '{bin}': {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("converter exited with status {status:?}: {stderr}")]
    ConverterFailed { status: Option<i32>, stderr: String },

    #[error("renderer produced an empty document")]
    EmptyOutput,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF assembly error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("render task failed: {0}")]
    Task(String),
}

/// Everything a strategy needs to lay out one report.
#[derive(Debug, Clone)]
pub struct ExportDocument {
    pub report: SimulationReport,
    pub scenario: String,
    pub category: Category,
    pub generated_on: NaiveDate,
}

impl ExportDocument {
    pub fn new(report: SimulationReport, scenario: String, category: Category) -> Self {
        Self {
            report,
            scenario,
            category,
            generated_on: Utc::now().date_naive(),
        }
    }

    /// e.g. "Generated on October 17, 2026"
    pub fn generated_line(&self) -> String {
        format!("Generated on {}", self.generated_on.format("%B %-d, %Y"))
    }

    pub fn feasibility_cell(&self) -> String {
        format!("{}%", self.report.feasibility)
    }
}

/// A single way of turning a report into PDF bytes.
#[async_trait]
pub trait PdfStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn render(&self, doc: &ExportDocument) -> Result<Vec<u8>, ExportError>;
}

#[derive(Debug, Clone)]
pub struct PdfFile {
    pub filename: String,
    pub bytes: Bytes,
}

/// `dream-scenario-<category>-<epoch-millis>.pdf`
pub fn export_filename(category: Category, epoch_millis: i64) -> String {
    format!("dream-scenario-{}-{epoch_millis}.pdf", category.as_str())
}

pub struct PdfExporter {
    strategies: Vec<Arc<dyn PdfStrategy>>,
}

impl PdfExporter {
    pub fn new(strategies: Vec<Arc<dyn PdfStrategy>>) -> Self {
        Self { strategies }
    }

    /// Snapshot first, direct drawing as the safety net.
    pub fn with_default_strategies(converter_bin: impl Into<String>) -> Self {
        Self::new(vec![
            Arc::new(HtmlSnapshotStrategy::new(converter_bin)) as Arc<dyn PdfStrategy>,
            Arc::new(DirectDrawStrategy) as Arc<dyn PdfStrategy>,
        ])
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Returns the first successfully rendered file, or `None` if every strategy failed.
    pub async fn export(&self, doc: &ExportDocument) -> Option<PdfFile> {
        for strategy in &self.strategies {
            match strategy.render(doc).await {
                Ok(bytes) if !bytes.is_empty() => {
                    let filename =
                        export_filename(doc.category, Utc::now().timestamp_millis());
                    info!(
                        strategy = strategy.name(),
                        size = bytes.len(),
                        "PDF export succeeded: {filename}"
                    );
                    return Some(PdfFile {
                        filename,
                        bytes: Bytes::from(bytes),
                    });
                }
                Ok(_) => {
                    warn!(
                        strategy = strategy.name(),
                        "PDF strategy returned no bytes, trying next"
                    );
                }
                Err(e) => {
                    warn!(strategy = strategy.name(), "PDF strategy failed, trying next: {e}");
                }
            }
        }
        warn!("All PDF strategies failed");
        None
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use test_support::sample_document;

    struct CountingStrategy {
        succeed: bool,
        calls: AtomicUsize,
    }

    impl CountingStrategy {
        fn new(succeed: bool) -> Arc<Self> {
            Arc::new(Self {
                succeed,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PdfStrategy for CountingStrategy {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn render(&self, _doc: &ExportDocument) -> Result<Vec<u8>, ExportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.succeed {
                Ok(b"%PDF-1.5 stub".to_vec())
            } else {
                Err(ExportError::EmptyOutput)
            }
        }
    }

    fn chain(a: &Arc<CountingStrategy>, b: &Arc<CountingStrategy>) -> PdfExporter {
        PdfExporter::new(vec![
            a.clone() as Arc<dyn PdfStrategy>,
            b.clone() as Arc<dyn PdfStrategy>,
        ])
    }

    #[test]
    fn test_export_filename_pattern() {
        assert_eq!(
            export_filename(Category::Travel, 1_760_000_000_000),
            "dream-scenario-travel-1760000000000.pdf"
        );
    }

    #[test]
    fn test_generated_line_formats_long_date() {
        assert_eq!(sample_document().generated_line(), "Generated on October 17, 2026");
        assert_eq!(sample_document().feasibility_cell(), "64%");
    }

    #[tokio::test]
    async fn test_first_failure_falls_back_exactly_once() {
        let a = CountingStrategy::new(false);
        let b = CountingStrategy::new(true);
        let exporter = chain(&a, &b);

        let file = exporter.export(&sample_document()).await.unwrap();
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 1);
        assert!(file.filename.starts_with("dream-scenario-travel-"));
        assert!(file.filename.ends_with(".pdf"));
    }

    #[tokio::test]
    async fn test_first_success_skips_fallback() {
        let a = CountingStrategy::new(true);
        let b = CountingStrategy::new(true);
        let exporter = chain(&a, &b);

        assert!(exporter.export(&sample_document()).await.is_some());
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 0);
    }

    #[tokio::test]
    async fn test_all_failures_yield_none() {
        let a = CountingStrategy::new(false);
        let b = CountingStrategy::new(false);
        let exporter = chain(&a, &b);

        assert!(exporter.export(&sample_document()).await.is_none());
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 1);
    }

    #[tokio::test]
    async fn test_default_chain_falls_back_to_direct_drawing() {
        let exporter = PdfExporter::with_default_strategies("/nonexistent/html-to-pdf");
        assert_eq!(exporter.strategy_names(), vec!["html-snapshot", "direct-draw"]);

        let file = exporter.export(&sample_document()).await.unwrap();
        assert!(file.bytes.starts_with(b"%PDF"));
    }
}
