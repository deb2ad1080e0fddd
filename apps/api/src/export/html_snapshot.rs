//! Document-snapshot strategy: styled HTML rasterized by a headless converter.
//!
//! The HTML is written into a scratch directory and handed to an external
//! HTML→PDF binary (wkhtmltopdf-compatible CLI). Most faithful to the on-screen
//! styling, but depends on that binary being present and succeeding.

use std::fmt::Write as _;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::export::{
    ExportDocument, ExportError, PdfStrategy, COLUMN_ADVANTAGES, COLUMN_CHALLENGES,
    DOCUMENT_TITLE, FOOTER_TEXT, METRIC_HEADERS, MILESTONES_HEADING, SECTION_METRICS,
    SECTION_PROS_CONS, SECTION_RECOMMENDATIONS, SECTION_SUMMARY, SECTION_TIMELINE,
};

const STYLE: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; }
body { color: #000; background-color: #fff; line-height: 1.6; word-wrap: break-word; }
.container { max-width: 1000px; margin: 0 auto; padding: 20px; }
header { background-color: #000; color: #fff; padding: 30px 15px; text-align: center; margin-bottom: 30px; }
h1 { font-size: 2.5rem; margin-bottom: 15px; }
h2 { font-size: 1.8rem; padding-bottom: 8px; margin: 25px 0 15px 0; border-bottom: 2px solid #000; }
.dream-title { font-size: 1.5rem; font-style: italic; margin: 15px 0; }
.date { font-size: 0.9rem; margin-top: 15px; color: #ccc; }
.section { margin-bottom: 30px; }
.content-box { border: 1px solid #000; padding: 20px; margin-bottom: 25px; }
table { width: 100%; border-collapse: collapse; margin-bottom: 25px; table-layout: fixed; }
th, td { border: 1px solid #000; padding: 12px; text-align: left; vertical-align: top; }
th { background-color: #f9f9f9; font-weight: bold; }
.two-column { display: flex; flex-direction: row; gap: 20px; }
.column-box { flex: 1; border: 1px solid #000; padding: 20px; }
.column-box h3 { font-size: 1.3rem; margin-bottom: 15px; padding-bottom: 5px; border-bottom: 1px solid #000; }
ul { padding-left: 25px; margin-bottom: 15px; }
li { margin-bottom: 10px; }
.timeline-box { border: 1px solid #000; padding: 20px; margin-bottom: 15px; page-break-inside: avoid; }
.phase-title { font-size: 1.2rem; font-weight: bold; margin-bottom: 10px; }
.phase-period { display: inline-block; background-color: #000; color: #fff; padding: 5px 15px; margin-bottom: 15px; }
.phase-description { margin-bottom: 15px; }
.milestones { margin-top: 15px; }
footer { text-align: center; margin-top: 40px; padding: 15px 0; border-top: 1px solid #000; font-size: 0.8rem; color: #555; }
"#;

fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn write_list(buf: &mut String, items: &[String]) {
    buf.push_str("<ul>");
    for item in items {
        let _ = write!(buf, "<li>{}</li>", esc(item));
    }
    buf.push_str("</ul>");
}

/// Renders the complete standalone HTML document for a report.
pub fn render_html(doc: &ExportDocument) -> String {
    let report = &doc.report;
    let mut buf = String::with_capacity(8 * 1024);

    let _ = write!(
        buf,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"UTF-8\">\
         <title>{title}</title><style>{STYLE}</style></head><body><div class=\"container\">\
         <header><h1>{title}</h1><div class=\"dream-title\">{scenario}</div>\
         <div class=\"date\">{date}</div></header>",
        title = DOCUMENT_TITLE,
        scenario = esc(&doc.scenario),
        date = esc(&doc.generated_line()),
    );

    let _ = write!(
        buf,
        "<section class=\"section\"><h2>{SECTION_SUMMARY}</h2>\
         <div class=\"content-box\"><p>{}</p></div></section>",
        esc(&report.summary)
    );

    let _ = write!(
        buf,
        "<section class=\"section\"><h2>{SECTION_METRICS}</h2><table>\
         <tr><th>{}</th><th>{}</th><th>{}</th></tr>\
         <tr><td>{}</td><td>{}</td><td>{}</td></tr></table></section>",
        METRIC_HEADERS[0],
        METRIC_HEADERS[1],
        METRIC_HEADERS[2],
        esc(&doc.feasibility_cell()),
        esc(&report.time_to_achieve),
        esc(&report.financial_impact),
    );

    let _ = write!(
        buf,
        "<section class=\"section\"><h2>{}</h2><div class=\"two-column\">\
         <div class=\"column-box\"><h3>{COLUMN_ADVANTAGES}</h3>",
        esc(SECTION_PROS_CONS)
    );
    write_list(&mut buf, &report.advantages);
    let _ = write!(
        buf,
        "</div><div class=\"column-box\"><h3>{COLUMN_CHALLENGES}</h3>"
    );
    write_list(&mut buf, &report.challenges);
    buf.push_str("</div></div></section>");

    let _ = write!(
        buf,
        "<section class=\"section\"><h2>{SECTION_RECOMMENDATIONS}</h2><div class=\"content-box\">"
    );
    write_list(&mut buf, &report.recommendations);
    buf.push_str("</div></section>");

    let _ = write!(buf, "<section class=\"section\"><h2>{SECTION_TIMELINE}</h2>");
    for (index, event) in report.timeline.iter().enumerate() {
        let _ = write!(
            buf,
            "<div class=\"timeline-box\"><div class=\"phase-period\">{}</div>\
             <div class=\"phase-title\">{}. {}</div>\
             <div class=\"phase-description\">{}</div>",
            esc(&event.timeframe),
            index + 1,
            esc(&event.title),
            esc(&event.description),
        );
        if !event.milestones.is_empty() {
            let _ = write!(buf, "<div class=\"milestones\"><h4>{MILESTONES_HEADING}</h4>");
            write_list(&mut buf, &event.milestones);
            buf.push_str("</div>");
        }
        buf.push_str("</div>");
    }
    buf.push_str("</section>");

    let _ = write!(
        buf,
        "<footer>{}</footer></div></body></html>",
        esc(FOOTER_TEXT)
    );
    buf
}

pub struct HtmlSnapshotStrategy {
    converter_bin: String,
}

impl HtmlSnapshotStrategy {
    pub fn new(converter_bin: impl Into<String>) -> Self {
        Self {
            converter_bin: converter_bin.into(),
        }
    }
}

#[async_trait]
impl PdfStrategy for HtmlSnapshotStrategy {
    fn name(&self) -> &'static str {
        "html-snapshot"
    }

    async fn render(&self, doc: &ExportDocument) -> Result<Vec<u8>, ExportError> {
        let scratch = tempfile::tempdir()?;
        let html_path = scratch.path().join("report.html");
        let pdf_path = scratch.path().join("report.pdf");

        tokio::fs::write(&html_path, render_html(doc)).await?;

        let output = Command::new(&self.converter_bin)
            .arg("--quiet")
            .args(["--page-size", "A4"])
            .args(["--margin-top", "10mm", "--margin-bottom", "10mm"])
            .args(["--margin-left", "10mm", "--margin-right", "10mm"])
            .args(["--encoding", "utf-8"])
            .args(["--title", DOCUMENT_TITLE])
            .arg(&html_path)
            .arg(&pdf_path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ExportError::Spawn {
                bin: self.converter_bin.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ExportError::ConverterFailed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let bytes = tokio::fs::read(&pdf_path).await?;
        if bytes.is_empty() {
            return Err(ExportError::EmptyOutput);
        }
        debug!(size = bytes.len(), "HTML snapshot converted");
        Ok(bytes)
    }
}
