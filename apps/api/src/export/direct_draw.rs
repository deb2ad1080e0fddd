//! Direct-drawing strategy: every element placed with explicit page primitives.
//!
//! Coordinates are millimetres from the top-left corner of an A4 page and are
//! converted to PDF points (bottom-left origin) when operations are emitted.
//! A running vertical cursor drives pagination: a new page starts whenever the
//! cursor passes `PAGE_BREAK_Y` before a timeline block, and bordered blocks
//! continue row by row onto a new page when they reach the bottom margin.

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use tracing::debug;

use crate::export::text_metrics::{
    encode_win_ansi, measure_mm, split_text_to_size, FontStyle, MM_PER_PT,
};
use crate::export::{
    ExportDocument, ExportError, PdfStrategy, COLUMN_ADVANTAGES, COLUMN_CHALLENGES,
    DOCUMENT_AUTHOR, DOCUMENT_TITLE, FOOTER_TEXT, METRIC_HEADERS, MILESTONES_HEADING,
    SECTION_METRICS, SECTION_PROS_CONS, SECTION_RECOMMENDATIONS, SECTION_SUMMARY,
    SECTION_TIMELINE,
};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
/// Cursor position past which the next timeline block goes to a new page.
pub const PAGE_BREAK_Y: f32 = 230.0;
/// Lowest y a block may reach; the footer lives below it.
const CONTENT_BOTTOM_Y: f32 = 277.0;
const FOOTER_Y: f32 = 287.0;
const TOP_Y: f32 = 20.0;
const LEFT_X: f32 = 20.0;
const RIGHT_X: f32 = 190.0;
const CONTENT_WIDTH: f32 = RIGHT_X - LEFT_X;
const CENTER_X: f32 = PAGE_WIDTH_MM / 2.0;

type Rgb = (f32, f32, f32);

const BLACK: Rgb = (0.0, 0.0, 0.0);
const WHITE: Rgb = (1.0, 1.0, 1.0);
const LIGHT_GRAY: Rgb = (200.0 / 255.0, 200.0 / 255.0, 200.0 / 255.0);
const FOOTER_GRAY: Rgb = (100.0 / 255.0, 100.0 / 255.0, 100.0 / 255.0);
const TABLE_HEAD_FILL: Rgb = (249.0 / 255.0, 249.0 / 255.0, 249.0 / 255.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}

fn pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

// ────────────────────────────────────────────────────────────────────────────
// Canvas: page-drawing primitives
// ────────────────────────────────────────────────────────────────────────────

/// Accumulates content-stream operations per page.
pub struct Canvas {
    pages: Vec<Vec<Operation>>,
    current: usize,
}

impl Canvas {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            current: 0,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn add_page(&mut self) {
        self.pages.push(Vec::new());
        self.current = self.pages.len() - 1;
    }

    fn set_page(&mut self, index: usize) {
        self.current = index.min(self.pages.len() - 1);
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.pages[self.current].push(Operation::new(operator, operands));
    }

    fn rect_operands(x: f32, y: f32, w: f32, h: f32) -> Vec<Object> {
        vec![
            real(pt(x)),
            real(pt(PAGE_HEIGHT_MM - (y + h))),
            real(pt(w)),
            real(pt(h)),
        ]
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.push("q", vec![]);
        self.push("rg", vec![real(color.0), real(color.1), real(color.2)]);
        self.push("re", Self::rect_operands(x, y, w, h));
        self.push("f", vec![]);
        self.push("Q", vec![]);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, line_width: f32) {
        self.push("q", vec![]);
        self.push("RG", vec![real(0.0), real(0.0), real(0.0)]);
        self.push("w", vec![real(pt(line_width))]);
        self.push("re", Self::rect_operands(x, y, w, h));
        self.push("S", vec![]);
        self.push("Q", vec![]);
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, line_width: f32) {
        self.push("q", vec![]);
        self.push("RG", vec![real(0.0), real(0.0), real(0.0)]);
        self.push("w", vec![real(pt(line_width))]);
        self.push("m", vec![real(pt(x1)), real(pt(PAGE_HEIGHT_MM - y1))]);
        self.push("l", vec![real(pt(x2)), real(pt(PAGE_HEIGHT_MM - y2))]);
        self.push("S", vec![]);
        self.push("Q", vec![]);
    }

    /// Draws one line of text with its baseline at `y`.
    #[allow(clippy::too_many_arguments)]
    fn text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        style: FontStyle,
        color: Rgb,
        align: Align,
    ) {
        let width = measure_mm(text, size, style);
        let start_x = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        self.push("q", vec![]);
        self.push("BT", vec![]);
        self.push(
            "Tf",
            vec![
                Object::Name(style.resource_name().as_bytes().to_vec()),
                real(size),
            ],
        );
        self.push("rg", vec![real(color.0), real(color.1), real(color.2)]);
        self.push("Td", vec![real(pt(start_x)), real(pt(PAGE_HEIGHT_MM - y))]);
        self.push(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
        self.push("Q", vec![]);
    }

    /// Draws pre-wrapped lines; returns the cursor below the last line.
    #[allow(clippy::too_many_arguments)]
    fn lines(
        &mut self,
        lines: &[String],
        x: f32,
        y: f32,
        size: f32,
        style: FontStyle,
        color: Rgb,
        align: Align,
        line_height: f32,
    ) -> f32 {
        for (i, line) in lines.iter().enumerate() {
            self.text(line, x, y + line_height * i as f32, size, style, color, align);
        }
        y + line_height * lines.len() as f32
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Report layout
// ────────────────────────────────────────────────────────────────────────────

/// Padding between a box edge and its first/last row.
const BOX_PADDING: f32 = 3.0;
/// Space taken by a section heading and its rule.
const HEADING_HEIGHT: f32 = 10.0;
const SECTION_GAP: f32 = 10.0;
/// Scenario lines shown inside the header bar before the text continues below it.
const HEADER_SCENARIO_LINES: usize = 6;
const SECTION_SCENARIO: &str = "Scenario";

fn bullet_lines(items: &[String], max_width: f32, size: f32) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| {
            split_text_to_size(&format!("\u{2022} {item}"), max_width, size, FontStyle::Regular)
        })
        .collect()
}

/// Shortens `text` with an ellipsis until it fits `max_width`.
fn fit_to_width(text: &str, max_width: f32, size: f32, style: FontStyle) -> String {
    if measure_mm(text, size, style) <= max_width {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>() + "...";
        if measure_mm(&candidate, size, style) <= max_width {
            return candidate;
        }
    }
    String::new()
}

/// Horizontal extent of one bordered column.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: f32,
    width: f32,
}

const FULL_WIDTH: [Frame; 1] = [Frame {
    x: LEFT_X,
    width: CONTENT_WIDTH,
}];

struct Cell {
    x: f32,
    text: String,
    size: f32,
    style: FontStyle,
}

/// One horizontal slice of a bordered block. A row is never split across pages;
/// a block is split between rows.
enum Row {
    Text { cells: Vec<Cell>, height: f32 },
    /// Underline inside every frame.
    Rule { height: f32 },
    /// White label on a black pill.
    Pill { x: f32, width: f32, text: String, height: f32 },
    Gap(f32),
}

impl Row {
    fn height(&self) -> f32 {
        match self {
            Row::Text { height, .. } | Row::Rule { height } | Row::Pill { height, .. } => *height,
            Row::Gap(height) => *height,
        }
    }
}

/// One row per line, all in a single column starting at `x`.
fn text_rows(lines: Vec<String>, x: f32, size: f32, style: FontStyle, height: f32) -> Vec<Row> {
    lines
        .into_iter()
        .map(|text| Row::Text {
            cells: vec![Cell {
                x,
                text,
                size,
                style,
            }],
            height,
        })
        .collect()
}

/// Side-by-side columns advanced in lockstep, so their boxes stay level.
fn column_rows(
    columns: &[(f32, Vec<String>)],
    size: f32,
    style: FontStyle,
    height: f32,
) -> Vec<Row> {
    let depth = columns.iter().map(|(_, lines)| lines.len()).max().unwrap_or(0);
    (0..depth)
        .map(|i| Row::Text {
            cells: columns
                .iter()
                .filter_map(|(x, lines)| {
                    lines.get(i).map(|text| Cell {
                        x: *x,
                        text: text.clone(),
                        size,
                        style,
                    })
                })
                .collect(),
            height,
        })
        .collect()
}

struct Layout {
    canvas: Canvas,
    y: f32,
}

impl Layout {
    fn new_page(&mut self) {
        self.canvas.add_page();
        self.y = TOP_Y;
    }

    /// Starts a new page if `height` more would cross the bottom margin.
    fn ensure_room(&mut self, height: f32) {
        if self.y + height > CONTENT_BOTTOM_Y && self.y > TOP_Y {
            self.new_page();
        }
    }

    fn section_heading(&mut self, title: &str) {
        self.canvas
            .text(title, LEFT_X, self.y, 18.0, FontStyle::Bold, BLACK, Align::Left);
        self.y += 2.0;
        self.canvas.line(LEFT_X, self.y, RIGHT_X, self.y, 0.5);
        self.y += 8.0;
    }

    /// Keeps a heading together with the first rows of its block.
    fn lead_height(rows: &[Row]) -> f32 {
        HEADING_HEIGHT + BOX_PADDING + rows.iter().take(3).map(Row::height).sum::<f32>()
    }

    fn draw_row(&mut self, frames: &[Frame], row: &Row) {
        match row {
            Row::Text { cells, height } => {
                let baseline = self.y + height * 0.8;
                for cell in cells {
                    self.canvas.text(
                        &cell.text,
                        cell.x,
                        baseline,
                        cell.size,
                        cell.style,
                        BLACK,
                        Align::Left,
                    );
                }
            }
            Row::Rule { height } => {
                let y = self.y + height / 2.0;
                for frame in frames {
                    self.canvas
                        .line(frame.x + 5.0, y, frame.x + frame.width - 5.0, y, 0.3);
                }
            }
            Row::Pill {
                x,
                width,
                text,
                height,
            } => {
                self.canvas.fill_rect(*x, self.y + 1.0, *width, height - 2.0, BLACK);
                let label = fit_to_width(text, width - 3.0, 9.0, FontStyle::Regular);
                self.canvas.text(
                    &label,
                    x + width / 2.0,
                    self.y + height / 2.0 + 1.2,
                    9.0,
                    FontStyle::Regular,
                    WHITE,
                    Align::Center,
                );
            }
            Row::Gap(_) => {}
        }
    }

    fn close_frames(&mut self, frames: &[Frame], top: f32, bottom: f32) {
        for frame in frames {
            self.canvas
                .stroke_rect(frame.x, top, frame.width, bottom - top, 0.3);
        }
    }

    /// Draws `rows` inside bordered `frames`, continuing on a new page whenever
    /// the next row would cross the bottom margin.
    fn flow(&mut self, frames: &[Frame], rows: &[Row], min_height: f32) {
        let mut segment_top = self.y;
        self.y += BOX_PADDING;

        for row in rows {
            let height = row.height();
            if self.y + height > CONTENT_BOTTOM_Y {
                if self.y > segment_top + BOX_PADDING {
                    self.close_frames(frames, segment_top, self.y + BOX_PADDING);
                }
                self.new_page();
                segment_top = self.y;
                self.y += BOX_PADDING;
            }
            self.draw_row(frames, row);
            self.y += height;
        }

        let bottom = (self.y + BOX_PADDING)
            .max(segment_top + min_height)
            .min(CONTENT_BOTTOM_Y + BOX_PADDING);
        self.close_frames(frames, segment_top, bottom);
        self.y = bottom;
    }

    fn section(&mut self, title: &str, frames: &[Frame], rows: &[Row], min_height: f32) {
        self.ensure_room(Self::lead_height(rows));
        self.section_heading(title);
        self.flow(frames, rows, min_height);
        self.y += SECTION_GAP;
    }

    /// Returns `true` when the scenario did not fit the header bar.
    fn header(&mut self, doc: &ExportDocument) -> bool {
        let mut scenario_lines =
            split_text_to_size(&doc.scenario, 180.0, 14.0, FontStyle::Regular);
        let truncated = scenario_lines.len() > HEADER_SCENARIO_LINES;
        if truncated {
            scenario_lines.truncate(HEADER_SCENARIO_LINES - 1);
            scenario_lines.push("(continued below)".to_string());
        }

        let header_height = (30.0 + 7.0 * scenario_lines.len() as f32 + 10.0).max(40.0);
        self.canvas
            .fill_rect(0.0, 0.0, PAGE_WIDTH_MM, header_height, BLACK);
        self.canvas.text(
            DOCUMENT_TITLE,
            CENTER_X,
            20.0,
            24.0,
            FontStyle::Bold,
            WHITE,
            Align::Center,
        );
        let after_scenario = self.canvas.lines(
            &scenario_lines,
            CENTER_X,
            30.0,
            14.0,
            FontStyle::Regular,
            WHITE,
            Align::Center,
            7.0,
        );
        self.canvas.text(
            &doc.generated_line(),
            CENTER_X,
            after_scenario + 2.0,
            10.0,
            FontStyle::Regular,
            LIGHT_GRAY,
            Align::Center,
        );
        self.y = header_height + 12.0;
        truncated
    }

    fn full_scenario(&mut self, scenario: &str) {
        let lines = split_text_to_size(scenario, CONTENT_WIDTH - 10.0, 12.0, FontStyle::Regular);
        let rows = text_rows(lines, LEFT_X + 5.0, 12.0, FontStyle::Regular, 6.0);
        self.section(SECTION_SCENARIO, &FULL_WIDTH, &rows, 0.0);
    }

    fn summary(&mut self, summary: &str) {
        let lines = split_text_to_size(summary, CONTENT_WIDTH - 10.0, 12.0, FontStyle::Regular);
        let rows = text_rows(lines, LEFT_X + 5.0, 12.0, FontStyle::Regular, 6.0);
        self.section(SECTION_SUMMARY, &FULL_WIDTH, &rows, 25.0);
    }

    fn metrics(&mut self, doc: &ExportDocument) {
        let report = &doc.report;
        let col_width = CONTENT_WIDTH / 3.0;
        let head_height = 10.0;
        let frames: Vec<Frame> = (0..3)
            .map(|i| Frame {
                x: LEFT_X + col_width * i as f32,
                width: col_width,
            })
            .collect();
        let cells = [
            doc.feasibility_cell(),
            report.time_to_achieve.clone(),
            report.financial_impact.clone(),
        ];
        let columns: Vec<(f32, Vec<String>)> = frames
            .iter()
            .zip(cells.iter())
            .map(|(frame, cell)| {
                (
                    frame.x + 4.0,
                    split_text_to_size(cell, col_width - 8.0, 12.0, FontStyle::Regular),
                )
            })
            .collect();
        let rows = column_rows(&columns, 12.0, FontStyle::Regular, 6.0);

        self.ensure_room(Self::lead_height(&rows) + head_height);
        self.section_heading(SECTION_METRICS);

        for (frame, header) in frames.iter().zip(METRIC_HEADERS.iter()) {
            self.canvas
                .fill_rect(frame.x, self.y, frame.width, head_height, TABLE_HEAD_FILL);
            self.canvas
                .stroke_rect(frame.x, self.y, frame.width, head_height, 0.5);
            self.canvas.text(
                header,
                frame.x + 4.0,
                self.y + 6.5,
                12.0,
                FontStyle::Bold,
                BLACK,
                Align::Left,
            );
        }
        self.y += head_height;

        self.flow(&frames, &rows, 12.0);
        self.y += SECTION_GAP;
    }

    fn pros_and_cons(&mut self, advantages: &[String], challenges: &[String]) {
        let column_width = 80.0;
        let column_gap = 10.0;
        let frames = [
            Frame {
                x: LEFT_X,
                width: column_width,
            },
            Frame {
                x: LEFT_X + column_width + column_gap,
                width: column_width,
            },
        ];

        let mut rows = vec![
            Row::Text {
                cells: vec![
                    Cell {
                        x: frames[0].x + 5.0,
                        text: COLUMN_ADVANTAGES.to_string(),
                        size: 14.0,
                        style: FontStyle::Bold,
                    },
                    Cell {
                        x: frames[1].x + 5.0,
                        text: COLUMN_CHALLENGES.to_string(),
                        size: 14.0,
                        style: FontStyle::Bold,
                    },
                ],
                height: 7.0,
            },
            Row::Rule { height: 4.0 },
        ];
        rows.extend(column_rows(
            &[
                (frames[0].x + 5.0, bullet_lines(advantages, column_width - 10.0, 10.0)),
                (frames[1].x + 5.0, bullet_lines(challenges, column_width - 10.0, 10.0)),
            ],
            10.0,
            FontStyle::Regular,
            5.0,
        ));

        self.section(SECTION_PROS_CONS, &frames, &rows, 30.0);
    }

    fn recommendations(&mut self, recommendations: &[String]) {
        let lines = bullet_lines(recommendations, CONTENT_WIDTH - 10.0, 10.0);
        let rows = text_rows(lines, LEFT_X + 5.0, 10.0, FontStyle::Regular, 5.0);
        self.section(SECTION_RECOMMENDATIONS, &FULL_WIDTH, &rows, 20.0);
    }

    fn timeline(&mut self, doc: &ExportDocument) {
        if self.y > PAGE_BREAK_Y {
            self.new_page();
        }
        self.ensure_room(HEADING_HEIGHT + 40.0);
        self.section_heading(SECTION_TIMELINE);

        for (index, event) in doc.report.timeline.iter().enumerate() {
            if self.y > PAGE_BREAK_Y {
                self.new_page();
            }

            let inner_x = LEFT_X + 5.0;
            let mut rows = vec![
                Row::Pill {
                    x: inner_x,
                    width: 50.0,
                    text: event.timeframe.clone(),
                    height: 9.0,
                },
                Row::Gap(2.0),
            ];
            rows.extend(text_rows(
                split_text_to_size(
                    &format!("{}. {}", index + 1, event.title),
                    CONTENT_WIDTH - 10.0,
                    12.0,
                    FontStyle::Bold,
                ),
                inner_x,
                12.0,
                FontStyle::Bold,
                6.0,
            ));
            rows.push(Row::Gap(1.0));
            rows.extend(text_rows(
                split_text_to_size(
                    &event.description,
                    CONTENT_WIDTH - 10.0,
                    10.0,
                    FontStyle::Regular,
                ),
                inner_x,
                10.0,
                FontStyle::Regular,
                5.0,
            ));
            if !event.milestones.is_empty() {
                rows.push(Row::Gap(2.0));
                rows.extend(text_rows(
                    vec![MILESTONES_HEADING.to_string()],
                    inner_x,
                    10.0,
                    FontStyle::Bold,
                    5.0,
                ));
                rows.extend(text_rows(
                    bullet_lines(&event.milestones, CONTENT_WIDTH - 15.0, 9.0),
                    inner_x + 5.0,
                    9.0,
                    FontStyle::Regular,
                    4.5,
                ));
            }

            self.ensure_room(BOX_PADDING + rows.iter().take(4).map(Row::height).sum::<f32>());
            self.flow(&FULL_WIDTH, &rows, 0.0);
            self.y += 8.0;
        }
    }

    fn footers(&mut self) {
        let page_count = self.canvas.page_count();
        for index in 0..page_count {
            self.canvas.set_page(index);
            self.canvas.text(
                FOOTER_TEXT,
                CENTER_X,
                FOOTER_Y,
                8.0,
                FontStyle::Regular,
                FOOTER_GRAY,
                Align::Center,
            );
            self.canvas.text(
                &format!("Page {} of {}", index + 1, page_count),
                RIGHT_X,
                FOOTER_Y,
                8.0,
                FontStyle::Regular,
                FOOTER_GRAY,
                Align::Right,
            );
        }
    }
}

/// Lays out every page of the report.
pub fn layout_report(doc: &ExportDocument) -> Canvas {
    let mut layout = Layout {
        canvas: Canvas::new(),
        y: TOP_Y,
    };
    if layout.header(doc) {
        layout.full_scenario(&doc.scenario);
    }
    layout.summary(&doc.report.summary);
    layout.metrics(doc);
    layout.pros_and_cons(&doc.report.advantages, &doc.report.challenges);
    layout.recommendations(&doc.report.recommendations);
    layout.timeline(doc);
    layout.footers();
    layout.canvas
}

// ────────────────────────────────────────────────────────────────────────────
// PDF assembly
// ────────────────────────────────────────────────────────────────────────────

fn assemble(canvas: Canvas, doc: &ExportDocument) -> Result<Vec<u8>, ExportError> {
    let mut pdf = Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let mut fonts = Dictionary::new();
    for style in [FontStyle::Regular, FontStyle::Bold] {
        let font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => style.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(style.resource_name(), font_id);
    }
    let resources_id = pdf.add_object(dictionary! {
        "Font" => fonts,
    });

    let page_count = canvas.pages.len();
    let mut kids: Vec<Object> = Vec::with_capacity(page_count);
    for operations in canvas.pages {
        let content = Content { operations };
        let content_id = pdf.add_object(Stream::new(Dictionary::new(), content.encode()?));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(page_count as i64),
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                real(pt(PAGE_WIDTH_MM)),
                real(pt(PAGE_HEIGHT_MM)),
            ],
        }),
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = pdf.add_object(dictionary! {
        "Title" => Object::string_literal(DOCUMENT_TITLE),
        "Subject" => Object::String(encode_win_ansi(&doc.scenario), StringFormat::Literal),
        "Author" => Object::string_literal(DOCUMENT_AUTHOR),
        "Creator" => Object::string_literal(DOCUMENT_AUTHOR),
        "Keywords" => Object::String(
            encode_win_ansi(&format!("simulation, AI, scenario, {}", doc.category.label())),
            StringFormat::Literal,
        ),
    });
    pdf.trailer.set("Root", catalog_id);
    pdf.trailer.set("Info", info_id);
    pdf.compress();

    let mut buffer = Vec::new();
    pdf.save_to(&mut buffer)?;
    Ok(buffer)
}

/// Synchronous render: layout + assembly.
pub fn render_pdf(doc: &ExportDocument) -> Result<Vec<u8>, ExportError> {
    let canvas = layout_report(doc);
    debug!(pages = canvas.page_count(), "Direct-draw layout complete");
    assemble(canvas, doc)
}

pub struct DirectDrawStrategy;

#[async_trait]
impl PdfStrategy for DirectDrawStrategy {
    fn name(&self) -> &'static str {
        "direct-draw"
    }

    async fn render(&self, doc: &ExportDocument) -> Result<Vec<u8>, ExportError> {
        // CPU-bound, keep it off the async executor.
        let doc = doc.clone();
        tokio::task::spawn_blocking(move || render_pdf(&doc))
            .await
            .map_err(|e| ExportError::Task(e.to_string()))?
    }
}
