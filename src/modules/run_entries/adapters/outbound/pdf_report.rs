// PDF rendering of the run report.
//
// Layout runs first and produces pages of positioned text and rules, using a
// top-down cursor in points. Encoding then writes those pages with
// pdf-writer, flipping y for PDF's bottom-up space.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use crate::modules::run_entries::core::report::{
    FlatReport, MonthGroup, Reading, ReportModel, ReportRow, ReportSummary, RowStatus,
};
use crate::modules::run_entries::use_cases::download_report::renderer_port::{
    RenderError, ReportRenderer,
};

pub const REPORT_TITLE: &str = "Generator Time Work Report";
pub const REPORT_FILE_NAME: &str = "generator-work-report.pdf";
pub const COLUMN_HEADERS: [&str; 4] = ["Date", "Start", "End", "Duration"];

// US Letter
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 40.0;
/// A block that would end below this line starts a new page.
const PAGE_BOTTOM: f32 = 760.0;
const TABLE_TOP: f32 = 120.0;

const COLUMNS: [f32; 4] = [60.0, 190.0, 320.0, 450.0];
const RULE_LEFT: f32 = 50.0;
const RULE_RIGHT: f32 = 550.0;

const TITLE_SIZE: f32 = 20.0;
const HEADER_SIZE: f32 = 12.0;
const MONTH_SIZE: f32 = 13.0;
const ROW_SIZE: f32 = 11.0;
const SUMMARY_TITLE_SIZE: f32 = 14.0;
const SUMMARY_SIZE: f32 = 12.0;

// Helvetica has no fixed advance; this average is close enough for centring.
const AVG_GLYPH_WIDTH: f32 = 0.55;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        font: Font,
        text: String,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
    },
}

pub type Page = Vec<DrawOp>;

pub fn format_hours_minutes(total_minutes: i64) -> String {
    format!("{}h {}m", total_minutes / 60, total_minutes % 60)
}

fn reading_cell(reading: Option<&Reading>, status: RowStatus) -> String {
    if status == RowStatus::Closed {
        return "CLOSED".to_string();
    }
    match reading {
        Some(Reading::Meter { hour, minute }) => format!("{hour}h {minute}m"),
        Some(Reading::Clock(clock)) => clock.clone(),
        None => "-".to_string(),
    }
}

fn duration_cell(status: RowStatus) -> String {
    match status {
        RowStatus::Closed => "Generator Closed (No Run)".to_string(),
        RowStatus::Ran(duration) => format!(
            "{}h {}m ({} min)",
            duration.hours, duration.minutes, duration.total_minutes
        ),
        RowStatus::NoValidDuration => "-".to_string(),
    }
}

pub fn month_heading(month: &MonthGroup) -> String {
    format!(
        "{} \u{2014} Total: {} ({} min)",
        month.label,
        format_hours_minutes(month.total_minutes),
        month.total_minutes
    )
}

struct Layout {
    pages: Vec<Page>,
    y: f32,
}

impl Layout {
    fn start() -> Self {
        let mut layout = Self {
            pages: vec![Vec::new()],
            y: 0.0,
        };
        layout.title();
        layout.y = layout.column_header(TABLE_TOP);
        layout
    }

    fn text(&mut self, x: f32, y: f32, size: f32, font: Font, text: impl Into<String>) {
        if let Some(page) = self.pages.last_mut() {
            page.push(DrawOp::Text {
                x,
                y,
                size,
                font,
                text: text.into(),
            });
        }
    }

    fn rule(&mut self, x1: f32, x2: f32, y: f32) {
        if let Some(page) = self.pages.last_mut() {
            page.push(DrawOp::Rule { x1, x2, y });
        }
    }

    fn title(&mut self) {
        let width = REPORT_TITLE.chars().count() as f32 * TITLE_SIZE * AVG_GLYPH_WIDTH;
        let x = (PAGE_WIDTH - width) / 2.0;
        self.text(x, MARGIN, TITLE_SIZE, Font::Bold, REPORT_TITLE);
        self.rule(x, x + width, MARGIN + TITLE_SIZE + 2.0);
    }

    /// Draws the column header at `y` and returns where the first row goes.
    fn column_header(&mut self, y: f32) -> f32 {
        for (x, label) in COLUMNS.into_iter().zip(COLUMN_HEADERS) {
            self.text(x, y, HEADER_SIZE, Font::Bold, label);
        }
        self.rule(RULE_LEFT, RULE_RIGHT, y + 16.0);
        y + 24.0
    }

    fn ensure_space(&mut self, extra: f32) {
        if self.y + extra > PAGE_BOTTOM {
            self.pages.push(Vec::new());
            self.title();
            self.y = self.column_header(TABLE_TOP);
        }
    }

    fn month(&mut self, month: &MonthGroup) {
        self.ensure_space(50.0);
        self.text(RULE_LEFT, self.y, MONTH_SIZE, Font::Bold, month_heading(month));
        self.y += 22.0;
        self.y = self.column_header(self.y);
        for row in &month.rows {
            self.row(row);
        }
        self.y += 10.0;
    }

    fn row(&mut self, row: &ReportRow) {
        self.ensure_space(24.0);
        let date = if row.date.trim().is_empty() {
            "-".to_string()
        } else {
            row.date.clone()
        };
        let cells = [
            date,
            reading_cell(row.start.as_ref(), row.status),
            reading_cell(row.end.as_ref(), row.status),
            duration_cell(row.status),
        ];
        let y = self.y;
        for (x, cell) in COLUMNS.into_iter().zip(cells) {
            self.text(x, y, ROW_SIZE, Font::Regular, cell);
        }
        self.y += 20.0;
    }

    fn summary(&mut self, summary: &ReportSummary) {
        self.ensure_space(80.0);
        let y = self.y;
        self.text(RULE_LEFT, y, SUMMARY_TITLE_SIZE, Font::Bold, "Overall Summary");
        self.rule(RULE_LEFT, 200.0, y + 18.0);
        let y = y + 30.0;
        let lines = [
            format!(
                "Total Hours Worked: {} ({} min)",
                format_hours_minutes(summary.total_minutes),
                summary.total_minutes
            ),
            format!("Total Working Days (valid readings): {}", summary.day_count),
            format!("Average Per Day: {} hrs/day", summary.average_hours_per_day),
        ];
        for (i, line) in lines.into_iter().enumerate() {
            self.text(RULE_LEFT, y + 18.0 * i as f32, SUMMARY_SIZE, Font::Regular, line);
        }
        self.y = y + 54.0;
    }
}

pub fn layout_monthly(report: &ReportModel) -> Vec<Page> {
    let mut layout = Layout::start();
    for month in &report.months {
        layout.month(month);
    }
    layout.summary(&report.summary);
    layout.pages
}

pub fn layout_flat(report: &FlatReport) -> Vec<Page> {
    let mut layout = Layout::start();
    for row in &report.rows {
        layout.row(row);
    }
    layout.summary(&report.summary);
    layout.pages
}

/// Standard 14 fonts only cover WinAnsi; anything outside it prints as `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

pub fn encode_pages(pages: &[Page]) -> Vec<u8> {
    let mut pdf = Pdf::new();

    let catalog_id = Ref::new(1);
    let pages_id = Ref::new(2);
    let regular_id = Ref::new(3);
    let bold_id = Ref::new(4);
    let mut next_id = 5;

    pdf.type1_font(regular_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    let mut page_refs = Vec::with_capacity(pages.len());
    for ops in pages {
        let page_id = Ref::new(next_id);
        let content_id = Ref::new(next_id + 1);
        next_id += 2;
        page_refs.push(page_id);

        {
            let mut page = pdf.page(page_id);
            page.parent(pages_id)
                .media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT))
                .contents(content_id);
            page.resources()
                .fonts()
                .pair(Name(b"F1"), regular_id)
                .pair(Name(b"F2"), bold_id);
        }

        let mut content = Content::new();
        for op in ops {
            match op {
                DrawOp::Text {
                    x,
                    y,
                    size,
                    font,
                    text,
                } => {
                    let font_name = match font {
                        Font::Regular => Name(b"F1"),
                        Font::Bold => Name(b"F2"),
                    };
                    let encoded = win_ansi(text);
                    content.begin_text();
                    content.set_font(font_name, *size);
                    content.set_text_matrix([1.0, 0.0, 0.0, 1.0, *x, PAGE_HEIGHT - *y - *size]);
                    content.show(Str(&encoded));
                    content.end_text();
                }
                DrawOp::Rule { x1, x2, y } => {
                    content.set_line_width(1.0);
                    content.move_to(*x1, PAGE_HEIGHT - *y);
                    content.line_to(*x2, PAGE_HEIGHT - *y);
                    content.stroke();
                }
            }
        }
        pdf.stream(content_id, &content.finish());
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_refs.iter().copied())
        .count(page_refs.len() as i32);

    pdf.finish()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfReportRenderer;

impl ReportRenderer for PdfReportRenderer {
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn file_name(&self) -> &'static str {
        REPORT_FILE_NAME
    }

    fn render_monthly(&self, report: &ReportModel) -> Result<Vec<u8>, RenderError> {
        Ok(encode_pages(&layout_monthly(report)))
    }

    fn render_flat(&self, report: &FlatReport) -> Result<Vec<u8>, RenderError> {
        Ok(encode_pages(&layout_flat(report)))
    }
}
