use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use html_escape::encode_text;
use log::info;

use crate::error::SchedulerError;
use crate::schedule::{Schedule, ScheduledSlot};

use super::{fmt_date, fmt_time, Renderer};

/// Default renderer: one HTML file with the three report tables (full
/// assignments, student-TA pairings, per-TA summary).
pub struct HtmlRenderer {
    font_path: Option<PathBuf>,
}

// Report palette: rich blue headers, alternating light blue rows.
const HEADER_BG: &str = "#1F4E79";
const HEADER_FG: &str = "#FFFFFF";
const ROW_EVEN: &str = "#D9E2F3";
const ROW_ODD: &str = "#E6F0FF";
const BORDER: &str = "#8EA9DB";

impl HtmlRenderer {
    pub fn new(font_path: Option<PathBuf>) -> Self {
        Self { font_path }
    }

    fn style(&self) -> String {
        let mut css = String::new();
        let mut family = "sans-serif".to_string();

        // The font is purely decorative; a missing file just means defaults.
        if let Some(font) = &self.font_path {
            if font.exists() {
                let _ = write!(
                    css,
                    "@font-face {{ font-family: 'Vazirmatn'; src: url('{}'); }}\n",
                    font.display()
                );
                family = "'Vazirmatn', sans-serif".to_string();
                info!("embedding font from {}", font.display());
            } else {
                info!("font file {} not found, using default fonts", font.display());
            }
        }

        let _ = write!(
            css,
            "body {{ font-family: {family}; margin: 2em; }}\n\
             table {{ border-collapse: collapse; margin-bottom: 2em; }}\n\
             th {{ background: {HEADER_BG}; color: {HEADER_FG}; padding: 8px 16px; border: 2px solid {BORDER}; }}\n\
             td {{ padding: 6px 16px; border: 1px solid {BORDER}; text-align: center; }}\n\
             tr:nth-child(even) td {{ background: {ROW_EVEN}; }}\n\
             tr:nth-child(odd) td {{ background: {ROW_ODD}; }}\n\
             h2 {{ color: {HEADER_BG}; }}\n"
        );
        css
    }
}

fn push_row(html: &mut String, cells: &[&str]) {
    html.push_str("<tr>");
    for cell in cells {
        let _ = write!(html, "<td>{}</td>", encode_text(cell));
    }
    html.push_str("</tr>\n");
}

fn push_header(html: &mut String, title: &str, columns: &[&str]) {
    let _ = write!(html, "<h2>{}</h2>\n<table>\n<tr>", encode_text(title));
    for column in columns {
        let _ = write!(html, "<th>{}</th>", encode_text(column));
    }
    html.push_str("</tr>\n");
}

fn render_document(renderer: &HtmlRenderer, slots: &[ScheduledSlot], schedule: &Schedule) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Assignment Results</title>\n<style>\n");
    html.push_str(&renderer.style());
    html.push_str("</style>\n</head>\n<body>\n");

    push_header(
        &mut html,
        "Full Assignments",
        &["Student", "TA", "Date", "Start Time", "End Time"],
    );
    for slot in slots {
        push_row(
            &mut html,
            &[
                &slot.student,
                &slot.ta,
                &fmt_date(slot.date),
                &fmt_time(slot.start),
                &fmt_time(slot.end),
            ],
        );
    }
    html.push_str("</table>\n");

    push_header(&mut html, "Private Assignments", &["Student", "TA"]);
    for slot in slots {
        push_row(&mut html, &[&slot.student, &slot.ta]);
    }
    html.push_str("</table>\n");

    push_header(&mut html, "Summary", &["TA", "Assigned Students", "Students"]);
    for (ta, students) in &schedule.by_ta {
        push_row(
            &mut html,
            &[ta, &students.len().to_string(), &students.join(", ")],
        );
    }
    html.push_str("</table>\n</body>\n</html>\n");
    html
}

impl Renderer for HtmlRenderer {
    fn render(
        &self,
        slots: &[ScheduledSlot],
        schedule: &Schedule,
        out: &Path,
    ) -> Result<(), SchedulerError> {
        let html = render_document(self, slots, schedule);
        std::fs::write(out, html).map_err(|source| SchedulerError::Write {
            path: out.to_path_buf(),
            source,
        })
    }
}
