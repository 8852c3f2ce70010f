//! Terminal rendering of patent listings

use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::*;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::excel::export::{ExportCell, LIST_COLUMNS};
use crate::patents::{Patent, RenewalAlert, StatusCategory, renewal_alert};

const TITLE_WIDTH: usize = 48;

/// Truncate to a display width, marking the cut with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

/// Right-pad to a display width
pub fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

fn date_text(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "-".to_string())
}

/// Coloured renewal date with an urgency marker
pub fn renewal_label(due: Option<NaiveDate>, today: NaiveDate, width: usize) -> String {
    let text = pad(&date_text(due), width);
    match renewal_alert(due, today) {
        Some(RenewalAlert::Urgent) => format!("{} {}", text.red().bold(), "!".red().bold()),
        Some(RenewalAlert::Soon) => format!("{} {}", text.yellow(), "*".yellow()),
        None => text,
    }
}

/// Padded table with coloured status and renewal markers
pub fn render_table(patents: &[&Patent], today: NaiveDate) -> String {
    let headers = ["Application No", "Title", "Status", "Filed", "Renewal Due"];

    let rows: Vec<[String; 4]> = patents
        .iter()
        .map(|p| {
            [
                p.record.application_number.clone(),
                truncate(&p.record.title, TITLE_WIDTH),
                p.record.status.clone(),
                date_text(p.record.filed_date),
            ]
        })
        .collect();

    let mut widths = [0usize; 5];
    for (i, h) in headers.iter().enumerate() {
        widths[i] = h.width();
    }
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }
    widths[4] = widths[4].max("YYYY-MM-DD".len());

    let mut out = String::new();
    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| pad(h, widths[i]))
        .collect();
    out.push_str(&header_line.join("  ").bold().to_string());
    out.push('\n');

    for (patent, row) in patents.iter().zip(&rows) {
        let status = StatusCategory::classify(&row[2]).paint(&pad(&row[2], widths[2]));
        out.push_str(&format!(
            "{}  {}  {}  {}  {}\n",
            pad(&row[0], widths[0]),
            pad(&row[1], widths[1]),
            status,
            pad(&row[3], widths[3]),
            renewal_label(patent.record.renewal_due_date, today, widths[4]),
        ));
    }

    out.push_str(&format!("\n{} patent(s)\n", patents.len()).dimmed().to_string());
    out
}

/// CSV with the list-export columns
pub fn render_csv(patents: &[&Patent]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(LIST_COLUMNS.iter().map(|c| c.header()))?;

    for patent in patents {
        let row: Vec<String> = LIST_COLUMNS
            .iter()
            .map(|c| match c.cell(patent) {
                ExportCell::Blank => String::new(),
                ExportCell::Text(s) => s,
                ExportCell::Number(n) => n.to_string(),
            })
            .collect();
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to flush CSV output")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

pub fn render_json(patents: &[&Patent]) -> Result<String> {
    serde_json::to_string_pretty(patents).context("Failed to format JSON output")
}
