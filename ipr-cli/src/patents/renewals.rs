//! Renewal-due calculations and the plain-text renewal table

use chrono::NaiveDate;
use unicode_width::UnicodeWidthStr;

use super::types::Patent;

/// Whole days from `today` until `due` (negative when overdue)
pub fn days_until(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// Urgency marker shown next to a renewal due date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenewalAlert {
    /// Overdue or due within a week
    Urgent,
    /// Due within 30 days
    Soon,
}

pub fn renewal_alert(due: Option<NaiveDate>, today: NaiveDate) -> Option<RenewalAlert> {
    let days = days_until(due?, today);
    if days <= 7 {
        Some(RenewalAlert::Urgent)
    } else if days <= 30 {
        Some(RenewalAlert::Soon)
    } else {
        None
    }
}

/// Patents whose renewal falls 1..=`days` days from today
pub fn due_within(patents: &[Patent], today: NaiveDate, days: i64) -> Vec<&Patent> {
    patents
        .iter()
        .filter(|p| {
            p.record
                .renewal_due_date
                .map(|due| {
                    let diff = days_until(due, today);
                    diff > 0 && diff <= days
                })
                .unwrap_or(false)
        })
        .collect()
}

const TABLE_HEADERS: [&str; 4] = ["Application No", "Title", "Renewal Date", "Applicants"];

/// Render patents as a padded, pipe-separated text table for pasting
/// into mail or chat. Returns an empty string for an empty slice.
pub fn render_renewal_table(patents: &[&Patent]) -> String {
    if patents.is_empty() {
        return String::new();
    }

    let rows: Vec<[String; 4]> = patents
        .iter()
        .map(|p| {
            [
                p.record.application_number.clone(),
                p.record.title.clone(),
                p.record
                    .renewal_due_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
                p.record.applicants.clone(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = TABLE_HEADERS.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(
        TABLE_HEADERS
            .iter()
            .enumerate()
            .map(|(i, h)| pad(h, widths[i]))
            .collect::<Vec<_>>()
            .join(" | "),
    );
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-|-"),
    );
    for row in &rows {
        lines.push(
            row.iter()
                .enumerate()
                .map(|(i, cell)| pad(cell, widths[i]))
                .collect::<Vec<_>>()
                .join(" | "),
        );
    }

    lines.join("\n")
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}
