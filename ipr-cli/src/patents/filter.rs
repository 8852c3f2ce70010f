//! Search and filtering over the patent list

use std::str::FromStr;

use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate};

use super::renewals::days_until;
use super::types::{Patent, PatentRecord};

/// Renewal due window used by the dashboard drill-downs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueWindow {
    /// Renewal date already passed
    Overdue,
    /// Renewal due 1..=N days from today
    Within(i64),
}

impl FromStr for DueWindow {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("overdue") {
            return Ok(DueWindow::Overdue);
        }
        let days: i64 = s
            .parse()
            .with_context(|| format!("Invalid due window '{}': expected 'overdue' or a number of days", s))?;
        if days <= 0 {
            bail!("Due window must be a positive number of days, got {}", days);
        }
        Ok(DueWindow::Within(days))
    }
}

/// Which date a date criterion applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateField {
    #[default]
    Filed,
    RenewalDue,
}

impl DateField {
    fn value(self, record: &PatentRecord) -> Option<NaiveDate> {
        match self {
            DateField::Filed => record.filed_date,
            DateField::RenewalDue => record.renewal_due_date,
        }
    }
}

/// Date restriction; a year takes precedence over a range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateCriterion {
    Year(i32),
    Range {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

impl DateCriterion {
    fn matches(&self, date: NaiveDate) -> bool {
        match *self {
            DateCriterion::Year(year) => date.year() == year,
            DateCriterion::Range { from, to } => {
                from.is_none_or(|f| date >= f) && to.is_none_or(|t| date <= t)
            }
        }
    }
}

/// All criteria are AND-ed; unset criteria match everything
#[derive(Debug, Clone, Default)]
pub struct PatentFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub due: Option<DueWindow>,
    pub date_field: DateField,
    pub date: Option<DateCriterion>,
}

impl PatentFilter {
    pub fn matches(&self, record: &PatentRecord, today: NaiveDate) -> bool {
        if let Some(window) = self.due {
            let Some(due) = record.renewal_due_date else {
                return false;
            };
            let days = days_until(due, today);
            let inside = match window {
                DueWindow::Overdue => days < 0,
                DueWindow::Within(n) => days > 0 && days <= n,
            };
            if !inside {
                return false;
            }
        }

        if let Some(criterion) = self.date {
            match self.date_field.value(record) {
                Some(date) if criterion.matches(date) => {}
                _ => return false,
            }
        }

        if let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            let hit = [
                &record.application_number,
                &record.title,
                &record.inventors,
                &record.applicants,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }

        if let Some(status) = self.status.as_deref() {
            if record.status.trim().to_lowercase() != status.trim().to_lowercase() {
                return false;
            }
        }

        true
    }

    pub fn apply<'a>(&self, patents: &'a [Patent], today: NaiveDate) -> Vec<&'a Patent> {
        patents
            .iter()
            .filter(|p| self.matches(&p.record, today))
            .collect()
    }
}

/// Default list order: most recently filed first, undated records last
pub fn sort_by_filed_desc(patents: &mut [Patent]) {
    patents.sort_by(|a, b| b.record.filed_date.cmp(&a.record.filed_date));
}

/// Distinct trimmed statuses in first-seen order
pub fn distinct_statuses(patents: &[Patent]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for p in patents {
        let status = p.record.status.trim();
        if !status.is_empty() && !seen.iter().any(|s| s == status) {
            seen.push(status.to_string());
        }
    }
    seen
}
