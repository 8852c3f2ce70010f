//! Dashboard counters

use chrono::NaiveDate;

use super::renewals::days_until;
use super::status::{is_abandoned, is_granted, is_under_examination};
use super::types::Patent;

/// Number of recently updated patents listed on the dashboard
pub const RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortfolioStats {
    pub total: usize,
    pub granted: usize,
    pub under_examination: usize,
    pub abandoned: usize,
    /// Renewals due in 0..=30 days
    pub due_30: usize,
    /// Renewals due in 31..=60 days
    pub due_60: usize,
    /// Renewals due in 61..=90 days
    pub due_90: usize,
}

impl PortfolioStats {
    pub fn compute(patents: &[Patent], today: NaiveDate) -> Self {
        let mut stats = PortfolioStats {
            total: patents.len(),
            ..Default::default()
        };

        for p in patents {
            let status = &p.record.status;
            if is_granted(status) {
                stats.granted += 1;
            }
            if is_under_examination(status) {
                stats.under_examination += 1;
            }
            if is_abandoned(status) {
                stats.abandoned += 1;
            }

            if let Some(due) = p.record.renewal_due_date {
                match days_until(due, today) {
                    0..=30 => stats.due_30 += 1,
                    31..=60 => stats.due_60 += 1,
                    61..=90 => stats.due_90 += 1,
                    _ => {}
                }
            }
        }

        stats
    }
}

/// Most recently updated patents, newest first
pub fn recent_patents(patents: &[Patent], limit: usize) -> Vec<&Patent> {
    let mut sorted: Vec<&Patent> = patents.iter().collect();
    sorted.sort_by(|a, b| b.record.updated_at.cmp(&a.record.updated_at));
    sorted.truncate(limit);
    sorted
}
