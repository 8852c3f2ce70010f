//! Export column layouts

use chrono::{DateTime, NaiveDate, Utc};

use crate::patents::Patent;

/// A single exported column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportColumn {
    ApplicationNumber,
    Title,
    Inventors,
    Applicants,
    FiledDate,
    PublishedDate,
    GrantedDate,
    Status,
    PatentNumber,
    RenewalDueDate,
    RenewalFee,
    GoogleDriveLink,
    IpIndiaUrl,
    LastChecked,
    CreatedAt,
    UpdatedAt,
}

/// Cell content for an exported column
#[derive(Debug, Clone, PartialEq)]
pub enum ExportCell {
    Blank,
    Text(String),
    Number(f64),
}

/// Every column, used by the full export
pub const FULL_COLUMNS: [ExportColumn; 16] = [
    ExportColumn::ApplicationNumber,
    ExportColumn::Title,
    ExportColumn::Inventors,
    ExportColumn::Applicants,
    ExportColumn::FiledDate,
    ExportColumn::PublishedDate,
    ExportColumn::GrantedDate,
    ExportColumn::Status,
    ExportColumn::PatentNumber,
    ExportColumn::RenewalDueDate,
    ExportColumn::RenewalFee,
    ExportColumn::GoogleDriveLink,
    ExportColumn::IpIndiaUrl,
    ExportColumn::LastChecked,
    ExportColumn::CreatedAt,
    ExportColumn::UpdatedAt,
];

/// Columns shown in list views and filtered exports
pub const LIST_COLUMNS: [ExportColumn; 12] = [
    ExportColumn::ApplicationNumber,
    ExportColumn::Title,
    ExportColumn::Inventors,
    ExportColumn::Applicants,
    ExportColumn::FiledDate,
    ExportColumn::PublishedDate,
    ExportColumn::GrantedDate,
    ExportColumn::Status,
    ExportColumn::PatentNumber,
    ExportColumn::RenewalDueDate,
    ExportColumn::GoogleDriveLink,
    ExportColumn::IpIndiaUrl,
];

impl ExportColumn {
    pub fn header(self) -> &'static str {
        match self {
            ExportColumn::ApplicationNumber => "Application Number",
            ExportColumn::Title => "Title",
            ExportColumn::Inventors => "Inventors",
            ExportColumn::Applicants => "Applicants",
            ExportColumn::FiledDate => "Filed Date",
            ExportColumn::PublishedDate => "Published Date",
            ExportColumn::GrantedDate => "Granted Date",
            ExportColumn::Status => "Status",
            ExportColumn::PatentNumber => "Patent Number",
            ExportColumn::RenewalDueDate => "Renewal Due Date",
            ExportColumn::RenewalFee => "Renewal Fee",
            ExportColumn::GoogleDriveLink => "Google Drive Link",
            ExportColumn::IpIndiaUrl => "IP India URL",
            ExportColumn::LastChecked => "Last Checked",
            ExportColumn::CreatedAt => "Created At",
            ExportColumn::UpdatedAt => "Updated At",
        }
    }

    /// Suggested column width in characters
    pub fn width(self) -> f64 {
        match self {
            ExportColumn::Title | ExportColumn::Inventors | ExportColumn::Applicants => 40.0,
            ExportColumn::GoogleDriveLink | ExportColumn::IpIndiaUrl => 45.0,
            ExportColumn::LastChecked | ExportColumn::CreatedAt | ExportColumn::UpdatedAt => 28.0,
            ExportColumn::ApplicationNumber | ExportColumn::PatentNumber => 20.0,
            _ => 16.0,
        }
    }

    pub fn cell(self, patent: &Patent) -> ExportCell {
        let r = &patent.record;
        match self {
            ExportColumn::ApplicationNumber => text(&r.application_number),
            ExportColumn::Title => text(&r.title),
            ExportColumn::Inventors => text(&r.inventors),
            ExportColumn::Applicants => text(&r.applicants),
            ExportColumn::FiledDate => date(r.filed_date),
            ExportColumn::PublishedDate => date(r.published_date),
            ExportColumn::GrantedDate => date(r.granted_date),
            ExportColumn::Status => text(&r.status),
            ExportColumn::PatentNumber => opt_text(r.patent_number.as_deref()),
            ExportColumn::RenewalDueDate => date(r.renewal_due_date),
            ExportColumn::RenewalFee => r.renewal_fee.map_or(ExportCell::Blank, ExportCell::Number),
            ExportColumn::GoogleDriveLink => opt_text(r.google_drive_link.as_deref()),
            ExportColumn::IpIndiaUrl => opt_text(r.ipindia_status_url.as_deref()),
            ExportColumn::LastChecked => timestamp(r.last_checked),
            ExportColumn::CreatedAt => timestamp(Some(r.created_at)),
            ExportColumn::UpdatedAt => timestamp(Some(r.updated_at)),
        }
    }
}

fn text(value: &str) -> ExportCell {
    opt_text(Some(value))
}

fn opt_text(value: Option<&str>) -> ExportCell {
    match value {
        Some(s) if !s.is_empty() => ExportCell::Text(s.to_string()),
        _ => ExportCell::Blank,
    }
}

fn date(value: Option<NaiveDate>) -> ExportCell {
    value.map_or(ExportCell::Blank, |d| {
        ExportCell::Text(d.format("%Y-%m-%d").to_string())
    })
}

fn timestamp(value: Option<DateTime<Utc>>) -> ExportCell {
    value.map_or(ExportCell::Blank, |t| ExportCell::Text(t.to_rfc3339()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patents::PatentRecord;

    #[test]
    fn test_cells_for_sparse_patent() {
        let mut record = PatentRecord::new("IN-1");
        record.filed_date = NaiveDate::from_ymd_opt(2021, 2, 3);
        record.renewal_fee = Some(1600.0);
        let patent = Patent { id: 1, record };

        assert_eq!(
            ExportColumn::FiledDate.cell(&patent),
            ExportCell::Text("2021-02-03".to_string())
        );
        assert_eq!(ExportColumn::GrantedDate.cell(&patent), ExportCell::Blank);
        assert_eq!(ExportColumn::Title.cell(&patent), ExportCell::Blank);
        assert_eq!(ExportColumn::RenewalFee.cell(&patent), ExportCell::Number(1600.0));
        assert_eq!(ExportColumn::LastChecked.cell(&patent), ExportCell::Blank);
    }

    #[test]
    fn test_list_columns_are_a_subset() {
        for column in LIST_COLUMNS {
            assert!(FULL_COLUMNS.contains(&column));
        }
        assert!(!LIST_COLUMNS.contains(&ExportColumn::RenewalFee));
    }
}
