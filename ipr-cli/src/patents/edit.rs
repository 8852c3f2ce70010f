//! Manual edits to a stored patent

use anyhow::{Result, bail};
use chrono::{NaiveDate, Utc};

use super::types::PatentRecord;

/// Field overrides supplied by the user; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct PatentEdit {
    pub application_number: Option<String>,
    pub title: Option<String>,
    pub inventors: Option<String>,
    pub applicants: Option<String>,
    pub status: Option<String>,
    pub filed_date: Option<NaiveDate>,
    pub published_date: Option<NaiveDate>,
    pub granted_date: Option<NaiveDate>,
    pub renewal_due_date: Option<NaiveDate>,
    pub renewal_fee: Option<f64>,
    pub patent_number: Option<String>,
    pub patent_certificate: Option<String>,
    pub google_drive_link: Option<String>,
    /// Remove the stored publication date
    pub clear_published: bool,
    /// Remove the stored grant date
    pub clear_granted: bool,
}

impl PatentEdit {
    pub fn is_empty(&self) -> bool {
        self.application_number.is_none()
            && self.title.is_none()
            && self.inventors.is_none()
            && self.applicants.is_none()
            && self.status.is_none()
            && self.filed_date.is_none()
            && self.published_date.is_none()
            && self.granted_date.is_none()
            && self.renewal_due_date.is_none()
            && self.renewal_fee.is_none()
            && self.patent_number.is_none()
            && self.patent_certificate.is_none()
            && self.google_drive_link.is_none()
            && !self.clear_published
            && !self.clear_granted
    }

    /// Apply the edit to a copy of `record` and validate the result.
    ///
    /// Application number, title, status, filed date and renewal due date
    /// must all be present afterwards.
    pub fn apply(self, record: &PatentRecord) -> Result<PatentRecord> {
        let mut updated = record.clone();

        if let Some(v) = self.application_number {
            updated.application_number = v.trim().to_string();
        }
        if let Some(v) = self.title {
            updated.title = v.trim().to_string();
        }
        if let Some(v) = self.inventors {
            updated.inventors = v.trim().to_string();
        }
        if let Some(v) = self.applicants {
            updated.applicants = v.trim().to_string();
        }
        if let Some(v) = self.status {
            updated.status = v.trim().to_string();
        }
        if let Some(v) = self.filed_date {
            updated.filed_date = Some(v);
        }
        if self.clear_published {
            updated.published_date = None;
        }
        if self.clear_granted {
            updated.granted_date = None;
        }
        if let Some(v) = self.published_date {
            updated.published_date = Some(v);
        }
        if let Some(v) = self.granted_date {
            updated.granted_date = Some(v);
        }
        if let Some(v) = self.renewal_due_date {
            updated.renewal_due_date = Some(v);
        }
        if let Some(v) = self.renewal_fee {
            if !v.is_finite() || v < 0.0 {
                bail!("Renewal fee must be a non-negative number, got {}", v);
            }
            updated.renewal_fee = Some(v);
        }
        if let Some(v) = self.patent_number {
            updated.patent_number = non_empty(v);
        }
        if let Some(v) = self.patent_certificate {
            updated.patent_certificate = non_empty(v);
        }
        if let Some(v) = self.google_drive_link {
            updated.google_drive_link = non_empty(v);
        }

        let mut missing = Vec::new();
        if updated.application_number.is_empty() {
            missing.push("application number");
        }
        if updated.title.is_empty() {
            missing.push("title");
        }
        if updated.status.is_empty() {
            missing.push("status");
        }
        if updated.filed_date.is_none() {
            missing.push("filed date");
        }
        if updated.renewal_due_date.is_none() {
            missing.push("renewal due date");
        }
        if !missing.is_empty() {
            bail!("Cannot save patent, missing required fields: {}", missing.join(", "));
        }

        updated.updated_at = Utc::now();
        Ok(updated)
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_record() -> PatentRecord {
        let mut record = PatentRecord::new("IN001");
        record.title = "Solar Dryer".to_string();
        record.filed_date = NaiveDate::from_ymd_opt(2020, 3, 15);
        record.renewal_due_date = NaiveDate::from_ymd_opt(2026, 3, 15);
        record
    }

    #[test]
    fn test_apply_overrides_only_given_fields() {
        let record = complete_record();
        let edit = PatentEdit {
            status: Some("Granted".to_string()),
            renewal_fee: Some(4000.0),
            ..Default::default()
        };

        let updated = edit.apply(&record).unwrap();
        assert_eq!(updated.status, "Granted");
        assert_eq!(updated.renewal_fee, Some(4000.0));
        assert_eq!(updated.title, "Solar Dryer");
        assert_eq!(updated.created_at, record.created_at);
        assert!(updated.updated_at >= record.updated_at);
    }

    #[test]
    fn test_apply_rejects_missing_required_fields() {
        let record = PatentRecord::new("IN001");
        let err = PatentEdit {
            status: Some("Granted".to_string()),
            ..Default::default()
        }
        .apply(&record)
        .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("title"));
        assert!(msg.contains("filed date"));
        assert!(msg.contains("renewal due date"));
    }

    #[test]
    fn test_blank_link_clears_value() {
        let mut record = complete_record();
        record.google_drive_link = Some("https://drive.example/doc1".to_string());
        let updated = PatentEdit {
            google_drive_link: Some("  ".to_string()),
            ..Default::default()
        }
        .apply(&record)
        .unwrap();
        assert!(updated.google_drive_link.is_none());
    }

    #[test]
    fn test_negative_fee_rejected() {
        let edit = PatentEdit {
            renewal_fee: Some(-5.0),
            ..Default::default()
        };
        assert!(edit.apply(&complete_record()).is_err());
    }

    #[test]
    fn test_application_number_can_be_changed() {
        let updated = PatentEdit {
            application_number: Some("  IN002 ".to_string()),
            ..Default::default()
        }
        .apply(&complete_record())
        .unwrap();
        assert_eq!(updated.application_number, "IN002");
    }

    #[test]
    fn test_blank_application_number_rejected() {
        let err = PatentEdit {
            application_number: Some("   ".to_string()),
            ..Default::default()
        }
        .apply(&complete_record())
        .unwrap_err();
        assert!(err.to_string().contains("application number"));
    }

    #[test]
    fn test_optional_dates_can_be_cleared() {
        let mut record = complete_record();
        record.published_date = NaiveDate::from_ymd_opt(2021, 6, 1);
        record.granted_date = NaiveDate::from_ymd_opt(2023, 2, 1);

        let edit = PatentEdit {
            clear_published: true,
            clear_granted: true,
            ..Default::default()
        };
        assert!(!edit.is_empty());

        let updated = edit.apply(&record).unwrap();
        assert!(updated.published_date.is_none());
        assert!(updated.granted_date.is_none());
        assert_eq!(updated.filed_date, record.filed_date);
    }
}
