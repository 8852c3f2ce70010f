//! Patent and renewal payment records

use std::fmt;

use anyhow::{Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Public search portal every imported record links to
pub const IPINDIA_PUBLIC_SEARCH_URL: &str = "https://ipindiaservices.gov.in/publicsearch";

/// Status given to rows whose status cell is empty
pub const DEFAULT_STATUS: &str = "Filed";

/// A raw spreadsheet cell value, kept for provenance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Empty cell (serialised as null)
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// `None` for empty cells, the value otherwise
    pub fn non_empty(self) -> Option<CellValue> {
        if self.is_empty() { None } else { Some(self) }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{}", *v as i64),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// Source-row provenance carried alongside an imported record
///
/// Unvalidated values from the source spreadsheet row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMetadata {
    /// Serial number column (first column of the sheet)
    pub serial_number: Option<CellValue>,
    /// Provisional application marker (second column of the sheet)
    pub provisional: Option<CellValue>,
    pub remarks: Option<CellValue>,
    pub ip_agent: Option<CellValue>,
    pub details: Option<CellValue>,
    /// Every cell of the source row, in column order
    pub full_row: Vec<CellValue>,
}

/// Full field set of a tracked patent application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatentRecord {
    /// Natural key
    pub application_number: String,
    pub title: String,
    pub inventors: String,
    pub applicants: String,
    pub filed_date: Option<NaiveDate>,
    pub published_date: Option<NaiveDate>,
    pub granted_date: Option<NaiveDate>,
    pub status: String,
    pub renewal_due_date: Option<NaiveDate>,
    pub renewal_fee: Option<f64>,
    pub last_checked: Option<DateTime<Utc>>,
    pub ipindia_status_url: Option<String>,
    pub google_drive_link: Option<String>,
    pub patent_number: Option<String>,
    pub patent_certificate: Option<String>,
    pub raw_metadata: RawMetadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PatentRecord {
    /// Create a bare record with only the application number set
    pub fn new(application_number: impl Into<String>) -> Self {
        let now = Utc::now();
        let application_number = application_number.into();
        let ipindia_status_url = if application_number.is_empty() {
            None
        } else {
            Some(IPINDIA_PUBLIC_SEARCH_URL.to_string())
        };

        Self {
            application_number,
            title: String::new(),
            inventors: String::new(),
            applicants: String::new(),
            filed_date: None,
            published_date: None,
            granted_date: None,
            status: DEFAULT_STATUS.to_string(),
            renewal_due_date: None,
            renewal_fee: None,
            last_checked: None,
            ipindia_status_url,
            google_drive_link: None,
            patent_number: None,
            patent_certificate: None,
            raw_metadata: RawMetadata::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A patent record as stored, with its generated identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patent {
    pub id: i64,
    #[serde(flatten)]
    pub record: PatentRecord,
}

/// A renewal fee payment recorded against a patent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenewalPayment {
    pub id: i64,
    pub patent_id: i64,
    pub payment_date: NaiveDate,
    pub amount: f64,
    pub payment_method: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Payment fields supplied by the user when adding or editing a payment
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub payment_date: NaiveDate,
    pub amount: f64,
    pub payment_method: String,
    pub notes: String,
}

impl NewPayment {
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            bail!("Payment amount must be a non-negative number, got {}", self.amount);
        }
        if self.payment_method.trim().is_empty() {
            bail!("Payment method is required");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_json_shape() {
        let row = vec![
            CellValue::Int(1),
            CellValue::Empty,
            CellValue::Text("IN001".to_string()),
            CellValue::Float(43905.0),
            CellValue::Bool(true),
        ];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"[1,null,"IN001",43905.0,true]"#);

        let back: Vec<CellValue> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn test_cell_value_display() {
        assert_eq!(CellValue::Float(12.0).to_string(), "12");
        assert_eq!(CellValue::Float(12.5).to_string(), "12.5");
        assert_eq!(CellValue::Empty.to_string(), "");
        assert!(CellValue::Text("  ".to_string()).is_empty());
    }

    #[test]
    fn test_new_record_defaults() {
        let record = PatentRecord::new("IN001");
        assert_eq!(record.status, "Filed");
        assert_eq!(record.ipindia_status_url.as_deref(), Some(IPINDIA_PUBLIC_SEARCH_URL));
        assert!(record.renewal_fee.is_none());
    }

    #[test]
    fn test_payment_validation() {
        let mut payment = NewPayment {
            payment_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            amount: 4000.0,
            payment_method: "Online".to_string(),
            notes: String::new(),
        };
        assert!(payment.validate().is_ok());

        payment.amount = -1.0;
        assert!(payment.validate().is_err());

        payment.amount = 0.0;
        payment.payment_method = " ".to_string();
        assert!(payment.validate().is_err());
    }
}
