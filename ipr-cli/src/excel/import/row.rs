//! Conversion of one register row into a patent record

use calamine::Data;
use chrono::{DateTime, Utc};

use super::cells::{cell_opt_text, cell_text, cell_value, cell_value_at};
use super::columns::{ColumnMap, SheetField};
use super::dates::normalize_date;
use crate::patents::{DEFAULT_STATUS, PatentRecord, RawMetadata};

/// Column holding the register's serial number
const SERIAL_NUMBER_COLUMN: usize = 0;
/// Column holding the provisional application marker
const PROVISIONAL_COLUMN: usize = 1;

/// Build a record from a data row, `None` when the application number is blank
///
/// `link` is the hyperlink attached to the application-number cell.
pub fn extract_record(
    row: &[Data],
    columns: &ColumnMap,
    link: Option<&str>,
    now: DateTime<Utc>,
) -> Option<PatentRecord> {
    let text = |field: SheetField| cell_text(row, columns.column(field));
    let date = |field: SheetField| {
        row.get(columns.column(field)).and_then(normalize_date)
    };

    let application_number = text(SheetField::ApplicationNumber);
    if application_number.is_empty() {
        return None;
    }

    let mut inventors = text(SheetField::MainInventor);
    let other_inventors = text(SheetField::OtherInventors);
    if !other_inventors.is_empty() {
        inventors.push_str(", ");
        inventors.push_str(&other_inventors);
    }

    let status = match text(SheetField::Status) {
        s if s.is_empty() => DEFAULT_STATUS.to_string(),
        s => s,
    };

    let raw_metadata = RawMetadata {
        serial_number: cell_value_at(row, SERIAL_NUMBER_COLUMN),
        provisional: cell_value_at(row, PROVISIONAL_COLUMN),
        remarks: cell_value_at(row, columns.column(SheetField::Remarks)),
        ip_agent: cell_value_at(row, columns.column(SheetField::IpAgent)),
        details: cell_value_at(row, columns.column(SheetField::Details)),
        full_row: row.iter().map(cell_value).collect(),
    };

    Some(PatentRecord {
        title: text(SheetField::Title),
        inventors,
        applicants: text(SheetField::Applicants),
        filed_date: date(SheetField::FiledDate),
        published_date: date(SheetField::PublishedDate),
        granted_date: date(SheetField::GrantDate),
        status,
        renewal_due_date: date(SheetField::RenewalDueDate),
        google_drive_link: link
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string),
        patent_number: cell_opt_text(row, columns.column(SheetField::PatentNumber)),
        patent_certificate: cell_opt_text(row, columns.column(SheetField::PatentCertificate)),
        raw_metadata,
        created_at: now,
        updated_at: now,
        // Fee, last check and the status URL keep their defaults
        ..PatentRecord::new(application_number)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patents::{CellValue, IPINDIA_PUBLIC_SEARCH_URL};
    use chrono::NaiveDate;

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    /// A row laid out at the fallback positions
    fn register_row() -> Vec<Data> {
        let mut row = vec![Data::Empty; 17];
        row[0] = Data::Float(1.0);
        row[1] = s("No");
        row[2] = s(" 202011012345 ");
        row[3] = Data::Float(43905.0);
        row[4] = s("Published");
        row[5] = s("2021-01-15");
        row[6] = s("IN123456");
        row[9] = s("15/13/2024");
        row[10] = s("Smart Irrigation Controller");
        row[11] = s("Controls valves from soil data");
        row[12] = s("KLE Technological University");
        row[13] = s("Dr. A. Rao");
        row[14] = s("  B. Patil ");
        row[15] = s("Agent & Co");
        row[16] = s("Follow up");
        row
    }

    #[test]
    fn test_extract_full_row() {
        let now = Utc::now();
        let record = extract_record(
            &register_row(),
            &ColumnMap::default(),
            Some("https://drive.example/doc1"),
            now,
        )
        .unwrap();

        assert_eq!(record.application_number, "202011012345");
        assert_eq!(record.title, "Smart Irrigation Controller");
        assert_eq!(record.inventors, "Dr. A. Rao, B. Patil");
        assert_eq!(record.applicants, "KLE Technological University");
        assert_eq!(record.filed_date, NaiveDate::from_ymd_opt(2020, 3, 15));
        assert_eq!(record.published_date, NaiveDate::from_ymd_opt(2021, 1, 15));
        assert_eq!(record.granted_date, None);
        assert_eq!(record.renewal_due_date, None);
        assert_eq!(record.status, "Published");
        assert_eq!(record.patent_number.as_deref(), Some("IN123456"));
        assert_eq!(record.patent_certificate, None);
        assert_eq!(record.google_drive_link.as_deref(), Some("https://drive.example/doc1"));
        assert_eq!(record.ipindia_status_url.as_deref(), Some(IPINDIA_PUBLIC_SEARCH_URL));
        assert_eq!(record.created_at, now);
        assert_eq!(record.updated_at, now);

        let meta = &record.raw_metadata;
        assert_eq!(meta.serial_number, Some(CellValue::Float(1.0)));
        assert_eq!(meta.provisional, Some(CellValue::Text("No".to_string())));
        assert_eq!(meta.ip_agent, Some(CellValue::Text("Agent & Co".to_string())));
        assert_eq!(meta.remarks, Some(CellValue::Text("Follow up".to_string())));
        assert!(meta.details.is_some());
        assert_eq!(meta.full_row.len(), 17);
        assert_eq!(meta.full_row[7], CellValue::Empty);
    }

    #[test]
    fn test_blank_application_number_is_skipped() {
        let mut row = register_row();
        row[2] = s("   ");
        assert!(extract_record(&row, &ColumnMap::default(), None, Utc::now()).is_none());
    }

    #[test]
    fn test_defaults_for_sparse_row() {
        let row = vec![Data::Empty, Data::Empty, s("IN-7")];
        let record = extract_record(&row, &ColumnMap::default(), None, Utc::now()).unwrap();

        assert_eq!(record.status, DEFAULT_STATUS);
        assert_eq!(record.title, "");
        assert_eq!(record.inventors, "");
        assert_eq!(record.google_drive_link, None);
        assert_eq!(record.raw_metadata.full_row.len(), 3);
    }

    #[test]
    fn test_other_inventors_without_main() {
        let mut row = register_row();
        row[13] = Data::Empty;
        let record = extract_record(&row, &ColumnMap::default(), None, Utc::now()).unwrap();
        assert_eq!(record.inventors, ", B. Patil");
    }
}
