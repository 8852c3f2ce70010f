//! Patent workbook export
//!
//! Two layouts share one writer: the full export carries every stored
//! field, the list export only the columns shown in list views.

mod columns;
mod writer;

pub use columns::{ExportCell, LIST_COLUMNS};

use columns::FULL_COLUMNS;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::patents::Patent;

const FILE_PREFIX: &str = "KLE-IPR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Full,
    List,
}

/// `KLE-IPR_full_export_<date>.xlsx` or `KLE-IPR_export_<date>.xlsx`
fn export_filename(kind: ExportKind, date: NaiveDate) -> String {
    let stem = match kind {
        ExportKind::Full => "full_export",
        ExportKind::List => "export",
    };
    format!("{}_{}_{}.xlsx", FILE_PREFIX, stem, date.format("%Y-%m-%d"))
}

/// Write every stored field
fn write_full_export(patents: &[Patent], path: &Path) -> Result<()> {
    writer::write_export(patents, &FULL_COLUMNS, path)
}

/// Write the list columns only
fn write_list_export(patents: &[Patent], path: &Path) -> Result<()> {
    writer::write_export(patents, &LIST_COLUMNS, path)
}

/// Export into `dir` under the dated filename, returning the written path
pub fn export_to_dir(
    kind: ExportKind,
    patents: &[Patent],
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let path = dir.join(export_filename(kind, date));
    match kind {
        ExportKind::Full => write_full_export(patents, &path)?,
        ExportKind::List => write_list_export(patents, &path)?,
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::writer::{SHEET_NAME, build_workbook};
    use super::*;
    use crate::patents::PatentRecord;
    use calamine::{Data, Reader, Xlsx, open_workbook};
    use std::io::Cursor;

    fn patent(id: i64, app_no: &str) -> Patent {
        let mut record = PatentRecord::new(app_no);
        record.title = format!("Invention {}", id);
        record.filed_date = NaiveDate::from_ymd_opt(2022, 5, 9);
        record.renewal_fee = Some(800.0);
        Patent { id, record }
    }

    fn read_back(bytes: Vec<u8>) -> Vec<Vec<Data>> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
        assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        range.rows().map(|r| r.to_vec()).collect()
    }

    #[test]
    fn test_export_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(
            export_filename(ExportKind::Full, date),
            "KLE-IPR_full_export_2024-01-31.xlsx"
        );
        assert_eq!(export_filename(ExportKind::List, date), "KLE-IPR_export_2024-01-31.xlsx");
    }

    #[test]
    fn test_full_export_headers_and_rows() {
        let patents = vec![patent(1, "IN-1"), patent(2, "IN-2")];
        let mut workbook = build_workbook(&patents, &FULL_COLUMNS).unwrap();
        let rows = read_back(workbook.save_to_buffer().unwrap());

        let headers: Vec<String> = rows[0].iter().map(|c| c.to_string()).collect();
        let expected: Vec<&str> = FULL_COLUMNS.iter().map(|c| c.header()).collect();
        assert_eq!(headers, expected);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][0], Data::String("IN-1".to_string()));
        assert_eq!(rows[1][4], Data::String("2022-05-09".to_string()));
        assert_eq!(rows[1][6], Data::Empty);
        assert_eq!(rows[1][10], Data::Float(800.0));
        assert_eq!(rows[2][1], Data::String("Invention 2".to_string()));
    }

    #[test]
    fn test_list_export_has_twelve_columns() {
        let mut workbook = build_workbook(&[patent(1, "IN-1")], &LIST_COLUMNS).unwrap();
        let rows = read_back(workbook.save_to_buffer().unwrap());

        assert_eq!(rows[0].len(), 12);
        assert_eq!(rows[0][11], Data::String("IP India URL".to_string()));
    }

    #[test]
    fn test_export_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("exports");
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let path = export_to_dir(ExportKind::Full, &[patent(1, "IN-1")], &target, date).unwrap();
        assert_eq!(path, target.join("KLE-IPR_full_export_2024-06-01.xlsx"));

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        assert_eq!(range.height(), 2);
    }
}
