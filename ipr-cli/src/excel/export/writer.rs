//! Write patents to an Excel workbook

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};

use super::columns::{ExportCell, ExportColumn};
use crate::patents::Patent;

pub const SHEET_NAME: &str = "Patents";

/// Build a single-sheet workbook with a bold header row
pub fn build_workbook(patents: &[Patent], columns: &[ExportColumn]) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (col, column) in columns.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, column.header(), &header_format)?;
        sheet.set_column_width(col, column.width())?;
    }
    sheet.set_freeze_panes(1, 0)?;

    for (idx, patent) in patents.iter().enumerate() {
        let row = (idx + 1) as u32;
        for (col, column) in columns.iter().enumerate() {
            let col = col as u16;
            match column.cell(patent) {
                ExportCell::Blank => {}
                ExportCell::Text(s) => {
                    sheet.write_string(row, col, &s)?;
                }
                ExportCell::Number(n) => {
                    sheet.write_number(row, col, n)?;
                }
            }
        }
    }

    Ok(workbook)
}

/// Save patents with the given columns to `path`
pub fn write_export(patents: &[Patent], columns: &[ExportColumn], path: &Path) -> Result<()> {
    log::info!("Writing {} patents to {}", patents.len(), path.display());

    let mut workbook = build_workbook(patents, columns)?;
    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file to {}", path.display()))?;

    Ok(())
}
