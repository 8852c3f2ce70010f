//! Patent register import
//!
//! Reads the first sheet of a workbook (row 1 banner, row 2 headers, data
//! from row 3) and reconciles every data row against the patent store by
//! application number. Rows are independent: a failing row is reported as
//! `Row <n>: <message>` and the batch carries on.

mod cells;
mod columns;
mod dates;
mod hyperlinks;
mod row;
mod sheet;

use columns::{ColumnMap, SheetField};
use sheet::read_first_sheet;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::config::repository::PatentStore;
use crate::patents::PatentRecord;

/// Physical index of the header row
const HEADER_ROW: usize = 1;
/// Physical index of the first data row
const FIRST_DATA_ROW: usize = 2;

/// Failures that abort an import before any row is touched
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Unable to read workbook: {0}")]
    Unreadable(String),

    #[error("Workbook contains no sheets")]
    NoSheets,

    #[error("No data found in Excel file")]
    NoData,

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of an import batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportResult {
    /// False only when the batch could not run at all
    pub success: bool,
    /// Rows created or updated
    pub imported: usize,
    /// Fatal message, or one `Row <n>: ...` entry per failed row
    pub errors: Vec<String>,
}

impl ImportResult {
    pub fn fatal(error: ImportError) -> Self {
        log::error!("Import aborted: {}", error);
        Self {
            success: false,
            imported: 0,
            errors: vec![error.to_string()],
        }
    }
}

/// How a row was reconciled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted(i64),
    Updated(i64),
}

/// Import workbook bytes into the store
pub async fn import_workbook<S>(store: &S, bytes: &[u8]) -> ImportResult
where
    S: PatentStore + ?Sized,
{
    let grid = match read_first_sheet(bytes) {
        Ok(grid) => grid,
        Err(e) => return ImportResult::fatal(e),
    };

    if grid.rows.len() <= FIRST_DATA_ROW {
        return ImportResult::fatal(ImportError::NoData);
    }

    let columns = ColumnMap::resolve(&grid.rows[HEADER_ROW]);
    let app_col = columns.column(SheetField::ApplicationNumber);

    log::info!(
        "Importing {} data rows from sheet '{}'",
        grid.rows.len() - FIRST_DATA_ROW,
        grid.name
    );

    let mut result = ImportResult {
        success: true,
        ..Default::default()
    };
    let (mut created, mut updated, mut skipped) = (0usize, 0usize, 0usize);

    for (index, cells) in grid.rows.iter().enumerate().skip(FIRST_DATA_ROW) {
        let sheet_row = index + 1;
        let link = grid.hyperlink(index, app_col);

        let Some(record) = row::extract_record(cells, &columns, link, Utc::now()) else {
            skipped += 1;
            continue;
        };

        match upsert(store, &record).await {
            Ok(UpsertOutcome::Inserted(id)) => {
                log::debug!("Row {}: created patent {} ({})", sheet_row, id, record.application_number);
                created += 1;
                result.imported += 1;
            }
            Ok(UpsertOutcome::Updated(id)) => {
                log::debug!("Row {}: updated patent {} ({})", sheet_row, id, record.application_number);
                updated += 1;
                result.imported += 1;
            }
            Err(e) => {
                log::warn!("Row {}: {:#}", sheet_row, e);
                result.errors.push(format!("Row {}: {:#}", sheet_row, e));
            }
        }
    }

    log::info!(
        "Import finished: {} created, {} updated, {} blank, {} failed",
        created,
        updated,
        skipped,
        result.errors.len()
    );

    result
}

/// Create the record, or overwrite the existing one with the same application number
pub async fn upsert<S>(store: &S, record: &PatentRecord) -> Result<UpsertOutcome>
where
    S: PatentStore + ?Sized,
{
    let existing = store
        .find_by_application_number(&record.application_number)
        .await
        .with_context(|| format!("Failed to look up '{}'", record.application_number))?;

    match existing {
        Some(patent) => {
            store
                .update(patent.id, record)
                .await
                .with_context(|| format!("Failed to update '{}'", record.application_number))?;
            Ok(UpsertOutcome::Updated(patent.id))
        }
        None => {
            let id = store
                .insert(record)
                .await
                .with_context(|| format!("Failed to insert '{}'", record.application_number))?;
            Ok(UpsertOutcome::Inserted(id))
        }
    }
}

/// Import a workbook file
pub async fn import_file<S>(store: &S, path: &Path) -> ImportResult
where
    S: PatentStore + ?Sized,
{
    log::info!("Reading workbook {}", path.display());
    match tokio::fs::read(path).await {
        Ok(bytes) => import_workbook(store, &bytes).await,
        Err(source) => ImportResult::fatal(ImportError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Import the configured bundled workbook
pub async fn import_default<S>(store: &S, config: &Config) -> ImportResult
where
    S: PatentStore + ?Sized,
{
    import_file(store, &config.default_workbook).await
}
