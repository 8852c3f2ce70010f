//! `init` and `import` commands

use anyhow::{Result, bail};
use colored::*;
use sqlx::SqlitePool;

use crate::cli::ImportArgs;
use crate::config::Config;
use crate::config::repository::patents::count_patents;
use crate::excel::{ImportResult, import_default, import_file};

/// Import the default workbook only when no patents are stored yet
///
/// Returns `None` when the database already holds patents.
pub async fn seed_if_empty(pool: &SqlitePool, config: &Config) -> Result<Option<ImportResult>> {
    let existing = count_patents(pool).await?;
    if existing > 0 {
        log::info!("{} patents already tracked, skipping seed import", existing);
        return Ok(None);
    }

    log::info!("Seeding from {}", config.default_workbook.display());
    Ok(Some(import_default(pool, config).await))
}

/// Seed an empty database from the default workbook
pub async fn handle_init_command(pool: &SqlitePool, config: &Config) -> Result<()> {
    println!("Database: {}", config.database_path.display().to_string().cyan());

    let Some(result) = seed_if_empty(pool, config).await? else {
        println!("Patents already tracked, skipping seed import");
        return Ok(());
    };

    println!(
        "Seeded from {}",
        config.default_workbook.display().to_string().cyan()
    );
    report(&result);

    if !result.success {
        bail!("Seed import failed");
    }
    Ok(())
}

pub async fn handle_import_command(
    pool: &SqlitePool,
    config: &Config,
    args: ImportArgs,
) -> Result<()> {
    let result = match args.file {
        Some(path) if !args.default => import_file(pool, &path).await,
        _ => import_default(pool, config).await,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        report(&result);
    }

    if !result.success {
        bail!("Import failed");
    }
    Ok(())
}

fn report(result: &ImportResult) {
    if result.success {
        println!(
            "{} Imported {} patent(s)",
            "✓".green().bold(),
            result.imported.to_string().bold()
        );
    } else {
        println!("{} Import failed", "✗".red().bold());
    }

    for error in &result.errors {
        println!("  {} {}", "!".yellow(), error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::repository::connect_in_memory;
    use crate::config::repository::patents::insert_patent;
    use crate::patents::PatentRecord;
    use chrono::NaiveDate;
    use rust_xlsxwriter::Workbook;
    use std::path::Path;

    fn config_with_workbook(path: &Path) -> Config {
        Config {
            default_workbook: path.to_path_buf(),
            ..Config::default()
        }
    }

    fn write_register(path: &Path) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "KLE Tech IPR Register").unwrap();
        sheet.write_string(1, 2, "Application No").unwrap();
        sheet.write_string(1, 10, "Invention Title").unwrap();
        sheet.write_string(2, 2, "IN-SEED-1").unwrap();
        sheet.write_string(2, 10, "Seeded Invention").unwrap();
        workbook.save(path).unwrap();
    }

    #[tokio::test]
    async fn test_seed_imports_into_empty_database() {
        let dir = tempfile::tempdir().unwrap();
        let workbook = dir.path().join("register.xlsx");
        write_register(&workbook);
        let pool = connect_in_memory().await;

        let result = seed_if_empty(&pool, &config_with_workbook(&workbook))
            .await
            .unwrap()
            .unwrap();
        assert!(result.success);
        assert_eq!(result.imported, 1);
        assert_eq!(count_patents(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_seed_skipped_when_patents_exist() {
        let dir = tempfile::tempdir().unwrap();
        let pool = connect_in_memory().await;

        let mut record = PatentRecord::new("IN-EXISTING");
        record.title = "Already tracked".to_string();
        record.filed_date = NaiveDate::from_ymd_opt(2023, 1, 1);
        insert_patent(&pool, &record).await.unwrap();

        // A missing workbook would yield a failed import if it were read
        let config = config_with_workbook(&dir.path().join("missing.xlsx"));
        let seeded = seed_if_empty(&pool, &config).await.unwrap();

        assert!(seeded.is_none());
        assert_eq!(count_patents(&pool).await.unwrap(), 1);
    }
}
