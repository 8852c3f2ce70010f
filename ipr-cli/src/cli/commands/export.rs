//! `export` command

use anyhow::Result;
use colored::*;
use sqlx::SqlitePool;

use crate::cli::ExportArgs;
use crate::config::Config;
use crate::config::repository::patents::list_patents;
use crate::excel::{ExportKind, export_to_dir};

pub async fn handle_export_command(
    pool: &SqlitePool,
    config: &Config,
    args: ExportArgs,
) -> Result<()> {
    let patents = list_patents(pool).await?;
    let dir = args.output_dir.unwrap_or_else(|| config.export_dir.clone());

    let path = export_to_dir(ExportKind::Full, &patents, &dir, chrono::Utc::now().date_naive())?;
    println!(
        "Exported {} patent(s) to {}",
        patents.len(),
        path.display().to_string().bright_green()
    );
    Ok(())
}
