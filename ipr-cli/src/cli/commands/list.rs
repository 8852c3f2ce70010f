//! `list` command

use std::fs;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::*;
use sqlx::SqlitePool;

use crate::cli::output::{render_csv, render_json, render_table};
use crate::cli::{ListArgs, OutputFormat};
use crate::config::Config;
use crate::config::repository::patents::list_patents;
use crate::excel::{ExportKind, export_to_dir};
use crate::patents::Patent;
use crate::patents::filter::sort_by_filed_desc;

pub async fn handle_list_command(
    pool: &SqlitePool,
    config: &Config,
    args: ListArgs,
    today: NaiveDate,
) -> Result<()> {
    let mut patents = list_patents(pool).await?;
    sort_by_filed_desc(&mut patents);

    let filter = args.filter();
    let matched = filter.apply(&patents, today);
    log::debug!("{} of {} patents match {:?}", matched.len(), patents.len(), filter);

    let rendered = match args.format {
        OutputFormat::Table => render_table(&matched, today),
        OutputFormat::Csv => render_csv(&matched)?,
        OutputFormat::Json => render_json(&matched)?,
    };

    if let Some(path) = &args.output {
        fs::write(path, &rendered)
            .with_context(|| format!("Failed to write output to: {}", path.display()))?;
        println!("Listing saved to: {}", path.display().to_string().bright_green());
    } else {
        print!("{}", rendered);
        if args.format != OutputFormat::Table {
            println!();
        }
    }

    if args.xlsx {
        let owned: Vec<Patent> = matched.into_iter().cloned().collect();
        let utc_today = chrono::Utc::now().date_naive();
        let path = export_to_dir(ExportKind::List, &owned, &config.export_dir, utc_today)?;
        println!("Exported to {}", path.display().to_string().bright_green());
    }

    Ok(())
}
