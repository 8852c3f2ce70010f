//! `renewals` command

use anyhow::{Result, bail};
use chrono::NaiveDate;
use colored::*;
use sqlx::SqlitePool;

use crate::cli::RenewalsArgs;
use crate::config::Config;
use crate::config::repository::patents::list_patents;
use crate::excel::{ExportKind, export_to_dir};
use crate::patents::{Patent, due_within, render_renewal_table};

pub async fn handle_renewals_command(
    pool: &SqlitePool,
    config: &Config,
    args: RenewalsArgs,
    today: NaiveDate,
) -> Result<()> {
    if args.days <= 0 {
        bail!("--days must be positive, got {}", args.days);
    }

    let patents = list_patents(pool).await?;
    let mut due = due_within(&patents, today, args.days);
    due.sort_by_key(|p| p.record.renewal_due_date);

    if due.is_empty() {
        println!("No renewals due in the next {} days", args.days);
        return Ok(());
    }

    println!(
        "{}",
        format!("{} renewal(s) due in the next {} days", due.len(), args.days).bold()
    );
    println!();
    println!("{}", render_renewal_table(&due));

    if args.xlsx {
        let owned: Vec<Patent> = due.into_iter().cloned().collect();
        let path = export_to_dir(
            ExportKind::List,
            &owned,
            &config.export_dir,
            chrono::Utc::now().date_naive(),
        )?;
        println!();
        println!("Exported to {}", path.display().to_string().bright_green());
    }

    Ok(())
}
