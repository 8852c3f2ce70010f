//! `stats` command

use anyhow::Result;
use chrono::NaiveDate;
use colored::*;
use sqlx::SqlitePool;

use crate::cli::output::{pad, truncate};
use crate::config::repository::payments::count_payments;
use crate::config::repository::patents::list_patents;
use crate::patents::PortfolioStats;
use crate::patents::filter::distinct_statuses;
use crate::patents::stats::{RECENT_LIMIT, recent_patents};

pub async fn handle_stats_command(pool: &SqlitePool, today: NaiveDate) -> Result<()> {
    let patents = list_patents(pool).await?;
    let stats = PortfolioStats::compute(&patents, today);

    println!("{}", "Portfolio".bold());
    println!("  Total patents:       {}", stats.total.to_string().bold());
    println!("  Granted:             {}", stats.granted.to_string().green());
    println!("  Under examination:   {}", stats.under_examination.to_string().blue());
    println!("  Abandoned:           {}", stats.abandoned.to_string().red());
    println!("  Payments recorded:   {}", count_payments(pool).await?);
    println!();
    println!("{}", "Renewals due".bold());
    println!("  Within 30 days:      {}", stats.due_30.to_string().red().bold());
    println!("  31 to 60 days:       {}", stats.due_60.to_string().yellow());
    println!("  61 to 90 days:       {}", stats.due_90);

    let statuses = distinct_statuses(&patents);
    if !statuses.is_empty() {
        println!();
        println!("{} {}", "Statuses:".bold(), statuses.join(", "));
    }

    let recent = recent_patents(&patents, RECENT_LIMIT);
    if !recent.is_empty() {
        println!();
        println!("{}", "Recently updated".bold());
        for p in recent {
            println!(
                "  {}  {}  {}",
                pad(&p.record.application_number, 16),
                pad(&truncate(&p.record.title, 48), 48),
                p.record.updated_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
            );
        }
    }

    Ok(())
}
