//! `show` command

use anyhow::Result;
use chrono::NaiveDate;
use colored::*;
use sqlx::SqlitePool;

use super::require_patent;
use crate::cli::output::renewal_label;
use crate::config::repository::payments::list_payments;
use crate::patents::{CellValue, StatusCategory, days_until};

pub async fn handle_show_command(
    pool: &SqlitePool,
    application_number: &str,
    today: NaiveDate,
) -> Result<()> {
    let patent = require_patent(pool, application_number).await?;
    let r = &patent.record;

    let date = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
    let opt = |s: &Option<String>| s.clone().unwrap_or_else(|| "-".to_string());

    println!("{}", r.application_number.bold());
    println!("{}", r.title);
    println!();
    println!("  Status:        {}", StatusCategory::classify(&r.status).paint(&r.status));
    println!("  Inventors:     {}", r.inventors);
    println!("  Applicants:    {}", r.applicants);
    println!("  Filed:         {}", date(r.filed_date));
    println!("  Published:     {}", date(r.published_date));
    println!("  Granted:       {}", date(r.granted_date));
    match r.renewal_due_date {
        Some(due) => println!(
            "  Renewal due:   {} ({} days)",
            renewal_label(Some(due), today, 10),
            days_until(due, today)
        ),
        None => println!("  Renewal due:   -"),
    }
    println!(
        "  Renewal fee:   {}",
        r.renewal_fee.map(|f| format!("{:.2}", f)).unwrap_or_else(|| "-".to_string())
    );
    println!("  Patent no:     {}", opt(&r.patent_number));
    println!("  Certificate:   {}", opt(&r.patent_certificate));
    println!("  Document:      {}", opt(&r.google_drive_link));
    println!("  IP India:      {}", opt(&r.ipindia_status_url));
    println!(
        "  Last checked:  {}",
        r.last_checked.map(|t| t.to_rfc3339()).unwrap_or_else(|| "-".to_string())
    );
    println!("  Updated:       {}", r.updated_at.to_rfc3339().dimmed());

    let payments = list_payments(pool, patent.id).await?;
    println!();
    println!("{} ({})", "Payments".bold(), payments.len());
    for p in &payments {
        println!(
            "  #{:<4} {}  {:>10.2}  {}  {}",
            p.id,
            p.payment_date,
            p.amount,
            p.payment_method,
            p.notes.dimmed()
        );
    }

    let meta = &r.raw_metadata;
    if !meta.full_row.is_empty() {
        let show = |v: &Option<CellValue>| {
            v.as_ref().map(|c| c.to_string()).unwrap_or_else(|| "-".to_string())
        };
        println!();
        println!("{}", "Source row".bold());
        println!("  Serial no:     {}", show(&meta.serial_number));
        println!("  Provisional:   {}", show(&meta.provisional));
        println!("  IP agent:      {}", show(&meta.ip_agent));
        println!("  Remarks:       {}", show(&meta.remarks));
        println!("  Details:       {}", show(&meta.details));
        let cells: Vec<String> = meta.full_row.iter().map(|c| c.to_string()).collect();
        println!("  Raw:           {}", cells.join(" | ").dimmed());
    }

    Ok(())
}
