//! `edit` and `delete` commands

use anyhow::{Context, Result, bail};
use colored::*;
use dialoguer::Confirm;
use sqlx::SqlitePool;

use super::require_patent;
use crate::cli::EditArgs;
use crate::config::repository::PatentStore;
use crate::config::repository::patents::{get_patent, update_patent};
use crate::config::repository::payments::list_payments;
use crate::patents::PatentEdit;

pub async fn handle_edit_command(pool: &SqlitePool, args: EditArgs) -> Result<()> {
    let patent = require_patent(pool, &args.application_number).await?;

    let edit = PatentEdit::from(args);
    if edit.is_empty() {
        bail!("Nothing to change: pass at least one field flag (see `ipr edit --help`)");
    }

    let updated = edit.apply(&patent.record)?;
    if !update_patent(pool, patent.id, &updated).await? {
        bail!("Patent {} was removed while editing", patent.record.application_number);
    }

    log::info!("Edited patent {} ({})", patent.id, updated.application_number);

    let stored = get_patent(pool, patent.id)
        .await?
        .with_context(|| format!("Patent {} vanished after update", patent.id))?;
    println!(
        "{} Updated {} (status {}, renewal due {})",
        "✓".green().bold(),
        stored.record.application_number.bold(),
        stored.record.status,
        stored
            .record
            .renewal_due_date
            .map(|d| d.to_string())
            .unwrap_or_default()
    );
    Ok(())
}

pub async fn handle_delete_command(
    pool: &SqlitePool,
    application_number: &str,
    yes: bool,
) -> Result<()> {
    let patent = require_patent(pool, application_number).await?;
    let payments = list_payments(pool, patent.id).await?;

    if !yes {
        let prompt = format!(
            "Delete {} \"{}\" and its {} payment(s)?",
            patent.record.application_number,
            patent.record.title,
            payments.len()
        );
        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            println!("Cancelled");
            return Ok(());
        }
    }

    if !PatentStore::delete(pool, patent.id).await? {
        bail!("Patent {} was already removed", patent.record.application_number);
    }

    log::info!("Deleted patent {} ({})", patent.id, patent.record.application_number);
    println!(
        "{} Deleted {}",
        "✓".green().bold(),
        patent.record.application_number.bold()
    );
    Ok(())
}
