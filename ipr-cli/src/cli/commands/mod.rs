//! Command handlers

pub mod config;
pub mod edit;
pub mod export;
pub mod import;
pub mod list;
pub mod payments;
pub mod renewals;
pub mod show;
pub mod stats;

use anyhow::Result;
use sqlx::SqlitePool;

use crate::config::repository::patents::find_by_application_number;
use crate::patents::Patent;

/// Look up a patent by application number or fail with a readable message
pub(crate) async fn require_patent(pool: &SqlitePool, application_number: &str) -> Result<Patent> {
    let application_number = application_number.trim();
    match find_by_application_number(pool, application_number).await? {
        Some(patent) => Ok(patent),
        None => anyhow::bail!("No patent with application number '{}'", application_number),
    }
}
