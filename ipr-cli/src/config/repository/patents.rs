//! Patent table repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteArguments;
use sqlx::types::Json;
use sqlx::{Sqlite, SqlitePool};

use crate::patents::{Patent, PatentRecord, RawMetadata};

/// Table store the importer reconciles against.
///
/// Lookups are by natural key; writes address rows by generated id and
/// always replace the full field set.
#[async_trait]
pub trait PatentStore: Send + Sync {
    async fn find_by_application_number(&self, application_number: &str)
    -> Result<Option<Patent>>;

    /// Insert a record, returning its generated id
    async fn insert(&self, record: &PatentRecord) -> Result<i64>;

    /// Replace every field of the record with the given id
    async fn update(&self, id: i64, record: &PatentRecord) -> Result<()>;

    /// Delete by id, returning whether a row was removed
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[async_trait]
impl PatentStore for SqlitePool {
    async fn find_by_application_number(
        &self,
        application_number: &str,
    ) -> Result<Option<Patent>> {
        find_by_application_number(self, application_number).await
    }

    async fn insert(&self, record: &PatentRecord) -> Result<i64> {
        insert_patent(self, record).await
    }

    async fn update(&self, id: i64, record: &PatentRecord) -> Result<()> {
        if !update_patent(self, id, record).await? {
            anyhow::bail!("Patent {} no longer exists", id);
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        delete_patent(self, id).await
    }
}

#[derive(sqlx::FromRow)]
struct PatentRow {
    id: i64,
    application_number: String,
    title: String,
    inventors: String,
    applicants: String,
    filed_date: Option<NaiveDate>,
    published_date: Option<NaiveDate>,
    granted_date: Option<NaiveDate>,
    status: String,
    renewal_due_date: Option<NaiveDate>,
    renewal_fee: Option<f64>,
    last_checked: Option<DateTime<Utc>>,
    ipindia_status_url: Option<String>,
    google_drive_link: Option<String>,
    patent_number: Option<String>,
    patent_certificate: Option<String>,
    raw_metadata: Json<RawMetadata>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PatentRow> for Patent {
    fn from(row: PatentRow) -> Self {
        Patent {
            id: row.id,
            record: PatentRecord {
                application_number: row.application_number,
                title: row.title,
                inventors: row.inventors,
                applicants: row.applicants,
                filed_date: row.filed_date,
                published_date: row.published_date,
                granted_date: row.granted_date,
                status: row.status,
                renewal_due_date: row.renewal_due_date,
                renewal_fee: row.renewal_fee,
                last_checked: row.last_checked,
                ipindia_status_url: row.ipindia_status_url,
                google_drive_link: row.google_drive_link,
                patent_number: row.patent_number,
                patent_certificate: row.patent_certificate,
                raw_metadata: row.raw_metadata.0,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

const SELECT_PATENT: &str = r#"
    SELECT id, application_number, title, inventors, applicants,
           filed_date, published_date, granted_date, status, renewal_due_date,
           renewal_fee, last_checked, ipindia_status_url, google_drive_link,
           patent_number, patent_certificate, raw_metadata, created_at, updated_at
    FROM patents
"#;

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// Bind the full field set in column order (application_number .. updated_at)
fn bind_record<'q>(
    query: SqliteQuery<'q>,
    record: &'q PatentRecord,
    raw_metadata: String,
) -> SqliteQuery<'q> {
    query
        .bind(&record.application_number)
        .bind(&record.title)
        .bind(&record.inventors)
        .bind(&record.applicants)
        .bind(record.filed_date)
        .bind(record.published_date)
        .bind(record.granted_date)
        .bind(&record.status)
        .bind(record.renewal_due_date)
        .bind(record.renewal_fee)
        .bind(record.last_checked)
        .bind(record.ipindia_status_url.as_deref())
        .bind(record.google_drive_link.as_deref())
        .bind(record.patent_number.as_deref())
        .bind(record.patent_certificate.as_deref())
        .bind(raw_metadata)
        .bind(record.created_at)
        .bind(record.updated_at)
}

fn metadata_json(record: &PatentRecord) -> Result<String> {
    serde_json::to_string(&record.raw_metadata).context("Failed to serialize raw metadata")
}

/// Insert a new patent, returning its id
pub async fn insert_patent(pool: &SqlitePool, record: &PatentRecord) -> Result<i64> {
    let query = sqlx::query(
        r#"
        INSERT INTO patents (
            application_number, title, inventors, applicants,
            filed_date, published_date, granted_date, status, renewal_due_date,
            renewal_fee, last_checked, ipindia_status_url, google_drive_link,
            patent_number, patent_certificate, raw_metadata, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    );

    let result = bind_record(query, record, metadata_json(record)?)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to insert patent {}", record.application_number))?;

    Ok(result.last_insert_rowid())
}

/// Overwrite every field of a patent. Returns false if the id is unknown.
pub async fn update_patent(pool: &SqlitePool, id: i64, record: &PatentRecord) -> Result<bool> {
    let query = sqlx::query(
        r#"
        UPDATE patents
        SET application_number = ?, title = ?, inventors = ?, applicants = ?,
            filed_date = ?, published_date = ?, granted_date = ?, status = ?,
            renewal_due_date = ?, renewal_fee = ?, last_checked = ?,
            ipindia_status_url = ?, google_drive_link = ?, patent_number = ?,
            patent_certificate = ?, raw_metadata = ?, created_at = ?, updated_at = ?
        WHERE id = ?
        "#,
    );

    let result = bind_record(query, record, metadata_json(record)?)
        .bind(id)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to update patent {}", record.application_number))?;

    Ok(result.rows_affected() > 0)
}

/// Delete a patent (its payments cascade). Returns false if the id is unknown.
pub async fn delete_patent(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM patents WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete patent")?;

    Ok(result.rows_affected() > 0)
}

/// Look up a patent by exact application number
pub async fn find_by_application_number(
    pool: &SqlitePool,
    application_number: &str,
) -> Result<Option<Patent>> {
    let row: Option<PatentRow> =
        sqlx::query_as(&format!("{} WHERE application_number = ?", SELECT_PATENT))
            .bind(application_number)
            .fetch_optional(pool)
            .await
            .with_context(|| format!("Failed to look up patent {}", application_number))?;

    Ok(row.map(Patent::from))
}

pub async fn get_patent(pool: &SqlitePool, id: i64) -> Result<Option<Patent>> {
    let row: Option<PatentRow> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_PATENT))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get patent")?;

    Ok(row.map(Patent::from))
}

/// All patents in insertion order
pub async fn list_patents(pool: &SqlitePool) -> Result<Vec<Patent>> {
    let rows: Vec<PatentRow> = sqlx::query_as(&format!("{} ORDER BY id", SELECT_PATENT))
        .fetch_all(pool)
        .await
        .context("Failed to list patents")?;

    Ok(rows.into_iter().map(Patent::from).collect())
}

pub async fn count_patents(pool: &SqlitePool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM patents")
        .fetch_one(pool)
        .await
        .context("Failed to count patents")?;

    Ok(count)
}
