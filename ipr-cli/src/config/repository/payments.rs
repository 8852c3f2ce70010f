//! Renewal payments repository

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::patents::{NewPayment, RenewalPayment};

#[derive(sqlx::FromRow)]
struct PaymentRow {
    id: i64,
    patent_id: i64,
    payment_date: NaiveDate,
    amount: f64,
    payment_method: String,
    notes: String,
    created_at: DateTime<Utc>,
}

impl From<PaymentRow> for RenewalPayment {
    fn from(row: PaymentRow) -> Self {
        RenewalPayment {
            id: row.id,
            patent_id: row.patent_id,
            payment_date: row.payment_date,
            amount: row.amount,
            payment_method: row.payment_method,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

/// Record a payment against a patent, returning the payment id
pub async fn add_payment(pool: &SqlitePool, patent_id: i64, payment: &NewPayment) -> Result<i64> {
    payment.validate()?;

    let result = sqlx::query(
        r#"
        INSERT INTO renewal_payments (patent_id, payment_date, amount, payment_method, notes, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(patent_id)
    .bind(payment.payment_date)
    .bind(payment.amount)
    .bind(payment.payment_method.trim())
    .bind(payment.notes.trim())
    .bind(Utc::now())
    .execute(pool)
    .await
    .context("Failed to add renewal payment")?;

    Ok(result.last_insert_rowid())
}

/// Replace a payment's fields. Returns false if the id is unknown.
pub async fn update_payment(pool: &SqlitePool, id: i64, payment: &NewPayment) -> Result<bool> {
    payment.validate()?;

    let result = sqlx::query(
        r#"
        UPDATE renewal_payments
        SET payment_date = ?, amount = ?, payment_method = ?, notes = ?
        WHERE id = ?
        "#,
    )
    .bind(payment.payment_date)
    .bind(payment.amount)
    .bind(payment.payment_method.trim())
    .bind(payment.notes.trim())
    .bind(id)
    .execute(pool)
    .await
    .context("Failed to update renewal payment")?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_payment(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM renewal_payments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete renewal payment")?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_payment(pool: &SqlitePool, id: i64) -> Result<Option<RenewalPayment>> {
    let row: Option<PaymentRow> = sqlx::query_as(
        "SELECT id, patent_id, payment_date, amount, payment_method, notes, created_at
         FROM renewal_payments WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get renewal payment")?;

    Ok(row.map(RenewalPayment::from))
}

/// Payments for one patent, oldest payment date first
pub async fn list_payments(pool: &SqlitePool, patent_id: i64) -> Result<Vec<RenewalPayment>> {
    let rows: Vec<PaymentRow> = sqlx::query_as(
        "SELECT id, patent_id, payment_date, amount, payment_method, notes, created_at
         FROM renewal_payments
         WHERE patent_id = ?
         ORDER BY payment_date, id",
    )
    .bind(patent_id)
    .fetch_all(pool)
    .await
    .context("Failed to list renewal payments")?;

    Ok(rows.into_iter().map(RenewalPayment::from).collect())
}

pub async fn count_payments(pool: &SqlitePool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM renewal_payments")
        .fetch_one(pool)
        .await
        .context("Failed to count renewal payments")?;

    Ok(count)
}
