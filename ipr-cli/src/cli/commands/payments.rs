//! `payments` subcommands

use anyhow::{Context, Result, bail};
use colored::*;
use dialoguer::Confirm;
use sqlx::SqlitePool;

use super::require_patent;
use crate::cli::PaymentCommands;
use crate::config::repository::payments::{
    add_payment, delete_payment, get_payment, list_payments, update_payment,
};
use crate::patents::NewPayment;

pub async fn handle_payments_command(pool: &SqlitePool, command: PaymentCommands) -> Result<()> {
    match command {
        PaymentCommands::List { application_number } => {
            let patent = require_patent(pool, &application_number).await?;
            let payments = list_payments(pool, patent.id).await?;

            if payments.is_empty() {
                println!("No payments recorded for {}", patent.record.application_number);
                return Ok(());
            }

            let total: f64 = payments.iter().map(|p| p.amount).sum();
            println!(
                "{}  {:<10}  {:>10}  {:<14}  {}",
                "ID".bold(),
                "Date".bold(),
                "Amount".bold(),
                "Method".bold(),
                "Notes".bold()
            );
            for p in &payments {
                println!(
                    "{:<2}  {:<10}  {:>10.2}  {:<14}  {}",
                    p.id, p.payment_date, p.amount, p.payment_method, p.notes
                );
            }
            println!("{}", format!("Total: {:.2}", total).dimmed());
        }
        PaymentCommands::Add {
            application_number,
            date,
            amount,
            method,
            notes,
        } => {
            let patent = require_patent(pool, &application_number).await?;
            let payment = NewPayment {
                payment_date: date,
                amount,
                payment_method: method,
                notes,
            };
            let id = add_payment(pool, patent.id, &payment).await?;
            println!(
                "{} Recorded payment #{} for {}",
                "✓".green().bold(),
                id,
                patent.record.application_number.bold()
            );
        }
        PaymentCommands::Update {
            id,
            date,
            amount,
            method,
            notes,
        } => {
            let Some(existing) = get_payment(pool, id).await? else {
                bail!("No payment with id {}", id);
            };
            let payment = NewPayment {
                payment_date: date.unwrap_or(existing.payment_date),
                amount: amount.unwrap_or(existing.amount),
                payment_method: method.unwrap_or(existing.payment_method),
                notes: notes.unwrap_or(existing.notes),
            };
            if !update_payment(pool, id, &payment).await? {
                bail!("No payment with id {}", id);
            }
            println!("{} Updated payment #{}", "✓".green().bold(), id);
        }
        PaymentCommands::Delete { id, yes } => {
            let Some(existing) = get_payment(pool, id).await? else {
                bail!("No payment with id {}", id);
            };

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!(
                        "Delete payment #{} of {:.2} on {}?",
                        id, existing.amount, existing.payment_date
                    ))
                    .default(false)
                    .interact()
                    .context("Failed to read confirmation")?;
                if !confirmed {
                    println!("Cancelled");
                    return Ok(());
                }
            }

            if !delete_payment(pool, id).await? {
                bail!("Payment #{} was already removed", id);
            }
            println!("{} Deleted payment #{}", "✓".green().bold(), id);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::repository::connect_in_memory;
    use crate::config::repository::patents::insert_patent;
    use crate::patents::PatentRecord;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_delete_payment_twice_fails() {
        let pool = connect_in_memory().await;
        let mut record = PatentRecord::new("IN001");
        record.title = "Solar Dryer".to_string();
        let patent_id = insert_patent(&pool, &record).await.unwrap();

        let payment = NewPayment {
            payment_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            amount: 4000.0,
            payment_method: "NEFT".to_string(),
            notes: String::new(),
        };
        let id = add_payment(&pool, patent_id, &payment).await.unwrap();

        let delete = || PaymentCommands::Delete { id, yes: true };
        handle_payments_command(&pool, delete()).await.unwrap();
        assert!(get_payment(&pool, id).await.unwrap().is_none());

        let err = handle_payments_command(&pool, delete()).await.unwrap_err();
        assert!(err.to_string().contains(&format!("No payment with id {}", id)));
    }
}
