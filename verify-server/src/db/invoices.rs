//! Invoice registry operations
//!
//! `invoice_number` is the client-facing identity key and is globally unique
//! (enforced by the schema); mutations are keyed by the internal row id.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Invoice joined with the verifying user's name
#[derive(Debug, sqlx::FromRow, serde::Serialize)]
pub struct Invoice {
    pub id: Uuid,
    pub invoice_number: String,
    pub bank_name: String,
    pub account_number: String,
    pub verified_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    /// Null if the verifying user was later removed
    pub verified_by_username: Option<String>,
}

const INVOICE_COLUMNS: &str = "i.id, i.invoice_number, i.bank_name, i.account_number, \
     i.verified_at, i.created_at, u.username AS verified_by_username";

/// Exact-match lookup by invoice number
pub async fn find_by_number(
    conn: &mut PgConnection,
    invoice_number: &str,
) -> Result<Option<Invoice>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {INVOICE_COLUMNS} FROM invoices i \
         LEFT JOIN users u ON i.verified_by = u.id \
         WHERE i.invoice_number = $1"
    ))
    .bind(invoice_number)
    .fetch_optional(conn)
    .await
}

/// Lookup by internal id
pub async fn fetch(conn: &mut PgConnection, id: Uuid) -> Result<Option<Invoice>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {INVOICE_COLUMNS} FROM invoices i \
         LEFT JOIN users u ON i.verified_by = u.id \
         WHERE i.id = $1"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await
}

/// All invoices, newest first
pub async fn list_all(pool: &PgPool) -> Result<Vec<Invoice>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {INVOICE_COLUMNS} FROM invoices i \
         LEFT JOIN users u ON i.verified_by = u.id \
         ORDER BY i.created_at DESC"
    ))
    .fetch_all(pool)
    .await
}

/// Insert a new invoice verified by `actor`, returning its id
///
/// A duplicate invoice_number surfaces as a unique-violation error.
pub async fn insert(
    conn: &mut PgConnection,
    invoice_number: &str,
    bank_name: &str,
    account_number: &str,
    actor: Uuid,
) -> Result<Uuid, sqlx::Error> {
    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO invoices (invoice_number, bank_name, account_number, verified_by) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(invoice_number)
    .bind(bank_name)
    .bind(account_number)
    .bind(actor)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

/// Update an invoice by id, refreshing verification provenance to
/// `actor`/now
///
/// Returns false if the id does not exist. Changing the number to one held
/// by another row surfaces as a unique-violation error; the constraint never
/// fires against the row being updated itself.
pub async fn update(
    conn: &mut PgConnection,
    id: Uuid,
    invoice_number: &str,
    bank_name: &str,
    account_number: &str,
    actor: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE invoices \
         SET invoice_number = $1, bank_name = $2, account_number = $3, \
             verified_by = $4, verified_at = now() \
         WHERE id = $5",
    )
    .bind(invoice_number)
    .bind(bank_name)
    .bind(account_number)
    .bind(actor)
    .bind(id)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Physically delete an invoice by id, returning its number for the audit
/// trail (None if the id does not exist)
pub async fn delete(conn: &mut PgConnection, id: Uuid) -> Result<Option<String>, sqlx::Error> {
    let row: Option<(String,)> =
        sqlx::query_as("DELETE FROM invoices WHERE id = $1 RETURNING invoice_number")
            .bind(id)
            .fetch_optional(conn)
            .await?;
    Ok(row.map(|(number,)| number))
}
