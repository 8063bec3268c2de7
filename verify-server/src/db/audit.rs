//! Audit log operations
//!
//! Append-only: nothing in this service updates or deletes audit rows.

use chrono::{DateTime, Utc};
use shared::AuditAction;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Append an audit log entry
///
/// Runs on the caller's connection so it joins the transaction of the
/// operation being audited: if the append fails, the business write rolls
/// back with it (fail-closed).
pub async fn append(
    conn: &mut PgConnection,
    user_id: Option<Uuid>,
    invoice_number: Option<&str>,
    action: AuditAction,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO audit_logs (user_id, invoice_number, action) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(invoice_number)
        .bind(action.as_str())
        .execute(conn)
        .await?;
    Ok(())
}

/// Audit log entry joined with the acting user's name
#[derive(Debug, sqlx::FromRow, serde::Serialize)]
pub struct AuditEntry {
    pub id: Uuid,
    /// Null for entries without an invoice subject
    pub invoice_number: Option<String>,
    pub action: String,
    pub timestamp: DateTime<Utc>,
    /// Null if the acting user was later removed
    pub username: Option<String>,
}

/// Audit entries, newest first (paginated)
pub async fn query(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<AuditEntry>, sqlx::Error> {
    sqlx::query_as(
        "SELECT al.id, al.invoice_number, al.action, al.timestamp, u.username \
         FROM audit_logs al \
         LEFT JOIN users u ON al.user_id = u.id \
         ORDER BY al.timestamp DESC \
         LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Total number of audit entries
pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM audit_logs")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
