//! PostgreSQL persistence layer
//!
//! Plain sqlx queries grouped by table. Mutating functions take a
//! `&mut PgConnection` so a handler can compose them with the audit append
//! inside one transaction; read-only listings take the pool directly.

pub mod audit;
pub mod invoices;
pub mod users;

use shared::error::{AppError, ErrorCode};

/// Map a sqlx error to the client-facing error taxonomy
///
/// Pool timeouts and connection-level failures surface as 503 so clients can
/// retry; everything else is an opaque database error with the detail logged
/// server-side only.
pub fn storage_error(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::PoolTimedOut => AppError::storage_unavailable(),
        sqlx::Error::Io(_) => AppError::storage_unavailable(),
        e => {
            tracing::error!(error = %e, "database error");
            AppError::new(ErrorCode::DatabaseError)
        }
    }
}

/// Whether the error is a unique-constraint violation
///
/// Used to turn the `invoices.invoice_number` constraint into a 409: the
/// constraint, not an application-level pre-check, is what closes the race
/// between concurrent creates.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
