//! Invoice search endpoint (any authenticated user)

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::AuditAction;
use shared::error::{AppError, ErrorCode};

use crate::auth::{CurrentUser, Operation, policy};
use crate::db;
use crate::db::invoices::Invoice;
use crate::state::AppState;

use super::ApiResult;

#[derive(Serialize)]
pub struct SearchResponse {
    pub invoice: Invoice,
}

/// GET /api/invoice/{invoice_number}
///
/// Every search leaves exactly one SEARCH audit entry under the searched
/// number, hit or miss. The entry commits with the lookup in one
/// transaction, so the audit trail is durable before the client sees any
/// response.
pub async fn search(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(invoice_number): Path<String>,
) -> ApiResult<SearchResponse> {
    policy::authorize(user.role, Operation::SearchInvoice)?;

    let mut tx = state.pool.begin().await.map_err(db::storage_error)?;

    db::audit::append(
        &mut *tx,
        Some(user.id),
        Some(&invoice_number),
        AuditAction::Search,
    )
    .await
    .map_err(db::storage_error)?;

    let invoice = db::invoices::find_by_number(&mut *tx, &invoice_number)
        .await
        .map_err(db::storage_error)?;

    tx.commit().await.map_err(db::storage_error)?;

    let invoice = invoice.ok_or_else(|| {
        AppError::not_found(
            ErrorCode::InvoiceNotFound,
            "No verified bank account information found for this invoice number",
        )
    })?;

    Ok(Json(SearchResponse { invoice }))
}
