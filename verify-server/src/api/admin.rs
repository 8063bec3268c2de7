//! Admin endpoints: invoice management and audit log review
//!
//! Every registry mutation and its audit append run in one transaction; if
//! the append fails the business write rolls back with it, so an operation
//! never succeeds without its audit entry.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use shared::AuditAction;
use shared::error::{AppError, ErrorCode};
use uuid::Uuid;

use crate::auth::{CurrentUser, Operation, policy};
use crate::db;
use crate::db::audit::AuditEntry;
use crate::db::invoices::Invoice;
use crate::state::AppState;

use super::ApiResult;

const DEFAULT_AUDIT_LIMIT: i64 = 100;
const MAX_AUDIT_LIMIT: i64 = 500;

#[derive(Deserialize)]
pub struct InvoicePayload {
    pub invoice_number: String,
    pub bank_name: String,
    pub account_number: String,
}

impl InvoicePayload {
    fn validate(&self) -> Result<(), AppError> {
        if self.invoice_number.is_empty()
            || self.bank_name.is_empty()
            || self.account_number.is_empty()
        {
            return Err(AppError::validation(
                "Invoice number, bank name, and account number are required",
            ));
        }
        Ok(())
    }
}

#[derive(Serialize)]
pub struct InvoiceListResponse {
    pub invoices: Vec<Invoice>,
}

#[derive(Serialize)]
pub struct InvoiceMutationResponse {
    pub message: String,
    pub invoice: Invoice,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// GET /api/admin/invoices
pub async fn list_invoices(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<InvoiceListResponse> {
    policy::authorize(user.role, Operation::ListInvoices)?;

    let invoices = db::invoices::list_all(&state.pool)
        .await
        .map_err(db::storage_error)?;

    Ok(Json(InvoiceListResponse { invoices }))
}

/// POST /api/admin/invoice
pub async fn create_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<InvoicePayload>,
) -> Result<(StatusCode, Json<InvoiceMutationResponse>), AppError> {
    policy::authorize(user.role, Operation::CreateInvoice)?;
    payload.validate()?;

    let mut tx = state.pool.begin().await.map_err(db::storage_error)?;

    let id = match db::invoices::insert(
        &mut *tx,
        &payload.invoice_number,
        &payload.bank_name,
        &payload.account_number,
        user.id,
    )
    .await
    {
        Ok(id) => id,
        Err(e) if db::is_unique_violation(&e) => {
            return Err(AppError::new(ErrorCode::InvoiceNumberExists));
        }
        Err(e) => return Err(db::storage_error(e)),
    };

    db::audit::append(
        &mut *tx,
        Some(user.id),
        Some(&payload.invoice_number),
        AuditAction::Create,
    )
    .await
    .map_err(db::storage_error)?;

    let invoice = fetch_in_tx(&mut tx, id).await?;
    tx.commit().await.map_err(db::storage_error)?;

    tracing::info!(invoice_number = %invoice.invoice_number, actor = %user.username, "invoice created");

    Ok((
        StatusCode::CREATED,
        Json(InvoiceMutationResponse {
            message: "Invoice created successfully".into(),
            invoice,
        }),
    ))
}

/// PUT /api/admin/invoice/{id}
///
/// The invoice number itself may change; re-verification provenance
/// (verified_by / verified_at) is refreshed to the acting admin and now.
pub async fn update_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<InvoicePayload>,
) -> ApiResult<InvoiceMutationResponse> {
    policy::authorize(user.role, Operation::UpdateInvoice)?;
    payload.validate()?;

    let mut tx = state.pool.begin().await.map_err(db::storage_error)?;

    let updated = match db::invoices::update(
        &mut *tx,
        id,
        &payload.invoice_number,
        &payload.bank_name,
        &payload.account_number,
        user.id,
    )
    .await
    {
        Ok(updated) => updated,
        Err(e) if db::is_unique_violation(&e) => {
            return Err(AppError::new(ErrorCode::InvoiceNumberExists));
        }
        Err(e) => return Err(db::storage_error(e)),
    };
    if !updated {
        return Err(AppError::new(ErrorCode::InvoiceNotFound));
    }

    db::audit::append(
        &mut *tx,
        Some(user.id),
        Some(&payload.invoice_number),
        AuditAction::Update,
    )
    .await
    .map_err(db::storage_error)?;

    let invoice = fetch_in_tx(&mut tx, id).await?;
    tx.commit().await.map_err(db::storage_error)?;

    tracing::info!(invoice_number = %invoice.invoice_number, actor = %user.username, "invoice updated");

    Ok(Json(InvoiceMutationResponse {
        message: "Invoice updated successfully".into(),
        invoice,
    }))
}

/// DELETE /api/admin/invoice/{id}
///
/// Deletion is physical; the invoice number is captured before removal so
/// the DELETE audit entry survives the row.
pub async fn delete_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<DeleteResponse> {
    policy::authorize(user.role, Operation::DeleteInvoice)?;

    let mut tx = state.pool.begin().await.map_err(db::storage_error)?;

    let invoice_number = db::invoices::delete(&mut *tx, id)
        .await
        .map_err(db::storage_error)?
        .ok_or_else(|| AppError::new(ErrorCode::InvoiceNotFound))?;

    db::audit::append(
        &mut *tx,
        Some(user.id),
        Some(&invoice_number),
        AuditAction::Delete,
    )
    .await
    .map_err(db::storage_error)?;

    tx.commit().await.map_err(db::storage_error)?;

    tracing::info!(%invoice_number, actor = %user.username, "invoice deleted");

    Ok(Json(DeleteResponse {
        message: "Invoice deleted successfully".into(),
    }))
}

#[derive(Deserialize)]
pub struct AuditQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Serialize)]
pub struct AuditLogsResponse {
    pub logs: Vec<AuditEntry>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Clamp the requested page window to sane bounds
fn clamp_page(query: &AuditQuery) -> (i64, i64) {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_AUDIT_LIMIT)
        .clamp(1, MAX_AUDIT_LIMIT);
    let offset = query.offset.unwrap_or(0).max(0);
    (limit, offset)
}

/// GET /api/admin/audit-logs?limit&offset
pub async fn audit_logs(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<AuditQuery>,
) -> ApiResult<AuditLogsResponse> {
    policy::authorize(user.role, Operation::ReadAuditLog)?;

    let (limit, offset) = clamp_page(&query);

    let logs = db::audit::query(&state.pool, limit, offset)
        .await
        .map_err(db::storage_error)?;
    let total = db::audit::count(&state.pool)
        .await
        .map_err(db::storage_error)?;

    Ok(Json(AuditLogsResponse {
        logs,
        total,
        limit,
        offset,
    }))
}

/// Fetch the joined invoice view inside the caller's transaction
async fn fetch_in_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    id: Uuid,
) -> Result<Invoice, AppError> {
    db::invoices::fetch(&mut **tx, id)
        .await
        .map_err(db::storage_error)?
        .ok_or_else(|| {
            tracing::error!(%id, "invoice vanished inside its own transaction");
            AppError::internal()
        })
}
