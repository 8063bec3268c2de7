//! Access policy gate
//!
//! Deterministic role-based allow-list. There are no data-dependent rules:
//! whether an operation is permitted depends only on the caller's role.

use shared::Role;
use shared::error::{AppError, ErrorCode};

/// Operations subject to the access policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SearchInvoice,
    ListInvoices,
    CreateInvoice,
    UpdateInvoice,
    DeleteInvoice,
    ReadAuditLog,
}

/// Whether `role` may perform `operation`
pub fn allowed(role: Role, operation: Operation) -> bool {
    match operation {
        // Any authenticated identity may search
        Operation::SearchInvoice => true,
        // Everything else is admin-only
        Operation::ListInvoices
        | Operation::CreateInvoice
        | Operation::UpdateInvoice
        | Operation::DeleteInvoice
        | Operation::ReadAuditLog => role.is_admin(),
    }
}

/// Check the policy, producing a 403 error on denial
pub fn authorize(role: Role, operation: Operation) -> Result<(), AppError> {
    if allowed(role, operation) {
        Ok(())
    } else {
        Err(AppError::new(ErrorCode::AdminRequired))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    const ADMIN_ONLY: [Operation; 5] = [
        Operation::ListInvoices,
        Operation::CreateInvoice,
        Operation::UpdateInvoice,
        Operation::DeleteInvoice,
        Operation::ReadAuditLog,
    ];

    #[test]
    fn test_any_role_may_search() {
        assert!(allowed(Role::User, Operation::SearchInvoice));
        assert!(allowed(Role::Admin, Operation::SearchInvoice));
    }

    #[test]
    fn test_admin_only_operations() {
        for op in ADMIN_ONLY {
            assert!(allowed(Role::Admin, op), "admin denied {op:?}");
            assert!(!allowed(Role::User, op), "user allowed {op:?}");
        }
    }

    #[test]
    fn test_denial_maps_to_forbidden() {
        for op in ADMIN_ONLY {
            let err = authorize(Role::User, op).unwrap_err();
            assert_eq!(err.http_status(), StatusCode::FORBIDDEN);
        }
    }
}
