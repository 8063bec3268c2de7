//! Shared types for the invoice verification service
//!
//! Common vocabulary used across crates: unified error codes with HTTP
//! status mapping, the role and audit-action enumerations, and the
//! wire-level error response shape.

pub mod error;
pub mod models;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use models::{AuditAction, Role};
