//! Domain model types shared across crates

mod audit;
mod role;

pub use audit::AuditAction;
pub use role::Role;
