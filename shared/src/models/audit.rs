//! Audit action enumeration

use serde::{Deserialize, Serialize};
use std::fmt;

/// Action recorded in an audit log entry
///
/// Stored as upper-case text (`SEARCH`, `CREATE`, `UPDATE`, `DELETE`) to
/// match the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Search,
    Create,
    Update,
    Delete,
}

impl AuditAction {
    /// Database / wire representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Search => "SEARCH",
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
        }
    }

    /// Parse a stored action value
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "SEARCH" => Some(AuditAction::Search),
            "CREATE" => Some(AuditAction::Create),
            "UPDATE" => Some(AuditAction::Update),
            "DELETE" => Some(AuditAction::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
