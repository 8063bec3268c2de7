//! User role enumeration
//!
//! Closed set of roles; the database `role` column is constrained to the
//! same two values. Parsing is explicit so an unexpected stored value is an
//! error rather than a silently-ignored string mismatch.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular user: invoice search only
    User,
    /// Administrator: invoice management and audit log access
    Admin,
}

impl Role {
    /// Database / claims representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Parse a stored role value
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Whether this role carries administrator privileges
    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!(Role::from_db(Role::User.as_str()), Some(Role::User));
        assert_eq!(Role::from_db(Role::Admin.as_str()), Some(Role::Admin));
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert_eq!(Role::from_db("superuser"), None);
        assert_eq!(Role::from_db("Admin"), None);
        assert_eq!(Role::from_db(""), None);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
    }
}
