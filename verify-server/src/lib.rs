//! Invoice verification service
//!
//! REST service for looking up verified bank-account details by invoice
//! number. Regular users may search; administrators manage the invoice
//! records and review an append-only audit trail of every search and
//! mutation.
//!
//! # Module structure
//!
//! ```text
//! verify-server/src/
//! ├── config.rs  # Environment configuration
//! ├── state.rs   # Pool + JWT service
//! ├── auth/      # JWT sessions, access policy gate
//! ├── db/        # sqlx queries (users, invoices, audit log)
//! ├── api/       # HTTP routes and handlers
//! ├── seed.rs    # Admin account provisioning
//! └── util.rs    # Password hashing
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod seed;
pub mod state;
pub mod util;

pub use auth::{CurrentUser, JwtService};
pub use config::Config;
pub use state::AppState;
