//! Startup provisioning
//!
//! User accounts are created at provisioning time, not through the API. The
//! only account this service seeds itself is the initial administrator.

use shared::Role;
use sqlx::PgPool;

use crate::config::Config;
use crate::db;
use crate::util::hash_password;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Ensure the administrator account exists
pub async fn ensure_admin(pool: &PgPool, config: &Config) -> Result<(), BoxError> {
    if db::users::find_by_username(pool, &config.admin_username)
        .await?
        .is_some()
    {
        tracing::info!(username = %config.admin_username, "admin user already exists");
        return Ok(());
    }

    let password_hash =
        hash_password(&config.admin_password).map_err(|e| format!("password hashing: {e}"))?;

    let mut conn = pool.acquire().await?;
    db::users::create(
        &mut *conn,
        &config.admin_username,
        &password_hash,
        Role::Admin.as_str(),
    )
    .await?;

    tracing::warn!(
        username = %config.admin_username,
        "created default admin user; change its password immediately"
    );
    Ok(())
}
