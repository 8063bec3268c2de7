//! Authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use shared::error::AppError;

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::state::AppState;

/// Authentication middleware
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>`.
/// On success a [`CurrentUser`] is injected into the request extensions;
/// handlers then run the access policy gate against it before touching the
/// registry.
///
/// | Failure | Response |
/// |------|------------|
/// | No Authorization header | 401 |
/// | Expired token | 401 |
/// | Malformed/tampered token | 401 |
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => {
            JwtService::extract_from_header(header).ok_or_else(AppError::invalid_token)?
        }
        None => {
            tracing::warn!(uri = %req.uri(), "request without authorization header");
            return Err(AppError::unauthorized());
        }
    };

    match state.jwt.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::try_from(claims).map_err(|e| {
                tracing::warn!(error = %e, "token claims rejected");
                AppError::invalid_token()
            })?;
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(error = %e, uri = %req.uri(), "token validation failed");
            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token()),
            }
        }
    }
}

/// Admin gate for a whole router subtree
///
/// Runs after [`require_auth`] and rejects any non-admin identity with 403,
/// so a route mounted under the admin subtree is gated even if its handler
/// performs no policy check of its own. Handlers still call the policy gate
/// per operation; this layer is the subtree-wide backstop.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::unauthorized)?;

    if !user.role.is_admin() {
        tracing::warn!(username = %user.username, uri = %req.uri(), "admin route denied");
        return Err(AppError::forbidden());
    }

    Ok(next.run(req).await)
}
