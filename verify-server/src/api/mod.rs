//! HTTP routes

pub mod admin;
pub mod auth;
pub mod health;
pub mod invoice;

use std::time::Duration;

use axum::routing::{get, post, put};
use axum::{Router, middleware};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{require_admin, require_auth};
use crate::state::AppState;
use shared::error::AppError;

/// Result type for JSON handlers
pub type ApiResult<T> = Result<axum::Json<T>, AppError>;

/// Create the application router
///
/// Everything under `/api` except login requires a valid session token. The
/// `/api/admin` subtree is additionally gated by [`require_admin`]; the
/// handlers still run the access policy gate per operation on top of that.
pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/invoices", get(admin::list_invoices))
        .route("/invoice", post(admin::create_invoice))
        .route(
            "/invoice/{id}",
            put(admin::update_invoice).delete(admin::delete_invoice),
        )
        .route("/audit-logs", get(admin::audit_logs))
        .layer(middleware::from_fn(require_admin));

    let protected = Router::new()
        .route("/api/invoice/{invoice_number}", get(invoice::search))
        .nest("/api/admin", admin_routes)
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/auth/login", post(auth::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtService;
    use crate::config::Config;
    use axum::body::Body;
    use http::{Request, StatusCode, header};
    use shared::Role;
    use sqlx::postgres::PgPoolOptions;
    use tower::util::ServiceExt;
    use uuid::Uuid;

    /// State over a lazy pool: usable for routes that never touch the
    /// database (auth failures are rejected before any query runs)
    fn test_state() -> AppState {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unreachable")
            .expect("lazy pool");
        let config = Config {
            database_url: "postgres://localhost/unreachable".into(),
            http_port: 0,
            environment: "development".into(),
            jwt_secret: "test-secret-at-least-32-bytes-long!!".into(),
            jwt_expiration_minutes: 60,
            admin_username: "admin".into(),
            admin_password: "admin123".into(),
        };
        AppState::with_pool(pool, &config)
    }

    fn token_for(jwt: &JwtService, role: Role) -> String {
        jwt.generate_token(Uuid::new_v4(), "test-user", role)
            .expect("token generation")
    }

    async fn send(state: AppState, req: Request<Body>) -> StatusCode {
        create_router(state)
            .oneshot(req)
            .await
            .expect("infallible")
            .status()
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let req = Request::builder()
            .uri("/api/invoice/INV-2025-001")
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(test_state(), req).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_token_is_unauthorized() {
        let req = Request::builder()
            .uri("/api/admin/invoices")
            .header(header::AUTHORIZATION, "Bearer not-a-jwt")
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(test_state(), req).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_basic_scheme_is_unauthorized() {
        let req = Request::builder()
            .uri("/api/admin/invoices")
            .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(test_state(), req).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_user_role_is_forbidden_on_admin_routes() {
        let state = test_state();
        let token = token_for(&state.jwt, Role::User);

        for uri in ["/api/admin/invoices", "/api/admin/audit-logs"] {
            let req = Request::builder()
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap();
            assert_eq!(
                send(state.clone(), req).await,
                StatusCode::FORBIDDEN,
                "expected 403 on {uri}"
            );
        }
    }

    #[tokio::test]
    async fn test_user_delete_is_forbidden_before_lookup() {
        // A non-admin must get 403 even for an id that does not exist: the
        // gate runs before the registry is consulted.
        let state = test_state();
        let token = token_for(&state.jwt, Role::User);
        let req = Request::builder()
            .method("DELETE")
            .uri(format!("/api/admin/invoice/{}", Uuid::new_v4()))
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(state, req).await, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_layer_gates_routes_without_handler_checks() {
        // The subtree layer must deny non-admins even for a route whose
        // handler performs no policy check of its own.
        let state = test_state();
        let user_token = token_for(&state.jwt, Role::User);
        let admin_token = token_for(&state.jwt, Role::Admin);

        let app = Router::new()
            .route("/api/admin/unchecked", get(|| async { "ok" }))
            .layer(middleware::from_fn(require_admin))
            .layer(middleware::from_fn_with_state(state.clone(), require_auth))
            .with_state(state);

        let denied = Request::builder()
            .uri("/api/admin/unchecked")
            .header(header::AUTHORIZATION, format!("Bearer {user_token}"))
            .body(Body::empty())
            .unwrap();
        assert_eq!(
            app.clone().oneshot(denied).await.expect("infallible").status(),
            StatusCode::FORBIDDEN
        );

        let allowed = Request::builder()
            .uri("/api/admin/unchecked")
            .header(header::AUTHORIZATION, format!("Bearer {admin_token}"))
            .body(Body::empty())
            .unwrap();
        assert_eq!(
            app.oneshot(allowed).await.expect("infallible").status(),
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let state = test_state();
        let expired = JwtService::with_config(crate::auth::JwtConfig::new(
            "test-secret-at-least-32-bytes-long!!",
            -5,
        ));
        let token = token_for(&expired, Role::Admin);

        let req = Request::builder()
            .uri("/api/admin/invoices")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(state, req).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_rejects_empty_fields() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"username":"","password":""}"#))
            .unwrap();
        assert_eq!(send(test_state(), req).await, StatusCode::BAD_REQUEST);
    }
}
