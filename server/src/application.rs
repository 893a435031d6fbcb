use std::time::Duration;

use axum::{
    http::{header::{AUTHORIZATION, CONTENT_TYPE}, Method},
    routing::{get, post},
    Router,
};
use signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use super::routes::{
    create_campaign, create_donation, delete_campaign, get_campaign, list_campaigns,
    list_donations, login, login_jwt, register, update_campaign,
};
use super::settings::Settings;
use super::state::AppState;

/// Build the application router. Separate from [`launch`] so tests can
/// drive it without binding a socket.
pub fn router(state: std::sync::Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_origin(Any)
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/login/jwt", post(login_jwt))
        .route("/campaigns", get(list_campaigns).post(create_campaign))
        .route(
            "/campaigns/:id",
            get(get_campaign).put(update_campaign).delete(delete_campaign),
        )
        .route(
            "/campaigns/:id/donations",
            get(list_donations).post(create_donation),
        )
        .layer(cors)
        .with_state(state)
}

pub async fn launch() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let settings = Settings::new()?;

    info!("Initializing state...");
    let state = AppState::new(settings).await?;

    info!("Starting server...");
    let app = router(state.clone());

    let address = format!("{}:{}", state.settings.server.host, state.settings.server.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use api::auth::TokenKeys;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::state::AppState;

    // A lazy pool never opens a connection unless a handler actually runs a
    // query, so everything rejected before the database step is testable
    // offline.
    fn test_state() -> Arc<AppState> {
        let settings = Settings::default();
        let pool = PgPoolOptions::new()
            .connect_lazy(&settings.database.url())
            .unwrap();
        let token_keys = TokenKeys::new(&settings.jwt.secret, settings.jwt.expiration_hours);
        Arc::new(AppState {
            pool,
            token_keys,
            settings,
        })
    }

    fn post(uri: &str) -> axum::http::request::Builder {
        Request::builder().method(Method::POST).uri(uri)
    }

    async fn status_and_detail(
        response: axum::response::Response,
    ) -> (StatusCode, serde_json::Value) {
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn identity_check_without_header_is_a_structured_401() {
        let app = router(test_state());
        let response = app
            .oneshot(post("/login/jwt").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let (status, body) = status_and_detail(response).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body["detail"],
            "Authentication credentials were not provided."
        );
    }

    #[tokio::test]
    async fn identity_check_with_wrong_scheme_is_rejected() {
        // Clients send "JWT <token>"; "Bearer" is not this API's scheme.
        let app = router(test_state());
        let response = app
            .oneshot(
                post("/login/jwt")
                    .header("Authorization", "Bearer abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn identity_check_with_garbage_token_is_rejected() {
        let app = router(test_state());
        let response = app
            .oneshot(
                post("/login/jwt")
                    .header("Authorization", "JWT not.a.token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let (status, body) = status_and_detail(response).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["detail"].as_str().unwrap().starts_with("Invalid token"));
    }

    #[tokio::test]
    async fn register_with_invalid_email_is_a_400() {
        let app = router(test_state());
        let payload = serde_json::json!({
            "email": "not-an-email",
            "password": "asdasd123",
            "community_name": "Gereja Bethel Indonesia",
            "admin_name": "Ricky Putra Nursalim",
        });
        let response = app
            .oneshot(
                post("/register")
                    .header("Content-Type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let (status, body) = status_and_detail(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Enter a valid email address");
    }

    #[tokio::test]
    async fn register_reports_the_first_failed_check() {
        let app = router(test_state());
        let payload = serde_json::json!({
            "email": "ricky@gmail.com",
            "password": "abc",
            "community_name": "",
            "admin_name": "",
        });
        let response = app
            .oneshot(
                post("/register")
                    .header("Content-Type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let (status, body) = status_and_detail(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "password must be at least 6 characters");
    }
}
