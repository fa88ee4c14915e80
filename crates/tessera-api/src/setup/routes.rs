//! Route configuration and setup

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tessera_infra::request_id_middleware;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::{require_admin, session_middleware};
use crate::handlers;
use crate::state::AppState;

/// Build the application router.
///
/// Layers run outermost first: request id, tracing, concurrency limit, session,
/// body limit. Admin routes additionally require an administrator.
pub fn setup_routes(state: Arc<AppState>) -> Router {
    let config = &state.config;
    let max_upload_size_bytes = config.max_upload_size_bytes;
    let http_concurrency_limit = config.http_concurrency_limit;
    let jwt = state.jwt.clone();

    let admin_routes = Router::new()
        .route("/admin/files", get(handlers::admin::list_files))
        .route("/admin/upload", post(handlers::upload::upload_file))
        .route_layer(from_fn(require_admin));

    let mut app = Router::new()
        .route("/", get(handlers::pages::home))
        .route("/health", get(handlers::health::liveness_check))
        .route("/health/ready", get(handlers::health::readiness_check))
        .route(
            "/preferences/theme/{theme}",
            post(handlers::preferences::set_theme),
        )
        .merge(admin_routes);

    // Stored files are public under their content-addressed names.
    let uploads_route = config.uploads_dir.trim_matches('/');
    if uploads_route.is_empty() {
        tracing::warn!("Uploads live in the public root; stored files are not served");
    } else {
        app = app.nest_service(
            &format!("/{}", uploads_route),
            ServeDir::new(config.public_root.join(uploads_route)),
        );
    }

    tracing::info!(
        http_concurrency_limit,
        max_upload_size_bytes,
        "Routes configured"
    );

    app.fallback(handlers::pages::not_found)
        .layer(DefaultBodyLimit::max(max_upload_size_bytes))
        .layer(from_fn_with_state(jwt, session_middleware))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
