//! Route definitions and router construction.
//!
//! Handlers delegate to the `AppCore` services held in [`AppState`].

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// All API routes without the `/api` prefix (nested by [`create_router`]).
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        // Projects
        .route(
            "/projects",
            get(handlers::projects::list).post(handlers::projects::create),
        )
        .route(
            "/projects/{id}",
            get(handlers::projects::get)
                .put(handlers::projects::update)
                .delete(handlers::projects::remove),
        )
        .route("/projects/{id}/stats", get(handlers::projects::stats))
        // Labels
        .route(
            "/projects/{id}/labels",
            get(handlers::labels::list).post(handlers::labels::create),
        )
        .route(
            "/labels/{id}",
            put(handlers::labels::rename).delete(handlers::labels::remove),
        )
        // Dataset files
        .route(
            "/projects/{id}/files",
            get(handlers::files::list)
                .post(handlers::files::upload)
                .layer(DefaultBodyLimit::max(handlers::files::MAX_UPLOAD_BYTES)),
        )
        .route(
            "/files/{id}",
            get(handlers::files::get).delete(handlers::files::remove),
        )
        .route("/files/{id}/label", put(handlers::files::set_label))
        .route("/files/{id}/url", get(handlers::files::presigned_url))
        .route("/files/{id}/criterias", get(handlers::files::list_examples))
        .route(
            "/files/{id}/criterias/{criteria_id}",
            put(handlers::files::set_example),
        )
        // Criterias
        .route(
            "/projects/{id}/criterias",
            get(handlers::criterias::list).post(handlers::criterias::create),
        )
        .route(
            "/criterias/{id}",
            get(handlers::criterias::get)
                .put(handlers::criterias::update)
                .delete(handlers::criterias::remove),
        )
        // Inspection specs
        .route(
            "/projects/{id}/specs",
            get(handlers::specs::list).post(handlers::specs::create),
        )
        .route(
            "/specs/{id}",
            get(handlers::specs::get)
                .put(handlers::specs::update)
                .delete(handlers::specs::remove),
        )
        // Prompt templates
        .route(
            "/projects/{id}/prompts",
            get(handlers::prompts::list).post(handlers::prompts::create),
        )
        .route(
            "/prompts/{id}",
            get(handlers::prompts::get)
                .put(handlers::prompts::update)
                .delete(handlers::prompts::remove),
        )
        .route("/templates", get(handlers::templates::starters))
        // Evaluations
        .route(
            "/projects/{id}/evaluations",
            get(handlers::evaluations::list).post(handlers::evaluations::start),
        )
        .route("/evaluate", post(handlers::evaluations::evaluate))
        .route(
            "/evaluations/{id}",
            get(handlers::evaluations::get).delete(handlers::evaluations::remove),
        )
        .route(
            "/evaluations/{id}/details",
            get(handlers::evaluations::details),
        )
}

/// Create the main router: `/health`, `/api/*` and presigned downloads.
///
/// Axum 0.8 uses brace syntax for path parameters: `{id}`, `{*key}`.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(health_check))
        .route("/objects/{*key}", get(handlers::objects::download))
        .nest("/api", api_routes().layer(cors))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
