pub mod assistant;
pub mod auth;
pub mod career;
pub mod docs;
pub mod health;
pub mod pages;
pub mod tree;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::{
    auth::require_bearer_auth,
    cors::cors_layer,
    rate_limit::{new_rps_state, rps_middleware},
};
use crate::AppState;

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// The full application: HTML pages, the rate-limited JSON API, static
/// assets and the OpenAPI document.
pub fn router(state: AppState) -> Router {
    let config = state.config.clone();

    let pages = Router::new()
        .route("/", get(pages::index))
        .route("/career", get(pages::career))
        .route("/ai-tree", get(pages::ai_tree))
        .route("/about", get(pages::about))
        .route("/auth/login", get(pages::login))
        .route("/auth/register", get(pages::register));

    let account = Router::new()
        .route("/auth/me", get(auth::me))
        .route_layer(from_fn_with_state(state.clone(), require_bearer_auth));

    let api = Router::new()
        .route("/career/predict", post(career::predict))
        .route("/career/relevance", post(career::relevance))
        .route("/ai-tree/api/node", post(tree::node))
        .route("/ai-tree/api/result", post(tree::result))
        .route("/ai-tree/api/vacancies", post(tree::vacancies))
        .route("/assistant/chat", post(assistant::chat))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .merge(account)
        .layer(from_fn_with_state(
            new_rps_state(config.public_rps, config.trust_forwarded_for),
            rps_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .merge(pages)
        .merge(api)
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .fallback(pages::not_found)
        .with_state(state)
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
