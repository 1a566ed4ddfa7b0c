use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{error::Result, AppState};

const NOT_FOUND_VIEW: &str = "404";

async fn render(state: &AppState, view: &str) -> Result<Html<String>> {
    Ok(Html(state.page_service.render(view).await?))
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    render(&state, "index").await
}

pub async fn career(State(state): State<AppState>) -> Result<Html<String>> {
    render(&state, "career").await
}

pub async fn ai_tree(State(state): State<AppState>) -> Result<Html<String>> {
    render(&state, "ai-tree").await
}

pub async fn about(State(state): State<AppState>) -> Result<Html<String>> {
    render(&state, "o_nas").await
}

pub async fn login(State(state): State<AppState>) -> Result<Html<String>> {
    render(&state, "login").await
}

pub async fn register(State(state): State<AppState>) -> Result<Html<String>> {
    render(&state, "register").await
}

/// Router fallback. Falls through to the JSON error when the 404 view
/// itself is missing.
pub async fn not_found(State(state): State<AppState>) -> Response {
    match state.page_service.render(NOT_FOUND_VIEW).await {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => {
            tracing::debug!("404 view unavailable: {}", e);
            crate::error::Error::NotFound("Page not found".to_string()).into_response()
        }
    }
}
