use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use validator::Validate;

use crate::{
    dto::auth_dto::{AuthResponse, LoginPayload, RegisterPayload},
    error::{Error, Result},
    middleware::auth::Claims,
    utils::token::issue_token,
    AppState,
};

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Username or email already taken")
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let account = state
        .account_service
        .register(payload.username.trim(), payload.email.trim(), &payload.password)
        .await?;
    let token = issue_token(&account, &state.config.jwt_secret, state.config.token_ttl_hours)?;
    Ok((StatusCode::CREATED, Json(AuthResponse { token, account })))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 401, description = "Invalid username or password")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let account = state
        .account_service
        .authenticate(payload.username.trim(), &payload.password)
        .await?;
    let token = issue_token(&account, &state.config.jwt_secret, state.config.token_ttl_hours)?;
    Ok(Json(AuthResponse { token, account }))
}

#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current account", body = Account),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer" = []))
)]
#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let id = claims
        .account_id()
        .ok_or_else(|| Error::Unauthorized("Malformed token subject".to_string()))?;
    let account = state
        .account_service
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::Unauthorized("Account no longer exists".to_string()))?;
    Ok(Json(account))
}
