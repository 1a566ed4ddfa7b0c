use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    dto::career_dto::{PredictRequest, PredictResponse, RelevanceRequest, VacancyStatsResult},
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/career/predict",
    request_body = PredictRequest,
    responses(
        (status = 200, description = "Recommended professions", body = PredictResponse),
        (status = 400, description = "Skills are missing"),
        (status = 502, description = "Language model unavailable")
    )
)]
#[axum::debug_handler]
pub async fn predict(
    State(state): State<AppState>,
    Json(payload): Json<PredictRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let prediction = state
        .career_service
        .predict(payload.skills.trim(), payload.interests.trim())
        .await?;
    Ok(Json(prediction))
}

#[utoipa::path(
    post,
    path = "/career/relevance",
    request_body = RelevanceRequest,
    responses(
        (status = 200, description = "Market statistics per profession, in request order", body = Vec<VacancyStatsResult>),
        (status = 400, description = "Too many professions"),
        (status = 502, description = "Vacancy search unavailable")
    )
)]
#[axum::debug_handler]
pub async fn relevance(
    State(state): State<AppState>,
    Json(payload): Json<RelevanceRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let region_id = payload.area_id.unwrap_or(state.config.default_area_id);
    let stats = state
        .stats_service
        .compute_stats(&payload.professions, region_id)
        .await?;
    Ok(Json(stats))
}
