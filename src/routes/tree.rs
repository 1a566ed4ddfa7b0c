use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    dto::tree_dto::{
        NodeResponse, PathRequest, ProfessionResponse, VacanciesRequest, VacanciesResponse,
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/ai-tree/api/node",
    request_body = PathRequest,
    responses(
        (status = 200, description = "Next question, or the end marker", body = NodeResponse),
        (status = 502, description = "Language model unavailable")
    )
)]
#[axum::debug_handler]
pub async fn node(
    State(state): State<AppState>,
    Json(payload): Json<PathRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let node = state.tree_service.next_question(&payload.path).await?;
    Ok(Json(node))
}

#[utoipa::path(
    post,
    path = "/ai-tree/api/result",
    request_body = PathRequest,
    responses(
        (status = 200, description = "Resolved profession", body = ProfessionResponse),
        (status = 400, description = "Empty path"),
        (status = 502, description = "Language model unavailable")
    )
)]
#[axum::debug_handler]
pub async fn result(
    State(state): State<AppState>,
    Json(payload): Json<PathRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let profession = state.tree_service.resolve_profession(&payload.path).await?;
    Ok(Json(profession))
}

#[utoipa::path(
    post,
    path = "/ai-tree/api/vacancies",
    request_body = VacanciesRequest,
    responses(
        (status = 200, description = "Live vacancies for the profession", body = VacanciesResponse),
        (status = 502, description = "Vacancy search unavailable")
    )
)]
#[axum::debug_handler]
pub async fn vacancies(
    State(state): State<AppState>,
    Json(payload): Json<VacanciesRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let vacancies = state
        .vacancy_lookup_service
        .find_vacancies(&payload.profession)
        .await?;
    Ok(Json(VacanciesResponse { vacancies }))
}
