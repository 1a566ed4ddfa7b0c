use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Career Guide API", description = "Career guidance, question tree and vacancy statistics"),
    paths(
        crate::routes::health::health,
        crate::routes::career::predict,
        crate::routes::career::relevance,
        crate::routes::tree::node,
        crate::routes::tree::result,
        crate::routes::tree::vacancies,
        crate::routes::assistant::chat,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::me,
    ),
    tags((name = "career-guide"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
