use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    dto::assistant_dto::{ChatReply, ChatRequestPayload},
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/assistant/chat",
    request_body = ChatRequestPayload,
    responses(
        (status = 200, description = "Assistant reply", body = ChatReply),
        (status = 400, description = "Empty or oversized message"),
        (status = 502, description = "Language model unavailable")
    )
)]
#[axum::debug_handler]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequestPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let reply = state
        .assistant_service
        .chat(payload.message.trim(), &payload.history)
        .await?;
    Ok(Json(ChatReply { reply }))
}
