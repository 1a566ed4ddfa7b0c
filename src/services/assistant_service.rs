use std::sync::Arc;

use tracing::instrument;

use crate::dto::assistant_dto::{ChatTurn, TurnRole};
use crate::error::Result;
use crate::services::llm_service::{ChatCompletion, ChatMessage, ChatRequest};

pub const MAX_HISTORY_TURNS: usize = 20;
const ASSISTANT_TEMPERATURE: f32 = 0.6;
const ASSISTANT_MAX_TOKENS: u32 = 800;

const ASSISTANT_SYSTEM_PROMPT: &str = "Ты — дружелюбный карьерный консультант. \
Помогаешь выбрать профессию, спланировать обучение и подготовиться к поиску работы \
в Казахстане. Отвечай по-русски, кратко и по делу. Если вопрос не связан с карьерой, \
образованием или работой, вежливо верни разговор к этим темам.";

/// Free-form career assistant. The client echoes the conversation back on
/// every call, as with the question tree.
#[derive(Clone)]
pub struct AssistantService {
    llm: Arc<dyn ChatCompletion>,
    model: String,
}

impl AssistantService {
    pub fn new(llm: Arc<dyn ChatCompletion>, model: String) -> Self {
        Self { llm, model }
    }

    #[instrument(skip_all, fields(history = history.len()))]
    pub async fn chat(&self, message: &str, history: &[ChatTurn]) -> Result<String> {
        let mut messages = Vec::with_capacity(history.len().min(MAX_HISTORY_TURNS) + 2);
        messages.push(ChatMessage::system(ASSISTANT_SYSTEM_PROMPT));

        let skip = history.len().saturating_sub(MAX_HISTORY_TURNS);
        messages.extend(history.iter().skip(skip).map(|turn| match turn.role {
            TurnRole::User => ChatMessage::user(turn.content.as_str()),
            TurnRole::Assistant => ChatMessage::assistant(turn.content.as_str()),
        }));
        messages.push(ChatMessage::user(message));

        let request = ChatRequest::new(&self.model, messages)
            .temperature(ASSISTANT_TEMPERATURE)
            .max_tokens(ASSISTANT_MAX_TOKENS);
        self.llm.complete(request).await
    }
}
