use std::sync::Arc;

use tracing::{info, instrument};

use crate::dto::career_dto::PredictResponse;
use crate::error::Result;
use crate::services::llm_service::{ChatCompletion, ChatMessage, ChatRequest};
use crate::utils::reply_parser::parse_profession_list;

const PREDICT_MAX_TOKENS: u32 = 1500;

const PREDICT_SYSTEM_PROMPT: &str = "Ты — ИИ-помощник по карьере. \
На основе навыков пользователя предложи ТОП-10 подходящих профессий. \
Для каждой профессии укажи вероятность совпадения в процентах и что нужно дополнительно изучить. \
Если даны интересы — предложи ещё 10 профессий, которые стоит рассмотреть, если пользователь хочет \
развиваться в этих интересах. Ответ строго на русском языке, структурированный. \
Формат вывода:\n\
1. **Профессия** - X% совпадение\n   • Что изучить: ...\n   • Перспективы: ...\n\
2. **Профессия** - X% совпадение\n   ... и так далее";

/// Single-shot profession recommendations from a list of skills.
#[derive(Clone)]
pub struct CareerService {
    llm: Arc<dyn ChatCompletion>,
    model: String,
}

impl CareerService {
    pub fn new(llm: Arc<dyn ChatCompletion>, model: String) -> Self {
        Self { llm, model }
    }

    #[instrument(skip(self, skills, interests))]
    pub async fn predict(&self, skills: &str, interests: &str) -> Result<PredictResponse> {
        let request = ChatRequest::new(
            &self.model,
            vec![
                ChatMessage::system(PREDICT_SYSTEM_PROMPT),
                ChatMessage::user(format!("Навыки: {}\nИнтересы: {}", skills, interests)),
            ],
        )
        .max_tokens(PREDICT_MAX_TOKENS);

        let result = self.llm.complete(request).await?;
        let professions = parse_profession_list(&result);
        info!(professions = professions.len(), "career prediction ready");

        Ok(PredictResponse {
            result,
            professions,
        })
    }
}
