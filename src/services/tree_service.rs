use std::sync::Arc;

use tracing::{info, instrument};

use crate::dto::tree_dto::{NodeResponse, ProfessionResponse};
use crate::error::{Error, Result};
use crate::models::question::{QuestionStep, QuestionTreeState};
use crate::services::llm_service::{ChatCompletion, ChatMessage, ChatRequest};
use crate::utils::reply_parser::{normalize_profession_label, parse_question_reply};

pub const START_SENTINEL: &str = "начало";
const NODE_TEMPERATURE: f32 = 0.8;
const RESULT_TEMPERATURE: f32 = 0.7;

/// Drives the adaptive career question tree. Holds no per-user state.
#[derive(Clone)]
pub struct TreeService {
    llm: Arc<dyn ChatCompletion>,
    model: String,
    max_steps: usize,
}

impl TreeService {
    pub fn new(llm: Arc<dyn ChatCompletion>, model: String, max_steps: usize) -> Self {
        Self {
            llm,
            model,
            max_steps,
        }
    }

    #[instrument(skip(self, path), fields(depth = path.len()))]
    pub async fn next_question(&self, path: &[QuestionStep]) -> Result<NodeResponse> {
        let state = QuestionTreeState::new(path, self.max_steps);
        let step = state.step();
        if state.is_terminal() {
            return Ok(NodeResponse::terminal(step));
        }

        let prompt = node_prompt(&state);
        let request = ChatRequest::new(&self.model, vec![ChatMessage::user(prompt)])
            .temperature(NODE_TEMPERATURE);
        let reply = self.llm.complete(request).await?;
        let parsed = parse_question_reply(&reply);

        Ok(NodeResponse {
            question: Some(parsed.question),
            options: parsed.options,
            step,
            end: false,
        })
    }

    #[instrument(skip(self, path), fields(depth = path.len()))]
    pub async fn resolve_profession(&self, path: &[QuestionStep]) -> Result<ProfessionResponse> {
        if path.is_empty() {
            return Err(Error::BadRequest(
                "path must contain at least one answered question".to_string(),
            ));
        }

        let request = ChatRequest::new(&self.model, vec![ChatMessage::user(result_prompt(path))])
            .temperature(RESULT_TEMPERATURE);
        let reply = self.llm.complete(request).await?;
        let label = normalize_profession_label(&reply);
        info!(%label, "profession resolved");

        Ok(ProfessionResponse {
            profession: reply,
            label,
        })
    }
}

fn node_prompt(state: &QuestionTreeState<'_>) -> String {
    let last_answer = state.last_answer().unwrap_or(START_SENTINEL);
    let asked: Vec<&str> = state.asked_questions().collect();
    let asked = if asked.is_empty() {
        "нет".to_string()
    } else {
        asked.join("; ")
    };

    format!(
        "Ты создаёшь интерактивное дерево профориентации.\n\
         Шаг {step} из {max}.\n\
         Последний выбор пользователя: \"{last_answer}\".\n\
         Уже заданные вопросы (не повторяй их): {asked}.\n\
         Сгенерируй один вопрос с двумя вариантами ответа, основываясь на этом выборе. \
         Вопрос должен помогать выбрать рабочую профессию.\n\
         Ответь строго в формате, без лишнего текста:\n\
         Question: ...\n\
         1. ...\n\
         2. ...",
        step = state.step(),
        max = state.max_steps,
    )
}

fn result_prompt(path: &[QuestionStep]) -> String {
    let dialogue = path
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}) Question: {} — Answer: {}", i + 1, s.question, s.answer))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Пользователь прошёл профориентационный тест.\n\
         Вот его путь:\n{dialogue}\n\
         Первой строкой ОБЯЗАТЕЛЬНО напиши \"Profession: ...\", где ... — только короткое \
         название профессии на русском языке, без лишних слов.\n\
         Затем объясни в 2-4 предложениях, почему выбрана именно она."
    )
}
