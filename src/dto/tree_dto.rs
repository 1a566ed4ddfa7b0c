use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::QuestionStep;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PathRequest {
    #[serde(default)]
    #[validate(length(max = 50))]
    pub path: Vec<QuestionStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeResponse {
    pub question: Option<String>,
    pub options: Vec<String>,
    pub step: usize,
    pub end: bool,
}

impl NodeResponse {
    pub fn terminal(step: usize) -> Self {
        Self {
            question: None,
            options: Vec::new(),
            step,
            end: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionResponse {
    /// The model reply as written: label line plus justification.
    pub profession: String,
    /// Bare profession name suitable for a vacancy search.
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VacanciesRequest {
    #[serde(default)]
    #[validate(length(max = 500))]
    pub profession: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancySummary {
    pub name: String,
    pub company: Option<String>,
    pub url: Option<String>,
    pub salary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacanciesResponse {
    pub vacancies: Vec<VacancySummary>,
}
