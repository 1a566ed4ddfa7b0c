use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PredictRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 2000, message = "skills must not be empty"))]
    pub skills: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub interests: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub result: String,
    /// Profession names parsed from the numbered list in `result`.
    pub professions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RelevanceRequest {
    #[serde(default)]
    #[validate(length(max = 20, message = "at most 20 professions per request"))]
    pub professions: Vec<String>,
    pub area_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancyStatsResult {
    pub profession: String,
    pub vacancy_count: i64,
    pub average_salary: Option<i64>,
    pub median_salary: Option<i64>,
    pub trend: String,
    pub top_skills: Vec<String>,
    pub search_url: String,
}
