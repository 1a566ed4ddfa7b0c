use serde::{Deserialize, Deserializer, Serialize};

/// hh reports salary bounds as integers, but some mirrors send floats or strings.
fn deserialize_amount_flexible<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AmountRepr {
        Int(i64),
        Float(f64),
        String(String),
    }

    match Option::<AmountRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(AmountRepr::Int(i)) => Ok(Some(i)),
        // 2^63 is exactly representable; anything at or past it would saturate
        Some(AmountRepr::Float(f)) if f.is_finite() && f.abs() < i64::MAX as f64 => {
            Ok(Some(f as i64))
        }
        Some(AmountRepr::Float(f)) => Err(serde::de::Error::custom(format!(
            "Salary amount out of range: {}",
            f
        ))),
        Some(AmountRepr::String(s)) if s.trim().is_empty() => Ok(None),
        Some(AmountRepr::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("Invalid salary amount: {}", s))),
    }
}

/// One search against the vacancy service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacancyQuery {
    pub profession: String,
    pub region_id: u32,
    /// `None` searches without a publication period.
    pub lookback_days: Option<u32>,
    pub per_page: u32,
}

impl VacancyQuery {
    pub fn new(profession: impl Into<String>, region_id: u32, per_page: u32) -> Self {
        Self {
            profession: profession.into(),
            region_id,
            lookback_days: None,
            per_page,
        }
    }

    pub fn with_lookback(mut self, days: u32) -> Self {
        self.lookback_days = Some(days);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VacancyRecord {
    pub title: String,
    pub employer_name: Option<String>,
    pub salary_from: Option<i64>,
    pub salary_to: Option<i64>,
    pub currency: Option<String>,
    pub required_skills: Vec<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VacancyPage {
    pub items: Vec<VacancyRecord>,
    /// Total matches reported by the service, not just this page.
    pub found: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HhSearchResponse {
    #[serde(default)]
    pub items: Vec<HhVacancy>,
    #[serde(default)]
    pub found: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HhVacancy {
    #[serde(default)]
    pub name: String,
    pub employer: Option<HhEmployer>,
    pub salary: Option<HhSalary>,
    pub alternate_url: Option<String>,
    #[serde(default)]
    pub key_skills: Option<Vec<HhSkill>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HhEmployer {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HhSalary {
    #[serde(default, deserialize_with = "deserialize_amount_flexible")]
    pub from: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_amount_flexible")]
    pub to: Option<i64>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HhSkill {
    pub name: String,
}

impl From<HhVacancy> for VacancyRecord {
    fn from(v: HhVacancy) -> Self {
        let (salary_from, salary_to, currency) = match v.salary {
            Some(s) => (s.from, s.to, s.currency),
            None => (None, None, None),
        };
        Self {
            title: v.name,
            employer_name: v.employer.and_then(|e| e.name),
            salary_from,
            salary_to,
            currency,
            required_skills: v
                .key_skills
                .unwrap_or_default()
                .into_iter()
                .map(|s| s.name)
                .collect(),
            url: v.alternate_url,
        }
    }
}

impl From<HhSearchResponse> for VacancyPage {
    fn from(resp: HhSearchResponse) -> Self {
        Self {
            items: resp.items.into_iter().map(VacancyRecord::from).collect(),
            found: resp.found,
        }
    }
}
