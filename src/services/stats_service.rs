use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::dto::career_dto::VacancyStatsResult;
use crate::error::Result;
use crate::models::vacancy::{VacancyQuery, VacancyRecord};
use crate::services::job_search_service::{public_search_url, VacancySearch};

pub const STATS_PAGE_SIZE: u32 = 100;
pub const CURRENT_WINDOW_DAYS: u32 = 30;
pub const PRIOR_WINDOW_DAYS: u32 = 60;
pub const TOP_SKILLS: usize = 5;

/// hh currency code used for salaries in a country or major city area.
/// `None` for areas not listed here.
pub fn area_currency(area_id: u32) -> Option<&'static str> {
    match area_id {
        // Kazakhstan, Astana, Almaty
        40 | 159 | 160 => Some("KZT"),
        // Russia, Moscow, Saint Petersburg
        113 | 1 | 2 => Some("RUR"),
        16 => Some("BYR"),
        48 => Some("KGS"),
        97 => Some("UZS"),
        5 => Some("UAH"),
        9 => Some("AZN"),
        28 => Some("GEL"),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalarySummary {
    pub average: Option<i64>,
    pub median: Option<i64>,
}

/// Salary statistics over listings with a non-zero lower bound in `currency`.
/// Both values are truncated to whole units.
pub fn salary_summary(records: &[VacancyRecord], currency: &str) -> SalarySummary {
    let mut salaries: Vec<i64> = records
        .iter()
        .filter(|r| r.currency.as_deref() == Some(currency))
        .filter_map(|r| r.salary_from)
        .filter(|&s| s != 0)
        .collect();

    if salaries.is_empty() {
        return SalarySummary { average: None, median: None };
    }

    let n = salaries.len();
    // i128 keeps the sum and the midpoint from overflowing
    let average = (salaries.iter().map(|&s| s as i128).sum::<i128>() / n as i128) as i64;

    salaries.sort_unstable();
    let median = if n % 2 == 1 {
        salaries[n / 2]
    } else {
        ((salaries[n / 2 - 1] as i128 + salaries[n / 2] as i128) / 2) as i64
    };

    SalarySummary {
        average: Some(average),
        median: Some(median),
    }
}

/// The `limit` most frequent lower-cased skills across all records.
/// Equal counts keep first-seen order.
pub fn top_skills(records: &[VacancyRecord], limit: usize) -> Vec<String> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut tally: Vec<(String, usize)> = Vec::new();

    for skill in records.iter().flat_map(|r| r.required_skills.iter()) {
        let key = skill.to_lowercase();
        match index.get(&key) {
            Some(&i) => tally[i].1 += 1,
            None => {
                index.insert(key.clone(), tally.len());
                tally.push((key, 1));
            }
        }
    }

    // sort_by is stable, so ties stay in first-seen order
    tally.sort_by(|a, b| b.1.cmp(&a.1));
    tally.into_iter().take(limit).map(|(skill, _)| skill).collect()
}

/// Renders the change from `prior` to `current` as `↑ N%`, `↓ N%` or `→ 0%`.
///
/// The prior count is the denominator in both directions. A zero prior
/// count reports a flat trend.
pub fn trend_indicator(current: i64, prior: i64) -> String {
    if prior == 0 || current == prior {
        return "→ 0%".to_string();
    }
    let pct = ((current - prior).abs() as f64 / prior as f64 * 100.0).round_ties_even() as i64;
    if current > prior {
        format!("↑ {}%", pct)
    } else {
        format!("↓ {}%", pct)
    }
}

#[derive(Clone)]
pub struct StatsService {
    search: Arc<dyn VacancySearch>,
    currency: String,
    public_url: String,
}

impl StatsService {
    pub fn new(search: Arc<dyn VacancySearch>, currency: String, public_url: String) -> Self {
        Self {
            search,
            currency,
            public_url,
        }
    }

    /// Statistics for every profession, in input order. The first failure
    /// aborts the whole batch.
    #[instrument(skip(self, professions), fields(count = professions.len()))]
    pub async fn compute_stats(
        &self,
        professions: &[String],
        region_id: u32,
    ) -> Result<Vec<VacancyStatsResult>> {
        let mut results = Vec::with_capacity(professions.len());
        for profession in professions {
            results.push(self.profession_stats(profession, region_id).await?);
        }
        Ok(results)
    }

    async fn profession_stats(&self, profession: &str, region_id: u32) -> Result<VacancyStatsResult> {
        let query = VacancyQuery::new(profession, region_id, STATS_PAGE_SIZE)
            .with_lookback(CURRENT_WINDOW_DAYS);
        let current = self.search.search(query.clone()).await?;

        let currency = area_currency(region_id).unwrap_or(self.currency.as_str());
        let salary = salary_summary(&current.items, currency);
        let skills = top_skills(&current.items, TOP_SKILLS);

        let prior = self
            .search
            .search(query.with_lookback(PRIOR_WINDOW_DAYS))
            .await?;
        let trend = trend_indicator(current.found, prior.found);

        info!(
            profession,
            current = current.found,
            prior = prior.found,
            %trend,
            "profession stats computed"
        );

        Ok(VacancyStatsResult {
            profession: profession.to_string(),
            vacancy_count: current.found,
            average_salary: salary.average,
            median_salary: salary.median,
            trend,
            top_skills: skills,
            search_url: public_search_url(&self.public_url, profession, region_id)?,
        })
    }
}
