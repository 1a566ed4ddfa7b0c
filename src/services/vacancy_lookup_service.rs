use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::dto::tree_dto::VacancySummary;
use crate::error::Result;
use crate::models::vacancy::{VacancyQuery, VacancyRecord};
use crate::services::job_search_service::VacancySearch;
use crate::utils::reply_parser::normalize_profession_label;

pub const LOOKUP_PAGE_SIZE: u32 = 10;

/// `from–to CUR`, a single bound with its currency, or nothing.
pub fn format_salary(record: &VacancyRecord) -> Option<String> {
    let amount = match (record.salary_from, record.salary_to) {
        (Some(from), Some(to)) => format!("{}–{}", from, to),
        (Some(bound), None) | (None, Some(bound)) => bound.to_string(),
        (None, None) => return None,
    };
    let currency = record.currency.as_deref().unwrap_or("");
    Some(format!("{} {}", amount, currency).trim().to_string())
}

impl From<VacancyRecord> for VacancySummary {
    fn from(record: VacancyRecord) -> Self {
        let salary = format_salary(&record);
        Self {
            name: record.title,
            company: record.employer_name,
            url: record.url,
            salary,
        }
    }
}

/// Finds live vacancies for a resolved profession, trying regions in
/// priority order.
#[derive(Clone)]
pub struct VacancyLookupService {
    search: Arc<dyn VacancySearch>,
    regions: Vec<u32>,
}

impl VacancyLookupService {
    pub fn new(search: Arc<dyn VacancySearch>, regions: Vec<u32>) -> Self {
        Self { search, regions }
    }

    /// Listings of the first region with any match; empty if none has one.
    #[instrument(skip(self))]
    pub async fn find_vacancies(&self, profession_label: &str) -> Result<Vec<VacancySummary>> {
        let profession = normalize_profession_label(profession_label);
        if profession.is_empty() {
            return Ok(Vec::new());
        }

        for &region in &self.regions {
            let page = self
                .search
                .search(VacancyQuery::new(profession.as_str(), region, LOOKUP_PAGE_SIZE))
                .await?;
            if page.items.is_empty() {
                debug!(region, "no vacancies, trying next region");
                continue;
            }
            info!(region, count = page.items.len(), %profession, "vacancies found");
            return Ok(page.items.into_iter().map(VacancySummary::from).collect());
        }

        info!(%profession, "no region returned vacancies");
        Ok(Vec::new())
    }
}
