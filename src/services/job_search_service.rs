use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::config::JobSearchConfig;
use crate::error::{Error, Result};
use crate::models::vacancy::{HhSearchResponse, VacancyPage, VacancyQuery};

/// A vacancy search backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VacancySearch: Send + Sync {
    async fn search(&self, query: VacancyQuery) -> Result<VacancyPage>;
}

/// Client for the public hh.ru `/vacancies` API.
#[derive(Clone)]
pub struct HhClient {
    client: Client,
    config: JobSearchConfig,
}

impl HhClient {
    pub fn new(config: JobSearchConfig, client: Client) -> Self {
        Self { client, config }
    }

    pub fn search_url(&self, query: &VacancyQuery) -> Result<Url> {
        let mut url = endpoint_url(&self.config.base_url, "vacancies", "HH_BASE_URL")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("text", &query.profession)
                .append_pair("area", &query.region_id.to_string())
                .append_pair("per_page", &query.per_page.to_string());
            if let Some(days) = query.lookback_days {
                pairs.append_pair("period", &days.to_string());
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl VacancySearch for HhClient {
    #[instrument(skip(self, query), fields(text = %query.profession, area = query.region_id))]
    async fn search(&self, query: VacancyQuery) -> Result<VacancyPage> {
        let url = self.search_url(&query)?;
        let response = self
            .client
            .get(url)
            .header(header::USER_AGENT, &self.config.user_agent)
            .header(header::ACCEPT, "application/json")
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                service: "hh.ru",
                status: status.as_u16(),
                body,
            });
        }

        let parsed = response.json::<HhSearchResponse>().await?;
        debug!(found = parsed.found, items = parsed.items.len(), "vacancy search done");
        Ok(parsed.into())
    }
}

/// Appends `path` to `base`, keeping any path prefix already on `base`.
fn endpoint_url(base: &str, path: &str, setting: &str) -> Result<Url> {
    Url::parse(&format!("{}/{}", base.trim_end_matches('/'), path))
        .map_err(|e| Error::Config(format!("Invalid {}: {}", setting, e)))
}

/// Human-facing search link on the public job site for one profession.
pub fn public_search_url(public_url: &str, profession: &str, region_id: u32) -> Result<String> {
    let mut url = endpoint_url(public_url, "search/vacancy", "HH_PUBLIC_URL")?;
    url.query_pairs_mut()
        .append_pair("text", profession)
        .append_pair("area", &region_id.to_string());
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HhClient {
        HhClient::new(
            JobSearchConfig {
                base_url: "https://api.hh.ru".into(),
                public_url: "https://hh.kz".into(),
                user_agent: "test".into(),
                timeout_secs: 5,
            },
            Client::new(),
        )
    }

    #[test]
    fn builds_query_with_lookback() {
        let q = VacancyQuery::new("Data Analyst", 40, 100).with_lookback(30);
        let url = client().search_url(&q).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.hh.ru/vacancies?text=Data+Analyst&area=40&per_page=100&period=30"
        );
    }

    #[test]
    fn omits_period_without_lookback() {
        let q = VacancyQuery::new("Welder", 159, 10);
        let url = client().search_url(&q).unwrap();
        assert_eq!(url.query(), Some("text=Welder&area=159&per_page=10"));
    }

    #[test]
    fn base_url_path_prefix_is_kept() {
        let client = HhClient::new(
            JobSearchConfig {
                base_url: "https://proxy.local/hh".into(),
                public_url: "https://proxy.local/site/".into(),
                user_agent: "test".into(),
                timeout_secs: 5,
            },
            Client::new(),
        );
        let url = client.search_url(&VacancyQuery::new("Welder", 40, 10)).unwrap();
        assert_eq!(url.path(), "/hh/vacancies");
        assert_eq!(
            public_search_url("https://proxy.local/site/", "Welder", 40).unwrap(),
            "https://proxy.local/site/search/vacancy?text=Welder&area=40"
        );
    }

    #[test]
    fn public_link_encodes_spaces_as_plus() {
        assert_eq!(
            public_search_url("https://hh.kz", "Data Analyst", 40).unwrap(),
            "https://hh.kz/search/vacancy?text=Data+Analyst&area=40"
        );
    }
}
