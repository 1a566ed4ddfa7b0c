pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::error::Result;
use crate::services::{
    account_service::AccountService,
    assistant_service::AssistantService,
    career_service::CareerService,
    job_search_service::{HhClient, VacancySearch},
    llm_service::{ChatCompletion, OpenAiClient},
    page_service::PageService,
    stats_service::StatsService,
    tree_service::TreeService,
    vacancy_lookup_service::VacancyLookupService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pool: SqlitePool,
    pub career_service: CareerService,
    pub stats_service: StatsService,
    pub tree_service: TreeService,
    pub vacancy_lookup_service: VacancyLookupService,
    pub assistant_service: AssistantService,
    pub account_service: AccountService,
    pub page_service: PageService,
}

impl AppState {
    pub fn new(config: Config, pool: SqlitePool) -> Result<Self> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(config.llm.timeout_secs.max(config.job_search.timeout_secs)))
            .build()?;

        let llm: Arc<dyn ChatCompletion> =
            Arc::new(OpenAiClient::new(config.llm.clone(), http_client.clone()));
        let search: Arc<dyn VacancySearch> =
            Arc::new(HhClient::new(config.job_search.clone(), http_client));

        Ok(Self::with_clients(config, pool, llm, search))
    }

    /// Builds the state around already constructed upstream clients.
    pub fn with_clients(
        config: Config,
        pool: SqlitePool,
        llm: Arc<dyn ChatCompletion>,
        search: Arc<dyn VacancySearch>,
    ) -> Self {
        let career_service = CareerService::new(llm.clone(), config.llm.fast_model.clone());
        let assistant_service = AssistantService::new(llm.clone(), config.llm.fast_model.clone());
        let tree_service = TreeService::new(llm, config.llm.model.clone(), config.max_tree_steps);
        let stats_service = StatsService::new(
            search.clone(),
            config.salary_currency.clone(),
            config.job_search.public_url.clone(),
        );
        let vacancy_lookup_service = VacancyLookupService::new(search, config.vacancy_regions.clone());
        let account_service = AccountService::new(pool.clone());
        let page_service = PageService::new(config.templates_dir.clone());

        Self {
            config: Arc::new(config),
            pool,
            career_service,
            stats_service,
            tree_service,
            vacancy_lookup_service,
            assistant_service,
            account_service,
            page_service,
        }
    }
}
