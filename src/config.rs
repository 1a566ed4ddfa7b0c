use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

/// Connection settings for the OpenAI-compatible chat completion API.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub organization: Option<String>,
    pub base_url: String,
    /// Model used by the question tree and the profession step.
    pub model: String,
    /// Cheaper model used by the single-shot predictor and the assistant.
    pub fast_model: String,
    pub timeout_secs: u64,
}

/// Connection settings for the hh.ru vacancy search API.
#[derive(Debug, Clone)]
pub struct JobSearchConfig {
    pub base_url: String,
    /// Public site used to build human-facing search links.
    pub public_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub public_rps: u32,
    /// Key the rate limiter on `X-Forwarded-For` instead of the peer address.
    pub trust_forwarded_for: bool,
    /// Empty means any origin.
    pub cors_origins: Vec<String>,
    pub templates_dir: String,
    pub static_dir: String,
    pub max_tree_steps: usize,
    pub default_area_id: u32,
    /// Salary currency for areas without a known local currency.
    pub salary_currency: String,
    pub vacancy_regions: Vec<u32>,
    pub llm: LlmConfig,
    pub job_search: JobSearchConfig,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "127.0.0.1:8080"),
            database_url: get_env_or("DATABASE_URL", "sqlite://career.db?mode=rwc"),
            jwt_secret: get_env("JWT_SECRET")?,
            token_ttl_hours: get_env_parse_or("TOKEN_TTL_HOURS", 24)?,
            public_rps: get_env_parse_or("PUBLIC_RPS", 20)?,
            trust_forwarded_for: get_env_parse_or("TRUST_FORWARDED_FOR", false)?,
            cors_origins: get_env_or("CORS_ORIGINS", "")
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            templates_dir: get_env_or("TEMPLATES_DIR", "templates"),
            static_dir: get_env_or("STATIC_DIR", "static"),
            max_tree_steps: get_env_parse_or("MAX_TREE_STEPS", 10)?,
            default_area_id: get_env_parse_or("DEFAULT_AREA_ID", 40)?,
            salary_currency: get_env_or("SALARY_CURRENCY", "KZT"),
            vacancy_regions: parse_regions(&get_env_or("VACANCY_REGIONS", "40,113,159"))?,
            llm: LlmConfig {
                api_key: get_env("OPENAI_API_KEY")?,
                organization: env::var("OPENAI_ORG_ID").ok().filter(|v| !v.is_empty()),
                base_url: get_env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
                model: get_env_or("OPENAI_MODEL", "gpt-4o"),
                fast_model: get_env_or("OPENAI_FAST_MODEL", "gpt-3.5-turbo"),
                timeout_secs: get_env_parse_or("OPENAI_TIMEOUT_SECS", 120)?,
            },
            job_search: JobSearchConfig {
                base_url: get_env_or("HH_BASE_URL", "https://api.hh.ru"),
                public_url: get_env_or("HH_PUBLIC_URL", "https://hh.kz"),
                user_agent: get_env_or("HH_USER_AGENT", "career-guide/0.1"),
                timeout_secs: get_env_parse_or("HH_TIMEOUT_SECS", 10)?,
            },
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

/// Parses a comma separated list of hh area codes, e.g. `40,113,159`.
pub fn parse_regions(raw: &str) -> Result<Vec<u32>> {
    let regions = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .map_err(|e| Error::Config(format!("Invalid region code {:?}: {}", s, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    if regions.is_empty() {
        return Err(Error::Config("VACANCY_REGIONS must list at least one area".to_string()));
    }
    Ok(regions)
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
