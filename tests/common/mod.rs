#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use career_guide::{
    config::{Config, JobSearchConfig, LlmConfig},
    database::pool::create_memory_pool,
    error::{Error, Result},
    models::vacancy::{VacancyPage, VacancyQuery},
    routes,
    services::{
        job_search_service::VacancySearch,
        llm_service::{ChatCompletion, ChatRequest},
    },
    AppState,
};
use serde_json::Value as JsonValue;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test_secret_key";

pub fn test_config(templates_dir: &str) -> Config {
    Config {
        server_address: "127.0.0.1:0".into(),
        database_url: "sqlite::memory:".into(),
        jwt_secret: JWT_SECRET.into(),
        token_ttl_hours: 1,
        public_rps: 1000,
        trust_forwarded_for: false,
        cors_origins: Vec::new(),
        templates_dir: templates_dir.into(),
        static_dir: "static".into(),
        max_tree_steps: 10,
        default_area_id: 40,
        salary_currency: "KZT".into(),
        vacancy_regions: vec![40, 113, 159],
        llm: LlmConfig {
            api_key: "sk-test".into(),
            organization: None,
            base_url: "http://127.0.0.1:9/v1".into(),
            model: "gpt-4o".into(),
            fast_model: "gpt-3.5-turbo".into(),
            timeout_secs: 5,
        },
        job_search: JobSearchConfig {
            base_url: "http://127.0.0.1:9".into(),
            public_url: "https://hh.kz".into(),
            user_agent: "career-guide-tests".into(),
            timeout_secs: 5,
        },
    }
}

/// Replies with queued answers in order and records every request.
#[derive(Default)]
pub struct ScriptedChat {
    replies: Mutex<VecDeque<Result<String>>>,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedChat {
    pub fn new(replies: Vec<&str>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.to_string())).collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::from(vec![Err(Error::Upstream {
                service: "LLM API",
                status: 503,
                body: "overloaded".into(),
            })])),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatCompletion for ScriptedChat {
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Internal("no scripted reply left".into())))
    }
}

type SearchFn = dyn Fn(&VacancyQuery) -> Result<VacancyPage> + Send + Sync;

/// Answers searches through a closure and records the queries it saw.
pub struct FakeSearch {
    respond: Box<SearchFn>,
    pub queries: Mutex<Vec<VacancyQuery>>,
}

impl FakeSearch {
    pub fn new(respond: impl Fn(&VacancyQuery) -> Result<VacancyPage> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            respond: Box::new(respond),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn empty() -> Arc<Self> {
        Self::new(|_| Ok(VacancyPage::default()))
    }

    pub fn recorded(&self) -> Vec<VacancyQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl VacancySearch for FakeSearch {
    async fn search(&self, query: VacancyQuery) -> Result<VacancyPage> {
        let page = (self.respond)(&query);
        self.queries.lock().unwrap().push(query);
        page
    }
}

/// A templates directory unique to one test, with the given views.
pub fn templates_dir(name: &str, views: &[(&str, &str)]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("career-guide-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).expect("templates dir");
    for (view, html) in views {
        std::fs::write(dir.join(format!("{}.html", view)), html).expect("write view");
    }
    dir
}

pub async fn app_with_config(
    config: Config,
    chat: Arc<ScriptedChat>,
    search: Arc<FakeSearch>,
) -> Router {
    let pool = create_memory_pool().await.expect("memory pool");
    let state = AppState::with_clients(config, pool, chat, search);
    routes::router(state)
}

pub async fn app_with(
    chat: Arc<ScriptedChat>,
    search: Arc<FakeSearch>,
    templates: &str,
) -> Router {
    app_with_config(test_config(templates), chat, search).await
}

pub async fn app(chat: Arc<ScriptedChat>, search: Arc<FakeSearch>) -> Router {
    app_with(chat, search, "templates").await
}

pub fn post_json(uri: &str, body: &JsonValue) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, JsonValue) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            JsonValue::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}
