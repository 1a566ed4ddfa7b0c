pub mod account_service;
pub mod assistant_service;
pub mod career_service;
pub mod job_search_service;
pub mod llm_service;
pub mod page_service;
pub mod stats_service;
pub mod tree_service;
pub mod vacancy_lookup_service;
