pub mod chart_service;
pub mod llm_service;
pub mod news_service;
pub mod page_service;
pub mod snapshot_service;
