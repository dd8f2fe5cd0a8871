use std::sync::Arc;

use crate::external::history_provider::HistoryProvider;
use crate::models::snapshot::SnapshotOptions;
use crate::services::llm_service::LlmService;
use crate::services::news_service::NewsService;

#[derive(Clone)]
pub struct AppState {
    pub options: SnapshotOptions,
    pub history_provider: Arc<dyn HistoryProvider>,
    pub news_service: Arc<NewsService>,
    pub llm_service: Arc<LlmService>,
}
