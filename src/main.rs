use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use stocksnap::app;
use stocksnap::config::AppConfig;
use stocksnap::external::yahoo::YahooProvider;
use stocksnap::logging;
use stocksnap::models::snapshot::SnapshotOptions;
use stocksnap::services::llm_service::{LlmConfig, LlmService};
use stocksnap::services::news_service::{NewsConfig, NewsService};
use stocksnap::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    logging::init();

    let config = AppConfig::from_env();
    let options = SnapshotOptions::for_variant(config.variant);
    tracing::info!(
        "Serving snapshot variant {:?} ({}d window, news: {})",
        options.variant,
        options.window_days,
        options.include_news
    );

    let state = AppState {
        options,
        history_provider: Arc::new(YahooProvider::new()),
        news_service: Arc::new(NewsService::new(NewsConfig::from_env())),
        llm_service: Arc::new(LlmService::new(LlmConfig::from_env(
            options.max_completion_tokens,
        ))),
    };

    let app = app::create_app(state);

    let addr: SocketAddr = config.bind_addr().parse()?;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Stock snapshot service running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
