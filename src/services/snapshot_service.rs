use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::models::news::NewsDigest;
use crate::models::price::PriceSeries;
use crate::services::{chart_service, llm_service};
use crate::state::AppState;

/// Everything the page needs for a resolved ticker.
#[derive(Debug)]
pub enum Snapshot {
    /// The provider had nothing for this ticker: unknown symbol, empty
    /// series, or a fetch failure.
    NoData,
    Ready {
        chart_base64: String,
        commentary: String,
        news: Option<NewsDigest>,
    },
}

/// Run the per-request workflow: fetch history, flatten columns, build
/// the series, render the chart, fetch headlines, generate commentary.
pub async fn build_snapshot(state: &AppState, ticker: &str) -> Result<Snapshot, AppError> {
    let options = &state.options;

    // Any provider failure is treated as "no data for this ticker".
    let mut frame = match state
        .history_provider
        .fetch_history(ticker, options.window_days, options.interval)
        .await
    {
        Ok(frame) => frame,
        Err(e) => {
            error!("Error fetching stock data for {}: {}", ticker, e);
            return Ok(Snapshot::NoData);
        }
    };

    // Multi-symbol responses label columns on two levels; collapse to the
    // first level before any column access.
    frame.flatten_columns();

    let Some(closes) = frame.column("Close") else {
        warn!("History frame for {} has no Close column", ticker);
        return Ok(Snapshot::NoData);
    };

    let series = PriceSeries::from_closes(frame.index(), closes);
    if series.is_empty() {
        info!("No stock data found for {}", ticker);
        return Ok(Snapshot::NoData);
    }

    let (Some(first_close), Some(last_close), Some(percent_change)) = (
        series.first_close(),
        series.last_close(),
        series.percent_change(),
    ) else {
        return Ok(Snapshot::NoData);
    };

    let chart_base64 = chart_service::render_price_chart(ticker, &series, options)?;

    let news = if options.include_news {
        Some(state.news_service.recent_headlines(ticker).await)
    } else {
        None
    };

    let prompt = llm_service::build_commentary_prompt(
        ticker,
        options.window_days,
        first_close,
        last_close,
        percent_change,
        news.as_ref(),
    );

    let commentary = match state.llm_service.market_commentary(prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Commentary generation failed for {}: {}", ticker, e);
            llm_service::fallback_commentary(&e)
        }
    };

    Ok(Snapshot::Ready {
        chart_base64,
        commentary,
        news,
    })
}
