//! Full snapshot workflow against a stub history provider, with news and
//! commentary credentials deliberately unconfigured so every external
//! degradation path is exercised without touching the network.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};

use stocksnap::external::frame::{ColumnLabel, HistoryFrame};
use stocksnap::external::history_provider::{HistoryProvider, Interval, ProviderError};
use stocksnap::models::snapshot::{SnapshotOptions, Variant};
use stocksnap::services::llm_service::{LlmConfig, LlmService};
use stocksnap::services::news_service::{NewsConfig, NewsService};
use stocksnap::services::page_service;
use stocksnap::services::snapshot_service::{self, Snapshot};
use stocksnap::state::AppState;

struct FixedProvider {
    closes: Vec<Option<f64>>,
    fail: bool,
}

#[async_trait]
impl HistoryProvider for FixedProvider {
    async fn fetch_history(
        &self,
        ticker: &str,
        _window_days: u32,
        _interval: Interval,
    ) -> Result<HistoryFrame, ProviderError> {
        if self.fail {
            return Err(ProviderError::BadResponse("missing result".to_string()));
        }
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let index = (0..self.closes.len())
            .map(|i| start + Duration::days(i as i64))
            .collect();
        let mut frame = HistoryFrame::new(index);
        // Same two-level label shape the live provider produces.
        frame.push_column(ColumnLabel::multi(["Close", ticker]), self.closes.clone());
        Ok(frame)
    }
}

fn state_with(provider: FixedProvider, variant: Variant) -> AppState {
    let options = SnapshotOptions::for_variant(variant);
    AppState {
        options,
        history_provider: Arc::new(provider),
        news_service: Arc::new(NewsService::new(NewsConfig {
            api_key: None,
            window_days: 30,
            page_size: 5,
        })),
        llm_service: Arc::new(LlmService::new(LlmConfig {
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            max_tokens: options.max_completion_tokens,
            temperature: 0.7,
        })),
    }
}

fn rising_closes(len: usize) -> Vec<Option<f64>> {
    (0..len).map(|i| Some(100.0 + i as f64)).collect()
}

#[tokio::test]
async fn daily_snapshot_renders_chart_placeholder_and_advisory() {
    let state = state_with(
        FixedProvider {
            closes: rising_closes(30),
            fail: false,
        },
        Variant::Daily,
    );

    let snapshot = snapshot_service::build_snapshot(&state, "AAPL").await.unwrap();
    let Snapshot::Ready {
        chart_base64,
        commentary,
        news,
    } = snapshot
    else {
        panic!("expected a ready snapshot");
    };

    // Missing OPENAI_API_KEY degrades to the exact placeholder string.
    assert_eq!(
        commentary,
        "(AI summary unavailable: OPENAI_API_KEY is not set)"
    );

    // Missing NEWSAPI_KEY degrades to the exact advisory string.
    let advisory = news.as_ref().and_then(|digest| digest.advisory_text());
    assert_eq!(
        advisory,
        Some("⚠️ No API key found (missing NEWSAPI_KEY).")
    );

    let html = page_service::snapshot_page(
        &state.options,
        "AAPL",
        &chart_base64,
        &commentary,
        advisory,
    );
    assert!(html.contains("data:image/png;base64,"));
    assert!(html.contains("Market Recap:"));
    assert!(html.contains("class='warning'"));
    assert!(html.contains("⚠️ No API key found (missing NEWSAPI_KEY)."));
}

#[tokio::test]
async fn provider_failure_is_no_data_and_the_page_has_no_chart() {
    let state = state_with(
        FixedProvider {
            closes: Vec::new(),
            fail: true,
        },
        Variant::Daily,
    );

    let snapshot = snapshot_service::build_snapshot(&state, "ZZZZ").await.unwrap();
    assert!(matches!(snapshot, Snapshot::NoData));

    let html = page_service::no_data_fragment("ZZZZ");
    assert!(!html.contains("<img"));
    assert!(html.contains("No stock data found for ZZZZ"));
}

#[tokio::test]
async fn all_missing_closes_are_no_data() {
    let state = state_with(
        FixedProvider {
            closes: vec![None, None, None],
            fail: false,
        },
        Variant::Daily,
    );

    let snapshot = snapshot_service::build_snapshot(&state, "AAPL").await.unwrap();
    assert!(matches!(snapshot, Snapshot::NoData));
}

#[tokio::test]
async fn intraday_snapshot_carries_no_news_and_no_warning() {
    let state = state_with(
        FixedProvider {
            closes: rising_closes(10),
            fail: false,
        },
        Variant::Intraday,
    );

    let snapshot = snapshot_service::build_snapshot(&state, "MSFT").await.unwrap();
    let Snapshot::Ready {
        chart_base64,
        commentary,
        news,
    } = snapshot
    else {
        panic!("expected a ready snapshot");
    };

    assert!(news.is_none());

    let html = page_service::snapshot_page(&state.options, "MSFT", &chart_base64, &commentary, None);
    assert!(html.contains("name=\"symbol\""));
    assert!(!html.contains("class='warning'"));
}

#[tokio::test]
async fn identical_requests_render_byte_identical_pages() {
    let state = state_with(
        FixedProvider {
            closes: rising_closes(30),
            fail: false,
        },
        Variant::Daily,
    );

    let mut pages = Vec::new();
    for _ in 0..2 {
        let Snapshot::Ready {
            chart_base64,
            commentary,
            news,
        } = snapshot_service::build_snapshot(&state, "AAPL").await.unwrap()
        else {
            panic!("expected a ready snapshot");
        };
        let advisory = news.as_ref().and_then(|digest| digest.advisory_text());
        pages.push(page_service::snapshot_page(
            &state.options,
            "AAPL",
            &chart_base64,
            &commentary,
            advisory,
        ));
    }

    assert_eq!(pages[0], pages[1]);
}
