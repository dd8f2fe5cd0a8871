use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::external::frame::{ColumnLabel, HistoryFrame};
use crate::external::history_provider::{HistoryProvider, Interval, ProviderError};

/// Yahoo Finance v8 chart-endpoint provider.
pub struct YahooProvider {
    client: reqwest::Client,
}

impl YahooProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

// Minimal response structs (only what we need)
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    #[allow(dead_code)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    symbol: String,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Map a day window onto Yahoo's coarse range codes.
fn range_code(window_days: u32) -> String {
    if window_days <= 5 {
        format!("{}d", window_days)
    } else if window_days <= 30 {
        "1mo".to_string()
    } else {
        "3mo".to_string()
    }
}

fn frame_from_response(body: ChartResponse) -> Result<HistoryFrame, ProviderError> {
    let result = body
        .chart
        .result
        .and_then(|mut r| r.pop())
        .ok_or_else(|| ProviderError::BadResponse("missing result".to_string()))?;

    let closes = result
        .indicators
        .quote
        .first()
        .ok_or_else(|| ProviderError::BadResponse("missing quote".to_string()))?
        .close
        .clone();

    // timestamp aligns with the close list by index
    let mut rows: Vec<(DateTime<Utc>, Option<f64>)> = Vec::with_capacity(result.timestamp.len());
    for (i, ts) in result.timestamp.iter().enumerate() {
        let at = DateTime::from_timestamp(*ts, 0)
            .ok_or_else(|| ProviderError::Parse("bad timestamp".to_string()))?;
        rows.push((at, closes.get(i).copied().flatten()));
    }
    rows.sort_by_key(|(at, _)| *at);

    let (index, close): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
    let mut frame = HistoryFrame::new(index);
    // Multi-symbol download shape: the close column carries the symbol as
    // a second label level. Consumers flatten before column access.
    frame.push_column(
        ColumnLabel::multi(["Close", result.meta.symbol.as_str()]),
        close,
    );
    Ok(frame)
}

#[async_trait]
impl HistoryProvider for YahooProvider {
    async fn fetch_history(
        &self,
        ticker: &str,
        window_days: u32,
        interval: Interval,
    ) -> Result<HistoryFrame, ProviderError> {
        let url = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{ticker}?range={}&interval={}",
            range_code(window_days),
            interval.provider_code()
        );
        debug!("Fetching {} history: {}", ticker, url);

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }

        let body = resp
            .json::<ChartResponse>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        frame_from_response(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART_BODY: &str = r#"{
        "chart": {
            "result": [{
                "meta": { "symbol": "AAPL" },
                "timestamp": [1704153600, 1704240000, 1704326400],
                "indicators": {
                    "quote": [{ "close": [185.64, null, 184.25] }]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn parses_chart_body_into_a_two_level_frame() {
        let body: ChartResponse = serde_json::from_str(CHART_BODY).unwrap();
        let mut frame = frame_from_response(body).unwrap();

        assert_eq!(frame.len(), 3);
        // The close column is labeled ("Close", "AAPL") until flattened.
        assert!(frame.column("Close").is_none());

        frame.flatten_columns();
        let closes = frame.column("Close").unwrap();
        assert_eq!(closes[0], Some(185.64));
        assert_eq!(closes[1], None);
        assert_eq!(closes[2], Some(184.25));
    }

    #[test]
    fn missing_result_is_a_bad_response() {
        let body: ChartResponse =
            serde_json::from_str(r#"{"chart":{"result":null,"error":{"code":"Not Found"}}}"#)
                .unwrap();
        let err = frame_from_response(body).unwrap_err();
        assert!(matches!(err, ProviderError::BadResponse(_)));
    }

    #[test]
    fn range_codes_cover_both_windows() {
        assert_eq!(range_code(5), "5d");
        assert_eq!(range_code(30), "1mo");
    }
}
