use async_trait::async_trait;
use thiserror::Error;

use crate::external::frame::HistoryFrame;

/// Sampling interval for a history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    Daily,
    Hourly,
}

impl Interval {
    /// Interval code understood by the chart endpoint.
    pub fn provider_code(&self) -> &'static str {
        match self {
            Interval::Daily => "1d",
            Interval::Hourly => "1h",
        }
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("rate limited")]
    RateLimited,
}

#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetch a close-price history covering `window_days` at `interval`.
    async fn fetch_history(
        &self,
        ticker: &str,
        window_days: u32,
        interval: Interval,
    ) -> Result<HistoryFrame, ProviderError>;
}
