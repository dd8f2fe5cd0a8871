use chrono::{Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};
use url::Url;

use crate::models::news::{NewsDigest, WARNING_GLYPH};

const EVERYTHING_ENDPOINT: &str = "https://newsapi.org/v2/everything";

/// Configuration for the headline fetch.
#[derive(Debug, Clone)]
pub struct NewsConfig {
    pub api_key: Option<String>,
    pub window_days: i64,
    pub page_size: usize,
}

impl NewsConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("NEWSAPI_KEY").ok(),
            window_days: 30,
            page_size: 5,
        }
    }
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    title: Option<String>,
}

pub struct NewsService {
    config: NewsConfig,
    client: Client,
}

impl NewsService {
    pub fn new(config: NewsConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Fetch up to `page_size` recent English headlines for the ticker,
    /// newest first. Every failure class maps to a distinct advisory; the
    /// caller never sees an error.
    ///
    /// The query is a plain keyword search on the symbol, so short
    /// tickers can match unrelated headlines.
    pub async fn recent_headlines(&self, ticker: &str) -> NewsDigest {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return NewsDigest::advisory(format!(
                "{WARNING_GLYPH} No API key found (missing NEWSAPI_KEY)."
            ));
        };

        let from_date = (Utc::now() - Duration::days(self.config.window_days))
            .format("%Y-%m-%d")
            .to_string();
        let page_size = self.config.page_size.to_string();

        let url = match Url::parse_with_params(
            EVERYTHING_ENDPOINT,
            &[
                ("q", ticker),
                ("from", from_date.as_str()),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
                ("apiKey", api_key),
            ],
        ) {
            Ok(url) => url,
            Err(e) => {
                return NewsDigest::advisory(format!(
                    "{WARNING_GLYPH} Network error while fetching headlines: {e}"
                ))
            }
        };

        info!("Fetching recent headlines for {}", ticker);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Headline fetch failed for {}: {}", ticker, e);
                return NewsDigest::advisory(format!(
                    "{WARNING_GLYPH} Network error while fetching headlines: {e}"
                ));
            }
        };

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let message = response
                .json::<EverythingResponse>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| "unknown error".to_string());
            warn!("NewsAPI returned {} for {}: {}", status, ticker, message);
            return NewsDigest::advisory(format!(
                "{WARNING_GLYPH} NewsAPI returned {}: {}",
                status.as_u16(),
                message
            ));
        }

        let body = match response.json::<EverythingResponse>().await {
            Ok(body) => body,
            Err(e) => {
                return NewsDigest::advisory(format!(
                    "{WARNING_GLYPH} Network error while fetching headlines: {e}"
                ))
            }
        };

        digest_from_body(body)
    }
}

/// Map a parsed response body onto headlines or the advisory taxonomy.
fn digest_from_body(body: EverythingResponse) -> NewsDigest {
    if body.status.as_deref() != Some("ok") {
        let message = body.message.unwrap_or_else(|| "unknown issue".to_string());
        return if message.contains("rateLimited") {
            NewsDigest::advisory(format!(
                "{WARNING_GLYPH} API quota reached for today (NewsAPI free plan)."
            ))
        } else if message.contains("apiKeyInvalid") || message.contains("apiKeyMissing") {
            NewsDigest::advisory(format!("{WARNING_GLYPH} Invalid or missing NewsAPI key."))
        } else {
            NewsDigest::advisory(format!("{WARNING_GLYPH} NewsAPI issue: {message}"))
        };
    }

    let headlines: Vec<String> = body
        .articles
        .into_iter()
        .filter_map(|article| article.title)
        .collect();

    if headlines.is_empty() {
        return NewsDigest::advisory(format!(
            "{WARNING_GLYPH} No recent headlines available for this ticker."
        ));
    }

    NewsDigest::Headlines(headlines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: serde_json::Value) -> EverythingResponse {
        serde_json::from_value(json).unwrap()
    }

    #[tokio::test]
    async fn missing_key_yields_the_exact_advisory() {
        let service = NewsService::new(NewsConfig {
            api_key: None,
            window_days: 30,
            page_size: 5,
        });
        let digest = service.recent_headlines("AAPL").await;
        assert_eq!(
            digest,
            NewsDigest::Advisory("⚠️ No API key found (missing NEWSAPI_KEY).".to_string())
        );
    }

    #[test]
    fn ok_body_with_titles_becomes_headlines() {
        let digest = digest_from_body(body(serde_json::json!({
            "status": "ok",
            "articles": [
                { "title": "Apple beats expectations" },
                { "title": null },
                { "title": "New iPhone launch" }
            ]
        })));
        assert_eq!(
            digest,
            NewsDigest::Headlines(vec![
                "Apple beats expectations".to_string(),
                "New iPhone launch".to_string(),
            ])
        );
    }

    #[test]
    fn ok_body_without_articles_is_the_empty_advisory() {
        let digest = digest_from_body(body(serde_json::json!({
            "status": "ok",
            "articles": []
        })));
        assert_eq!(
            digest,
            NewsDigest::Advisory(
                "⚠️ No recent headlines available for this ticker.".to_string()
            )
        );
    }

    #[test]
    fn rate_limited_message_maps_to_the_quota_advisory() {
        let digest = digest_from_body(body(serde_json::json!({
            "status": "error",
            "message": "You have been rateLimited until tomorrow"
        })));
        assert_eq!(
            digest,
            NewsDigest::Advisory(
                "⚠️ API quota reached for today (NewsAPI free plan).".to_string()
            )
        );
    }

    #[test]
    fn invalid_key_messages_map_to_the_key_advisory() {
        for message in ["apiKeyInvalid: nope", "apiKeyMissing"] {
            let digest = digest_from_body(body(serde_json::json!({
                "status": "error",
                "message": message
            })));
            assert_eq!(
                digest,
                NewsDigest::Advisory("⚠️ Invalid or missing NewsAPI key.".to_string())
            );
        }
    }

    #[test]
    fn other_error_statuses_carry_the_provider_message() {
        let digest = digest_from_body(body(serde_json::json!({
            "status": "error",
            "message": "parameterInvalid: from"
        })));
        assert_eq!(
            digest,
            NewsDigest::Advisory("⚠️ NewsAPI issue: parameterInvalid: from".to_string())
        );
    }

    #[test]
    fn error_status_without_message_uses_the_unknown_issue_text() {
        let digest = digest_from_body(body(serde_json::json!({ "status": "error" })));
        assert_eq!(
            digest,
            NewsDigest::Advisory("⚠️ NewsAPI issue: unknown issue".to_string())
        );
    }
}
