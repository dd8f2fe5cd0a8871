use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::LlmError;
use crate::models::news::NewsDigest;

const CHAT_COMPLETIONS_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Configuration for the commentary call. The token cap varies by
/// snapshot variant; model and temperature do not.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl LlmConfig {
    pub fn from_env(max_tokens: u32) -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            model: "gpt-4o-mini".to_string(),
            max_tokens,
            temperature: 0.7,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

pub struct LlmService {
    config: LlmConfig,
    client: Client,
}

impl LlmService {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Single-attempt chat completion. The caller substitutes the page
    /// placeholder on any error; nothing here retries or times out.
    pub async fn market_commentary(&self, prompt: String) -> Result<String, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(LlmError::MissingCredential)?;

        info!(
            "Requesting market commentary (model: {}, max_tokens: {})",
            self.config.model, self.config.max_tokens
        );

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(CHAT_COMPLETIONS_ENDPOINT)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let content = body
            .choices
            .first()
            .ok_or_else(|| LlmError::InvalidResponse("no choices in response".to_string()))?
            .message
            .content
            .trim()
            .to_string();

        Ok(content)
    }
}

/// Placeholder commentary used whenever the model call fails.
pub fn fallback_commentary(err: &LlmError) -> String {
    format!("(AI summary unavailable: {err})")
}

/// Analyst prompt embedding the ticker, the window move, and the headline
/// block when the variant carries news.
pub fn build_commentary_prompt(
    ticker: &str,
    window_days: u32,
    first_close: f64,
    last_close: f64,
    percent_change: f64,
    news: Option<&NewsDigest>,
) -> String {
    let move_line = format!(
        "Recent {window_days}-day move: ${first_close:.2} → ${last_close:.2} ({percent_change:.2}%)"
    );

    match news {
        Some(digest) => format!(
            "You are a professional equity research analyst writing a short market note.\n\
             \n\
             Ticker: {ticker}\n\
             {move_line}\n\
             \n\
             Recent news headlines:\n\
             {block}\n\
             \n\
             Write a concise, professional commentary explaining what likely drove this price performance.\n\
             Follow these rules:\n\
             - Base reasoning on the specific headlines above (e.g., product launches, earnings, analyst calls).\n\
             - Avoid vague platitudes like \"investor sentiment\" unless clearly supported.\n\
             - Always finish your response in complete sentences — never cut off mid-thought.\n\
             - Maintain a polished institutional tone.\n\
             - End with one analytical takeaway about near-term direction.",
            block = digest.prompt_block()
        ),
        None => format!(
            "You are a professional equity research analyst writing a short market note.\n\
             \n\
             Ticker: {ticker}\n\
             {move_line}\n\
             \n\
             Write a concise, professional commentary on this recent price move.\n\
             Follow these rules:\n\
             - Always finish your response in complete sentences — never cut off mid-thought.\n\
             - Maintain a polished institutional tone.\n\
             - End with one analytical takeaway about near-term direction."
        ),
    }
}
