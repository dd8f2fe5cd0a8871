use axum::http::StatusCode;
use axum::response::IntoResponse;
use thiserror::Error;

/// Request-fatal failures. External-call problems are caught and degraded
/// at their call sites; what reaches this type is genuinely internal and
/// surfaces as a 5xx.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("chart rendering failed: {0}")]
    Chart(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::Chart(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
        }
    }
}

/// Commentary-call failures. Each one is folded into the page's
/// placeholder string rather than surfaced to the client.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("OPENAI_API_KEY is not set")]
    MissingCredential,
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("malformed response: {0}")]
    InvalidResponse(String),
}
