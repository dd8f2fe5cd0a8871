use serde::Serialize;

/// Warning glyph prefixed to every advisory string; the page's warning
/// paragraph is keyed off it.
pub const WARNING_GLYPH: &str = "⚠️";

/// Outcome of the headline fetch: either up to five headlines or a single
/// advisory explaining why none are available.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NewsDigest {
    Headlines(Vec<String>),
    Advisory(String),
}

impl NewsDigest {
    pub fn advisory(message: impl Into<String>) -> Self {
        NewsDigest::Advisory(message.into())
    }

    pub fn is_advisory(&self) -> bool {
        matches!(self, NewsDigest::Advisory(_))
    }

    /// Text block embedded in the commentary prompt: one `- headline`
    /// line per article, or the advisory standing in for them.
    pub fn prompt_block(&self) -> String {
        match self {
            NewsDigest::Headlines(headlines) => headlines
                .iter()
                .map(|h| format!("- {h}"))
                .collect::<Vec<_>>()
                .join("\n"),
            NewsDigest::Advisory(message) => message.clone(),
        }
    }

    /// Advisory text for the page's warning paragraph, if any.
    pub fn advisory_text(&self) -> Option<&str> {
        match self {
            NewsDigest::Advisory(message) if message.starts_with(WARNING_GLYPH) => Some(message),
            _ => None,
        }
    }
}
