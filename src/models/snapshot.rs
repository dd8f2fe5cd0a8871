use crate::external::history_provider::Interval;

/// Which of the three snapshot endpoint shapes this process serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// `GET /?ticker=` — 30-day daily window, news headlines included.
    Daily,
    /// `GET /?symbol=` — 5-day hourly window, empty-state page when the
    /// parameter is absent.
    Intraday,
    /// `GET /{ticker}` — 5-day hourly window, 404 plain text on no data.
    PathBased,
}

impl Variant {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "daily" => Some(Variant::Daily),
            "intraday" => Some(Variant::Intraday),
            "path" => Some(Variant::PathBased),
            _ => None,
        }
    }
}

/// Everything that differs between the three variants: window, interval,
/// parameter name, default ticker, news, token cap, and page styling.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotOptions {
    pub variant: Variant,
    pub window_days: u32,
    pub interval: Interval,
    pub ticker_param: &'static str,
    pub default_ticker: Option<&'static str>,
    pub include_news: bool,
    pub max_completion_tokens: u32,
    pub prefill_form: bool,
    pub grid_lines: bool,
    pub thin_x_labels: bool,
    pub currency_ticks: bool,
}

impl SnapshotOptions {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Daily => Self {
                variant,
                window_days: 30,
                interval: Interval::Daily,
                ticker_param: "ticker",
                default_ticker: Some("AAPL"),
                include_news: true,
                max_completion_tokens: 250,
                prefill_form: true,
                grid_lines: true,
                thin_x_labels: true,
                currency_ticks: false,
            },
            Variant::Intraday => Self {
                variant,
                window_days: 5,
                interval: Interval::Hourly,
                ticker_param: "symbol",
                default_ticker: None,
                include_news: false,
                max_completion_tokens: 120,
                prefill_form: true,
                grid_lines: false,
                thin_x_labels: false,
                currency_ticks: true,
            },
            Variant::PathBased => Self {
                variant,
                window_days: 5,
                interval: Interval::Hourly,
                ticker_param: "ticker",
                default_ticker: Some("INTC"),
                include_news: false,
                max_completion_tokens: 60,
                prefill_form: false,
                grid_lines: false,
                thin_x_labels: false,
                currency_ticks: false,
            },
        }
    }

    /// Resolve the raw request parameter into the ticker to snapshot.
    /// `None` means the variant has no default and the empty-state page
    /// should be rendered instead.
    pub fn resolve_ticker(&self, raw: Option<&str>) -> Option<String> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(raw.to_uppercase()),
            None => self.default_ticker.map(str::to_string),
        }
    }
}
