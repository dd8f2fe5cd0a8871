use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Console logging behind `RUST_LOG` (default `info`). Called before
/// anything else in `main` so startup lines are captured.
pub fn init() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
