use tracing::warn;

use crate::models::snapshot::Variant;

/// Process-level configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub variant: Variant,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let variant = match std::env::var("SNAPSHOT_VARIANT") {
            Ok(raw) => Variant::parse(&raw).unwrap_or_else(|| {
                warn!("Unknown SNAPSHOT_VARIANT {:?}, falling back to daily", raw);
                Variant::Daily
            }),
            Err(_) => Variant::Daily,
        };

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);

        Self { variant, host, port }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_joins_host_and_port() {
        let config = AppConfig {
            variant: Variant::Daily,
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }
}
