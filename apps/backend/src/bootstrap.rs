use std::env;
use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static DOTENV_INIT: OnceLock<()> = OnceLock::new();
static TRACING_INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_FILTER: &str = "info,actix_web=info";

/// How log lines are rendered, chosen by `RUST_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn for_env(rust_env: Option<&str>) -> Self {
        match rust_env {
            Some("production") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Load environment variables from .env file exactly once
pub fn load_dotenv() {
    DOTENV_INIT.get_or_init(|| {
        dotenv::dotenv().ok();
    });
}

/// Initialize tracing exactly once
pub fn init_tracing() {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let format = LogFormat::for_env(env::var("RUST_ENV").ok().as_deref());

        let registry = tracing_subscriber::registry().with(filter);
        match format {
            LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
            LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_only_in_production() {
        assert_eq!(LogFormat::for_env(Some("production")), LogFormat::Json);
        assert_eq!(LogFormat::for_env(Some("development")), LogFormat::Pretty);
        assert_eq!(LogFormat::for_env(None), LogFormat::Pretty);
    }
}
