use anyhow::Context;
use std::env;
use std::time::Duration;
use tracing::warn;

use crate::strategy::StrategyKind;

/// Process configuration, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origin: String,
    pub service_name: String,
    pub bot_name: String,
    pub strategy: StrategyKind,
    /// Idle matches are dropped after this long; zero keeps them forever
    pub game_ttl: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_allowed_origin: "http://localhost:3000".to_string(),
            service_name: "deckbot".to_string(),
            bot_name: "Deckbot".to_string(),
            strategy: StrategyKind::Baseline,
            game_ttl: Duration::from_secs(3600),
        }
    }
}

fn var_or(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: String) -> String {
    lookup(name).unwrap_or_else(|| {
        warn!("{name} not set, using default {default:?}");
        default
    })
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build settings from any key lookup; missing keys fall back to
    /// defaults, malformed ones are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Settings::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {raw:?}"))?,
            None => defaults.port,
        };

        let game_ttl = match lookup("GAME_TTL_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map(Duration::from_secs)
                .with_context(|| format!("GAME_TTL_SECS must be a number of seconds, got {raw:?}"))?,
            None => defaults.game_ttl,
        };

        let strategy = match lookup("BOT_STRATEGY") {
            Some(raw) => raw.parse::<StrategyKind>().unwrap_or_else(|err| {
                warn!("{err}, falling back to {}", StrategyKind::Baseline);
                StrategyKind::Baseline
            }),
            None => defaults.strategy,
        };

        Ok(Self {
            host: var_or(&lookup, "HOST", defaults.host),
            port,
            cors_allowed_origin: var_or(&lookup, "CORS_ALLOWED_ORIGIN", defaults.cors_allowed_origin),
            service_name: lookup("SERVICE_NAME").unwrap_or(defaults.service_name),
            bot_name: var_or(&lookup, "BOT_NAME", defaults.bot_name),
            strategy,
            game_ttl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.strategy, StrategyKind::Baseline);
        assert_eq!(settings.game_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn test_game_ttl_override_and_error() {
        let settings = Settings::from_lookup(lookup(&[("GAME_TTL_SECS", "0")])).unwrap();
        assert_eq!(settings.game_ttl, Duration::ZERO);
        assert!(Settings::from_lookup(lookup(&[("GAME_TTL_SECS", "soon")])).is_err());
    }

    #[test]
    fn test_reads_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("BOT_NAME", "Shuffler"),
            ("BOT_STRATEGY", "village_smithy"),
        ]))
        .unwrap();
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.bot_name, "Shuffler");
        assert_eq!(settings.strategy, StrategyKind::VillageSmithy);
    }

    #[test]
    fn test_unknown_strategy_falls_back() {
        let settings = Settings::from_lookup(lookup(&[("BOT_STRATEGY", "yolo")])).unwrap();
        assert_eq!(settings.strategy, StrategyKind::Baseline);
    }

    #[test]
    fn test_bad_port_is_an_error() {
        assert!(Settings::from_lookup(lookup(&[("PORT", "eighty")])).is_err());
    }
}
