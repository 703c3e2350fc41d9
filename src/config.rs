use std::str::FromStr;
use std::thread::available_parallelism;
use std::time::Duration;
use crate::batch::BatchConfig;
use crate::error::ConfigError;

pub const DEFAULT_ADDRESS: &str = "0.0.0.0:9977";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub address: String,
    pub ai_delay: Duration,
    pub monitor_period: Duration,
    pub games: usize,
    pub workers: usize,
    pub seed: Option<u64>,
    pub max_plies: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            address: DEFAULT_ADDRESS.to_string(),
            ai_delay: Duration::from_millis(300),
            monitor_period: Duration::from_secs(60),
            games: 10,
            workers: available_parallelism().map(|n| n.get()).unwrap_or(4),
            seed: None,
            max_plies: 5000,
        }
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, value }),
    }
}

fn parse_nonzero<T: FromStr + Default + PartialEq + ToString>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    let value = parse(lookup, key, default)?;
    if value == T::default() {
        return Err(ConfigError::Invalid { key, value: value.to_string() });
    }
    Ok(value)
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let defaults = Config::default();
        let seed = lookup("CHESS_SEED")
            .map(|value| value.trim().parse().map_err(|_| ConfigError::Invalid { key: "CHESS_SEED", value }))
            .transpose()?;
        Ok(Config {
            address: lookup("CHESS_ADDRESS").unwrap_or(defaults.address),
            ai_delay: Duration::from_millis(parse_nonzero(&lookup, "CHESS_AI_DELAY_MS", defaults.ai_delay.as_millis() as u64)?),
            monitor_period: Duration::from_secs(parse_nonzero(&lookup, "CHESS_MONITOR_SECS", defaults.monitor_period.as_secs())?),
            games: parse(&lookup, "CHESS_GAMES", defaults.games)?,
            workers: parse_nonzero(&lookup, "CHESS_WORKERS", defaults.workers)?,
            seed,
            max_plies: parse(&lookup, "CHESS_MAX_PLIES", defaults.max_plies)?,
        })
    }

    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    pub fn batch(&self) -> BatchConfig {
        BatchConfig {
            games: self.games,
            workers: self.workers,
            seed: self.seed_or_random(),
            max_plies: self.max_plies,
        }
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;
    use std::time::Duration;
    use crate::config::{Config, DEFAULT_ADDRESS};
    use crate::error::ConfigError;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.address, DEFAULT_ADDRESS);
        assert_eq!(config.games, 10);
        assert_eq!(config.seed, None);
        assert_eq!(config.max_plies, 5000);
        assert!(config.workers > 0);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("CHESS_ADDRESS", "127.0.0.1:9000"),
            ("CHESS_AI_DELAY_MS", "50"),
            ("CHESS_GAMES", "25"),
            ("CHESS_WORKERS", "2"),
            ("CHESS_SEED", " 77 "),
        ]).unwrap();
        assert_eq!(config.address, "127.0.0.1:9000");
        assert_eq!(config.ai_delay, Duration::from_millis(50));
        assert_eq!(config.games, 25);
        assert_eq!(config.seed, Some(77));

        let batch = config.batch();
        assert_eq!((batch.games, batch.workers, batch.seed), (25, 2, 77));
    }

    #[test]
    fn test_invalid_values() {
        let err = config_from(&[("CHESS_GAMES", "ten")]).unwrap_err();
        assert_eq!(err.to_string(), "invalid value \"ten\" for CHESS_GAMES");

        assert!(matches!(config_from(&[("CHESS_WORKERS", "0")]), Err(ConfigError::Invalid { key: "CHESS_WORKERS", .. })));
        assert!(matches!(config_from(&[("CHESS_SEED", "-1")]), Err(ConfigError::Invalid { key: "CHESS_SEED", .. })));

        let err = config_from(&[("CHESS_AI_DELAY_MS", "0")]).unwrap_err();
        assert_eq!(err.to_string(), "invalid value \"0\" for CHESS_AI_DELAY_MS");
        assert!(matches!(config_from(&[("CHESS_MONITOR_SECS", "0")]), Err(ConfigError::Invalid { key: "CHESS_MONITOR_SECS", .. })));
        assert!(config_from(&[("CHESS_AI_DELAY_MS", "1"), ("CHESS_MONITOR_SECS", "1")]).is_ok());
    }
}
