//! Runtime settings, read from `STOCKROOM_*` environment variables.

use thiserror::Error;
use crate::clients::OrderPolicy;

const DEFAULT_CHANNEL_BUFFER: usize = 32;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfig {
    /// Capacity of each actor's request channel.
    pub channel_buffer: usize,
    /// Filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub allow_credit_orders: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            allow_credit_orders: false,
        }
    }
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value, expected: "a boolean" }),
    }
}

fn parse_buffer(key: &'static str, value: String) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ConfigError::Invalid { key, value, expected: "a positive integer" }),
    }
}

impl SystemConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup("STOCKROOM_CHANNEL_BUFFER") {
            config.channel_buffer = parse_buffer("STOCKROOM_CHANNEL_BUFFER", value)?;
        }
        if let Some(value) = lookup("STOCKROOM_LOG").filter(|value| !value.trim().is_empty()) {
            config.log_filter = value;
        }
        if let Some(value) = lookup("STOCKROOM_ALLOW_CREDIT_ORDERS") {
            config.allow_credit_orders = parse_bool("STOCKROOM_ALLOW_CREDIT_ORDERS", value)?;
        }
        Ok(config)
    }

    pub fn order_policy(&self) -> OrderPolicy {
        OrderPolicy { allow_credit_orders: self.allow_credit_orders }
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(SystemConfig::from_lookup(lookup(&[])).unwrap(), SystemConfig::default());
    }

    #[test]
    fn reads_every_key() {
        let config = SystemConfig::from_lookup(lookup(&[
            ("STOCKROOM_CHANNEL_BUFFER", "8"),
            ("STOCKROOM_LOG", "stockroom=debug"),
            ("STOCKROOM_ALLOW_CREDIT_ORDERS", "Yes"),
        ]))
        .unwrap();
        assert_eq!(config.channel_buffer, 8);
        assert_eq!(config.log_filter, "stockroom=debug");
        assert!(config.order_policy().allow_credit_orders);
    }

    #[test]
    fn rejects_bad_values() {
        let err = SystemConfig::from_lookup(lookup(&[("STOCKROOM_CHANNEL_BUFFER", "0")])).unwrap_err();
        assert_eq!(err.to_string(), "STOCKROOM_CHANNEL_BUFFER must be a positive integer, got \"0\"");

        let err = SystemConfig::from_lookup(lookup(&[("STOCKROOM_ALLOW_CREDIT_ORDERS", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "STOCKROOM_ALLOW_CREDIT_ORDERS", .. }));
    }
}
