use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use tracing::info;

use super::ConfigError;

/// Runtime settings, read from `RENTAL_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    pub api_base: String,
    pub poll_interval: Duration,
    pub notification_ttl: chrono::Duration,
    pub channel_buffer: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8080/api".to_string(),
            poll_interval: Duration::from_secs(30),
            notification_ttl: chrono::Duration::seconds(5),
            channel_buffer: 32,
        }
    }
}

impl SyncConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base: String = try_load(&lookup, "RENTAL_API_BASE", "http://localhost:8080/api")?;
        let poll_secs: u64 = try_load(&lookup, "RENTAL_POLL_INTERVAL_SECS", "30")?;
        let ttl_secs: u32 = try_load(&lookup, "RENTAL_NOTIFICATION_TTL_SECS", "5")?;
        let channel_buffer: usize = try_load(&lookup, "RENTAL_CHANNEL_BUFFER", "32")?;

        if poll_secs == 0 {
            return Err(invalid("RENTAL_POLL_INTERVAL_SECS", "0", "must be at least 1"));
        }
        if channel_buffer == 0 {
            return Err(invalid("RENTAL_CHANNEL_BUFFER", "0", "must be at least 1"));
        }

        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            poll_interval: Duration::from_secs(poll_secs),
            notification_ttl: chrono::Duration::seconds(i64::from(ttl_secs)),
            channel_buffer,
        })
    }
}

fn invalid(key: &'static str, value: &str, reason: impl Display) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.trim().parse().map_err(|e| invalid(key, &raw, e))
}
