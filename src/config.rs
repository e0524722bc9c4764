use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const PRETTY_ENV: &str = "TIMER_NOTIFICATION_PRETTY";
pub const SETTLE_MS_ENV: &str = "TIMER_NOTIFICATION_SETTLE_MS";

#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Wait after a change event before re-reading a watched file
    pub settle_delay: Duration,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            settle_delay: Duration::from_millis(100),
        }
    }
}

impl CliConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or invalid keys keep defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let settle_ms = parse_or(
            &lookup,
            SETTLE_MS_ENV,
            defaults.settle_delay.as_millis() as u64,
        );

        Self {
            pretty: parse_or(&lookup, PRETTY_ENV, defaults.pretty),
            settle_delay: Duration::from_millis(settle_ms),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("ignoring invalid {}={:?}", key, raw);
                default
            }
        },
        None => default,
    }
}
