//! Player configuration.

use std::time::Duration;

use crate::playback::{PlaybackSpeed, DEFAULT_INTERVAL};

/// Configuration for autoplay.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    /// Delay between steps at normal speed
    pub base_interval: Duration,

    /// Speed preset applied to the base delay
    pub speed: PlaybackSpeed,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl PlayerConfig {
    /// Create config from environment variables with sensible defaults.
    ///
    /// - `STEPWISE_DELAY_MS`: base delay in milliseconds (default 800)
    /// - `STEPWISE_SPEED`: speed preset such as `2x` or `half` (default `1x`)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key/value source. Unparseable values are
    /// logged and replaced by defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_interval = lookup("STEPWISE_DELAY_MS")
            .and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Some(Duration::from_millis(ms)),
                _ => {
                    tracing::warn!(value = %raw, "ignoring invalid STEPWISE_DELAY_MS");
                    None
                }
            })
            .unwrap_or(DEFAULT_INTERVAL);

        let speed = lookup("STEPWISE_SPEED")
            .and_then(|raw| match raw.parse::<PlaybackSpeed>() {
                Ok(speed) => Some(speed),
                Err(e) => {
                    tracing::warn!("ignoring STEPWISE_SPEED: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        Self {
            base_interval,
            speed,
        }
    }

    /// Effective autoplay delay.
    pub fn interval(&self) -> Duration {
        self.speed.interval(self.base_interval)
    }
}
