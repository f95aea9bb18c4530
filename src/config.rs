//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use tracing::warn;

use crate::cache::{DEFAULT_MAX_ITEMS, DEFAULT_MAX_MEMORY_MB};
use crate::speech::{MAX_SPEED, MIN_SPEED};

/// Which audio output the service plays synthesized samples through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinkKind {
    /// Log playback without producing sound
    #[default]
    Null,
    /// Write a WAV file and hand it to the platform player
    Command,
}

impl FromStr for SinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "null" | "none" => Ok(SinkKind::Null),
            "command" | "system" => Ok(SinkKind::Command),
            other => Err(format!("unknown audio sink '{other}'")),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of sample buffers the cache can hold
    pub max_items: usize,
    /// Cache memory budget in megabytes
    pub max_memory_mb: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Playback speed used when a request does not specify one
    pub default_speed: f32,
    /// Synthesis voice
    pub voice: String,
    /// Interval in seconds between cache statistics log lines
    pub stats_interval: u64,
    /// Audio output
    pub audio_sink: SinkKind,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_ITEMS` - Maximum cached buffers (default: 50)
    /// - `CACHE_MAX_MEMORY_MB` - Cache memory budget (default: 50)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DEFAULT_SPEED` - Default playback speed, 0.5 to 2.0 (default: 1.1)
    /// - `VOICE` - Synthesis voice (default: af_heart)
    /// - `STATS_INTERVAL` - Stats logging frequency in seconds (default: 60)
    /// - `AUDIO_SINK` - `null` or `command` (default: null)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_items: parse_var("CACHE_MAX_ITEMS").unwrap_or(defaults.max_items),
            max_memory_mb: parse_var("CACHE_MAX_MEMORY_MB").unwrap_or(defaults.max_memory_mb),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            default_speed: speed_or_default(parse_var("DEFAULT_SPEED"), defaults.default_speed),
            voice: env::var("VOICE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.voice),
            stats_interval: parse_var("STATS_INTERVAL").unwrap_or(defaults.stats_interval),
            audio_sink: parse_var("AUDIO_SINK").unwrap_or(defaults.audio_sink),
        }
    }

    /// Cache memory budget in bytes.
    pub fn max_bytes(&self) -> usize {
        self.max_memory_mb.saturating_mul(1024 * 1024)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Falls back to `default` when the configured speed is outside the range
/// every request is checked against.
fn speed_or_default(speed: Option<f32>, default: f32) -> f32 {
    match speed {
        Some(speed) if (MIN_SPEED..=MAX_SPEED).contains(&speed) => speed,
        Some(speed) => {
            warn!(
                "DEFAULT_SPEED {} outside {}..={}, using {}",
                speed, MIN_SPEED, MAX_SPEED, default
            );
            default
        }
        None => default,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            max_memory_mb: DEFAULT_MAX_MEMORY_MB,
            server_port: 3000,
            default_speed: 1.1,
            voice: "af_heart".to_string(),
            stats_interval: 60,
            audio_sink: SinkKind::Null,
        }
    }
}
