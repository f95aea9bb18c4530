//! Response DTOs for the speech service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::{json, Value};

use crate::cache::CacheStats;
use crate::speech::SpeakOutcome;

/// Message returned once playback has been started
pub const PLAYING_MESSAGE: &str = "The audio is now playing";

/// Response body for POST /speak
#[derive(Debug, Clone, Serialize)]
pub struct SpeakResponse {
    /// Human-readable status
    pub message: String,
    /// Whether cached samples were reused
    pub cache_hit: bool,
    /// Number of samples played
    pub samples: usize,
    /// Sample rate of the played buffer
    pub sample_rate: u32,
    /// Playback length in seconds
    pub duration_secs: f64,
}

impl From<SpeakOutcome> for SpeakResponse {
    fn from(outcome: SpeakOutcome) -> Self {
        Self {
            message: PLAYING_MESSAGE.to_string(),
            cache_hit: outcome.cache_hit,
            samples: outcome.samples,
            sample_rate: outcome.sample_rate,
            duration_secs: outcome.duration_secs,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Current number of cached buffers
    pub items: usize,
    /// Maximum number of cached buffers
    pub max_items: usize,
    /// Estimated cache memory in bytes
    pub memory_bytes: usize,
    /// Memory budget in bytes
    pub max_bytes: usize,
    /// Estimated cache memory in megabytes
    pub memory_mb: f64,
    /// Memory budget in megabytes
    pub max_memory_mb: f64,
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            items: stats.items,
            max_items: stats.max_items,
            memory_bytes: stats.memory_bytes,
            max_bytes: stats.max_bytes,
            memory_mb: stats.memory_mb(),
            max_memory_mb: stats.max_memory_mb(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Description of a callable tool (GET /tools)
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    /// Tool name used in /tools/call
    pub name: String,
    /// What the tool does
    pub description: String,
    /// JSON schema of the `arguments` object
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDescriptor {
    /// Descriptor of the `text_to_audio` tool.
    pub fn text_to_audio() -> Self {
        Self {
            name: "text_to_audio".to_string(),
            description: "convert text to audio and play".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": {
                        "type": "string",
                        "description": "text to be played"
                    },
                    "speed": {
                        "type": "number",
                        "description": "play speed, speed should be between 0.5 and 2.0. by default is 1.1"
                    }
                },
                "required": ["text"]
            }),
        }
    }
}

/// Response body for GET /tools
#[derive(Debug, Clone, Serialize)]
pub struct ToolListResponse {
    pub tools: Vec<ToolDescriptor>,
}

/// One block of tool output
#[derive(Debug, Clone, Serialize)]
pub struct TextContent {
    /// Always "text"
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

/// Response body for POST /tools/call
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallResponse {
    pub content: Vec<TextContent>,
}

impl ToolCallResponse {
    /// Creates a response with a single text block
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![TextContent {
                kind: "text",
                text: text.into(),
            }],
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
