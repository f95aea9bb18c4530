//! Request DTOs for the speech service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

/// Request body for POST /speak, also the argument object of the
/// `text_to_audio` tool.
///
/// # Fields
/// - `text`: The text to synthesize and play
/// - `speed`: Optional playback speed between 0.5 and 2.0
///
/// Text and speed are checked by the speech service.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeakRequest {
    /// The text to be played
    pub text: String,
    /// Optional playback speed
    #[serde(default)]
    pub speed: Option<f32>,
}

/// Request body for POST /tools/call
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallRequest {
    /// Registered tool name, e.g. `text_to_audio`
    pub name: String,
    /// Tool-specific arguments
    #[serde(default)]
    pub arguments: Value,
}
