//! API Handlers
//!
//! HTTP request handlers for each speech service endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::error::{Result, SpeechError};
use crate::models::{
    HealthResponse, SpeakRequest, SpeakResponse, StatsResponse, ToolCallRequest,
    ToolCallResponse, ToolDescriptor, ToolListResponse, PLAYING_MESSAGE,
};
use crate::speech::SpeechService;

/// Name of the text-to-speech tool
pub const TEXT_TO_AUDIO: &str = "text_to_audio";

/// Application state shared across all handlers.
///
/// The speech service owns the sample cache; handlers share it through an
/// `Arc`.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Speech service with its sample cache
    pub service: Arc<SpeechService>,
}

impl AppState {
    /// Creates a new AppState around the given service.
    pub fn new(service: SpeechService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(SpeechService::from_config(config))
    }
}

/// Handler for POST /speak
///
/// Plays the text, reusing cached samples when available.
pub async fn speak_handler(
    State(state): State<AppState>,
    Json(req): Json<SpeakRequest>,
) -> Result<Json<SpeakResponse>> {
    let outcome = state.service.speak(&req.text, req.speed).await?;
    Ok(Json(outcome.into()))
}

/// Handler for GET /tools
///
/// Lists the tools this server can run.
pub async fn list_tools_handler() -> Json<ToolListResponse> {
    Json(ToolListResponse {
        tools: vec![ToolDescriptor::text_to_audio()],
    })
}

/// Handler for POST /tools/call
///
/// Dispatches a tool call by name.
pub async fn call_tool_handler(
    State(state): State<AppState>,
    Json(req): Json<ToolCallRequest>,
) -> Result<Json<ToolCallResponse>> {
    match req.name.as_str() {
        TEXT_TO_AUDIO => {
            let args: SpeakRequest = serde_json::from_value(req.arguments)
                .map_err(|e| SpeechError::InvalidRequest(format!("bad arguments: {e}")))?;
            state.service.speak(&args.text, args.speed).await?;
            Ok(Json(ToolCallResponse::text(PLAYING_MESSAGE)))
        }
        other => Err(SpeechError::UnknownTool(other.to_string())),
    }
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.service.stats().await.into())
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
