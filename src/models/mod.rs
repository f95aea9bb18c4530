//! Request and Response models for the speech service API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{SpeakRequest, ToolCallRequest};
pub use responses::{
    HealthResponse, SpeakResponse, StatsResponse, TextContent, ToolCallResponse, ToolDescriptor,
    ToolListResponse, PLAYING_MESSAGE,
};
