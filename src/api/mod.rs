//! API Module
//!
//! HTTP handlers and routing for the speech service.
//!
//! # Endpoints
//! - `POST /speak` - Play text through the cached synthesizer
//! - `GET /tools` - List available tools
//! - `POST /tools/call` - Call a tool by name
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
