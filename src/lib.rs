//! TTS Cache - text-to-speech tool server
//!
//! Plays text through a speech synthesizer, keeping recently synthesized
//! sample buffers in a bounded LRU cache limited by item count and memory.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod speech;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use speech::SpeechService;
pub use tasks::spawn_stats_task;
