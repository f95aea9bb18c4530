//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Stats reporter: logs cache occupancy at configured intervals

mod stats;

pub use stats::spawn_stats_task;
