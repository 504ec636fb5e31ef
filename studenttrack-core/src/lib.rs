//! StudentTrack Core - Core data structures and shared infrastructure
//!
//! Defines the user model, the unified error type, logging setup and configuration

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use types::*;

// Re-export commonly used external types
pub use tracing;
