//! Session Management Module
//!
//! The session store and the key-value storage backends it persists to.

pub mod manager;
pub mod storage;

pub use manager::{SessionConfig, SessionStore};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
