//! Shared data types for IPC messages.

mod scene;

pub use scene::*;
