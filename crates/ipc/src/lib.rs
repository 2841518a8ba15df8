//! Command and state vocabulary for meshedit
//!
//! Defines the types shared by every crate in the workspace: host modes,
//! coordinate spaces, backend choices, move commands, and the request/reply
//! messages used by scripted callers.

pub mod commands;
pub mod error;
pub mod messages;
pub mod types;

pub use commands::*;
pub use error::{IpcError, TokenError};
pub use messages::*;
pub use types::*;
