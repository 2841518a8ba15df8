//! Error types for IPC operations.

/// Errors that can occur while encoding or decoding commands.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("Failed to serialize message: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid message format: {0}")]
    InvalidFormat(String),
}

/// A string token that does not name a known mode, space or backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Unknown space '{0}', expected 'local' or 'world'")]
    Space(String),

    #[error("Unsupported mode '{0}', expected 'object' or 'edit'")]
    Mode(String),

    #[error("Unknown backend '{0}', expected 'auto', 'topological' or 'direct'")]
    Backend(String),
}
