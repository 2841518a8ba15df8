//! Error type for editing operations.

use meshedit_geometry::GeometryError;
use meshedit_host::HostError;
use meshedit_ipc::{Mode, TokenError};

/// Errors raised by guards, sessions and moves.
///
/// Validation variants are raised before any host state is touched.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("Invalid object '{name}': {reason}")]
    InvalidObject { name: String, reason: String },

    #[error("Unknown space '{0}', expected 'local' or 'world'")]
    InvalidSpace(String),

    #[error("Unsupported mode '{0}', expected 'object' or 'edit'")]
    UnsupportedMode(String),

    #[error("Unknown backend '{0}', expected 'auto', 'topological' or 'direct'")]
    UnknownBackend(String),

    #[error("Direct-buffer backend cannot be used on '{object}' while the host is in edit mode")]
    UnsafeBackend { object: String },

    #[error("Object '{0}' not found")]
    NotFound(String),

    #[error("Requested {requested} mode but the host stayed in {actual} mode")]
    ModeNotReached { requested: Mode, actual: Mode },

    #[error("No live edit buffer for '{0}'")]
    LiveGeometryUnavailable(String),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl EditError {
    pub(crate) fn invalid_object(name: &str, reason: impl Into<String>) -> Self {
        let reason = if name.is_empty() {
            "no object given".to_string()
        } else {
            reason.into()
        };
        EditError::InvalidObject {
            name: name.to_string(),
            reason,
        }
    }

    /// Map a lookup failure, turning a missing object into [`EditError::NotFound`]
    pub(crate) fn lookup(error: HostError) -> Self {
        match error {
            HostError::ObjectNotFound(name) => EditError::NotFound(name),
            other => EditError::Host(other),
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            EditError::InvalidObject { .. } => "invalid_object",
            EditError::InvalidSpace(_) => "invalid_space",
            EditError::UnsupportedMode(_) => "unsupported_mode",
            EditError::UnknownBackend(_) => "unknown_backend",
            EditError::UnsafeBackend { .. } => "unsafe_backend",
            EditError::NotFound(_) => "not_found",
            EditError::ModeNotReached { .. } => "mode_not_reached",
            EditError::LiveGeometryUnavailable(_) => "live_geometry_unavailable",
            EditError::Host(_) => "host",
            EditError::Geometry(_) => "geometry",
        }
    }
}

impl From<TokenError> for EditError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Space(token) => EditError::InvalidSpace(token),
            TokenError::Mode(token) => EditError::UnsupportedMode(token),
            TokenError::Backend(token) => EditError::UnknownBackend(token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshedit_ipc::Space;

    #[test]
    fn test_token_errors_map_to_validation_errors() {
        let err: EditError = "diagonal".parse::<Space>().unwrap_err().into();
        assert!(matches!(&err, EditError::InvalidSpace(token) if token == "diagonal"));
        assert_eq!(err.code(), "invalid_space");

        let err: EditError = TokenError::Mode("sculpt".to_string()).into();
        assert!(matches!(err, EditError::UnsupportedMode(_)));
    }

    #[test]
    fn test_empty_name_reads_as_missing_object() {
        let err = EditError::invalid_object("", "not found");
        assert_eq!(err.to_string(), "Invalid object '': no object given");
    }
}
