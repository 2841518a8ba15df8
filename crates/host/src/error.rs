//! Error types reported by a host.

use meshedit_geometry::GeometryError;
use meshedit_ipc::Mode;

/// Errors a host reports at its boundary.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Object '{0}' not found")]
    ObjectNotFound(String),

    #[error("Object '{0}' cannot be selected")]
    NotSelectable(String),

    #[error("Object '{0}' has no mesh data")]
    NoMeshData(String),

    #[error("Cannot enter {mode} mode: {reason}")]
    ModeChangeRejected { mode: Mode, reason: String },

    #[error("Requested {requested} mode but the host is in {actual} mode")]
    ModeChangeIgnored { requested: Mode, actual: Mode },

    #[error("No live edit buffer for '{0}'")]
    NoEditBuffer(String),

    #[error("Host rejected the operation: {0}")]
    Rejected(String),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
