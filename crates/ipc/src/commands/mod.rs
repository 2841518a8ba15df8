//! Command types for IPC messages.

mod mesh_edit;

pub use mesh_edit::*;

use serde::{Deserialize, Serialize};

fn yes() -> bool {
    true
}

/// Object selection commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ObjectCommand {
    /// Select an object by name, optionally making it active
    Select {
        name: String,
        #[serde(default = "yes")]
        make_active: bool,
        #[serde(default = "yes")]
        deselect_others: bool,
    },
    /// Switch the host into a mode with `object` as the active object.
    /// `mode` is a raw token, parsed when the command runs.
    SetMode { object: String, mode: String },
}

/// Read-only geometry queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum QueryCommand {
    /// Vertex indices of an object, optionally only the selected ones
    VertexIndices {
        object: String,
        #[serde(default)]
        selected_only: Option<bool>,
    },
}
