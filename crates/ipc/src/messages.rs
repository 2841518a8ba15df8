//! Main message enums exchanged with a scripted caller.

use serde::{Deserialize, Serialize};

use crate::commands::{Mode, MoveRequest, ObjectCommand, QueryCommand, Strategy};
use crate::error::IpcError;
use crate::types::SceneState;

/// Requests a caller can send to the editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Request {
    /// Move vertices of a mesh object
    Move(MoveRequest),
    /// Selection and mode changes
    Object(ObjectCommand),
    /// Geometry queries
    Query(QueryCommand),
    /// Dump the whole host state
    DumpState,
}

/// Replies sent back for each request, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Reply {
    /// A move finished
    Moved {
        object: String,
        strategy: Option<Strategy>,
        moved: usize,
    },
    /// Selection changed
    Selected { name: String },
    /// Host mode changed
    ModeChanged { mode: Mode },
    /// Result of a vertex index query
    VertexIndices { object: String, indices: Vec<u32> },
    /// Full host state
    State(SceneState),
    /// Error notification
    Error { code: String, message: String },
}

/// Parse a script: either a JSON array of requests or one request per line.
pub fn parse_script(text: &str) -> Result<Vec<Request>, IpcError> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    let mut requests = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let request = serde_json::from_str(line)
            .map_err(|e| IpcError::InvalidFormat(format!("line {}: {}", line_no + 1, e)))?;
        requests.push(request);
    }
    Ok(requests)
}
