//! Mesh editing command types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// Lowercase a token and fold `_` into `-` so `EDIT_MESH` and `edit-mesh` compare equal.
fn normalize_token(token: &str) -> String {
    token.trim().to_ascii_lowercase().replace('_', "-")
}

/// Host interaction mode.
///
/// The host reports exactly one of these at any time. Mode names coming from
/// outside the crate are parsed at the boundary and anything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Object-level mode: persisted storage is authoritative
    #[default]
    Object,
    /// Edit-level mode: the host's live edit buffer is authoritative
    Edit,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Object => "object",
            Mode::Edit => "edit",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "object" | "object-level" => Ok(Mode::Object),
            "edit" | "edit-level" | "edit-mesh" => Ok(Mode::Edit),
            _ => Err(TokenError::Mode(s.to_string())),
        }
    }
}

/// Coordinate space a move direction is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Space {
    /// Object-local coordinates
    #[default]
    Local,
    /// World coordinates, converted through the object's world rotation
    World,
}

impl Space {
    pub fn as_str(&self) -> &'static str {
        match self {
            Space::Local => "local",
            Space::World => "world",
        }
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Space {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "local" => Ok(Space::Local),
            "world" => Ok(Space::World),
            _ => Err(TokenError::Space(s.to_string())),
        }
    }
}

/// Geometry mutation backend requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// Pick per call from the current host mode
    #[default]
    Auto,
    /// Per-vertex mutation through a geometry session
    #[serde(alias = "bmesh")]
    Topological,
    /// Bulk mutation of the persisted vertex buffer
    #[serde(alias = "direct", alias = "fast")]
    DirectBuffer,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Backend::Auto => "auto",
            Backend::Topological => "topological",
            Backend::DirectBuffer => "direct-buffer",
        })
    }
}

impl FromStr for Backend {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "auto" => Ok(Backend::Auto),
            "topological" | "bmesh" => Ok(Backend::Topological),
            "direct" | "direct-buffer" | "fast" => Ok(Backend::DirectBuffer),
            _ => Err(TokenError::Backend(s.to_string())),
        }
    }
}

/// Concrete strategy a move actually ran with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    DirectBuffer,
    Topological,
}

fn default_distance() -> f32 {
    1.0
}

/// Translate vertices of a mesh object by `normalize(direction) * distance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveCommand {
    /// Name of the target object
    pub object: String,
    /// Direction of travel; only its orientation matters
    pub direction: glam::Vec3,
    #[serde(default = "default_distance")]
    pub distance: f32,
    #[serde(default)]
    pub space: Space,
    #[serde(default)]
    pub backend: Backend,
    /// Explicit vertex subset; `None` moves every vertex
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertices: Option<Vec<u32>>,
}

impl MoveCommand {
    pub fn new(object: impl Into<String>, direction: glam::Vec3, distance: f32) -> Self {
        Self {
            object: object.into(),
            direction,
            distance,
            space: Space::default(),
            backend: Backend::default(),
            vertices: None,
        }
    }

    pub fn with_space(mut self, space: Space) -> Self {
        self.space = space;
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_vertices(mut self, vertices: impl Into<Vec<u32>>) -> Self {
        self.vertices = Some(vertices.into());
        self
    }
}

/// Scripted move with its space and backend still as raw tokens.
///
/// Missing tokens fall back to the caller's defaults, and unknown ones
/// surface as a [`TokenError`] for this request only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub object: String,
    pub direction: glam::Vec3,
    #[serde(default = "default_distance")]
    pub distance: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertices: Option<Vec<u32>>,
}

impl MoveRequest {
    /// Parse the tokens into a command, using `space` and `backend` where absent
    pub fn resolve(self, space: Space, backend: Backend) -> Result<MoveCommand, TokenError> {
        let space = match self.space.as_deref() {
            Some(token) => token.parse()?,
            None => space,
        };
        let backend = match self.backend.as_deref() {
            Some(token) => token.parse()?,
            None => backend,
        };
        Ok(MoveCommand {
            object: self.object,
            direction: self.direction,
            distance: self.distance,
            space,
            backend,
            vertices: self.vertices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_tokens() {
        assert_eq!("OBJECT".parse::<Mode>(), Ok(Mode::Object));
        assert_eq!("edit-level".parse::<Mode>(), Ok(Mode::Edit));
        assert_eq!("EDIT_MESH".parse::<Mode>(), Ok(Mode::Edit));
        assert_eq!(
            "sculpt".parse::<Mode>(),
            Err(TokenError::Mode("sculpt".to_string()))
        );
    }

    #[test]
    fn test_space_tokens() {
        assert_eq!("World".parse::<Space>(), Ok(Space::World));
        assert_eq!(" local ".parse::<Space>(), Ok(Space::Local));
        assert!(matches!("normal".parse::<Space>(), Err(TokenError::Space(_))));
    }

    #[test]
    fn test_backend_aliases() {
        assert_eq!("FAST".parse::<Backend>(), Ok(Backend::DirectBuffer));
        assert_eq!("bmesh".parse::<Backend>(), Ok(Backend::Topological));
        assert_eq!("direct_buffer".parse::<Backend>(), Ok(Backend::DirectBuffer));
        assert!("gpu".parse::<Backend>().is_err());
    }

    #[test]
    fn test_move_command_defaults_from_json() {
        let cmd: MoveCommand =
            serde_json::from_str(r#"{"object":"Cube","direction":[0.0,0.0,1.0]}"#).unwrap();
        assert_eq!(cmd.distance, 1.0);
        assert_eq!(cmd.space, Space::Local);
        assert_eq!(cmd.backend, Backend::Auto);
        assert!(cmd.vertices.is_none());
    }

    #[test]
    fn test_move_command_backend_alias_in_json() {
        let cmd: MoveCommand = serde_json::from_str(
            r#"{"object":"Cube","direction":[1.0,0.0,0.0],"backend":"fast","space":"world"}"#,
        )
        .unwrap();
        assert_eq!(cmd.backend, Backend::DirectBuffer);
        assert_eq!(cmd.space, Space::World);
    }

    #[test]
    fn test_move_request_fills_missing_tokens() {
        let request: MoveRequest =
            serde_json::from_str(r#"{"object":"Cube","direction":[1,0,0],"backend":"BMESH"}"#).unwrap();
        let cmd = request.resolve(Space::World, Backend::DirectBuffer).unwrap();
        assert_eq!(cmd.space, Space::World);
        assert_eq!(cmd.backend, Backend::Topological);
        assert_eq!(cmd.distance, 1.0);
    }

    #[test]
    fn test_move_request_rejects_unknown_space() {
        let request: MoveRequest =
            serde_json::from_str(r#"{"object":"Cube","direction":[1,0,0],"space":"diagonal"}"#).unwrap();
        assert_eq!(
            request.resolve(Space::Local, Backend::Auto),
            Err(TokenError::Space("diagonal".to_string()))
        );
    }
}
