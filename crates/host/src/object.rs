//! Host-owned object descriptions.

use glam::Mat4;
use meshedit_ipc::{ObjectKind, SceneObject};

/// Identity and placement of an object the host owns.
#[derive(Debug, Clone, PartialEq)]
pub struct HostObject {
    pub name: String,
    pub kind: ObjectKind,
    /// Local-to-world transform
    pub matrix_world: Mat4,
    /// Whether the object may be selected
    pub selectable: bool,
}

impl HostObject {
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            matrix_world: Mat4::IDENTITY,
            selectable: true,
        }
    }

    pub fn mesh(name: impl Into<String>) -> Self {
        Self::new(name, ObjectKind::Mesh)
    }

    pub fn with_matrix(mut self, matrix_world: Mat4) -> Self {
        self.matrix_world = matrix_world;
        self
    }

    pub fn is_mesh(&self) -> bool {
        self.kind == ObjectKind::Mesh
    }
}

impl From<&SceneObject> for HostObject {
    fn from(obj: &SceneObject) -> Self {
        Self {
            name: obj.name.clone(),
            kind: obj.kind,
            matrix_world: obj.transform.to_matrix(),
            selectable: obj.selectable,
        }
    }
}

/// Flags for signalling that a live edit buffer changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditMeshUpdate {
    /// Topology changed; derived data must be rebuilt from scratch
    pub destructive: bool,
    /// Recompute triangulation for drawing
    pub loop_triangles: bool,
}
