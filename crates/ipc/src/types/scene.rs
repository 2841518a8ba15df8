//! Scene-related types for IPC messages.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::commands::Mode;

/// Kind tag of a host object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    #[default]
    Mesh,
    Curve,
    Empty,
    Camera,
    Light,
}

impl ObjectKind {
    /// Whether the host can enter edit-level mode with this kind active.
    pub fn is_editable(&self) -> bool {
        matches!(self, ObjectKind::Mesh | ObjectKind::Curve)
    }
}

/// 3D transform with position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub position: [f32; 3],
    pub rotation: [f32; 4], // Quaternion (x, y, z, w)
    pub scale: [f32; 3],
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0; 3],
        }
    }
}

impl Transform3D {
    /// Local-to-world matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::from_array(self.scale),
            Quat::from_array(self.rotation).normalize(),
            Vec3::from_array(self.position),
        )
    }
}

/// A scene object with its properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    #[serde(default)]
    pub kind: ObjectKind,
    #[serde(default)]
    pub transform: Transform3D,
    #[serde(default = "selectable_default")]
    pub selectable: bool,
}

fn selectable_default() -> bool {
    true
}

/// Snapshot of one object's state, as reported back to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectState {
    pub name: String,
    pub kind: ObjectKind,
    pub selected: bool,
    /// Persisted vertex positions (empty for non-mesh objects)
    pub positions: Vec<[f32; 3]>,
}

/// Host-wide state: mode, selection and objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneState {
    pub mode: Mode,
    pub active: Option<String>,
    pub selected: Vec<String>,
    pub objects: Vec<ObjectState>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_transform_is_identity() {
        let m = Transform3D::default().to_matrix();
        assert!(m.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_editable_kinds() {
        assert!(ObjectKind::Mesh.is_editable());
        assert!(ObjectKind::Curve.is_editable());
        assert!(!ObjectKind::Camera.is_editable());
    }
}
