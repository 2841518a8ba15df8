//! Scenes the CLI runs scripts against

use std::path::Path;

use glam::{Mat4, Quat, Vec3};
use meshedit_geometry::{MeshData, primitives};
use meshedit_host::{Host, HostObject, MemoryHost};
use meshedit_ipc::{ObjectKind, SceneObject};
use serde::Deserialize;
use tracing::info;

use crate::CliError;

/// Default scene: a cube, a turned floor plane, a camera and a light.
///
/// Nothing is selected and the host starts in object mode.
pub fn demo_scene() -> MemoryHost {
    let mut host = MemoryHost::new();
    host.add_mesh(HostObject::mesh("Cube"), primitives::cube(2.0));
    host.add_mesh(
        HostObject::mesh("Floor").with_matrix(Mat4::from_rotation_translation(
            Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
            Vec3::new(0.0, -1.0, 0.0),
        )),
        primitives::plane(10.0),
    );
    host.add_object(
        HostObject::new("Camera", ObjectKind::Camera)
            .with_matrix(Mat4::from_translation(Vec3::new(0.0, 2.0, 8.0))),
    );
    host.add_object(
        HostObject::new("Light", ObjectKind::Light)
            .with_matrix(Mat4::from_translation(Vec3::new(4.0, 6.0, 4.0))),
    );
    host
}

/// One object of a scene file, with optional mesh data
#[derive(Debug, Deserialize)]
struct SceneEntry {
    #[serde(flatten)]
    object: SceneObject,
    #[serde(default)]
    mesh: Option<MeshData>,
}

/// Load a JSON array of scene objects.
///
/// An entry may carry a `mesh` (`positions`, `faces`, optional `selected`).
/// Mesh objects without one get a 2-unit cube.
pub fn load_scene(path: &Path) -> Result<MemoryHost, CliError> {
    let text = std::fs::read_to_string(path)?;
    let host = parse_scene(&text)?;
    info!("Loaded {} objects from {}", host.object_names().len(), path.display());
    Ok(host)
}

fn parse_scene(text: &str) -> Result<MemoryHost, CliError> {
    let entries: Vec<SceneEntry> = serde_json::from_str(text)?;

    let mut host = MemoryHost::new();
    for entry in entries {
        let object = HostObject::from(&entry.object);
        match (entry.mesh, entry.object.kind) {
            (Some(mesh), _) => host.add_mesh(object, mesh),
            (None, ObjectKind::Mesh) => host.add_mesh(object, primitives::cube(2.0)),
            (None, _) => host.add_object(object),
        };
    }
    Ok(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_scene() {
        let host = demo_scene();
        assert_eq!(host.object_names(), vec!["Cube", "Floor", "Camera", "Light"]);
        assert_eq!(host.vertex_count("Cube").unwrap(), 8);
        assert!(host.selected_objects().is_empty());
    }

    #[test]
    fn test_scene_objects_from_json() {
        let json = r#"[
            {"name":"Box","kind":"mesh","transform":{"position":[1,0,0],"rotation":[0,0,0,1],"scale":[1,1,1]},"selectable":true},
            {"name":"Cam","kind":"camera","transform":{"position":[0,0,5],"rotation":[0,0,0,1],"scale":[1,1,1]},"selectable":false}
        ]"#;
        let objects: Vec<SceneObject> = serde_json::from_str(json).unwrap();
        let object = HostObject::from(&objects[0]);
        assert_eq!(object.matrix_world, Mat4::from_translation(Vec3::X));
        assert!(!HostObject::from(&objects[1]).selectable);
    }

    #[test]
    fn test_scene_file_mesh_data() {
        let json = r#"[
            {"name":"Tri","kind":"mesh","transform":{"position":[0,0,0],"rotation":[0,0,0,1],"scale":[1,1,1]},"selectable":true,
             "mesh":{"positions":[[0,0,0],[1,0,0],[0,1,0]],"faces":[[0,1,2]],"selected":[false,true,false]}},
            {"name":"Box","kind":"mesh","transform":{"position":[0,0,0],"rotation":[0,0,0,1],"scale":[1,1,1]},"selectable":true},
            {"name":"Cam","kind":"camera","transform":{"position":[0,0,5],"rotation":[0,0,0,1],"scale":[1,1,1]},"selectable":false}
        ]"#;
        let host = parse_scene(json).unwrap();
        let tri = host.mesh("Tri").unwrap();
        assert_eq!(tri.positions[1], Vec3::X);
        assert!(tri.is_selected(1));
        assert_eq!(host.vertex_count("Box").unwrap(), 8);
        assert!(host.mesh("Cam").is_none());
    }
}
