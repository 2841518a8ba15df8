//! Host state dumps.

use meshedit_ipc::{ObjectState, SceneState};

use crate::Host;

/// Mode, selection and persisted positions of every object.
///
/// Positions come from persisted storage, so edits in a live buffer show up
/// only after the host leaves edit mode.
pub fn scene_state<H: Host + ?Sized>(host: &H) -> SceneState {
    let selected = host.selected_objects();
    let objects = host
        .object_names()
        .into_iter()
        .filter_map(|name| {
            let obj = host.object(&name)?;
            let positions = host
                .read_mesh(&name)
                .map(|mesh| mesh.positions.iter().map(|p| p.to_array()).collect())
                .unwrap_or_default();
            Some(ObjectState {
                selected: selected.contains(&name),
                kind: obj.kind,
                name,
                positions,
            })
        })
        .collect();

    SceneState {
        mode: host.mode(),
        active: host.active_object().map(str::to_string),
        selected,
        objects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HostObject, MemoryHost};
    use meshedit_geometry::primitives;
    use meshedit_ipc::{Mode, ObjectKind};

    #[test]
    fn test_scene_state_reports_positions() {
        let mut host = MemoryHost::new();
        host.add_mesh(HostObject::mesh("Cube"), primitives::cube(2.0));
        host.add_object(HostObject::new("Camera", ObjectKind::Camera));
        host.select_object("Camera", true).unwrap();

        let state = scene_state(&host);
        assert_eq!(state.mode, Mode::Object);
        assert_eq!(state.selected, vec!["Camera".to_string()]);
        assert_eq!(state.objects.len(), 2);
        assert_eq!(state.objects[0].positions.len(), 8);
        assert_eq!(state.objects[0].positions[6], [1.0, 1.0, 1.0]);
        assert!(state.objects[1].selected);
        assert!(state.objects[1].positions.is_empty());
    }
}
