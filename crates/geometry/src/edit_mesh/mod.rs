//! Editable mesh representation
//!
//! `EditMesh` is the mutable geometry a session works on: either a copy
//! built from persisted [`MeshData`](crate::MeshData), or a host-owned live
//! edit buffer. Indexed access goes through a lookup table that has to be
//! rebuilt with [`EditMesh::ensure_lookup_table`] whenever the host may have
//! touched the mesh.

mod construction;
mod modification;
mod normals;
mod topology;

use crate::types::{EditFace, EditVertex};

/// Editable mesh with per-vertex selection and cached normals.
#[derive(Debug, Clone)]
pub struct EditMesh {
    pub(crate) vertices: Vec<EditVertex>,
    pub(crate) faces: Vec<EditFace>,
    /// Lookup index -> slot in `vertices`. `None` while stale.
    pub(crate) lookup: Option<Vec<usize>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives;
    use crate::types::{GeometryError, VertexId};
    use glam::Vec3;

    #[test]
    fn test_from_cube() {
        let mesh = EditMesh::from_mesh_data(&primitives::cube(2.0)).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 6);
        assert!(!mesh.has_lookup_table());
    }

    #[test]
    fn test_indexed_access_requires_lookup() {
        let mut mesh = EditMesh::from_mesh_data(&primitives::cube(2.0)).unwrap();
        assert_eq!(mesh.vertex_at(0).unwrap_err(), GeometryError::StaleLookup);

        mesh.ensure_lookup_table();
        assert_eq!(mesh.vertex_at(3).unwrap().id, VertexId(3));
        assert!(matches!(
            mesh.vertex_at(8),
            Err(GeometryError::IndexOutOfRange { index: 8, count: 8 })
        ));

        mesh.invalidate_lookup();
        assert!(mesh.vertex_at(3).is_err());
    }

    #[test]
    fn test_translate_selected_subset() {
        let mut data = primitives::cube(2.0);
        data.set_selected(0, true).unwrap();
        data.set_selected(6, true).unwrap();
        let mut mesh = EditMesh::from_mesh_data(&data).unwrap();
        mesh.ensure_lookup_table();

        let selected = mesh.indices(true);
        assert_eq!(selected, vec![0, 6]);

        let before = mesh.positions();
        let moved = mesh.translate(Vec3::Z, Some(selected.as_slice())).unwrap();
        assert_eq!(moved, 2);
        let after = mesh.positions();
        for i in 0..8 {
            let expected = if i == 0 || i == 6 {
                before[i] + Vec3::Z
            } else {
                before[i]
            };
            assert_eq!(after[i], expected);
        }
    }

    #[test]
    fn test_write_back_only_touches_positions() {
        let mut data = primitives::cube(2.0);
        data.set_selected(1, true).unwrap();
        let mut mesh = EditMesh::from_mesh_data(&data).unwrap();
        mesh.ensure_lookup_table();
        mesh.select_all(false);
        mesh.translate(Vec3::X, None).unwrap();

        let mut target = data.clone();
        mesh.write_positions_to(&mut target).unwrap();
        assert_eq!(target.selected, data.selected);
        assert_eq!(target.faces, data.faces);
        assert_eq!(target.positions[0], data.positions[0] + Vec3::X);
    }
}
