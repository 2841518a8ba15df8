//! Construction and write-back methods for EditMesh.

use glam::Vec3;

use super::EditMesh;
use crate::mesh_data::MeshData;
use crate::types::{EditFace, EditVertex, FaceId, GeometryError, VertexId};

impl EditMesh {
    /// Build an editable copy of persisted mesh data.
    ///
    /// The lookup table starts out stale and normals are zero until
    /// [`EditMesh::normal_update`] runs.
    pub fn from_mesh_data(data: &MeshData) -> Result<Self, GeometryError> {
        data.validate()?;

        let vertices = data
            .positions
            .iter()
            .enumerate()
            .map(|(i, &position)| EditVertex {
                id: VertexId(i as u32),
                position,
                normal: Vec3::ZERO,
                selected: data.is_selected(i),
                index: i as u32,
            })
            .collect();

        let faces = data
            .faces
            .iter()
            .enumerate()
            .map(|(i, face)| EditFace {
                id: FaceId(i as u32),
                vertices: face.iter().map(|&v| VertexId(v)).collect(),
                normal: Vec3::ZERO,
            })
            .collect();

        Ok(Self {
            vertices,
            faces,
            lookup: None,
        })
    }

    /// Positions in vertex order
    pub fn positions(&self) -> Vec<Vec3> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    /// Copy positions onto persisted data. No other attribute is written.
    pub fn write_positions_to(&self, data: &mut MeshData) -> Result<(), GeometryError> {
        if data.positions.len() != self.vertices.len() {
            return Err(GeometryError::BufferLength {
                expected: data.positions.len() * 3,
                actual: self.vertices.len() * 3,
            });
        }
        for (dst, v) in data.positions.iter_mut().zip(&self.vertices) {
            *dst = v.position;
        }
        Ok(())
    }

    /// Copy positions and selection flags onto persisted data.
    ///
    /// This is what a host does when it leaves edit mode and folds its live
    /// edit buffer back into storage.
    pub fn flush_to(&self, data: &mut MeshData) -> Result<(), GeometryError> {
        self.write_positions_to(data)?;
        data.selected = self.vertices.iter().map(|v| v.selected).collect();
        Ok(())
    }
}
