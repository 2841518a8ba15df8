//! Modification methods for EditMesh.

use glam::Vec3;
use tracing::trace;

use super::EditMesh;
use crate::transform;
use crate::types::GeometryError;

impl EditMesh {
    pub fn select_all(&mut self, selected: bool) {
        for v in &mut self.vertices {
            v.selected = selected;
        }
    }

    /// Add `delta` to every vertex, or to the given lookup indices.
    ///
    /// Indices are all resolved before the first write; an invalid index
    /// leaves the mesh unchanged. Returns the number of vertices moved.
    pub fn translate(&mut self, delta: Vec3, indices: Option<&[u32]>) -> Result<usize, GeometryError> {
        let Some(indices) = indices else {
            for v in &mut self.vertices {
                v.position += delta;
            }
            trace!("translate: moved all {} vertices", self.vertices.len());
            return Ok(self.vertices.len());
        };

        let targets = transform::unique_indices(indices, self.vertices.len())?;
        let slots = targets
            .iter()
            .map(|&i| self.slot(i as u32))
            .collect::<Result<Vec<_>, _>>()?;

        for slot in &slots {
            self.vertices[*slot].position += delta;
        }
        trace!("translate: moved {} of {} vertices", slots.len(), self.vertices.len());
        Ok(slots.len())
    }
}
