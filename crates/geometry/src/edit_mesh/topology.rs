//! Accessors and index lookup for EditMesh.

use super::EditMesh;
use crate::types::{EditFace, EditVertex, GeometryError};

impl EditMesh {
    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get all vertices
    pub fn vertices(&self) -> &[EditVertex] {
        &self.vertices
    }

    /// Get all faces
    pub fn faces(&self) -> &[EditFace] {
        &self.faces
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    // ========================================================================
    // Lookup table
    // ========================================================================

    pub fn has_lookup_table(&self) -> bool {
        self.lookup.is_some()
    }

    /// Mark the lookup table stale. Hosts call this after touching the mesh.
    pub fn invalidate_lookup(&mut self) {
        self.lookup = None;
    }

    /// Renumber vertices and rebuild the index -> slot table.
    pub fn ensure_lookup_table(&mut self) {
        if self.lookup.is_some() {
            return;
        }
        for (slot, v) in self.vertices.iter_mut().enumerate() {
            v.index = slot as u32;
        }
        self.lookup = Some((0..self.vertices.len()).collect());
    }

    /// Slot of a lookup index
    pub(crate) fn slot(&self, index: u32) -> Result<usize, GeometryError> {
        let lookup = self.lookup.as_ref().ok_or(GeometryError::StaleLookup)?;
        lookup
            .get(index as usize)
            .copied()
            .ok_or(GeometryError::IndexOutOfRange {
                index,
                count: lookup.len(),
            })
    }

    /// Vertex by lookup index
    pub fn vertex_at(&self, index: u32) -> Result<&EditVertex, GeometryError> {
        let slot = self.slot(index)?;
        Ok(&self.vertices[slot])
    }

    /// Indices of all vertices, or only of the selected ones
    pub fn indices(&mut self, selected_only: bool) -> Vec<u32> {
        self.ensure_lookup_table();
        self.vertices
            .iter()
            .filter(|v| !selected_only || v.selected)
            .map(|v| v.index)
            .collect()
    }
}
