//! Persisted mesh storage.
//!
//! `MeshData` is what a host keeps for an object outside of edit mode. The
//! flat `f32` accessors mirror a bulk foreach-get/set interface: three floats
//! per vertex, in vertex order.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::GeometryError;

/// Persisted vertex buffer of a mesh object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    /// Face loops as vertex indices
    pub faces: Vec<Vec<u32>>,
    /// Per-vertex selection flags (empty means nothing selected)
    #[serde(default)]
    pub selected: Vec<bool>,
    #[serde(default)]
    pub uvs: Option<Vec<Vec2>>,
}

impl MeshData {
    pub fn new(positions: Vec<Vec3>, faces: Vec<Vec<u32>>) -> Self {
        Self {
            positions,
            faces,
            selected: Vec::new(),
            uvs: None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }

    /// Set the selection flag of one vertex, growing the flag array as needed
    pub fn set_selected(&mut self, index: usize, selected: bool) -> Result<(), GeometryError> {
        if index >= self.positions.len() {
            return Err(GeometryError::IndexOutOfRange {
                index: index as u32,
                count: self.positions.len(),
            });
        }
        if self.selected.len() < self.positions.len() {
            self.selected.resize(self.positions.len(), false);
        }
        self.selected[index] = selected;
        Ok(())
    }

    /// Copy all positions into `out` (length must be `3 * vertex_count`)
    pub fn read_positions(&self, out: &mut [f32]) -> Result<(), GeometryError> {
        let src: &[f32] = bytemuck::cast_slice(self.positions.as_slice());
        if out.len() != src.len() {
            return Err(GeometryError::BufferLength {
                expected: src.len(),
                actual: out.len(),
            });
        }
        out.copy_from_slice(src);
        Ok(())
    }

    /// Overwrite all positions from `data` (length must be `3 * vertex_count`)
    pub fn write_positions(&mut self, data: &[f32]) -> Result<(), GeometryError> {
        let dst: &mut [f32] = bytemuck::cast_slice_mut(self.positions.as_mut_slice());
        if data.len() != dst.len() {
            return Err(GeometryError::BufferLength {
                expected: dst.len(),
                actual: data.len(),
            });
        }
        dst.copy_from_slice(data);
        Ok(())
    }

    /// Check that faces reference existing vertices and attribute arrays line up
    pub fn validate(&self) -> Result<(), GeometryError> {
        let count = self.positions.len();
        for (face_idx, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(GeometryError::InvalidTopology(format!(
                    "face {} has {} vertices",
                    face_idx,
                    face.len()
                )));
            }
            if let Some(&bad) = face.iter().find(|&&i| i as usize >= count) {
                return Err(GeometryError::IndexOutOfRange { index: bad, count });
            }
        }
        if !self.selected.is_empty() && self.selected.len() != count {
            return Err(GeometryError::InvalidTopology(format!(
                "{} selection flags for {} vertices",
                self.selected.len(),
                count
            )));
        }
        if let Some(uvs) = &self.uvs {
            if uvs.len() != count {
                return Err(GeometryError::InvalidTopology(format!(
                    "{} uvs for {} vertices",
                    uvs.len(),
                    count
                )));
            }
        }
        Ok(())
    }
}
