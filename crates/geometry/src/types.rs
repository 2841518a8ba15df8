//! Type definitions for the editable mesh.

use glam::Vec3;

/// Type-safe vertex identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

/// Type-safe face identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceId(pub u32);

/// A vertex in the editable mesh
#[derive(Debug, Clone)]
pub struct EditVertex {
    pub id: VertexId,
    pub position: Vec3,
    pub normal: Vec3,
    pub selected: bool,
    /// Lookup index, only meaningful after the lookup table was rebuilt
    pub index: u32,
}

/// A face (polygon) in the editable mesh
#[derive(Debug, Clone)]
pub struct EditFace {
    pub id: FaceId,
    /// Vertex loop, counter-clockwise when seen from outside
    pub vertices: Vec<VertexId>,
    /// Cached face normal
    pub normal: Vec3,
}

/// Errors that can occur during mesh geometry operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("Vertex index {index} out of range for {count} vertices")]
    IndexOutOfRange { index: u32, count: usize },
    #[error("Vertex lookup table is stale")]
    StaleLookup,
    #[error("Buffer holds {actual} floats, expected {expected}")]
    BufferLength { expected: usize, actual: usize },
    #[error("Invalid mesh topology: {0}")]
    InvalidTopology(String),
}
