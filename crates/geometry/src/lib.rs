//! Mesh geometry for meshedit
//!
//! This crate provides the host-independent half of mesh editing:
//! - [`MeshData`] - persisted vertex buffer with face loops and selection flags
//! - [`EditMesh`] - editable representation with a rebuildable index lookup table
//! - [`transform`] - direction/distance decomposition, world-to-local conversion
//!   and per-vertex delta application
//! - [`primitives`] - small meshes for tests and demos

pub mod edit_mesh;
pub mod mesh_data;
pub mod primitives;
pub mod transform;
pub mod types;

pub use edit_mesh::EditMesh;
pub use mesh_data::MeshData;
pub use types::*;
