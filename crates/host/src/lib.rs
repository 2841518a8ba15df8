//! Host application interface for meshedit
//!
//! The host owns objects, the current interaction mode, the selection and the
//! live edit buffer. Everything in meshedit reaches that state through an
//! explicit [`Host`] handle instead of ambient globals, so every guard can
//! snapshot and restore it as plain data.
//!
//! [`MemoryHost`] is a complete in-memory host used by tests and the CLI.

pub mod diagnostics;
pub mod error;
pub mod lookup;
pub mod memory;
pub mod object;
pub mod state;

pub use diagnostics::{RestoreStage, SuppressedError};
pub use error::HostError;
pub use lookup::{SelectOptions, find_object, select_object_by_name};
pub use memory::{HostFaults, HostStats, MemoryHost};
pub use object::{EditMeshUpdate, HostObject};
pub use state::scene_state;

use meshedit_geometry::{EditMesh, MeshData};
use meshedit_ipc::Mode;

/// Mutable state of an interactive modeling host.
///
/// Calls are assumed to come from the host's single editing thread. Mode
/// change requests are best-effort: a host may accept the request and still
/// stay in its current mode, so callers re-read [`Host::mode`] afterwards.
pub trait Host {
    // ========================================================================
    // Mode
    // ========================================================================

    /// Current interaction mode
    fn mode(&self) -> Mode;

    /// Ask the host to switch modes. Requires an active object for edit mode.
    fn request_mode(&mut self, mode: Mode) -> Result<(), HostError>;

    // ========================================================================
    // Objects and selection
    // ========================================================================

    /// Look up an object by name
    fn object(&self, name: &str) -> Option<&HostObject>;

    /// Names of all objects in host order
    fn object_names(&self) -> Vec<String>;

    fn active_object(&self) -> Option<&str>;

    fn set_active_object(&mut self, name: Option<&str>) -> Result<(), HostError>;

    /// Selected object names in selection order
    fn selected_objects(&self) -> Vec<String>;

    fn select_object(&mut self, name: &str, selected: bool) -> Result<(), HostError>;

    // ========================================================================
    // Persisted storage
    // ========================================================================

    fn vertex_count(&self, name: &str) -> Result<usize, HostError>;

    /// Bulk read of every vertex position as `x, y, z` triples
    fn read_positions(&self, name: &str, out: &mut [f32]) -> Result<(), HostError>;

    /// Bulk write of every vertex position as `x, y, z` triples
    fn write_positions(&mut self, name: &str, positions: &[f32]) -> Result<(), HostError>;

    /// Full persisted mesh, for building a detached editable copy
    fn read_mesh(&self, name: &str) -> Result<MeshData, HostError>;

    /// Flag persisted geometry as changed so derived data is recomputed
    fn mark_dirty(&mut self, name: &str) -> Result<(), HostError>;

    // ========================================================================
    // Live edit buffer
    // ========================================================================

    /// The host's live edit buffer for `name`, if it is being edited
    fn edit_mesh_mut(&mut self, name: &str) -> Option<&mut EditMesh>;

    /// Signal that the live edit buffer was mutated
    fn update_edit_mesh(&mut self, name: &str, update: EditMeshUpdate) -> Result<(), HostError>;

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Receive a restore failure that was not raised
    fn report_suppressed(&mut self, _error: SuppressedError) {}

    fn contains_object(&self, name: &str) -> bool {
        self.object(name).is_some()
    }
}
