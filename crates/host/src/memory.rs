//! In-memory host.
//!
//! Behaves like an interactive modeling tool with one edit session at a time:
//! entering edit mode copies the active object's persisted mesh into a live
//! edit buffer, leaving edit mode folds that buffer back into storage. Every
//! mutating call is counted in [`HostStats`], and [`HostFaults`] lets tests
//! make the host misbehave.

use meshedit_geometry::{EditMesh, MeshData};
use meshedit_ipc::Mode;
use tracing::{debug, warn};

use crate::diagnostics::SuppressedError;
use crate::error::HostError;
use crate::object::{EditMeshUpdate, HostObject};
use crate::Host;

/// Counters of host calls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostStats {
    pub mode_requests: usize,
    /// Mode requests that actually changed the mode
    pub mode_switches: usize,
    pub selection_writes: usize,
    pub buffer_writes: usize,
    pub dirty_marks: usize,
    pub edit_updates: usize,
}

/// Injected misbehaviour
#[derive(Debug, Clone, Default)]
pub struct HostFaults {
    /// Mode requests fail with an error
    pub reject_mode_changes: bool,
    /// Mode requests succeed but the mode does not change
    pub ignore_mode_changes: bool,
    /// Bulk position writes fail
    pub fail_buffer_writes: bool,
    /// Selecting any of these objects fails
    pub unselectable: Vec<String>,
}

#[derive(Debug, Clone)]
struct Entry {
    object: HostObject,
    mesh: Option<MeshData>,
}

#[derive(Debug)]
struct LiveEdit {
    object: String,
    mesh: EditMesh,
}

/// Host that keeps all state in memory
#[derive(Debug, Default)]
pub struct MemoryHost {
    entries: Vec<Entry>,
    active: Option<String>,
    selection: Vec<String>,
    mode: Mode,
    edit: Option<LiveEdit>,
    last_edit_update: Option<EditMeshUpdate>,
    faults: HostFaults,
    stats: HostStats,
    suppressed: Vec<SuppressedError>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object without mesh data
    pub fn add_object(&mut self, object: HostObject) -> &mut Self {
        self.insert(Entry { object, mesh: None });
        self
    }

    /// Add an object backed by a persisted mesh
    pub fn add_mesh(&mut self, object: HostObject, mesh: MeshData) -> &mut Self {
        self.insert(Entry {
            object,
            mesh: Some(mesh),
        });
        self
    }

    fn insert(&mut self, entry: Entry) {
        match self.index_of(&entry.object.name) {
            Some(i) => self.entries[i] = entry,
            None => self.entries.push(entry),
        }
    }

    /// Delete an object, dropping it from selection and any edit session
    pub fn remove_object(&mut self, name: &str) -> Option<HostObject> {
        let i = self.index_of(name)?;
        let entry = self.entries.remove(i);
        self.selection.retain(|s| s != name);
        if self.active.as_deref() == Some(name) {
            self.active = None;
        }
        if self.edit.as_ref().is_some_and(|e| e.object == name) {
            debug!("Removed '{}' while editing it, discarding edit buffer", name);
            self.edit = None;
            self.mode = Mode::Object;
        }
        Some(entry.object)
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.object.name == name)
    }

    fn entry(&self, name: &str) -> Result<&Entry, HostError> {
        self.entries
            .iter()
            .find(|e| e.object.name == name)
            .ok_or_else(|| HostError::ObjectNotFound(name.to_string()))
    }

    fn mesh_data(&self, name: &str) -> Result<&MeshData, HostError> {
        self.entry(name)?
            .mesh
            .as_ref()
            .ok_or_else(|| HostError::NoMeshData(name.to_string()))
    }

    fn mesh_data_mut(&mut self, name: &str) -> Result<&mut MeshData, HostError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.object.name == name)
            .ok_or_else(|| HostError::ObjectNotFound(name.to_string()))?;
        entry
            .mesh
            .as_mut()
            .ok_or_else(|| HostError::NoMeshData(name.to_string()))
    }

    pub fn object_mut(&mut self, name: &str) -> Option<&mut HostObject> {
        self.entries
            .iter_mut()
            .find(|e| e.object.name == name)
            .map(|e| &mut e.object)
    }

    /// Persisted mesh of an object
    pub fn mesh(&self, name: &str) -> Option<&MeshData> {
        self.mesh_data(name).ok()
    }

    /// Live edit buffer, read-only
    pub fn edit_mesh(&self, name: &str) -> Option<&EditMesh> {
        self.edit
            .as_ref()
            .filter(|e| e.object == name)
            .map(|e| &e.mesh)
    }

    /// Object whose edit buffer is live
    pub fn editing(&self) -> Option<&str> {
        self.edit.as_ref().map(|e| e.object.as_str())
    }

    pub fn last_edit_update(&self) -> Option<EditMeshUpdate> {
        self.last_edit_update
    }

    pub fn stats(&self) -> HostStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = HostStats::default();
    }

    pub fn faults_mut(&mut self) -> &mut HostFaults {
        &mut self.faults
    }

    /// Restore failures reported through [`Host::report_suppressed`]
    pub fn suppressed(&self) -> &[SuppressedError] {
        &self.suppressed
    }

    pub fn take_suppressed(&mut self) -> Vec<SuppressedError> {
        std::mem::take(&mut self.suppressed)
    }

    fn enter_edit(&mut self) -> Result<(), HostError> {
        let Some(name) = self.active.clone() else {
            return Err(HostError::ModeChangeRejected {
                mode: Mode::Edit,
                reason: "no active object".to_string(),
            });
        };
        let entry = self.entry(&name)?;
        if !entry.object.kind.is_editable() {
            return Err(HostError::ModeChangeRejected {
                mode: Mode::Edit,
                reason: format!("'{}' is not editable", name),
            });
        }
        let mesh = EditMesh::from_mesh_data(self.mesh_data(&name)?)?;
        debug!("Entering edit mode on '{}'", name);
        self.edit = Some(LiveEdit { object: name, mesh });
        self.mode = Mode::Edit;
        Ok(())
    }

    fn leave_edit(&mut self) -> Result<(), HostError> {
        if let Some(live) = self.edit.take() {
            debug!("Leaving edit mode on '{}'", live.object);
            match self.mesh_data_mut(&live.object) {
                Ok(data) => live.mesh.flush_to(data)?,
                Err(e) => warn!("Edit buffer for '{}' has no owner: {}", live.object, e),
            }
        }
        self.mode = Mode::Object;
        Ok(())
    }
}

impl Host for MemoryHost {
    fn mode(&self) -> Mode {
        self.mode
    }

    fn request_mode(&mut self, mode: Mode) -> Result<(), HostError> {
        self.stats.mode_requests += 1;
        if self.faults.reject_mode_changes {
            return Err(HostError::ModeChangeRejected {
                mode,
                reason: "mode changes are disabled".to_string(),
            });
        }
        if self.faults.ignore_mode_changes || mode == self.mode {
            return Ok(());
        }
        match mode {
            Mode::Edit => self.enter_edit()?,
            Mode::Object => self.leave_edit()?,
        }
        self.stats.mode_switches += 1;
        Ok(())
    }

    fn object(&self, name: &str) -> Option<&HostObject> {
        self.entries
            .iter()
            .find(|e| e.object.name == name)
            .map(|e| &e.object)
    }

    fn object_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.object.name.clone()).collect()
    }

    fn active_object(&self) -> Option<&str> {
        self.active.as_deref()
    }

    fn set_active_object(&mut self, name: Option<&str>) -> Result<(), HostError> {
        self.stats.selection_writes += 1;
        if let Some(name) = name {
            self.entry(name)?;
        }
        self.active = name.map(str::to_string);
        Ok(())
    }

    fn selected_objects(&self) -> Vec<String> {
        self.selection.clone()
    }

    fn select_object(&mut self, name: &str, selected: bool) -> Result<(), HostError> {
        self.stats.selection_writes += 1;
        let entry = self.entry(name)?;
        if selected {
            if !entry.object.selectable || self.faults.unselectable.iter().any(|n| n == name) {
                return Err(HostError::NotSelectable(name.to_string()));
            }
            if !self.selection.iter().any(|s| s == name) {
                self.selection.push(name.to_string());
            }
        } else {
            self.selection.retain(|s| s != name);
        }
        Ok(())
    }

    fn vertex_count(&self, name: &str) -> Result<usize, HostError> {
        Ok(self.mesh_data(name)?.vertex_count())
    }

    fn read_positions(&self, name: &str, out: &mut [f32]) -> Result<(), HostError> {
        self.mesh_data(name)?.read_positions(out)?;
        Ok(())
    }

    fn write_positions(&mut self, name: &str, positions: &[f32]) -> Result<(), HostError> {
        if self.faults.fail_buffer_writes {
            return Err(HostError::Rejected(format!("write to '{}' failed", name)));
        }
        self.mesh_data_mut(name)?.write_positions(positions)?;
        self.stats.buffer_writes += 1;
        Ok(())
    }

    fn read_mesh(&self, name: &str) -> Result<MeshData, HostError> {
        Ok(self.mesh_data(name)?.clone())
    }

    fn mark_dirty(&mut self, name: &str) -> Result<(), HostError> {
        self.mesh_data(name)?;
        self.stats.dirty_marks += 1;
        Ok(())
    }

    fn edit_mesh_mut(&mut self, name: &str) -> Option<&mut EditMesh> {
        self.edit
            .as_mut()
            .filter(|e| e.object == name)
            .map(|e| &mut e.mesh)
    }

    fn update_edit_mesh(&mut self, name: &str, update: EditMeshUpdate) -> Result<(), HostError> {
        let live = self
            .edit
            .as_mut()
            .filter(|e| e.object == name)
            .ok_or_else(|| HostError::NoEditBuffer(name.to_string()))?;
        if update.destructive {
            live.mesh.invalidate_lookup();
        }
        live.mesh.normal_update();
        self.last_edit_update = Some(update);
        self.stats.edit_updates += 1;
        Ok(())
    }

    fn report_suppressed(&mut self, error: SuppressedError) {
        self.suppressed.push(error);
    }
}
