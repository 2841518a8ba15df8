//! Geometry sessions.
//!
//! A [`GeometrySession`] binds an editable mesh to one object for the length
//! of a scope. With `switch_to_edit` it forces edit mode through a
//! [`ModeGuard`] and works on the host's live edit buffer; without it, it
//! works on a detached copy of the persisted mesh and leaves the mode alone.
//!
//! Release order on exit is fixed: write-back, then release of the detached
//! copy, then mode and selection restore.

use glam::{Mat4, Vec3};
use meshedit_geometry::{EditMesh, transform};
use meshedit_host::{EditMeshUpdate, Host, HostError, RestoreStage};
use meshedit_ipc::{Mode, Space};
use tracing::{debug, trace, warn};

use crate::error::EditError;
use crate::mode::ModeGuard;
use crate::ops::validate_mesh;
use crate::restore;

/// Where the session's geometry lives
enum Editable {
    /// Host-owned edit buffer, fetched through the host on each access
    Live,
    /// Copy owned by the session
    Detached(EditMesh),
}

impl Editable {
    fn stage(&self) -> RestoreStage {
        match self {
            Editable::Live => RestoreStage::EditUpdate,
            Editable::Detached(_) => RestoreStage::WriteBack,
        }
    }
}

/// Host access for the lifetime of a session
enum Scope<'h, H: Host + ?Sized> {
    Edit(ModeGuard<'h, H>),
    Direct(&'h mut H),
}

impl<H: Host + ?Sized> Scope<'_, H> {
    fn host(&self) -> &H {
        match self {
            Scope::Edit(guard) => guard.host(),
            Scope::Direct(host) => host,
        }
    }

    fn host_mut(&mut self) -> &mut H {
        match self {
            Scope::Edit(guard) => guard.host_mut(),
            Scope::Direct(host) => host,
        }
    }
}

/// Editable geometry bound to one mesh object for a scope.
pub struct GeometrySession<'h, H: Host + ?Sized> {
    object: String,
    matrix_world: Mat4,
    /// `None` once written back
    geometry: Option<Editable>,
    // Dropped last so mode and selection are restored after write-back
    scope: Scope<'h, H>,
}

impl<'h, H: Host + ?Sized> GeometrySession<'h, H> {
    /// Open a session on a mesh object.
    pub fn enter(host: &'h mut H, object: &str, switch_to_edit: bool) -> Result<Self, EditError> {
        let matrix_world = validate_mesh(&*host, object)?;

        let (scope, geometry) = if switch_to_edit {
            let mut guard = ModeGuard::edit(host, object)?;
            let mesh = guard
                .host_mut()
                .edit_mesh_mut(object)
                .ok_or_else(|| EditError::LiveGeometryUnavailable(object.to_string()))?;
            mesh.ensure_lookup_table();
            mesh.normal_update();
            (Scope::Edit(guard), Editable::Live)
        } else {
            if host.mode() == Mode::Edit {
                warn!(
                    "Detached session on '{}' while the host is in edit mode; the live buffer wins on exit",
                    object
                );
            }
            let data = host.read_mesh(object)?;
            let mut mesh = EditMesh::from_mesh_data(&data)?;
            mesh.ensure_lookup_table();
            mesh.normal_update();
            (Scope::Direct(host), Editable::Detached(mesh))
        };

        debug!(
            "Geometry session opened on '{}' ({})",
            object,
            if switch_to_edit { "live" } else { "detached" }
        );
        Ok(Self {
            object: object.to_string(),
            matrix_world,
            geometry: Some(geometry),
            scope,
        })
    }

    pub fn object(&self) -> &str {
        &self.object
    }

    pub fn matrix_world(&self) -> Mat4 {
        self.matrix_world
    }

    /// Whether the session works on the host's live edit buffer
    pub fn is_live(&self) -> bool {
        matches!(self.geometry, Some(Editable::Live))
    }

    pub fn host(&self) -> &H {
        self.scope.host()
    }

    /// The editable mesh
    pub fn geometry_mut(&mut self) -> Result<&mut EditMesh, EditError> {
        match &mut self.geometry {
            Some(Editable::Detached(mesh)) => Ok(mesh),
            Some(Editable::Live) => self
                .scope
                .host_mut()
                .edit_mesh_mut(&self.object)
                .ok_or_else(|| EditError::LiveGeometryUnavailable(self.object.clone())),
            None => Err(EditError::LiveGeometryUnavailable(self.object.clone())),
        }
    }

    /// Indices of all vertices, or only of selected ones
    pub fn vertex_indices(&mut self, selected_only: bool) -> Result<Vec<u32>, EditError> {
        let mesh = self.geometry_mut()?;
        Ok(mesh.indices(selected_only))
    }

    /// Move vertices by `normalize(direction) * distance`.
    ///
    /// `None` for `indices` moves every vertex. A zero distance or a
    /// zero-length direction is a no-op. Returns the number of vertices moved.
    pub fn move_vertices(
        &mut self,
        direction: Vec3,
        distance: f32,
        space: Space,
        indices: Option<&[u32]>,
    ) -> Result<usize, EditError> {
        let Some(delta) = transform::resolve_delta(direction, distance, space, &self.matrix_world)
        else {
            trace!("move_vertices on '{}' is a no-op", self.object);
            return Ok(0);
        };
        let mesh = self.geometry_mut()?;
        // The host may have touched a live buffer since the last access
        mesh.ensure_lookup_table();
        Ok(mesh.translate(delta, indices)?)
    }

    /// Write back and release, reporting a write-back failure.
    pub fn commit(mut self) -> Result<(), EditError> {
        match self.geometry.take() {
            Some(editable) => Ok(write_back(self.scope.host_mut(), &self.object, editable)?),
            None => Ok(()),
        }
    }
}

/// Flush a session's geometry to the host. Consumes (releases) a detached copy.
fn write_back<H: Host + ?Sized>(host: &mut H, object: &str, editable: Editable) -> Result<(), HostError> {
    match editable {
        Editable::Detached(mesh) => {
            let positions = mesh.positions();
            host.write_positions(object, bytemuck::cast_slice(positions.as_slice()))?;
            host.mark_dirty(object)?;
            trace!("Wrote back {} positions to '{}'", positions.len(), object);
        }
        Editable::Live => {
            host.update_edit_mesh(
                object,
                EditMeshUpdate {
                    destructive: false,
                    loop_triangles: false,
                },
            )?;
        }
    }
    Ok(())
}

impl<H: Host + ?Sized> Drop for GeometrySession<'_, H> {
    fn drop(&mut self) {
        if let Some(editable) = self.geometry.take() {
            let stage = editable.stage();
            let host = self.scope.host_mut();
            let result = write_back(host, &self.object, editable);
            restore::discard(host, stage, Some(&self.object), result);
        }
        debug!("Geometry session on '{}' closed", self.object);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::StateSnapshot;
    use meshedit_geometry::primitives;
    use meshedit_host::{HostObject, MemoryHost};
    use meshedit_ipc::ObjectKind;

    fn host() -> MemoryHost {
        let mut host = MemoryHost::new();
        let mut cube = primitives::cube(2.0);
        cube.set_selected(0, true).unwrap();
        cube.set_selected(7, true).unwrap();
        host.add_mesh(HostObject::mesh("Cube"), cube);
        host.add_object(HostObject::new("Camera", ObjectKind::Camera));
        host.select_object("Camera", true).unwrap();
        host.set_active_object(Some("Camera")).unwrap();
        host
    }

    fn positions(host: &MemoryHost) -> Vec<Vec3> {
        host.mesh("Cube").unwrap().positions.clone()
    }

    #[test]
    fn test_detached_session_writes_back_without_mode_change() {
        let mut host = host();
        let before = positions(&host);
        {
            let mut session = GeometrySession::enter(&mut host, "Cube", false).unwrap();
            assert!(!session.is_live());
            let moved = session
                .move_vertices(Vec3::Z, 2.0, Space::Local, None)
                .unwrap();
            assert_eq!(moved, 8);
        }
        let after = positions(&host);
        for (a, b) in after.iter().zip(&before) {
            assert_eq!(*a, *b + Vec3::new(0.0, 0.0, 2.0));
        }
        assert_eq!(host.stats().mode_requests, 0);
        assert_eq!(host.stats().dirty_marks, 1);
        assert_eq!(host.active_object(), Some("Camera"));
    }

    #[test]
    fn test_live_session_edits_buffer_and_restores() {
        let mut host = host();
        let snapshot = StateSnapshot::capture(&host);
        {
            let mut session = GeometrySession::enter(&mut host, "Cube", true).unwrap();
            assert!(session.is_live());
            assert_eq!(session.host().mode(), Mode::Edit);
            session
                .move_vertices(Vec3::X, 1.0, Space::Local, Some(&[0][..]))
                .unwrap();
        }
        assert_eq!(host.mode(), Mode::Object);
        assert_eq!(StateSnapshot::capture(&host), snapshot);
        assert_eq!(positions(&host)[0], Vec3::new(0.0, -1.0, -1.0));
        assert_eq!(
            host.last_edit_update(),
            Some(EditMeshUpdate {
                destructive: false,
                loop_triangles: false
            })
        );
    }

    #[test]
    fn test_selected_indices_default() {
        let mut host = host();
        let mut session = GeometrySession::enter(&mut host, "Cube", false).unwrap();
        assert_eq!(session.vertex_indices(true).unwrap(), vec![0, 7]);
        assert_eq!(session.vertex_indices(false).unwrap().len(), 8);
    }

    #[test]
    fn test_rejects_non_mesh_objects() {
        let mut host = host();
        let err = GeometrySession::enter(&mut host, "Camera", true).err().unwrap();
        assert!(matches!(err, EditError::InvalidObject { name, .. } if name == "Camera"));
        assert_eq!(host.stats().mode_requests, 0);
    }

    #[test]
    fn test_zero_moves_are_noops() {
        let mut host = host();
        let mut session = GeometrySession::enter(&mut host, "Cube", false).unwrap();
        assert_eq!(session.move_vertices(Vec3::ZERO, 5.0, Space::World, None).unwrap(), 0);
        assert_eq!(session.move_vertices(Vec3::Y, 0.0, Space::Local, None).unwrap(), 0);
        drop(session);
        assert_eq!(positions(&host), primitives::cube(2.0).positions);
    }

    #[test]
    fn test_failure_inside_live_session_restores_state() {
        let mut host = host();
        let snapshot = StateSnapshot::capture(&host);
        let before = positions(&host);

        let result = (|| -> Result<(), EditError> {
            let mut session = GeometrySession::enter(&mut host, "Cube", true)?;
            session.move_vertices(Vec3::Y, 1.0, Space::Local, Some(&[1, 42][..]))?;
            session.commit()
        })();

        assert!(matches!(
            result,
            Err(EditError::Geometry(meshedit_geometry::GeometryError::IndexOutOfRange {
                index: 42,
                ..
            }))
        ));
        assert_eq!(host.mode(), Mode::Object);
        assert_eq!(StateSnapshot::capture(&host), snapshot);
        assert_eq!(positions(&host), before);
    }

    #[test]
    fn test_commit_reports_write_back_failure() {
        let mut host = host();
        host.faults_mut().fail_buffer_writes = true;
        let mut session = GeometrySession::enter(&mut host, "Cube", false).unwrap();
        session.move_vertices(Vec3::X, 1.0, Space::Local, None).unwrap();
        let err = session.commit().unwrap_err();
        assert!(matches!(err, EditError::Host(HostError::Rejected(_))));
        assert!(host.suppressed().is_empty());
    }

    #[test]
    fn test_drop_suppresses_write_back_failure() {
        let mut host = host();
        host.faults_mut().fail_buffer_writes = true;
        {
            let mut session = GeometrySession::enter(&mut host, "Cube", false).unwrap();
            session.move_vertices(Vec3::X, 1.0, Space::Local, None).unwrap();
        }
        let suppressed = host.suppressed();
        assert_eq!(suppressed.len(), 1);
        assert_eq!(suppressed[0].stage, RestoreStage::WriteBack);
        assert_eq!(positions(&host), primitives::cube(2.0).positions);
    }

    #[test]
    fn test_world_space_uses_object_rotation() {
        let mut host = MemoryHost::new();
        host.add_mesh(
            HostObject::mesh("Turned").with_matrix(Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2)),
            primitives::plane(2.0),
        );
        {
            let mut session = GeometrySession::enter(&mut host, "Turned", false).unwrap();
            session
                .move_vertices(Vec3::Y, 1.0, Space::World, Some(&[0][..]))
                .unwrap();
        }
        // World +Y is local +X for an object turned 90 degrees about Z
        let moved = host.mesh("Turned").unwrap().positions[0];
        assert!(moved.abs_diff_eq(Vec3::new(0.0, -1.0, 0.0), 1e-5));
    }
}
