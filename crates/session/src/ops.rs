//! Public move operations.

use glam::Mat4;
use meshedit_geometry::transform;
use meshedit_host::Host;
use meshedit_ipc::{MoveCommand, Strategy};
use tracing::debug;

use crate::backend::select_strategy;
use crate::direct::move_direct;
use crate::error::EditError;
use crate::session::GeometrySession;

/// Outcome of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    /// Strategy that ran; `None` for a no-op move
    pub strategy: Option<Strategy>,
    /// Number of vertices moved
    pub moved: usize,
}

impl MoveReport {
    fn noop() -> Self {
        Self {
            strategy: None,
            moved: 0,
        }
    }
}

/// Resolve `name` to a mesh object and return its world matrix
pub(crate) fn validate_mesh<H: Host + ?Sized>(host: &H, name: &str) -> Result<Mat4, EditError> {
    match host.object(name) {
        Some(obj) if obj.is_mesh() => Ok(obj.matrix_world),
        Some(obj) => Err(EditError::invalid_object(
            name,
            format!("expected a mesh, found {:?}", obj.kind),
        )),
        None => Err(EditError::invalid_object(name, "object not found")),
    }
}

/// Move vertices of a mesh object.
///
/// The backend is resolved against the host's mode on every call: `Auto`
/// runs the direct-buffer path outside edit mode and a live geometry session
/// inside it. Forcing the direct-buffer backend in edit mode fails with
/// [`EditError::UnsafeBackend`]. Validation happens before any host state is
/// touched; a zero distance or zero-length direction returns without
/// touching anything.
pub fn move_geometry<H: Host + ?Sized>(host: &mut H, cmd: &MoveCommand) -> Result<MoveReport, EditError> {
    validate_mesh(host, &cmd.object)?;
    let strategy = select_strategy(cmd.backend, host.mode(), &cmd.object)?;
    if transform::displacement(cmd.direction, cmd.distance).is_none() {
        debug!("Move of '{}' is a no-op", cmd.object);
        return Ok(MoveReport::noop());
    }

    let moved = match strategy {
        Strategy::DirectBuffer => move_direct(host, cmd)?,
        Strategy::Topological => session_move(host, cmd, true)?,
    };
    debug!(
        "Moved {} vertices of '{}' with {:?} (backend {})",
        moved, cmd.object, strategy, cmd.backend
    );
    Ok(MoveReport {
        strategy: Some(strategy),
        moved,
    })
}

/// Move vertices through a [`GeometrySession`], bypassing backend selection.
///
/// With `switch_to_edit` the move runs on the live edit buffer; otherwise on
/// a detached copy written back to persisted storage.
pub fn move_with_session<H: Host + ?Sized>(
    host: &mut H,
    cmd: &MoveCommand,
    switch_to_edit: bool,
) -> Result<MoveReport, EditError> {
    validate_mesh(host, &cmd.object)?;
    if transform::displacement(cmd.direction, cmd.distance).is_none() {
        return Ok(MoveReport::noop());
    }
    let moved = session_move(host, cmd, switch_to_edit)?;
    Ok(MoveReport {
        strategy: Some(Strategy::Topological),
        moved,
    })
}

fn session_move<H: Host + ?Sized>(host: &mut H, cmd: &MoveCommand, switch_to_edit: bool) -> Result<usize, EditError> {
    let mut session = GeometrySession::enter(host, &cmd.object, switch_to_edit)?;
    let moved = session.move_vertices(cmd.direction, cmd.distance, cmd.space, cmd.vertices.as_deref())?;
    session.commit()?;
    Ok(moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use meshedit_geometry::primitives;
    use meshedit_host::{HostObject, MemoryHost};
    use meshedit_ipc::{Backend, Mode};

    fn host() -> MemoryHost {
        let mut host = MemoryHost::new();
        host.add_mesh(HostObject::mesh("Cube"), primitives::cube(2.0));
        host
    }

    #[test]
    fn test_auto_outside_edit_mode_uses_direct_buffer() {
        let mut host = host();
        let report = move_geometry(&mut host, &MoveCommand::new("Cube", Vec3::Z, 2.0)).unwrap();
        assert_eq!(report.strategy, Some(Strategy::DirectBuffer));
        assert_eq!(report.moved, 8);
        assert_eq!(host.stats().mode_requests, 0);
    }

    #[test]
    fn test_auto_inside_edit_mode_uses_session() {
        let mut host = host();
        host.set_active_object(Some("Cube")).unwrap();
        host.request_mode(Mode::Edit).unwrap();
        host.reset_stats();

        let report = move_geometry(&mut host, &MoveCommand::new("Cube", Vec3::X, 1.0)).unwrap();
        assert_eq!(report.strategy, Some(Strategy::Topological));
        assert_eq!(host.mode(), Mode::Edit);
        assert_eq!(host.stats().mode_requests, 0);
        assert_eq!(
            host.edit_mesh("Cube").unwrap().positions()[0],
            Vec3::new(0.0, -1.0, -1.0)
        );
    }

    #[test]
    fn test_noop_still_validates() {
        let mut host = host();
        let err = move_geometry(&mut host, &MoveCommand::new("Nope", Vec3::X, 0.0)).unwrap_err();
        assert!(matches!(err, EditError::InvalidObject { .. }));

        let report = move_geometry(&mut host, &MoveCommand::new("Cube", Vec3::X, 0.0)).unwrap();
        assert_eq!(report, MoveReport::noop());
    }

    #[test]
    fn test_session_move_without_edit_switch() {
        let mut host = host();
        let cmd = MoveCommand::new("Cube", Vec3::NEG_Y, 1.0)
            .with_backend(Backend::DirectBuffer)
            .with_vertices([3]);
        let report = move_with_session(&mut host, &cmd, false).unwrap();
        assert_eq!(report.moved, 1);
        assert_eq!(host.mesh("Cube").unwrap().positions[3], Vec3::new(-1.0, 0.0, -1.0));
        assert_eq!(host.stats().mode_requests, 0);
    }
}
