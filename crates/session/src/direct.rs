//! Direct-buffer moves.
//!
//! One bulk read of the persisted positions, the transform over the flat
//! buffer, one bulk write, then a dirty mark. Mode and selection are never
//! touched.

use meshedit_geometry::transform;
use meshedit_host::Host;
use meshedit_ipc::{Mode, MoveCommand};
use tracing::trace;

use crate::error::EditError;
use crate::ops::validate_mesh;

/// Move vertices of `cmd.object` in persisted storage.
///
/// Fails with [`EditError::UnsafeBackend`] while the host is in edit mode.
/// Vertex indices are checked before the buffer is read, so a bad index
/// leaves storage untouched. Returns the number of vertices moved.
pub fn move_direct<H: Host + ?Sized>(host: &mut H, cmd: &MoveCommand) -> Result<usize, EditError> {
    let matrix_world = validate_mesh(host, &cmd.object)?;
    if host.mode() == Mode::Edit {
        return Err(EditError::UnsafeBackend {
            object: cmd.object.clone(),
        });
    }
    let Some(delta) = transform::resolve_delta(cmd.direction, cmd.distance, cmd.space, &matrix_world)
    else {
        return Ok(0);
    };

    let count = host.vertex_count(&cmd.object)?;
    if let Some(indices) = &cmd.vertices {
        transform::unique_indices(indices, count)?;
    }

    let mut buffer = vec![0.0f32; count * 3];
    host.read_positions(&cmd.object, &mut buffer)?;
    let moved = transform::translate_flat(&mut buffer, delta, cmd.vertices.as_deref())?;
    host.write_positions(&cmd.object, &buffer)?;
    host.mark_dirty(&cmd.object)?;

    trace!("Direct move of {} vertices on '{}'", moved, cmd.object);
    Ok(moved)
}
