//! Vertex translation math shared by every backend.
//!
//! A move is `normalize(direction) * distance`, optionally re-expressed in the
//! object's local frame, then added to each targeted vertex position. Nothing
//! here knows about the host.

use glam::{Mat3, Mat4, Vec3};
use meshedit_ipc::Space;
use tracing::warn;

use crate::types::GeometryError;

/// Determinant below which a world matrix is treated as singular.
const SINGULAR_EPSILON: f32 = 1e-12;

/// Displacement for a direction and distance.
///
/// Returns `None` when the move is a no-op: distance exactly zero, or a
/// direction with zero (or non-finite) length.
pub fn displacement(direction: Vec3, distance: f32) -> Option<Vec3> {
    if distance == 0.0 {
        return None;
    }
    let length = direction.length();
    if length == 0.0 || !length.is_finite() {
        return None;
    }
    Some(direction / length * distance)
}

/// Inverse of the rotational part of a local-to-world matrix.
///
/// Translation and scale are dropped. Singular matrices have no usable
/// orientation and fall back to the identity.
pub fn inverse_world_rotation(matrix_world: &Mat4) -> Mat3 {
    let det = matrix_world.determinant();
    if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
        warn!("World matrix is singular (det = {}), using identity rotation", det);
        return Mat3::IDENTITY;
    }
    let (_, rotation, _) = matrix_world.to_scale_rotation_translation();
    if !rotation.is_finite() {
        warn!("World matrix has no finite rotation, using identity rotation");
        return Mat3::IDENTITY;
    }
    Mat3::from_quat(rotation.normalize().inverse())
}

/// Express a world-space displacement in the object's local frame.
pub fn to_local(delta: Vec3, matrix_world: &Mat4) -> Vec3 {
    inverse_world_rotation(matrix_world) * delta
}

/// Object-local displacement for a move, or `None` for a no-op move.
pub fn resolve_delta(
    direction: Vec3,
    distance: f32,
    space: Space,
    matrix_world: &Mat4,
) -> Option<Vec3> {
    let delta = displacement(direction, distance)?;
    Some(match space {
        Space::Local => delta,
        Space::World => to_local(delta, matrix_world),
    })
}

/// Validate a vertex subset against `count` vertices.
///
/// Every index is checked before the caller writes anything, so a bad index
/// leaves the geometry untouched. Duplicates collapse to one entry and the
/// result is sorted.
pub fn unique_indices(indices: &[u32], count: usize) -> Result<Vec<usize>, GeometryError> {
    let mut out = Vec::with_capacity(indices.len());
    for &index in indices {
        if index as usize >= count {
            return Err(GeometryError::IndexOutOfRange { index, count });
        }
        out.push(index as usize);
    }
    out.sort_unstable();
    out.dedup();
    Ok(out)
}

/// Add `delta` to all positions, or to the given subset.
///
/// Returns the number of vertices moved.
pub fn translate(
    positions: &mut [Vec3],
    delta: Vec3,
    indices: Option<&[u32]>,
) -> Result<usize, GeometryError> {
    match indices {
        None => {
            for p in positions.iter_mut() {
                *p += delta;
            }
            Ok(positions.len())
        }
        Some(indices) => {
            let targets = unique_indices(indices, positions.len())?;
            for &i in &targets {
                positions[i] += delta;
            }
            Ok(targets.len())
        }
    }
}

/// [`translate`] over a flat `x, y, z, x, y, z, ...` buffer.
pub fn translate_flat(
    buffer: &mut [f32],
    delta: Vec3,
    indices: Option<&[u32]>,
) -> Result<usize, GeometryError> {
    if buffer.len() % 3 != 0 {
        return Err(GeometryError::BufferLength {
            expected: buffer.len() - buffer.len() % 3,
            actual: buffer.len(),
        });
    }
    let positions: &mut [Vec3] = bytemuck::cast_slice_mut(buffer);
    translate(positions, delta, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_displacement_normalizes_direction() {
        let d = displacement(Vec3::new(0.0, 0.0, 5.0), 2.0).unwrap();
        assert!(d.abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-6));
    }

    #[test]
    fn test_displacement_noop_cases() {
        assert!(displacement(Vec3::X, 0.0).is_none());
        assert!(displacement(Vec3::ZERO, 1.0).is_none());
        assert!(displacement(Vec3::new(f32::NAN, 0.0, 0.0), 1.0).is_none());
        // Negative zero is still zero
        assert!(displacement(Vec3::X, -0.0).is_none());
    }

    #[test]
    fn test_world_delta_ignores_translation_and_scale() {
        let world = Mat4::from_scale_rotation_translation(
            Vec3::splat(3.0),
            Quat::from_rotation_z(FRAC_PI_2),
            Vec3::new(10.0, -4.0, 2.0),
        );
        // World +X is object -Y after undoing a 90 degree turn about Z
        let local = resolve_delta(Vec3::X, 1.0, Space::World, &world).unwrap();
        assert!(local.abs_diff_eq(Vec3::new(0.0, -1.0, 0.0), 1e-5));
        assert!((local.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_local_delta_ignores_world_matrix() {
        let world = Mat4::from_rotation_x(1.0);
        let local = resolve_delta(Vec3::Y, 2.0, Space::Local, &world).unwrap();
        assert_eq!(local, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_singular_world_matrix_falls_back_to_identity() {
        let world = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(inverse_world_rotation(&world), Mat3::IDENTITY);
    }

    #[test]
    fn test_translate_subset_with_duplicates() {
        let mut positions = vec![Vec3::ZERO; 4];
        let moved = translate(&mut positions, Vec3::X, Some(&[2, 0, 2][..])).unwrap();
        assert_eq!(moved, 2);
        assert_eq!(positions, vec![Vec3::X, Vec3::ZERO, Vec3::X, Vec3::ZERO]);
    }

    #[test]
    fn test_translate_out_of_range_touches_nothing() {
        let mut positions = vec![Vec3::ONE; 3];
        let err = translate(&mut positions, Vec3::X, Some(&[0, 1, 9][..])).unwrap_err();
        assert_eq!(err, GeometryError::IndexOutOfRange { index: 9, count: 3 });
        assert_eq!(positions, vec![Vec3::ONE; 3]);
    }

    #[test]
    fn test_translate_flat_matches_vec3_path() {
        let mut flat = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let moved = translate_flat(&mut flat, Vec3::new(0.0, 0.0, 2.0), None).unwrap();
        assert_eq!(moved, 2);
        assert_eq!(flat, vec![0.0, 0.0, 2.0, 1.0, 1.0, 3.0]);
    }

    #[test]
    fn test_translate_flat_rejects_ragged_buffer() {
        let mut flat = vec![0.0; 5];
        assert!(translate_flat(&mut flat, Vec3::X, None).is_err());
    }
}
