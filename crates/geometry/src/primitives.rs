//! Small built-in meshes.

use glam::Vec3;

use crate::mesh_data::MeshData;

/// Axis-aligned cube centred on the origin: 8 vertices, 6 quads.
///
/// Vertex order is `(-,-,-) (+,-,-) (+,+,-) (-,+,-)` for the bottom ring,
/// then the same ring at `+z`.
pub fn cube(size: f32) -> MeshData {
    let h = size * 0.5;
    let positions = vec![
        Vec3::new(-h, -h, -h),
        Vec3::new(h, -h, -h),
        Vec3::new(h, h, -h),
        Vec3::new(-h, h, -h),
        Vec3::new(-h, -h, h),
        Vec3::new(h, -h, h),
        Vec3::new(h, h, h),
        Vec3::new(-h, h, h),
    ];
    let faces = vec![
        vec![0, 3, 2, 1], // -Z
        vec![4, 5, 6, 7], // +Z
        vec![0, 1, 5, 4], // -Y
        vec![2, 3, 7, 6], // +Y
        vec![0, 4, 7, 3], // -X
        vec![1, 2, 6, 5], // +X
    ];
    MeshData::new(positions, faces)
}

/// Single quad in the XY plane facing +Z.
pub fn plane(size: f32) -> MeshData {
    let h = size * 0.5;
    MeshData::new(
        vec![
            Vec3::new(-h, -h, 0.0),
            Vec3::new(h, -h, 0.0),
            Vec3::new(h, h, 0.0),
            Vec3::new(-h, h, 0.0),
        ],
        vec![vec![0, 1, 2, 3]],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives_validate() {
        assert!(cube(1.0).validate().is_ok());
        assert!(plane(1.0).validate().is_ok());
        assert_eq!(cube(2.0).vertex_count(), 8);
    }
}
