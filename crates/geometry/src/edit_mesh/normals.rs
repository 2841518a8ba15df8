//! Normal recomputation for EditMesh.

use glam::Vec3;

use super::EditMesh;

impl EditMesh {
    /// Recompute face normals (Newell's method) and area-weighted vertex normals.
    ///
    /// Faces referencing vertices that no longer exist get a zero normal.
    pub fn normal_update(&mut self) {
        let mut accum = vec![Vec3::ZERO; self.vertices.len()];

        for face in &mut self.faces {
            let mut n = Vec3::ZERO;
            let count = face.vertices.len();
            let mut valid = count >= 3;
            for i in 0..count {
                let (Some(cur), Some(next)) = (
                    self.vertices.get(face.vertices[i].0 as usize),
                    self.vertices.get(face.vertices[(i + 1) % count].0 as usize),
                ) else {
                    valid = false;
                    break;
                };
                let (c, nx) = (cur.position, next.position);
                n.x += (c.y - nx.y) * (c.z + nx.z);
                n.y += (c.z - nx.z) * (c.x + nx.x);
                n.z += (c.x - nx.x) * (c.y + nx.y);
            }
            if !valid {
                face.normal = Vec3::ZERO;
                continue;
            }

            // Newell's sum is twice the area vector, so it doubles as the weight
            for v in &face.vertices {
                accum[v.0 as usize] += n;
            }
            face.normal = n.normalize_or_zero();
        }

        for (v, n) in self.vertices.iter_mut().zip(accum) {
            v.normal = n.normalize_or_zero();
        }
    }
}
