use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Vertex layout handed to a GPU backend (position + normal).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Heightfield grid mesh for one tile, in world space.
///
/// Vertices are row-major with rows along +Z; `edge` vertices per side.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainMesh {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
    edge: usize,
}

impl TerrainMesh {
    /// Build a `(resolution + 1)^2` vertex grid covering `size x size` from
    /// `origin`, with `height(x, z)` evaluated at every vertex's world XZ.
    pub fn from_heights(
        origin: Vec2,
        size: f32,
        resolution: u32,
        height: impl Fn(f64, f64) -> f64,
    ) -> Self {
        let resolution = resolution.max(1) as usize;
        let edge = resolution + 1;
        let step = size / resolution as f32;

        let mut vertices = Vec::with_capacity(edge * edge);
        for row in 0..edge {
            for col in 0..edge {
                let x = origin.x + col as f32 * step;
                let z = origin.y + row as f32 * step;
                let y = height(x as f64, z as f64) as f32;
                vertices.push(TerrainVertex {
                    position: [x, y, z],
                    normal: [0.0, 1.0, 0.0],
                });
            }
        }

        // Counter-clockwise seen from +Y.
        let mut indices = Vec::with_capacity(resolution * resolution * 6);
        for row in 0..resolution {
            for col in 0..resolution {
                let top_left = (row * edge + col) as u32;
                let top_right = top_left + 1;
                let bottom_left = top_left + edge as u32;
                let bottom_right = bottom_left + 1;
                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        let mut mesh = Self {
            vertices,
            indices,
            edge,
        };
        mesh.compute_normals();
        mesh
    }

    /// Smooth normals: area-weighted sum of adjacent face normals.
    fn compute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let pa = Vec3::from(self.vertices[a].position);
            let pb = Vec3::from(self.vertices[b].position);
            let pc = Vec3::from(self.vertices[c].position);
            let face = (pb - pa).cross(pc - pa);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }
        for (vertex, n) in self.vertices.iter_mut().zip(normals) {
            vertex.normal = n.try_normalize().unwrap_or(Vec3::Y).to_array();
        }
    }

    pub fn edge(&self) -> usize {
        self.edge
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex(&self, col: usize, row: usize) -> Option<&TerrainVertex> {
        if col >= self.edge || row >= self.edge {
            return None;
        }
        self.vertices.get(row * self.edge + col)
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Lowest and highest vertex heights.
    pub fn height_range(&self) -> (f32, f32) {
        self.vertices
            .iter()
            .map(|v| v.position[1])
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), y| {
                (lo.min(y), hi.max(y))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_grid_layout() {
        let mesh = TerrainMesh::from_heights(Vec2::new(40.0, -80.0), 40.0, 4, |_, _| 0.0);
        assert_eq!(mesh.edge(), 5);
        assert_eq!(mesh.vertex_count(), 25);
        assert_eq!(mesh.triangle_count(), 32);
        assert_eq!(mesh.vertex(0, 0).unwrap().position, [40.0, 0.0, -80.0]);
        assert_eq!(mesh.vertex(4, 4).unwrap().position, [80.0, 0.0, -40.0]);
        assert_eq!(mesh.vertex(1, 0).unwrap().position, [50.0, 0.0, -80.0]);
        assert!(mesh.vertex(5, 0).is_none());
    }

    #[test]
    fn flat_grid_normals_point_up() {
        let mesh = TerrainMesh::from_heights(Vec2::ZERO, 10.0, 3, |_, _| 2.5);
        for v in &mesh.vertices {
            assert!((Vec3::from(v.normal) - Vec3::Y).length() < 1e-6);
            assert_eq!(v.position[1], 2.5);
        }
    }

    #[test]
    fn sloped_grid_normals_lean_downhill() {
        // Height rises with x: normals tilt toward -x, stay unit length.
        let mesh = TerrainMesh::from_heights(Vec2::ZERO, 10.0, 4, |x, _| x * 0.5);
        for v in &mesh.vertices {
            let n = Vec3::from(v.normal);
            assert!(n.x < 0.0);
            assert!(n.y > 0.0);
            assert!(n.z.abs() < 1e-6);
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn indices_are_in_bounds() {
        let mesh = TerrainMesh::from_heights(Vec2::ZERO, 40.0, 32, |x, z| (x * z).sin());
        let count = mesh.vertex_count() as u32;
        assert_eq!(mesh.vertex_count(), 33 * 33);
        assert!(mesh.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn byte_views_cover_buffers() {
        let mesh = TerrainMesh::from_heights(Vec2::ZERO, 4.0, 2, |_, _| 0.0);
        assert_eq!(mesh.vertex_bytes().len(), 9 * std::mem::size_of::<TerrainVertex>());
        assert_eq!(mesh.index_bytes().len(), mesh.indices.len() * 4);
    }

    #[test]
    fn height_range_spans_samples() {
        let mesh = TerrainMesh::from_heights(Vec2::ZERO, 4.0, 4, |x, _| x);
        assert_eq!(mesh.height_range(), (0.0, 4.0));
    }
}
