/// Geometry primitives for the triangle-soup mesh
use nalgebra::Point3;
use rand::Rng;

use crate::error::MeshError;

/// Floats per vertex (x, y, z)
pub const COMPONENTS_PER_VERTEX: usize = 3;
/// Floats per triangle
pub const FLOATS_PER_TRIANGLE: usize = 3 * COMPONENTS_PER_VERTEX;

/// A triangle face defined by three corner positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Point3<f32>; 3],
}

impl Triangle {
    pub fn new(v0: Point3<f32>, v1: Point3<f32>, v2: Point3<f32>) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    fn from_slice(chunk: &[f32]) -> Self {
        let vertex = |i: usize| {
            let base = i * COMPONENTS_PER_VERTEX;
            Point3::new(chunk[base], chunk[base + 1], chunk[base + 2])
        };
        Self::new(vertex(0), vertex(1), vertex(2))
    }

    /// The three edges of the triangle, as the wireframe draws them
    pub fn edges(&self) -> [(Point3<f32>, Point3<f32>); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

/// A mesh of independent triangles stored as one flat position buffer.
///
/// The buffer is laid out `[x0, y0, z0, x1, y1, z1, x2, y2, z2, ...]`, nine
/// floats per triangle, and never changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    positions: Vec<f32>,
}

impl Mesh {
    /// Generate `count` triangles whose coordinates are uniformly distributed
    /// in `[-half_extent, half_extent]` on every axis.
    pub fn random<R: Rng + ?Sized>(count: usize, half_extent: f32, rng: &mut R) -> Self {
        let len = count * FLOATS_PER_TRIANGLE;
        let mut positions = Vec::with_capacity(len);
        for _ in 0..len {
            positions.push((rng.gen::<f32>() - 0.5) * 2.0 * half_extent);
        }
        Self { positions }
    }

    /// Wrap an existing position buffer.
    pub fn from_positions(positions: Vec<f32>) -> Result<Self, MeshError> {
        if positions.len() % FLOATS_PER_TRIANGLE != 0 {
            return Err(MeshError::RaggedBuffer(positions.len()));
        }
        Ok(Self { positions })
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / FLOATS_PER_TRIANGLE
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.positions
            .chunks_exact(FLOATS_PER_TRIANGLE)
            .map(Triangle::from_slice)
    }

    /// Bounding box of every vertex, or `None` for an empty mesh
    pub fn bounds(&self) -> Option<Bounds> {
        let mut vertices = self
            .positions
            .chunks_exact(COMPONENTS_PER_VERTEX)
            .map(|v| Point3::new(v[0], v[1], v[2]));

        let first = vertices.next()?;
        let (min, max) = vertices.fold((first, first), |(min, max), p| {
            (min.inf(&p), max.sup(&p))
        });
        Some(Bounds { min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_buffer_length() {
        let mut rng = StdRng::seed_from_u64(1);
        for count in [0, 1, 50, 333] {
            let mesh = Mesh::random(count, 2.0, &mut rng);
            assert_eq!(mesh.positions().len(), count * 3 * 3);
            assert_eq!(mesh.triangle_count(), count);
        }
    }

    #[test]
    fn test_random_coordinates_within_cube() {
        let mut rng = StdRng::seed_from_u64(99);
        let mesh = Mesh::random(500, 2.0, &mut rng);
        assert!(mesh.positions().iter().all(|c| (-2.0..=2.0).contains(c)));

        let bounds = mesh.bounds().unwrap();
        // 4500 uniform samples should reach close to both faces of the cube
        assert!(bounds.min.x < -1.9 && bounds.max.x > 1.9);
    }

    #[test]
    fn test_same_seed_same_mesh() {
        let a = Mesh::random(10, 2.0, &mut StdRng::seed_from_u64(5));
        let b = Mesh::random(10, 2.0, &mut StdRng::seed_from_u64(5));
        let c = Mesh::random(10, 2.0, &mut StdRng::seed_from_u64(6));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_from_positions_rejects_partial_triangles() {
        assert!(Mesh::from_positions(vec![0.0; 18]).is_ok());
        let err = Mesh::from_positions(vec![0.0; 10]).unwrap_err();
        assert!(matches!(err, MeshError::RaggedBuffer(10)));
    }

    #[test]
    fn test_triangles_follow_buffer_order() {
        let mesh = Mesh::from_positions(vec![
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, //
            2.0, 2.0, 2.0, 3.0, 2.0, 2.0, 2.0, 3.0, 2.0,
        ])
        .unwrap();

        let triangles: Vec<Triangle> = mesh.triangles().collect();
        assert_eq!(triangles.len(), 2);
        assert_eq!(triangles[0].vertices[1], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(triangles[1].vertices[2], Point3::new(2.0, 3.0, 2.0));

        let edges = triangles[0].edges();
        assert_eq!(edges[2].0, triangles[0].vertices[2]);
        assert_eq!(edges[2].1, triangles[0].vertices[0]);
    }

    #[test]
    fn test_empty_mesh_has_no_bounds() {
        let mesh = Mesh::from_positions(Vec::new()).unwrap();
        assert!(mesh.is_empty());
        assert!(mesh.bounds().is_none());
    }
}
