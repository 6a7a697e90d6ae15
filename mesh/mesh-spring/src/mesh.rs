//! Generated spring mesh and the host adapter seam.

use nalgebra::{Point3, Vector3};

use crate::stitch::Quad;
use crate::vector;

/// Output of a generation run.
///
/// # Memory Layout
///
/// - `vertices[..centerline_len]` - Centerline points (auxiliary, unused by faces)
/// - `vertices[centerline_len..]` - Profile rings, concatenated in centerline order
/// - `faces` - Quads with counter-clockwise winding viewed from outside the tube
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpringMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,

    /// Quad faces as indices into `vertices`.
    pub faces: Vec<Quad>,

    /// Number of leading centerline vertices (zero when not emitted).
    pub centerline_len: usize,

    /// Points per ring.
    pub profile_resolution: usize,

    /// Base vertex index of each ring, `None` for skipped rings.
    pub ring_offsets: Vec<Option<u32>>,

    /// Indices of rings left out because their frame was degenerate.
    pub skipped_rings: Vec<usize>,
}

impl SpringMesh {
    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of quad faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh has no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Number of rings requested, skipped ones included.
    #[inline]
    #[must_use]
    pub fn ring_count(&self) -> usize {
        self.ring_offsets.len()
    }

    /// The emitted centerline points.
    #[must_use]
    pub fn centerline(&self) -> &[Point3<f64>] {
        &self.vertices[..self.centerline_len]
    }

    /// Points of ring `index`, or `None` if it is out of range or skipped.
    #[must_use]
    pub fn ring(&self, index: usize) -> Option<&[Point3<f64>]> {
        let start = (*self.ring_offsets.get(index)?)? as usize;
        self.vertices.get(start..start + self.profile_resolution)
    }

    /// Split every quad into two triangles, keeping the winding.
    ///
    /// Quad `[v0, v1, v2, v3]` becomes `[v0, v1, v2]` and `[v0, v2, v3]`.
    #[must_use]
    pub fn triangulate(&self) -> Vec<[u32; 3]> {
        let mut triangles = Vec::with_capacity(self.faces.len() * 2);
        for &[v0, v1, v2, v3] in &self.faces {
            triangles.push([v0, v1, v2]);
            triangles.push([v0, v2, v3]);
        }
        triangles
    }

    /// Per-face unit normals computed with Newell's method.
    ///
    /// Faces with zero area get a zero vector.
    #[must_use]
    pub fn face_normals(&self) -> Vec<Vector3<f64>> {
        self.faces
            .iter()
            .map(|face| {
                let mut n = Vector3::zeros();
                for k in 0..4 {
                    let cur = self.vertices[face[k] as usize];
                    let next = self.vertices[face[(k + 1) % 4] as usize];
                    n.x += (cur.y - next.y) * (cur.z + next.z);
                    n.y += (cur.z - next.z) * (cur.x + next.x);
                    n.z += (cur.x - next.x) * (cur.y + next.y);
                }
                vector::normalize(&n).unwrap_or_else(Vector3::zeros)
            })
            .collect()
    }

    /// Axis-aligned bounds `(min, max)` of all vertices.
    #[must_use]
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(min, max), p| {
            (min.inf(p), max.sup(p))
        }))
    }

    /// Feed the mesh to a host adapter.
    pub fn emit_into<S: MeshSink + ?Sized>(&self, name: &str, sink: &mut S) {
        sink.begin(name, self.vertices.len(), self.faces.len());
        for &p in &self.vertices {
            sink.push_vertex(p);
        }
        for &face in &self.faces {
            sink.push_quad(face);
        }
        sink.finish();
    }
}

/// Receiver for a finished mesh.
///
/// Each host environment (a scene graph, an editor, an exporter) implements
/// this once; the generator itself never depends on a host API.
pub trait MeshSink {
    /// Called once before any data, with the final buffer sizes.
    fn begin(&mut self, name: &str, vertex_count: usize, face_count: usize);

    /// Receive the next vertex, in index order.
    fn push_vertex(&mut self, position: Point3<f64>);

    /// Receive the next quad.
    fn push_quad(&mut self, face: Quad);

    /// Called once after the last face.
    fn finish(&mut self) {}
}

/// Flat coordinate and index arrays, the form most "from raw data" host
/// mesh APIs accept.
impl MeshSink for (Vec<[f64; 3]>, Vec<Quad>) {
    fn begin(&mut self, _name: &str, vertex_count: usize, face_count: usize) {
        self.0.clear();
        self.1.clear();
        self.0.reserve(vertex_count);
        self.1.reserve(face_count);
    }

    fn push_vertex(&mut self, position: Point3<f64>) {
        self.0.push([position.x, position.y, position.z]);
    }

    fn push_quad(&mut self, face: Quad) {
        self.1.push(face);
    }
}
