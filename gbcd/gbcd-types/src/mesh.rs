//! Triangulated grain-boundary surface mesh.

use hashbrown::HashSet;
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MeshDataError, MeshDataResult};
use crate::triangle::Triangle;

/// Node type of a vertex on a boundary between exactly two grains.
pub const NODE_TYPE_INTERIOR: i8 = 2;

/// A triangulated grain-boundary surface.
///
/// Every face separates two features, recorded in `face_labels`. A label of
/// `-1` marks the exterior of the sample and `0` the unassigned feature; such
/// faces never contribute to boundary statistics.
///
/// `faces` and `vertices` may be left empty when the caller only has the
/// per-face arrays. `node_types` is optional and, when present, has one entry
/// per vertex.
///
/// # Example
///
/// ```
/// use gbcd_types::{BoundaryMesh, Point3};
///
/// let mesh = BoundaryMesh::from_triangles(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
///     vec![[1, 2]],
/// );
///
/// assert_eq!(mesh.face_count(), 1);
/// assert!((mesh.face_areas[0] - 0.5).abs() < 1e-12);
/// assert!(mesh.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundaryMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,
    /// Triangle connectivity as indices into `vertices`.
    pub faces: Vec<[u32; 3]>,
    /// Feature ids on either side of each face.
    pub face_labels: Vec<[i32; 2]>,
    /// Unit face normals, pointing from `face_labels[i][0]` toward
    /// `face_labels[i][1]`.
    pub face_normals: Vec<Vector3<f64>>,
    /// Face areas.
    pub face_areas: Vec<f64>,
    /// Per-vertex node types: 2 on a two-grain boundary, 3 or more on triple
    /// lines and quadruple points. Empty when unknown.
    pub node_types: Vec<i8>,
    /// One `[f1, f2]` entry per distinct feature boundary. Empty when the
    /// table is not available, in which case it is derived from
    /// `face_labels`.
    pub feature_face_labels: Vec<[i32; 2]>,
}

impl BoundaryMesh {
    /// Create an empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            face_labels: Vec::new(),
            face_normals: Vec::new(),
            face_areas: Vec::new(),
            node_types: Vec::new(),
            feature_face_labels: Vec::new(),
        }
    }

    /// Create a mesh from geometry and labels, computing normals and areas.
    #[must_use]
    pub fn from_triangles(
        vertices: Vec<Point3<f64>>,
        faces: Vec<[u32; 3]>,
        face_labels: Vec<[i32; 2]>,
    ) -> Self {
        let mut mesh = Self {
            vertices,
            faces,
            face_labels,
            ..Self::new()
        };
        mesh.compute_face_geometry();
        mesh
    }

    /// Create a geometry-free mesh from per-face arrays only.
    #[must_use]
    pub const fn from_face_data(
        face_labels: Vec<[i32; 2]>,
        face_normals: Vec<Vector3<f64>>,
        face_areas: Vec<f64>,
    ) -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            face_labels,
            face_normals,
            face_areas,
            node_types: Vec::new(),
            feature_face_labels: Vec::new(),
        }
    }

    /// Attach per-vertex node types.
    #[must_use]
    pub fn with_node_types(mut self, node_types: Vec<i8>) -> Self {
        self.node_types = node_types;
        self
    }

    /// Attach the distinct feature boundary table.
    #[must_use]
    pub fn with_feature_face_labels(mut self, labels: Vec<[i32; 2]>) -> Self {
        self.feature_face_labels = labels;
        self
    }

    /// Number of faces, as given by the label array.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.face_labels.len()
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// True if the mesh has no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.face_labels.is_empty()
    }

    /// True if per-vertex node types are available.
    #[inline]
    #[must_use]
    pub fn has_node_types(&self) -> bool {
        !self.node_types.is_empty()
    }

    /// Triangle `face` with concrete vertex positions.
    ///
    /// Returns `None` if the face or one of its vertices does not exist.
    #[must_use]
    pub fn triangle(&self, face: usize) -> Option<Triangle> {
        let [a, b, c] = *self.faces.get(face)?;
        let vertex = |i: u32| self.vertices.get(usize::try_from(i).ok()?).copied();
        Some(Triangle::new(vertex(a)?, vertex(b)?, vertex(c)?))
    }

    /// Iterate over all resolvable triangles.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.faces.len()).filter_map(|i| self.triangle(i))
    }

    /// True if every vertex of `face` lies on a two-grain boundary.
    ///
    /// Faces without connectivity or node types are never interior.
    #[must_use]
    pub fn is_interior_face(&self, face: usize) -> bool {
        self.faces.get(face).is_some_and(|f| {
            f.iter().all(|&v| {
                usize::try_from(v)
                    .ok()
                    .and_then(|v| self.node_types.get(v))
                    .is_some_and(|&t| t == NODE_TYPE_INTERIOR)
            })
        })
    }

    /// Recompute `face_normals` and `face_areas` from the vertex positions.
    ///
    /// Degenerate faces and faces with missing vertices get a zero normal and
    /// zero area.
    pub fn compute_face_geometry(&mut self) {
        let (normals, areas): (Vec<Vector3<f64>>, Vec<f64>) = (0..self.faces.len())
            .map(|i| {
                self.triangle(i).map_or((Vector3::zeros(), 0.0), |tri| {
                    (tri.normal().unwrap_or_else(Vector3::zeros), tri.area())
                })
            })
            .unzip();
        self.face_normals = normals;
        self.face_areas = areas;
    }

    /// Check that all per-face and per-vertex arrays are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`MeshDataError::LengthMismatch`] if an array length disagrees
    /// with the face or vertex count, or node types are given for a mesh
    /// without face connectivity. Returns [`MeshDataError::VertexOutOfRange`]
    /// if a face references a missing vertex.
    pub fn validate(&self) -> MeshDataResult<()> {
        let n = self.face_count();
        check_len("face_normals", n, self.face_normals.len())?;
        check_len("face_areas", n, self.face_areas.len())?;
        if !self.faces.is_empty() {
            check_len("faces", n, self.faces.len())?;
        }
        if self.has_node_types() {
            // Node types classify faces only through their vertices.
            check_len("faces", n, self.faces.len())?;
            check_len("node_types", self.vertices.len(), self.node_types.len())?;
        }

        let vertex_count = self.vertices.len();
        for (face, tri) in self.faces.iter().enumerate() {
            if let Some(&vertex) = tri
                .iter()
                .find(|&&v| usize::try_from(v).map_or(true, |v| v >= vertex_count))
            {
                return Err(MeshDataError::VertexOutOfRange {
                    face,
                    vertex,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Distinct feature boundaries as unordered label pairs.
    ///
    /// Returns `feature_face_labels` when present; otherwise each unordered
    /// pair of `face_labels` is reported once, sorted.
    #[must_use]
    pub fn distinct_boundaries(&self) -> Vec<[i32; 2]> {
        if !self.feature_face_labels.is_empty() {
            return self.feature_face_labels.clone();
        }
        let unique: HashSet<[i32; 2]> = self
            .face_labels
            .iter()
            .map(|&[a, b]| if a <= b { [a, b] } else { [b, a] })
            .collect();
        let mut pairs: Vec<[i32; 2]> = unique.into_iter().collect();
        pairs.sort_unstable();
        pairs
    }
}

fn check_len(array: &'static str, expected: usize, got: usize) -> MeshDataResult<()> {
    if expected == got {
        Ok(())
    } else {
        Err(MeshDataError::length_mismatch(array, expected, got))
    }
}
