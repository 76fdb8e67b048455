use std::sync::OnceLock;

use rand::Rng;
use smallvec::SmallVec;

use crate::foundation::core::Point;
use crate::foundation::error::{LowPolyError, LowPolyResult};
use crate::geometry::distance;
use crate::mesh::grid::{Bleed, GridSpec};
use crate::mesh::triangulate::Triangulator;

/// Three vertex indices into a mesh's point list. Winding is not normalized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Triad {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Triad {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    pub fn indices(self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }

    /// Resolve the three positions. Panics on an out-of-range index; meshes validate
    /// their triads on construction.
    pub fn vertices(self, points: &[Point]) -> [Point; 3] {
        [points[self.a], points[self.b], points[self.c]]
    }

    /// The two vertices of this triangle other than `v`.
    pub fn others(self, v: usize) -> [usize; 2] {
        if v == self.a {
            [self.b, self.c]
        } else if v == self.b {
            [self.a, self.c]
        } else {
            [self.a, self.b]
        }
    }
}

pub type TriangleIds = SmallVec<[usize; 8]>;

/// Vertex id to incident triangle ids.
#[derive(Clone, Debug, Default)]
pub struct IncidenceIndex {
    by_vertex: Vec<TriangleIds>,
}

impl IncidenceIndex {
    pub fn build(vertex_count: usize, triangles: &[Triad]) -> Self {
        let mut by_vertex = vec![TriangleIds::new(); vertex_count];
        for (t, tri) in triangles.iter().enumerate() {
            for v in tri.indices() {
                let slot = &mut by_vertex[v];
                if !slot.contains(&t) {
                    slot.push(t);
                }
            }
        }
        Self { by_vertex }
    }

    /// Triangles touching `v`; empty when the triangulator left `v` uncovered.
    pub fn triangles_of(&self, v: usize) -> &[usize] {
        self.by_vertex.get(v).map(|s| s.as_slice()).unwrap_or(&[])
    }

    pub fn vertex_count(&self) -> usize {
        self.by_vertex.len()
    }
}

/// Immutable point list plus triangle topology.
///
/// Animation replaces positions only. Triads always index the original point order.
#[derive(Debug)]
pub struct LowPolyMesh {
    spec: GridSpec,
    bleed: Bleed,
    points: Vec<Point>,
    triangles: Vec<Triad>,
    incidence: OnceLock<IncidenceIndex>,
}

impl LowPolyMesh {
    /// Generate the jittered grid and triangulate it.
    #[tracing::instrument(skip(rng, triangulator))]
    pub fn generate<R, T>(spec: GridSpec, rng: &mut R, triangulator: &T) -> LowPolyResult<Self>
    where
        R: Rng + ?Sized,
        T: Triangulator + ?Sized,
    {
        spec.validate()?;
        let bleed = spec.bleed();
        let points = spec.generate_points(rng);
        let triangles = triangulator.triangulate(&points);
        tracing::debug!(
            cells_x = bleed.cells_x,
            cells_y = bleed.cells_y,
            bleed_x = bleed.x,
            bleed_y = bleed.y,
            points = points.len(),
            triangles = triangles.len(),
            "generated mesh"
        );
        Self::from_parts(spec, points, triangles)
    }

    /// Assemble a mesh from precomputed parts, checking every triad index.
    pub fn from_parts(
        spec: GridSpec,
        points: Vec<Point>,
        triangles: Vec<Triad>,
    ) -> LowPolyResult<Self> {
        spec.validate()?;
        if let Some(bad) = triangles
            .iter()
            .find(|t| t.indices().iter().any(|&i| i >= points.len()))
        {
            return Err(LowPolyError::validation(format!(
                "triangle {bad:?} references a vertex outside 0..{}",
                points.len()
            )));
        }
        Ok(Self {
            spec,
            bleed: spec.bleed(),
            points,
            triangles,
            incidence: OnceLock::new(),
        })
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    pub fn bleed(&self) -> Bleed {
        self.bleed
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn triangles(&self) -> &[Triad] {
        &self.triangles
    }

    pub fn has_incidence(&self) -> bool {
        self.incidence.get().is_some()
    }

    /// The vertex to triangle index, built on first use.
    pub fn incidence(&self) -> &IncidenceIndex {
        self.incidence.get_or_init(|| {
            tracing::debug!(triangles = self.triangles.len(), "building incidence index");
            IncidenceIndex::build(self.points.len(), &self.triangles)
        })
    }

    /// Distinct vertices sharing a triangle with `v`.
    pub fn neighbors(&self, v: usize) -> SmallVec<[usize; 16]> {
        let mut out = SmallVec::new();
        for &t in self.incidence().triangles_of(v) {
            for n in self.triangles[t].others(v) {
                if !out.contains(&n) {
                    out.push(n);
                }
            }
        }
        out
    }

    /// Shortest distance from vertex `v` to any neighbor, measured on `positions`
    /// (a frame indexed like [`Self::points`]). `None` when `v` has no incident triangle.
    pub fn nearest_neighbor_distance(&self, v: usize, positions: &[Point]) -> Option<f64> {
        let here = positions[v];
        self.neighbors(v)
            .into_iter()
            .map(|n| distance(here, positions[n]))
            .min_by(f64::total_cmp)
    }
}
