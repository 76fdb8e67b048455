use crate::foundation::core::Point;
use crate::mesh::Triad;

/// Delaunay triangulation of a point list into index triples.
///
/// Implementations must be deterministic for a fixed input order. Degenerate input may
/// produce fewer triangles than needed to cover every point; callers tolerate that.
pub trait Triangulator {
    fn triangulate(&self, points: &[Point]) -> Vec<Triad>;
}

/// [`Triangulator`] backed by the `delaunator` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct DelaunatorTriangulator;

impl Triangulator for DelaunatorTriangulator {
    #[tracing::instrument(skip_all, fields(points = points.len()))]
    fn triangulate(&self, points: &[Point]) -> Vec<Triad> {
        let input: Vec<delaunator::Point> = points
            .iter()
            .map(|p| delaunator::Point { x: p.x, y: p.y })
            .collect();
        let out = delaunator::triangulate(&input);
        out.triangles
            .chunks_exact(3)
            .map(|t| Triad::new(t[0], t[1], t[2]))
            .collect()
    }
}

impl<F> Triangulator for F
where
    F: Fn(&[Point]) -> Vec<Triad>,
{
    fn triangulate(&self, points: &[Point]) -> Vec<Triad> {
        self(points)
    }
}
