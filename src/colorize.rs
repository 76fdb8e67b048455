//! Per-triangle color lookup against a gradient.
//!
//! Each triangle is sampled once at its truncated centroid, after the centroid has been
//! pulled back into the visible canvas by the bleed clamp. Fill and stroke share the color
//! so neighbouring triangles tile without seams.

use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::geometry::{PixelPoint, centroid_px};
use crate::gradient::ColorSource;
use crate::mesh::{Bleed, LowPolyMesh, Triad};

/// Pulls centroids that fall in the bleed margin back onto the canvas.
///
/// The `y > H` branch shifts one pixel further than `x > W`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BleedClamp {
    width: i64,
    height: i64,
    bleed_x: i64,
    bleed_y: i64,
}

impl BleedClamp {
    /// Margins are truncated to whole pixels.
    pub fn new(canvas: Canvas, bleed_x: f64, bleed_y: f64) -> Self {
        Self {
            width: i64::from(canvas.width),
            height: i64::from(canvas.height),
            bleed_x: bleed_x as i64,
            bleed_y: bleed_y as i64,
        }
    }

    pub fn for_mesh(mesh: &LowPolyMesh) -> Self {
        let Bleed { x, y, .. } = mesh.bleed();
        Self::new(mesh.spec().canvas, x, y)
    }

    pub fn apply(&self, p: PixelPoint) -> PixelPoint {
        let mut out = p;

        if p.x < 0 {
            out.x += self.bleed_x;
        } else if p.x > self.width {
            out.x -= self.bleed_x;
        } else if p.x == self.width {
            out.x -= self.bleed_x - 1;
        }

        if p.y < 0 {
            out.y += self.bleed_y;
        } else if p.y > self.height {
            out.y -= self.bleed_y + 1;
        } else if p.y == self.height {
            out.y -= self.bleed_y - 1;
        }

        out
    }
}

/// One drawable triangle: positions for this frame plus its fill/stroke color.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColoredTriangle {
    pub triad: Triad,
    pub vertices: [Point; 3],
    pub color: Rgba8,
}

pub struct Colorizer<'a, S: ColorSource + ?Sized> {
    source: &'a S,
    clamp: BleedClamp,
}

impl<'a, S: ColorSource + ?Sized> Colorizer<'a, S> {
    pub fn new(source: &'a S, clamp: BleedClamp) -> Self {
        Self { source, clamp }
    }

    pub fn for_mesh(source: &'a S, mesh: &LowPolyMesh) -> Self {
        Self::new(source, BleedClamp::for_mesh(mesh))
    }

    pub fn color_of(&self, tri: Triad, positions: &[Point]) -> Rgba8 {
        let center = self.clamp.apply(centroid_px(tri, positions));
        self.source.color_at(center)
    }

    /// Color every triangle of `mesh` at the given vertex positions.
    ///
    /// `positions` must be indexed like the mesh's own points (the mesh points themselves
    /// or any animation frame).
    pub fn colorize(&self, mesh: &LowPolyMesh, positions: &[Point]) -> Vec<ColoredTriangle> {
        mesh.triangles()
            .iter()
            .map(|&triad| ColoredTriangle {
                triad,
                vertices: triad.vertices(positions),
                color: self.color_of(triad, positions),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::{AnalyticGradient, GradientKind, GradientSurface};
    use crate::mesh::GridSpec;

    fn clamp_100() -> BleedClamp {
        BleedClamp::new(Canvas::new(100, 100).unwrap(), 10.0, 8.0)
    }

    #[test]
    fn clamp_table() {
        let c = clamp_100();
        let table = [
            ((105, 100), (95, 93)),
            ((100, 101), (91, 92)),
            ((100, 0), (91, 0)),
            ((-3, -2), (7, 6)),
            ((50, 50), (50, 50)),
            ((0, 0), (0, 0)),
            ((99, 99), (99, 99)),
            ((-10, 130), (0, 121)),
        ];
        for ((x, y), (ex, ey)) in table {
            assert_eq!(
                c.apply(PixelPoint::new(x, y)),
                PixelPoint::new(ex, ey),
                "input ({x}, {y})"
            );
        }
    }

    #[test]
    fn fractional_bleed_is_truncated() {
        let c = BleedClamp::new(Canvas::new(100, 100).unwrap(), 10.9, 8.9);
        assert_eq!(c.apply(PixelPoint::new(105, 100)), PixelPoint::new(95, 93));
    }

    #[test]
    fn colorize_is_deterministic_and_covers_every_triangle() {
        let spec = GridSpec::new(20, 20, 0.0, 10.0).unwrap();
        let points = vec![
            Point::new(-5.0, -5.0),
            Point::new(25.0, -5.0),
            Point::new(25.0, 25.0),
            Point::new(-5.0, 25.0),
        ];
        let mesh = LowPolyMesh::from_parts(
            spec,
            points,
            vec![Triad::new(0, 1, 2), Triad::new(0, 2, 3)],
        )
        .unwrap();
        let gradient = AnalyticGradient::new(
            spec.canvas,
            GradientKind::Sweep,
            vec![Rgba8::opaque(255, 0, 0), Rgba8::opaque(0, 0, 255)],
        )
        .unwrap();
        let surface = GradientSurface::from_gradient(gradient);
        let colorizer = Colorizer::for_mesh(&surface, &mesh);

        let a = colorizer.colorize(&mesh, mesh.points());
        let b = colorizer.colorize(&mesh, mesh.points());
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
        assert_eq!(a[0].vertices[1], Point::new(25.0, -5.0));
        assert_ne!(a[0].color, a[1].color);
    }
}
