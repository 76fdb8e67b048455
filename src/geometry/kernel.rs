//! Stateless plane geometry shared by the mesh, animation and strip code.
//!
//! Angles are degrees at every public boundary and converted to radians only for trig calls.
//! Screen space is assumed: `+x` right, `+y` down.

use crate::foundation::core::Point;
use crate::mesh::Triad;

/// Slopes steeper than this are treated as vertical lines.
const VERTICAL_SLOPE: f64 = 1.0e12;

/// Integer pixel coordinate, produced by truncating a floating point position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

impl PixelPoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Truncate toward zero, matching a float-to-int cast.
    pub fn truncate(p: Point) -> Self {
        Self {
            x: p.x as i64,
            y: p.y as i64,
        }
    }
}

pub fn distance(p: Point, q: Point) -> f64 {
    let dx = p.x - q.x;
    let dy = p.y - q.y;
    (dx * dx + dy * dy).sqrt()
}

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn x_component(angle_deg: f64, length: f64) -> f64 {
    length * deg_to_rad(angle_deg).cos()
}

pub fn y_component(angle_deg: f64, length: f64) -> f64 {
    length * deg_to_rad(angle_deg).sin()
}

/// Translate `start` by `distance` along `angle_deg`.
pub fn walk_along_bearing(angle_deg: f64, distance: f64, start: Point) -> Point {
    Point::new(
        start.x + x_component(angle_deg, distance),
        start.y + y_component(angle_deg, distance),
    )
}

/// Arithmetic mean of the triangle's three vertices.
pub fn centroid(tri: Triad, points: &[Point]) -> Point {
    let [a, b, c] = tri.vertices(points);
    Point::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
}

/// Centroid truncated to whole pixels, as used for gradient sampling.
pub fn centroid_px(tri: Triad, points: &[Point]) -> PixelPoint {
    PixelPoint::truncate(centroid(tri, points))
}

/// Foot of the perpendicular dropped from `reference` onto the line of the given `slope`
/// passing through `line_point`.
///
/// A non-finite or near-infinite slope is a vertical line `x = line_point.x`. When the
/// helper segment used for projection collapses to zero length, `line_point` itself is the
/// intersection.
pub fn line_intersection(slope: f64, line_point: Point, reference: Point) -> Point {
    if !slope.is_finite() || slope.abs() > VERTICAL_SLOPE {
        tracing::trace!(slope, "vertical line intersection");
        return Point::new(line_point.x, reference.y);
    }

    let offset = 2.0 * distance(line_point, reference);
    let x2 = line_point.x + offset;
    let second = Point::new(x2, slope * x2 - slope * line_point.x + line_point.y);

    let dx = second.x - line_point.x;
    let dy = second.y - line_point.y;
    let bottom = dx * dx + dy * dy;
    if bottom == 0.0 || !bottom.is_finite() {
        return line_point;
    }

    let top = (reference.x - line_point.x) * dx + (reference.y - line_point.y) * dy;
    let t = top / bottom;
    Point::new(line_point.x + t * dx, line_point.y + t * dy)
}

/// Strictly inside the circle, compared on squared distances.
pub fn point_inside_circle(point: Point, center: Point, radius: f64) -> bool {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    dx * dx + dy * dy < radius * radius
}

/// Angle in `[0, 360)` from `center` to `point`, measured counter-clockwise on screen.
pub fn polar_angle_deg(center: Point, point: Point) -> f64 {
    let x = point.x - center.x;
    let y = center.y - point.y;
    let deg = rad_to_deg(y.atan2(x));
    if deg < 0.0 { deg + 360.0 } else { deg }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn close_pt(a: Point, b: Point) -> bool {
        close(a.x, b.x) && close(a.y, b.y)
    }

    #[test]
    fn angle_conversions_are_inverse() {
        for deg in [-270.0, -45.0, 0.0, 15.0, 90.0, 180.0, 359.0] {
            assert!(close(rad_to_deg(deg_to_rad(deg)), deg));
        }
        assert!(close(deg_to_rad(180.0), std::f64::consts::PI));
    }

    #[test]
    fn distance_is_euclidean() {
        assert!(close(
            distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)),
            5.0
        ));
        assert!(close(
            distance(Point::new(-1.0, 2.0), Point::new(-1.0, 2.0)),
            0.0
        ));
    }

    #[test]
    fn walking_follows_the_bearing() {
        let start = Point::new(10.0, 10.0);
        assert!(close_pt(
            walk_along_bearing(0.0, 5.0, start),
            Point::new(15.0, 10.0)
        ));
        assert!(close_pt(
            walk_along_bearing(90.0, 5.0, start),
            Point::new(10.0, 15.0)
        ));
        assert!(close_pt(
            walk_along_bearing(180.0, 5.0, start),
            Point::new(5.0, 10.0)
        ));
    }

    #[test]
    fn centroid_is_mean_and_truncates() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 11.0),
        ];
        let tri = Triad::new(0, 1, 2);
        assert!(close_pt(centroid(tri, &pts), Point::new(10.0 / 3.0, 11.0 / 3.0)));
        assert_eq!(centroid_px(tri, &pts), PixelPoint::new(3, 3));
    }

    #[test]
    fn intersection_projects_onto_horizontal_line() {
        let p = line_intersection(0.0, Point::new(0.0, 100.0), Point::new(40.0, 0.0));
        assert!(close_pt(p, Point::new(40.0, 100.0)));
    }

    #[test]
    fn intersection_projects_onto_diagonal_line() {
        let p = line_intersection(1.0, Point::new(0.0, 0.0), Point::new(2.0, 0.0));
        assert!(close_pt(p, Point::new(1.0, 1.0)));
    }

    #[test]
    fn vertical_slope_is_special_cased() {
        let p = line_intersection(f64::NEG_INFINITY, Point::new(5.0, 0.0), Point::new(9.0, 7.0));
        assert_eq!(p, Point::new(5.0, 7.0));
        let q = line_intersection(
            deg_to_rad(90.0).tan(),
            Point::new(5.0, 0.0),
            Point::new(9.0, 7.0),
        );
        assert_eq!(q, Point::new(5.0, 7.0));
    }

    #[test]
    fn coincident_points_intersect_in_place() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(line_intersection(0.5, p, p), p);
    }

    #[test]
    fn circle_test_is_strict() {
        let c = Point::new(0.0, 0.0);
        assert!(point_inside_circle(Point::new(1.0, 1.0), c, 2.0));
        assert!(!point_inside_circle(Point::new(2.0, 0.0), c, 2.0));
    }

    #[test]
    fn polar_angle_quadrants() {
        let c = Point::new(0.0, 0.0);
        assert!(close(polar_angle_deg(c, Point::new(1.0, 0.0)), 0.0));
        assert!(close(polar_angle_deg(c, Point::new(0.0, -1.0)), 90.0));
        assert!(close(polar_angle_deg(c, Point::new(-1.0, -1.0)), 135.0));
        assert!(close(polar_angle_deg(c, Point::new(-1.0, 1.0)), 225.0));
        assert!(close(polar_angle_deg(c, Point::new(0.0, 1.0)), 270.0));
    }
}
