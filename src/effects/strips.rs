//! Angled strip decomposition of the canvas for directional wipe overlays.
//!
//! The canvas is cut into `count` parallel strips perpendicular to the wipe bearing. The
//! `visible` strips tile the canvas exactly; the `wide` strips are the same cuts pushed out
//! past the canvas edges so rotated content near the border is still covered.

use kurbo::BezPath;

use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{LowPolyError, LowPolyResult};
use crate::geometry::{deg_to_rad, distance, line_intersection, walk_along_bearing};

/// One strip. `a -> b` and `d -> c` run along the wipe bearing; `a -> d` and `b -> c` are
/// the strip's trailing and leading cut lines.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StripQuad {
    pub a: Point,
    pub b: Point,
    pub c: Point,
    pub d: Point,
}

impl StripQuad {
    pub fn corners(&self) -> [Point; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Closed outline `a b c d`.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.a);
        path.line_to(self.b);
        path.line_to(self.c);
        path.line_to(self.d);
        path.close_path();
        path
    }

    /// Inside or on the edge, for either winding.
    pub fn contains(&self, p: Point) -> bool {
        const EPS: f64 = 1e-9;
        let corners = self.corners();
        let mut pos = false;
        let mut neg = false;
        for i in 0..4 {
            let u = corners[i];
            let v = corners[(i + 1) % 4];
            let cross = (v.x - u.x) * (p.y - u.y) - (v.y - u.y) * (p.x - u.x);
            pos |= cross > EPS;
            neg |= cross < -EPS;
        }
        !(pos && neg)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StripSet {
    /// Wipe bearing in degrees, normalized to `[0, 360)`.
    pub angle: i32,
    /// Extent of each visible strip along the bearing.
    pub strip_width: f64,
    pub visible: Vec<StripQuad>,
    pub wide: Vec<StripQuad>,
}

impl StripSet {
    /// Index of the first wide strip containing `p`.
    pub fn wide_strip_of(&self, p: Point) -> Option<usize> {
        self.wide.iter().position(|q| q.contains(p))
    }

    /// Index of the first visible strip containing `p`.
    pub fn visible_strip_of(&self, p: Point) -> Option<usize> {
        self.visible.iter().position(|q| q.contains(p))
    }
}

/// Build the visible and wide strips for a wipe at `angle` degrees.
#[tracing::instrument]
pub fn strip_overlays(angle: i32, count: usize, canvas: Canvas) -> LowPolyResult<StripSet> {
    canvas.validate()?;
    if count == 0 {
        return Err(LowPolyError::validation("strip count must be > 0"));
    }

    let angle = angle.rem_euclid(360);
    let bearing = f64::from(angle);
    let slope = deg_to_rad(bearing).tan();
    let recip_slope = -1.0 / slope;

    let (w, h) = (canvas.width_f64(), canvas.height_f64());
    let area_a = Point::new(0.0, h);
    let area_b = Point::new(w, h);
    let area_c = Point::new(w, 0.0);
    let area_d = Point::new(0.0, 0.0);

    // Rotate corner roles with the sector so the cut lines always meet the same edges.
    let [corner_a, corner_b, corner_c, corner_d] = match angle {
        0..90 => [area_a, area_b, area_c, area_d],
        90..180 => [area_d, area_a, area_b, area_c],
        180..270 => [area_c, area_d, area_a, area_b],
        _ => [area_b, area_c, area_d, area_a],
    };

    let ad = line_intersection(slope, corner_a, corner_d);
    let dc = line_intersection(recip_slope, corner_d, corner_c);
    let ab = line_intersection(slope, corner_a, corner_b);
    let strip_width = distance(ad, ab) / count as f64;

    let visible = visible_strips(bearing, strip_width, ad, dc, count);
    let wide = wide_strips(bearing, strip_width, ad, dc, count, canvas);
    tracing::debug!(angle, count, strip_width, "built strip overlays");

    Ok(StripSet {
        angle,
        strip_width,
        visible,
        wide,
    })
}

fn visible_strips(
    bearing: f64,
    strip_width: f64,
    ad: Point,
    dc: Point,
    count: usize,
) -> Vec<StripQuad> {
    let mut out = Vec::with_capacity(count);
    let (mut a, mut d) = (ad, dc);
    for _ in 0..count {
        let b = walk_along_bearing(bearing, strip_width, a);
        let c = walk_along_bearing(bearing, strip_width, d);
        out.push(StripQuad { a, b, c, d });
        a = b;
        d = c;
    }
    out
}

fn wide_strips(
    bearing: f64,
    strip_width: f64,
    ad: Point,
    dc: Point,
    count: usize,
    canvas: Canvas,
) -> Vec<StripQuad> {
    let half_w = f64::from(canvas.width / 2);
    let half_h = f64::from(canvas.height / 2);

    let mut out = Vec::with_capacity(count);

    let a_out = walk_along_bearing(bearing + 90.0, half_h, ad);
    let d_out = walk_along_bearing(bearing + 270.0, half_h, dc);
    out.push(StripQuad {
        a: walk_along_bearing(bearing + 180.0, half_w, a_out),
        b: walk_along_bearing(bearing, strip_width, a_out),
        c: walk_along_bearing(bearing, strip_width, d_out),
        d: walk_along_bearing(bearing + 180.0, half_w, d_out),
    });

    for i in 1..count {
        let prev = out[i - 1];
        // The last strip also reaches past the far edge.
        let width = if i == count - 1 {
            strip_width + half_w
        } else {
            strip_width
        };
        out.push(StripQuad {
            a: prev.b,
            b: walk_along_bearing(bearing, width, prev.b),
            c: walk_along_bearing(bearing, width, prev.c),
            d: prev.c,
        });
    }
    out
}
