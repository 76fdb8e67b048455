use rand::Rng;

use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::{LowPolyError, LowPolyResult};
use crate::geometry::PixelPoint;

/// Shape of the gradient laid over the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    /// `(0, 0)` to `(W, H)`, repeating past the end.
    Linear,
    /// Centered, radius `W / 2`, clamped past the rim.
    Radial,
    /// Angular around the center, starting on `+x` and turning toward `+y`.
    Sweep,
}

impl GradientKind {
    /// Linear or radial with equal odds; sweep is only used when asked for.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Self::Linear
        } else {
            Self::Radial
        }
    }

    pub fn parse(s: &str) -> LowPolyResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "radial" => Ok(Self::Radial),
            "sweep" => Ok(Self::Sweep),
            other => Err(LowPolyError::validation(format!(
                "unknown gradient kind '{other}'"
            ))),
        }
    }
}

/// Point to color lookup over a fixed-size canvas.
///
/// Coordinates are whole pixels. Implementations recover out-of-range reads by clamping
/// onto the nearest edge pixel.
pub trait ColorSource {
    fn canvas(&self) -> Canvas;
    fn color_at(&self, p: PixelPoint) -> Rgba8;
}

/// Pure gradient function, evaluated at pixel centers.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalyticGradient {
    canvas: Canvas,
    kind: GradientKind,
    stops: Vec<Rgba8>,
}

impl AnalyticGradient {
    pub fn new(canvas: Canvas, kind: GradientKind, stops: Vec<Rgba8>) -> LowPolyResult<Self> {
        canvas.validate()?;
        if stops.is_empty() {
            return Err(LowPolyError::validation("gradient needs at least one color"));
        }
        Ok(Self {
            canvas,
            kind,
            stops,
        })
    }

    pub fn kind(&self) -> GradientKind {
        self.kind
    }

    pub fn stops(&self) -> &[Rgba8] {
        &self.stops
    }

    /// Gradient parameter in `[0, 1]` at `p`.
    fn param(&self, p: Point) -> f64 {
        let w = self.canvas.width_f64();
        let h = self.canvas.height_f64();
        match self.kind {
            GradientKind::Linear => {
                let t = (p.x * w + p.y * h) / (w * w + h * h);
                t - t.floor()
            }
            GradientKind::Radial => {
                let c = self.canvas.center();
                let r = w / 2.0;
                (p.distance(c) / r).clamp(0.0, 1.0)
            }
            GradientKind::Sweep => {
                let c = self.canvas.center();
                let turn = (p.y - c.y).atan2(p.x - c.x) / std::f64::consts::TAU;
                if turn < 0.0 { turn + 1.0 } else { turn }
            }
        }
    }

    pub fn shade(&self, p: Point) -> Rgba8 {
        let t = self.param(p);
        if self.stops.len() == 1 {
            return self.stops[0];
        }
        let last = (self.stops.len() - 1) as f64;
        let pos = t * last;
        let lo = (pos.floor() as usize).min(self.stops.len() - 1);
        let hi = (lo + 1).min(self.stops.len() - 1);
        Rgba8::lerp(self.stops[lo], self.stops[hi], pos - lo as f64)
    }

    fn pixel_center(p: PixelPoint) -> Point {
        Point::new(p.x as f64 + 0.5, p.y as f64 + 0.5)
    }
}

impl ColorSource for AnalyticGradient {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn color_at(&self, p: PixelPoint) -> Rgba8 {
        self.shade(Self::pixel_center(clamp_to_canvas(self.canvas, p)))
    }
}

/// Gradient baked once into an RGBA raster the size of the canvas.
#[derive(Clone, Debug)]
pub struct GradientSurface {
    gradient: AnalyticGradient,
    raster: image::RgbaImage,
}

impl GradientSurface {
    #[tracing::instrument(skip(stops))]
    pub fn rasterize(canvas: Canvas, kind: GradientKind, stops: Vec<Rgba8>) -> LowPolyResult<Self> {
        let gradient = AnalyticGradient::new(canvas, kind, stops)?;
        Ok(Self::from_gradient(gradient))
    }

    pub fn from_gradient(gradient: AnalyticGradient) -> Self {
        let Canvas { width, height } = gradient.canvas;
        let raster = image::RgbaImage::from_fn(width, height, |x, y| {
            let c = gradient.shade(AnalyticGradient::pixel_center(PixelPoint::new(
                i64::from(x),
                i64::from(y),
            )));
            image::Rgba(c.to_array())
        });
        tracing::debug!(width, height, kind = ?gradient.kind, "rasterized gradient");
        Self { gradient, raster }
    }

    pub fn gradient(&self) -> &AnalyticGradient {
        &self.gradient
    }

    pub fn raster(&self) -> &image::RgbaImage {
        &self.raster
    }
}

impl ColorSource for GradientSurface {
    fn canvas(&self) -> Canvas {
        self.gradient.canvas
    }

    fn color_at(&self, p: PixelPoint) -> Rgba8 {
        let p = clamp_to_canvas(self.gradient.canvas, p);
        Rgba8::from_array(self.raster.get_pixel(p.x as u32, p.y as u32).0)
    }
}

fn clamp_to_canvas(canvas: Canvas, p: PixelPoint) -> PixelPoint {
    let max_x = i64::from(canvas.width) - 1;
    let max_y = i64::from(canvas.height) - 1;
    let clamped = PixelPoint::new(p.x.clamp(0, max_x), p.y.clamp(0, max_y));
    if clamped != p {
        tracing::trace!(?p, ?clamped, "sample outside raster, clamped inward");
    }
    clamped
}
