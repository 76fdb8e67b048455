use rand::Rng;

use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{LowPolyError, LowPolyResult};

pub const DEFAULT_CELL_SIZE: f64 = 150.0;
pub const DEFAULT_VARIANCE: f64 = 0.75;
/// Upper bound on `cells_x * cells_y` accepted by [`GridSpec::validate`].
pub const MAX_GRID_POINTS: u64 = 1 << 22;

/// Parameters of the jittered point grid.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridSpec {
    pub canvas: Canvas,
    /// Jitter as a fraction of `cell_size`, in `[0, 1]`.
    pub variance: f64,
    /// Grid pitch in pixels, `> 0`.
    pub cell_size: f64,
}

/// Cell counts and bleed margins derived from a [`GridSpec`].
///
/// `cells * cell_size` covers the canvas plus `bleed` on both sides exactly.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bleed {
    pub cells_x: u32,
    pub cells_y: u32,
    pub x: f64,
    pub y: f64,
}

impl GridSpec {
    pub fn new(width: u32, height: u32, variance: f64, cell_size: f64) -> LowPolyResult<Self> {
        let spec = Self {
            canvas: Canvas { width, height },
            variance,
            cell_size,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn with_defaults(width: u32, height: u32) -> LowPolyResult<Self> {
        Self::new(width, height, DEFAULT_VARIANCE, DEFAULT_CELL_SIZE)
    }

    pub fn validate(&self) -> LowPolyResult<()> {
        self.canvas.validate()?;
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(LowPolyError::validation(format!(
                "cell_size must be finite and > 0, got {}",
                self.cell_size
            )));
        }
        let cells = self.cell_count_f64();
        if cells > MAX_GRID_POINTS as f64 {
            return Err(LowPolyError::validation(format!(
                "cell_size {} yields {cells} grid points for a {}x{} canvas, limit is {MAX_GRID_POINTS}",
                self.cell_size, self.canvas.width, self.canvas.height
            )));
        }
        if !(0.0..=1.0).contains(&self.variance) {
            return Err(LowPolyError::validation(format!(
                "variance must be in [0, 1], got {}",
                self.variance
            )));
        }
        Ok(())
    }

    pub fn bleed(&self) -> Bleed {
        let c = self.cell_size;
        let w = self.canvas.width_f64();
        let h = self.canvas.height_f64();
        let cells_x = ((w + 4.0 * c) / c).floor();
        let cells_y = ((h + 4.0 * c) / c).floor();
        Bleed {
            cells_x: cells_x as u32,
            cells_y: cells_y as u32,
            x: (cells_x * c - w) / 2.0,
            y: (cells_y * c - h) / 2.0,
        }
    }

    /// `cells_x * cells_y` before any integer cast.
    fn cell_count_f64(&self) -> f64 {
        let c = self.cell_size;
        let cells_x = ((self.canvas.width_f64() + 4.0 * c) / c).floor();
        let cells_y = ((self.canvas.height_f64() + 4.0 * c) / c).floor();
        cells_x * cells_y
    }

    /// Largest jitter offset applied on either axis.
    pub fn jitter_bound(&self) -> f64 {
        self.cell_size * self.variance / 2.0
    }

    /// One point per cell over the bled area, column-major (x outer, y inner).
    ///
    /// Each point sits at its cell center plus an independent uniform offset in
    /// `[-jitter_bound, jitter_bound)` on each axis, floored to whole pixels.
    pub fn generate_points<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Point> {
        let bleed = self.bleed();
        let c = self.cell_size;
        let jitter = self.jitter_bound();
        let offset = |rng: &mut R| -> f64 { rng.random::<f64>() * 2.0 * jitter - jitter };

        let mut points = Vec::with_capacity(bleed.cells_x as usize * bleed.cells_y as usize);
        for i in 0..bleed.cells_x {
            let left = -bleed.x + f64::from(i) * c;
            for j in 0..bleed.cells_y {
                let top = -bleed.y + f64::from(j) * c;
                let x = left + c / 2.0 + offset(rng);
                let y = top + c / 2.0 + offset(rng);
                points.push(Point::new(x.floor(), y.floor()));
            }
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn rejects_bad_parameters() {
        assert!(GridSpec::new(0, 100, 0.5, 10.0).is_err());
        assert!(GridSpec::new(100, 100, 0.5, 0.0).is_err());
        assert!(GridSpec::new(100, 100, 0.5, -3.0).is_err());
        assert!(GridSpec::new(100, 100, 0.5, f64::NAN).is_err());
        assert!(GridSpec::new(100, 100, 1.5, 10.0).is_err());
        assert!(GridSpec::new(100, 100, -0.1, 10.0).is_err());
        assert!(GridSpec::new(100, 100, 1.0, 10.0).is_ok());
    }

    #[test]
    fn rejects_grids_too_dense_to_allocate() {
        for cell_size in [0.001, 1e-6, 1e-300] {
            let err = GridSpec::new(800, 600, 0.5, cell_size).unwrap_err();
            assert!(matches!(err, LowPolyError::Validation(_)), "{cell_size}");
        }
        // 2048 * 2048 cells sits exactly on the limit.
        let c = 1.0;
        assert!(GridSpec::new(2044, 2044, 0.5, c).is_ok());
        assert!(GridSpec::new(2045, 2044, 0.5, c).is_err());
    }

    #[test]
    fn bleed_tiles_whole_cells() {
        let spec = GridSpec::new(400, 300, 0.5, 100.0).unwrap();
        let b = spec.bleed();
        assert_eq!((b.cells_x, b.cells_y), (8, 7));
        assert_eq!((b.x, b.y), (200.0, 200.0));

        let spec = GridSpec::new(130, 70, 0.5, 40.0).unwrap();
        let b = spec.bleed();
        // floor(290 / 40) = 7, floor(230 / 40) = 5
        assert_eq!((b.cells_x, b.cells_y), (7, 5));
        assert_eq!((b.x, b.y), (75.0, 65.0));
    }

    #[test]
    fn point_count_and_bounds() {
        let spec = GridSpec::new(130, 70, 0.8, 40.0).unwrap();
        let b = spec.bleed();
        let mut rng = StdRng::seed_from_u64(5);
        let pts = spec.generate_points(&mut rng);
        assert_eq!(pts.len(), (b.cells_x * b.cells_y) as usize);

        let slack = spec.cell_size / 2.0 + spec.jitter_bound() + 1.0;
        for p in pts {
            assert!(p.x >= -b.x - slack && p.x <= 130.0 + b.x + slack);
            assert!(p.y >= -b.y - slack && p.y <= 70.0 + b.y + slack);
        }
    }

    #[test]
    fn zero_variance_is_regular() {
        let spec = GridSpec::new(400, 300, 0.0, 100.0).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let pts = spec.generate_points(&mut rng);
        assert_eq!(pts[0], Point::new(-150.0, -150.0));
        assert_eq!(pts[1], Point::new(-150.0, -50.0));
        assert_eq!(pts[7], Point::new(-50.0, -150.0));
    }
}
