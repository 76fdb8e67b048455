use crate::animation::{AnimatedPoint, FrameStepper, StepCtx};
use crate::geometry::{AngleSampler, x_component, y_component};

/// Per-point wiggle around the sweep direction, in degrees.
pub const DEFAULT_SPREAD_DEG: i32 = 15;
/// Widest accepted spread; past this the sweep has no direction left.
pub const MAX_SPREAD_DEG: i32 = 180;

/// Moves every vertex in roughly one shared direction.
///
/// Each vertex travels as far as its nearest neighbor at the start of the step, along its
/// own angle drawn from `direction ± spread`. Capping travel at the nearest neighbor keeps
/// a vertex from overtaking it within a single frame.
#[derive(Clone, Debug)]
pub struct Sweep {
    direction: i32,
    spread: i32,
    sampler: AngleSampler,
}

impl Sweep {
    pub fn new(direction: i32, sampler: AngleSampler) -> Self {
        Self {
            direction: direction.rem_euclid(360),
            spread: DEFAULT_SPREAD_DEG,
            sampler,
        }
    }

    /// Sweep toward a direction drawn from `sampler`.
    pub fn random_direction(mut sampler: AngleSampler) -> Self {
        let direction = sampler.direction();
        Self::new(direction, sampler)
    }

    /// Clamped to `0..=MAX_SPREAD_DEG`.
    pub fn with_spread(mut self, spread: i32) -> Self {
        self.spread = spread.clamp(0, MAX_SPREAD_DEG);
        self
    }

    pub fn direction(&self) -> i32 {
        self.direction
    }

    pub fn spread(&self) -> i32 {
        self.spread
    }

    pub fn sampler_mut(&mut self) -> &mut AngleSampler {
        &mut self.sampler
    }
}

impl FrameStepper for Sweep {
    fn next_frame(&mut self, ctx: StepCtx<'_>) -> Vec<AnimatedPoint> {
        let mut max_step = 0.0f64;
        let out: Vec<AnimatedPoint> = ctx
            .points
            .iter()
            .enumerate()
            .map(|(v, &origin)| {
                let angle = f64::from(self.sampler.angle_in_range(self.direction, self.spread));
                let travel = match ctx.mesh.nearest_neighbor_distance(v, ctx.points) {
                    Some(d) => d,
                    None => {
                        tracing::trace!(vertex = v, "no incident triangles, vertex held");
                        0.0
                    }
                };
                max_step = max_step.max(travel);
                AnimatedPoint::new(
                    origin,
                    x_component(angle, travel),
                    y_component(angle, travel),
                )
            })
            .collect();
        tracing::debug!(frame = ctx.frame.0, max_step, "sweep step");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::{FrameIndex, Point};
    use crate::mesh::{GridSpec, LowPolyMesh, Triad};

    fn fan_mesh() -> LowPolyMesh {
        let spec = GridSpec::new(10, 10, 0.0, 10.0).unwrap();
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(6.0, 0.0),
            Point::new(0.0, 8.0),
            Point::new(100.0, 100.0),
        ];
        LowPolyMesh::from_parts(spec, points, vec![Triad::new(0, 1, 2)]).unwrap()
    }

    #[test]
    fn travel_is_nearest_neighbor_distance() {
        let mesh = fan_mesh();
        let mut sweep = Sweep::new(0, AngleSampler::seeded(4));
        let step = sweep.next_frame(StepCtx {
            mesh: &mesh,
            frame: FrameIndex(0),
            points: mesh.points(),
        });
        assert_eq!(step.len(), 4);
        assert!((step[0].magnitude() - 6.0).abs() < 1e-9);
        assert!((step[1].magnitude() - 6.0).abs() < 1e-9);
        assert!((step[2].magnitude() - 8.0).abs() < 1e-9);
        assert_eq!(step[3].magnitude(), 0.0);
        assert_eq!(step[3].origin, Point::new(100.0, 100.0));
    }

    #[test]
    fn angles_stay_within_spread() {
        let mesh = fan_mesh();
        let mut sweep = Sweep::new(90, AngleSampler::seeded(8));
        for _ in 0..50 {
            let step = sweep.next_frame(StepCtx {
                mesh: &mesh,
                frame: FrameIndex(0),
                points: mesh.points(),
            });
            for p in &step[..3] {
                let deg = p.dy.atan2(p.dx).to_degrees();
                assert!((75.0 - 1e-9..105.0).contains(&deg), "angle {deg}");
            }
        }
    }

    #[test]
    fn direction_is_normalized() {
        assert_eq!(Sweep::new(-90, AngleSampler::seeded(0)).direction(), 270);
        assert_eq!(Sweep::new(720, AngleSampler::seeded(0)).direction(), 0);
        let s = Sweep::random_direction(AngleSampler::seeded(0));
        assert!((0..360).contains(&s.direction()));
        assert_eq!(s.clone().with_spread(-3).spread(), 0);
        assert_eq!(s.with_spread(i32::MAX).spread(), MAX_SPREAD_DEG);
    }
}
