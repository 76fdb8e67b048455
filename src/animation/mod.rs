//! Frame-by-frame vertex animation over a fixed mesh topology.
//!
//! An [`Animation`] keeps an append-only history of frames, each a full list of vertex
//! positions indexed like the mesh's own points. How frame `N + 1` follows from frame `N`
//! is decided by an [`AnimationKind`].

pub mod engine;
pub mod sweep;

pub use engine::{Animation, AnimationState};
pub use sweep::{DEFAULT_SPREAD_DEG, MAX_SPREAD_DEG, Sweep};

use crate::foundation::core::{FrameIndex, Point, Vec2};
use crate::mesh::LowPolyMesh;

/// Displacement of one vertex for one frame step.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimatedPoint {
    /// Position at the start of the step.
    pub origin: Point,
    pub dx: f64,
    pub dy: f64,
}

impl AnimatedPoint {
    pub fn new(origin: Point, dx: f64, dy: f64) -> Self {
        Self { origin, dx, dy }
    }

    pub fn between(from: Point, to: Point) -> Self {
        Self::new(from, to.x - from.x, to.y - from.y)
    }

    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.dx, self.dy)
    }

    pub fn magnitude(&self) -> f64 {
        self.offset().hypot()
    }

    /// Position at the end of the step.
    pub fn displaced(&self) -> Point {
        self.origin + self.offset()
    }
}

/// What a [`FrameStepper`] sees when producing the next frame.
#[derive(Clone, Copy, Debug)]
pub struct StepCtx<'a> {
    pub mesh: &'a LowPolyMesh,
    /// Index of the frame being stepped from.
    pub frame: FrameIndex,
    /// Positions of that frame.
    pub points: &'a [Point],
}

/// Derives the displacements that turn one frame into the next.
///
/// Must return exactly one [`AnimatedPoint`] per entry of `ctx.points`, in order.
pub trait FrameStepper {
    fn next_frame(&mut self, ctx: StepCtx<'_>) -> Vec<AnimatedPoint>;
}

/// Closed set of animation variants.
#[derive(Clone, Debug)]
pub enum AnimationKind {
    Sweep(Sweep),
}

impl AnimationKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sweep(_) => "sweep",
        }
    }
}

impl FrameStepper for AnimationKind {
    fn next_frame(&mut self, ctx: StepCtx<'_>) -> Vec<AnimatedPoint> {
        match self {
            Self::Sweep(sweep) => sweep.next_frame(ctx),
        }
    }
}

impl From<Sweep> for AnimationKind {
    fn from(sweep: Sweep) -> Self {
        Self::Sweep(sweep)
    }
}
