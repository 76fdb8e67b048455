use std::sync::Arc;

use crate::animation::{AnimatedPoint, AnimationKind, FrameStepper, StepCtx};
use crate::foundation::core::{FrameIndex, Point};
use crate::mesh::LowPolyMesh;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    Uninitialized,
    Setup,
    Running,
}

/// One animation run over a shared mesh.
///
/// Frames are append-only: frame 0 is the mesh's own points, and stepping backward re-reads
/// stored frames. Callers must serialize `&mut` access; separate instances are independent.
#[derive(Debug)]
pub struct Animation {
    mesh: Arc<LowPolyMesh>,
    kind: AnimationKind,
    frames: Vec<Vec<Point>>,
    /// `steps[i]` turns `frames[i]` into `frames[i + 1]`.
    steps: Vec<Vec<AnimatedPoint>>,
    current: FrameIndex,
    state: AnimationState,
}

impl Animation {
    pub fn new(mesh: Arc<LowPolyMesh>, kind: impl Into<AnimationKind>) -> Self {
        Self {
            mesh,
            kind: kind.into(),
            frames: Vec::new(),
            steps: Vec::new(),
            current: FrameIndex(0),
            state: AnimationState::Uninitialized,
        }
    }

    /// Capture frame 0 and make sure the incidence index exists. Runs at most once.
    pub fn setup(&mut self) {
        if self.state != AnimationState::Uninitialized {
            return;
        }
        self.frames.push(self.mesh.points().to_vec());
        self.mesh.incidence();
        self.current = FrameIndex(0);
        self.state = AnimationState::Setup;
        tracing::debug!(
            kind = self.kind.name(),
            vertices = self.mesh.points().len(),
            "animation set up"
        );
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn mesh(&self) -> &Arc<LowPolyMesh> {
        &self.mesh
    }

    pub fn kind(&self) -> &AnimationKind {
        &self.kind
    }

    pub fn current_frame(&self) -> FrameIndex {
        self.current
    }

    /// Number of stored frames, frame 0 included. Zero before setup.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, index: FrameIndex) -> Option<&[Point]> {
        self.frames.get(index.0).map(Vec::as_slice)
    }

    /// Positions at the cursor; the mesh's own points before setup.
    pub fn current_points(&self) -> &[Point] {
        self.frame(self.current).unwrap_or_else(|| self.mesh.points())
    }

    /// Advance the cursor by one frame and return the step's displacements.
    ///
    /// When the next frame is already stored (after a [`Self::seek`] backward) it is replayed
    /// rather than recomputed.
    pub fn render_frame(&mut self) -> Vec<AnimatedPoint> {
        self.setup();
        let next = self.current.next();
        if next.0 >= self.frames.len() {
            self.generate_next();
        }
        let step = self.steps[self.current.0].clone();
        self.current = next;
        self.state = AnimationState::Running;
        step
    }

    /// Append `count` frames past the newest stored one without moving the cursor.
    pub fn prerender(&mut self, count: usize) {
        self.setup();
        self.frames.reserve(count);
        self.steps.reserve(count);
        for _ in 0..count {
            self.generate_next();
        }
    }

    /// Move the cursor to a stored frame. Returns its positions, or `None` (cursor
    /// unchanged) when that frame has not been produced yet.
    pub fn seek(&mut self, index: FrameIndex) -> Option<&[Point]> {
        self.setup();
        if index.0 >= self.frames.len() {
            return None;
        }
        self.current = index;
        self.frame(index)
    }

    fn generate_next(&mut self) {
        let Some(last) = self.frames.last() else {
            return;
        };
        let from = FrameIndex(self.frames.len() - 1);
        let step = self.kind.next_frame(StepCtx {
            mesh: self.mesh.as_ref(),
            frame: from,
            points: last,
        });
        debug_assert_eq!(step.len(), last.len());
        let next: Vec<Point> = step.iter().map(AnimatedPoint::displaced).collect();
        self.frames.push(next);
        self.steps.push(step);
    }
}
