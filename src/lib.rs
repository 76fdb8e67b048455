#![forbid(unsafe_code)]
//! Procedural low-poly backgrounds.
//!
//! A jittered point grid is triangulated once into a [`LowPolyMesh`]; each triangle takes the
//! color a [`GradientSurface`] shows under its centroid. An [`Animation`] then moves the vertices
//! frame by frame (see [`Sweep`]) while the triangle topology stays fixed, so every frame is
//! recolored from the same surface. [`strip_overlays`] independently cuts the canvas into angled
//! strips for directional wipe transitions.
//!
//! ```no_run
//! use lowpoly::{Canvas, SceneConfig};
//!
//! let mut cfg = SceneConfig::new(Canvas::new(640, 360)?);
//! cfg.seed = Some(7);
//! let scene = cfg.build()?;
//! let mut anim = scene.animation();
//! anim.render_frame();
//! let triangles = scene.colorize(anim.current_points());
//! # let _ = triangles;
//! # Ok::<(), lowpoly::LowPolyError>(())
//! ```

pub mod animation;
pub mod colorize;
pub mod config;
pub mod effects;
pub mod foundation;
pub mod geometry;
pub mod gradient;
pub mod mesh;
pub mod render;

pub use animation::{
    AnimatedPoint, Animation, AnimationKind, AnimationState, FrameStepper, StepCtx, Sweep,
};
pub use colorize::{BleedClamp, ColoredTriangle, Colorizer};
pub use config::{AnimationConfig, Scene, SceneConfig};
pub use effects::{StripQuad, StripSet, strip_overlays};
pub use foundation::core::{Canvas, FrameIndex, Point, Rgba8, Vec2};
pub use foundation::error::{LowPolyError, LowPolyResult};
pub use geometry::{AngleSampler, PixelPoint};
pub use gradient::{AnalyticGradient, ColorSource, GradientKind, GradientSurface, Palette};
pub use mesh::{DelaunatorTriangulator, GridSpec, LowPolyMesh, Triad, Triangulator};
pub use render::{CpuRenderer, FrameRGBA, RenderSettings};
