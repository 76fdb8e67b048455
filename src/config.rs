//! Declarative scene description and the assembled [`Scene`] it builds.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::animation::{Animation, AnimationKind, DEFAULT_SPREAD_DEG, MAX_SPREAD_DEG, Sweep};
use crate::colorize::{ColoredTriangle, Colorizer};
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{LowPolyError, LowPolyResult};
use crate::geometry::AngleSampler;
use crate::gradient::{GradientKind, GradientSurface, Palette};
use crate::mesh::{DEFAULT_CELL_SIZE, DEFAULT_VARIANCE, DelaunatorTriangulator, GridSpec, LowPolyMesh};

pub const DEFAULT_FRAMES: usize = 10;

fn default_cell_size() -> f64 {
    DEFAULT_CELL_SIZE
}

fn default_variance() -> f64 {
    DEFAULT_VARIANCE
}

fn default_frames() -> usize {
    DEFAULT_FRAMES
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    pub canvas: Canvas,
    #[serde(default = "default_cell_size")]
    pub cell_size: f64,
    #[serde(default = "default_variance")]
    pub variance: f64,
    /// Absent means a fresh entropy seed on every build.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<Palette>,
    /// Absent picks linear or radial at random.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient: Option<GradientKind>,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default = "default_frames")]
    pub frames: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", deny_unknown_fields)]
pub enum AnimationConfig {
    Sweep {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        direction_deg: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        spread_deg: Option<i32>,
    },
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::Sweep {
            direction_deg: None,
            spread_deg: None,
        }
    }
}

impl SceneConfig {
    /// Defaults for everything but the canvas.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            cell_size: DEFAULT_CELL_SIZE,
            variance: DEFAULT_VARIANCE,
            seed: None,
            palette: None,
            gradient: None,
            animation: AnimationConfig::default(),
            frames: DEFAULT_FRAMES,
        }
    }

    pub fn from_json(s: &str) -> LowPolyResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn grid_spec(&self) -> LowPolyResult<GridSpec> {
        GridSpec::new(
            self.canvas.width,
            self.canvas.height,
            self.variance,
            self.cell_size,
        )
    }

    pub fn validate(&self) -> LowPolyResult<()> {
        self.grid_spec()?;
        match self.animation {
            AnimationConfig::Sweep {
                spread_deg: Some(spread),
                ..
            } if !(0..=MAX_SPREAD_DEG).contains(&spread) => {
                return Err(LowPolyError::validation(format!(
                    "sweep spread_deg must be in 0..={MAX_SPREAD_DEG}, got {spread}"
                )));
            }
            _ => {}
        }
        Ok(())
    }

    /// Generate the mesh and gradient. Every random choice draws from one stream, so a
    /// fixed `seed` reproduces the whole scene.
    #[tracing::instrument(skip(self), fields(seed = ?self.seed))]
    pub fn build(&self) -> LowPolyResult<Scene> {
        self.validate()?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mesh = LowPolyMesh::generate(self.grid_spec()?, &mut rng, &DelaunatorTriangulator)?;
        let palette = self.palette.unwrap_or_else(|| Palette::random(&mut rng));
        let gradient = self.gradient.unwrap_or_else(|| GradientKind::random(&mut rng));
        let surface = GradientSurface::rasterize(self.canvas, gradient, palette.base_colors()?)?;
        let sampler_seed: u64 = rng.random();

        tracing::info!(
            palette = palette.name(),
            ?gradient,
            vertices = mesh.points().len(),
            triangles = mesh.triangles().len(),
            "scene built"
        );

        Ok(Scene {
            mesh: Arc::new(mesh),
            surface,
            palette,
            animation: self.animation.clone(),
            sampler_seed,
        })
    }
}

/// A generated mesh with its gradient, ready to color and animate.
#[derive(Debug)]
pub struct Scene {
    mesh: Arc<LowPolyMesh>,
    surface: GradientSurface,
    palette: Palette,
    animation: AnimationConfig,
    sampler_seed: u64,
}

impl Scene {
    pub fn mesh(&self) -> &Arc<LowPolyMesh> {
        &self.mesh
    }

    pub fn surface(&self) -> &GradientSurface {
        &self.surface
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn gradient(&self) -> GradientKind {
        self.surface.gradient().kind()
    }

    /// Color the mesh's triangles at `positions` (one entry per mesh vertex).
    pub fn colorize(&self, positions: &[Point]) -> Vec<ColoredTriangle> {
        Colorizer::for_mesh(&self.surface, &self.mesh).colorize(&self.mesh, positions)
    }

    pub fn animation_kind(&self) -> AnimationKind {
        let sampler = AngleSampler::seeded(self.sampler_seed);
        match self.animation {
            AnimationConfig::Sweep {
                direction_deg,
                spread_deg,
            } => {
                let sweep = match direction_deg {
                    Some(direction) => Sweep::new(direction, sampler),
                    None => Sweep::random_direction(sampler),
                };
                sweep
                    .with_spread(spread_deg.unwrap_or(DEFAULT_SPREAD_DEG))
                    .into()
            }
        }
    }

    /// A fresh animation over this scene's mesh. Two calls replay identically.
    pub fn animation(&self) -> Animation {
        Animation::new(Arc::clone(&self.mesh), self.animation_kind())
    }
}
