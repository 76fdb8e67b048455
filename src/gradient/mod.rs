pub mod palette;
pub mod surface;

pub use palette::Palette;
pub use surface::{AnalyticGradient, ColorSource, GradientKind, GradientSurface};
