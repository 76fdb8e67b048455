pub mod grid;
#[allow(clippy::module_inception)]
pub mod mesh;
pub mod triangulate;

pub use grid::{Bleed, DEFAULT_CELL_SIZE, DEFAULT_VARIANCE, GridSpec};
pub use mesh::{IncidenceIndex, LowPolyMesh, Triad, TriangleIds};
pub use triangulate::{DelaunatorTriangulator, Triangulator};
