pub mod strips;

pub use strips::{StripQuad, StripSet, strip_overlays};
