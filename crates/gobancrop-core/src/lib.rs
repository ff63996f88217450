//! Raster and geometry primitives shared by the goban detection pipeline.
//!
//! This crate is intentionally small. It knows nothing about boards or
//! detection: it owns the RGBA image types, safe bilinear sampling, and the
//! ordered-quadrilateral math that the detector crates build on.

mod image;
mod logger;
mod quad;

pub use image::{sample_bilinear, Rgba, RgbaImage, RgbaImageView};
pub use quad::{IntRect, Point, Quad, GRID_LINES};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
