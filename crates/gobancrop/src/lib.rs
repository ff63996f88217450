//! Locate a 19x19 goban in a raster image and produce a perspective-
//! corrected top-down crop.
//!
//! The pipeline runs in three stages:
//! 1. [`GobanDetector::find_goban`] scans for wood-colored pixels and
//!    returns their coarse axis-aligned bounding quad.
//! 2. [`GobanDetector::find_actual_board`] searches the cropped region for
//!    the 19x19 grid lines and refines the quad to the exact grid extent;
//!    when the search fails, the caller falls back to insetting the coarse
//!    quad by half a cell ([`Quad::shrink_aligned`]).
//! 3. [`crop_and_correct`] resamples the quad into a square image viewed
//!    from directly above.
//!
//! Everything is synchronous and allocation-pure: inputs are never mutated
//! and no state survives a call. Progress is reported through an injected
//! [`Observer`]; pass [`NullObserver`] to ignore it or [`LogObserver`] to
//! forward events to the `log` facade.
//!
//! ```no_run
//! use gobancrop::{GobanDetector, NullObserver, RgbaImage};
//!
//! # fn main() -> Result<(), gobancrop::GobanCropError> {
//! # let img = RgbaImage::new(640, 480);
//! let detector = GobanDetector::default();
//! let board = detector.locate_and_rectify(&img.view(), 512, &NullObserver)?;
//! assert_eq!((board.width, board.height), (512, 512));
//! # Ok(())
//! # }
//! ```
//!
//! File decoding/encoding lives behind the `image` feature (see
//! [`interop`]); the core only ever sees in-memory RGBA buffers.

pub mod color;
pub mod detector;
pub mod histogram;
pub mod observer;
pub mod quantize;
pub mod segments;
pub mod warp;

#[cfg(feature = "image")]
pub mod interop;

pub use gobancrop_core as core;
pub use gobancrop_core::{Point, Quad, Rgba, RgbaImage, RgbaImageView, GRID_LINES};

pub use color::WoodColorSpec;
pub use detector::{GobanCropError, GobanDetector, GobanDetectorParams, GridClassifier};
pub use observer::{DetectionEvent, LogObserver, NullObserver, Observer};
pub use segments::LineFit;
pub use warp::crop_and_correct;
