//! Board location and the end-to-end detection pipeline.

mod error;
mod grid;
mod params;

pub use error::GobanCropError;
pub use params::{GobanDetectorParams, GridClassifier};

use gobancrop_core::{Quad, RgbaImage, RgbaImageView};

use crate::observer::{DetectionEvent, Observer};
use crate::quantize::reduce_palette;
use crate::warp::crop_and_correct;

/// Goban detector: coarse color region, grid refinement, perspective warp.
///
/// The detector holds only configuration; every call is a pure function of
/// its inputs and allocates fresh outputs.
pub struct GobanDetector {
    params: GobanDetectorParams,
}

impl Default for GobanDetector {
    fn default() -> Self {
        Self::new(GobanDetectorParams::default())
    }
}

impl GobanDetector {
    pub fn new(params: GobanDetectorParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &GobanDetectorParams {
        &self.params
    }

    /// Locate the coarse axis-aligned bounding quad of wood-colored pixels.
    ///
    /// Scans every second row and column; the board is large relative to
    /// that step. Zero matching pixels is a hard failure with no retry.
    pub fn find_goban(
        &self,
        img: &RgbaImageView<'_>,
        observer: &dyn Observer,
    ) -> Result<Quad, GobanCropError> {
        let reduced;
        let scan: RgbaImageView<'_> = match self.params.region_colors {
            Some(colors) => match reduce_palette(img, colors) {
                Ok(r) => {
                    observer.event(&DetectionEvent::PaletteReduced { colors });
                    reduced = r;
                    reduced.view()
                }
                Err(err) => {
                    observer.event(&DetectionEvent::PaletteReductionFailed {
                        reason: err.to_string(),
                    });
                    *img
                }
            },
            None => *img,
        };

        let mut min_x = i32::MAX;
        let mut min_y = i32::MAX;
        let mut max_x = i32::MIN;
        let mut max_y = i32::MIN;
        let mut found = false;
        for y in (0..scan.height as i32).step_by(2) {
            for x in (0..scan.width as i32).step_by(2) {
                if self.params.wood.is_wood(scan.get(x, y)) {
                    found = true;
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                    min_y = min_y.min(y);
                    max_y = max_y.max(y);
                }
            }
        }
        if !found {
            return Err(GobanCropError::NoRegionFound);
        }

        let quad = Quad::axis_aligned(min_x as f64, min_y as f64, max_x as f64, max_y as f64);
        observer.event(&DetectionEvent::RegionFound { quad });
        Ok(quad)
    }

    /// Refine a coarse quad to the actual 19x19 grid extent.
    pub fn find_actual_board(
        &self,
        img: &RgbaImageView<'_>,
        coarse: &Quad,
        observer: &dyn Observer,
    ) -> Result<Quad, GobanCropError> {
        grid::find_actual_board(img, coarse, &self.params, observer)
    }

    /// Locate the board quad, refined when possible.
    ///
    /// A failed grid search falls back to insetting the coarse quad by half
    /// a cell; this is the one sanctioned silent substitution, and it is
    /// still reported through the observer. Region-detection failure
    /// propagates.
    pub fn locate(
        &self,
        img: &RgbaImageView<'_>,
        observer: &dyn Observer,
    ) -> Result<Quad, GobanCropError> {
        let coarse = self.find_goban(img, observer)?;
        match self.find_actual_board(img, &coarse, observer) {
            Ok(refined) => Ok(refined),
            Err(GobanCropError::GridNotFound { .. }) => {
                let quad = coarse.shrink_aligned();
                observer.event(&DetectionEvent::FallbackShrink { quad });
                Ok(quad)
            }
            Err(err) => Err(err),
        }
    }

    /// Full pipeline: locate the board and warp it to a `size` x `size`
    /// top-down view.
    pub fn locate_and_rectify(
        &self,
        img: &RgbaImageView<'_>,
        size: usize,
        observer: &dyn Observer,
    ) -> Result<RgbaImage, GobanCropError> {
        let quad = self.locate(img, observer)?;
        crop_and_correct(img, &quad, size, observer)
    }
}
