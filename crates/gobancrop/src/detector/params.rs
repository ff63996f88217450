use serde::{Deserialize, Serialize};

use crate::color::WoodColorSpec;
use crate::segments::LineFit;

/// How a sub-image pixel is classified as part of a grid line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum GridClassifier {
    /// A pixel is line-like when its hue is far from the board color, or
    /// when it is simply dark. Robust against board texture and the
    /// default.
    HueDistance {
        /// Hue of the board surface, degrees.
        reference_hue: f64,
        /// Minimum circular hue distance for a pixel to count as non-board.
        min_hue_delta: f64,
        /// Brightness below which a pixel counts as line-like regardless of
        /// hue.
        dark_cutoff: u8,
    },
    /// A pixel is line-like when darker than the Otsu split of the
    /// sub-image.
    BrightnessThreshold,
}

impl Default for GridClassifier {
    fn default() -> Self {
        GridClassifier::HueDistance {
            reference_hue: 35.0,
            min_hue_delta: 25.0,
            dark_cutoff: 78,
        }
    }
}

/// Every tunable of the detection pipeline in one place.
///
/// The defaults reproduce the behavior of the production pipeline; the
/// struct exists so that no threshold is baked into the algorithms
/// themselves.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GobanDetectorParams {
    /// HSV band accepted as board material during region detection.
    pub wood: WoodColorSpec,
    /// Grid-pixel classification policy for line scanning.
    pub classifier: GridClassifier,
    /// Line placement policy of the refiner.
    pub line_fit: LineFit,
    /// Descending coverage fractions tried during the grid search, after
    /// the fraction estimated from the sub-image itself.
    pub coverage_fractions: Vec<f64>,
    /// Descending maximum line widths (pixels) crossed with each coverage
    /// fraction.
    pub max_line_widths: Vec<usize>,
    /// Palette size for reduction before the region scan; `None` disables.
    pub region_colors: Option<usize>,
    /// Palette size for reduction of the grid-detection crop; `None`
    /// disables.
    pub grid_colors: Option<usize>,
}

impl Default for GobanDetectorParams {
    fn default() -> Self {
        Self {
            wood: WoodColorSpec::default(),
            classifier: GridClassifier::default(),
            line_fit: LineFit::default(),
            coverage_fractions: vec![0.03, 0.025, 0.02, 0.015, 0.01, 0.0075],
            max_line_widths: vec![8, 7, 6, 5, 4, 3],
            region_colors: None,
            grid_colors: Some(5),
        }
    }
}
