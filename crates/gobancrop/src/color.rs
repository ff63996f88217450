//! RGB/HSV conversion and the wood-pixel classifier used by region
//! detection.

use gobancrop_core::Rgba;
use serde::{Deserialize, Serialize};

/// Convert RGB channels in `[0, 1]` to HSV.
///
/// Returns `(hue, saturation, value)` with hue in `[0, 360)`. Gray pixels
/// (zero chroma) report hue 0; black additionally reports saturation 0.
pub fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let mx = r.max(g).max(b);
    let mn = r.min(g).min(b);
    let d = mx - mn;

    let v = mx;
    let s = if mx > 0.0 { d / mx } else { 0.0 };

    let mut h = if d == 0.0 {
        0.0
    } else if mx == r {
        ((g - b) / d % 6.0) * 60.0
    } else if mx == g {
        ((b - r) / d + 2.0) * 60.0
    } else {
        ((r - g) / d + 4.0) * 60.0
    };
    if h < 0.0 {
        h += 360.0;
    }

    (h, s, v)
}

/// Circular distance between two hues in degrees, always in `[0, 180]`.
pub fn hue_delta(a: f64, b: f64) -> f64 {
    let d = (a - b).abs();
    if d > 180.0 {
        360.0 - d
    } else {
        d
    }
}

/// HSV band accepted as plausible board material.
///
/// The defaults are deliberately loose so that palette-reduced or heavily
/// compressed screenshots still classify: hue 15-55 degrees covers pale
/// shinkaya through dark kaya woods and the usual client board textures.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WoodColorSpec {
    /// Lower hue bound, degrees.
    pub hue_min: f64,
    /// Upper hue bound, degrees.
    pub hue_max: f64,
    /// Minimum saturation.
    pub sat_min: f64,
    /// Minimum value (brightness).
    pub val_min: f64,
}

impl Default for WoodColorSpec {
    fn default() -> Self {
        Self {
            hue_min: 15.0,
            hue_max: 55.0,
            sat_min: 0.15,
            val_min: 0.2,
        }
    }
}

impl WoodColorSpec {
    /// Whether a pixel falls inside the wood band.
    #[inline]
    pub fn is_wood(&self, px: Rgba) -> bool {
        let (r, g, b) = px.rgb_unit();
        let (h, s, v) = rgb_to_hsv(r, g, b);
        h >= self.hue_min && h <= self.hue_max && s >= self.sat_min && v >= self.val_min
    }
}
