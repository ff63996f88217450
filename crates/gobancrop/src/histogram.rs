//! Brightness histogram, Otsu split, and grid-line coverage estimation.

use gobancrop_core::{Rgba, RgbaImageView};

/// Default coverage fraction when the center column contains no dark runs
/// at all.
const FALLBACK_DARK_FRACTION: f64 = 0.02;

/// Smallest accepted coverage fraction; anything lower would accept single
/// stray dark pixels as grid lines.
const MIN_DARK_FRACTION: f64 = 0.01;

/// 256-bucket histogram of channel-average brightness over a subsampled
/// pixel grid.
#[derive(Clone, Debug)]
pub struct BrightnessHistogram {
    pub bins: [u32; 256],
    /// Pixels that passed the mask and were counted.
    pub masked: usize,
    /// Pixels visited, masked or not.
    pub total: usize,
}

impl BrightnessHistogram {
    /// Build the histogram over every second row and column of `img`.
    ///
    /// `mask` restricts which pixels are counted; pass `None` to count all.
    pub fn build(img: &RgbaImageView<'_>, mask: Option<&dyn Fn(Rgba) -> bool>) -> Self {
        let mut bins = [0u32; 256];
        let mut masked = 0usize;
        let mut total = 0usize;
        for y in (0..img.height).step_by(2) {
            for x in (0..img.width).step_by(2) {
                total += 1;
                let px = img.get(x as i32, y as i32);
                if let Some(mask) = mask {
                    if !mask(px) {
                        continue;
                    }
                }
                masked += 1;
                bins[px.brightness() as usize] += 1;
            }
        }
        Self {
            bins,
            masked,
            total,
        }
    }
}

/// Otsu's threshold: the split maximizing between-class variance.
///
/// Ties break toward the first maximum encountered. A histogram with all
/// mass in one bucket yields 0.
pub fn otsu(hist: &BrightnessHistogram) -> u8 {
    let total = hist.masked as f64;
    let mut sum_total = 0.0;
    for (i, &c) in hist.bins.iter().enumerate() {
        sum_total += (i * c as usize) as f64;
    }

    let mut sum_b = 0.0;
    let mut w_b = 0.0;
    let mut best_var = 0.0;
    let mut best_t = 0u8;

    for (t, &c) in hist.bins.iter().enumerate() {
        w_b += c as f64;
        if w_b == 0.0 {
            continue;
        }
        let w_f = total - w_b;
        if w_f == 0.0 {
            break;
        }
        sum_b += (t * c as usize) as f64;
        let m_b = sum_b / w_b;
        let m_f = (sum_total - sum_b) / w_f;
        let var_between = w_b * w_f * (m_b - m_f) * (m_b - m_f);
        if var_between > best_var {
            best_var = var_between;
            best_t = t as u8;
        }
    }

    best_t
}

/// Estimate the coverage fraction a grid line should reach.
///
/// Walks the center column collecting run lengths of pixels darker than
/// `threshold`; the median run as a fraction of the image height is how
/// thick a grid line looks vertically. No dark runs at all yields a fixed
/// small fallback.
pub fn estimate_dark_fraction(img: &RgbaImageView<'_>, threshold: u8) -> f64 {
    let h = img.height;
    let col = (img.width / 2) as i32;
    let mut runs: Vec<usize> = Vec::new();
    let mut run = 0usize;
    for y in 0..h {
        if img.get(col, y as i32).brightness() < threshold {
            run += 1;
        } else if run > 0 {
            runs.push(run);
            run = 0;
        }
    }
    if run > 0 {
        runs.push(run);
    }
    if runs.is_empty() {
        return FALLBACK_DARK_FRACTION;
    }
    runs.sort_unstable();
    runs[runs.len() / 2] as f64 / h as f64
}

/// Threshold and coverage estimate for one sub-image.
#[derive(Clone, Copy, Debug)]
pub struct ThresholdEstimate {
    /// Otsu brightness split over the whole sub-image.
    pub threshold: u8,
    /// Expected minimum dark-pixel coverage for a scan index to count as a
    /// grid line, floored at a small positive minimum.
    pub dark_fraction: f64,
}

/// Unmasked histogram, Otsu split, and floored dark-fraction estimate.
pub fn auto_setup(img: &RgbaImageView<'_>) -> ThresholdEstimate {
    let hist = BrightnessHistogram::build(img, None);
    let threshold = otsu(&hist);
    let dark_fraction = estimate_dark_fraction(img, threshold).max(MIN_DARK_FRACTION);
    ThresholdEstimate {
        threshold,
        dark_fraction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gobancrop_core::RgbaImage;

    fn gray(v: u8) -> Rgba {
        Rgba::opaque(v, v, v)
    }

    #[test]
    fn otsu_splits_two_separated_peaks() {
        let mut hist = BrightnessHistogram {
            bins: [0; 256],
            masked: 0,
            total: 0,
        };
        hist.bins[30] = 500;
        hist.bins[200] = 500;
        hist.masked = 1000;
        hist.total = 1000;

        // The first maximal split sits on the dark peak itself.
        let t = otsu(&hist);
        assert!(t >= 30 && t < 200, "threshold {t} not between the peaks");
    }

    #[test]
    fn otsu_on_single_peak_is_zero() {
        let mut hist = BrightnessHistogram {
            bins: [0; 256],
            masked: 100,
            total: 100,
        };
        hist.bins[128] = 100;
        assert_eq!(otsu(&hist), 0);
    }

    #[test]
    fn histogram_counts_masked_and_total() {
        let mut img = RgbaImage::new(8, 8);
        for y in 0..8 {
            for x in 0..8 {
                img.set(x, y, if x < 4 { gray(10) } else { gray(240) });
            }
        }
        let dark_only = |px: Rgba| px.brightness() < 128;
        let hist = BrightnessHistogram::build(&img.view(), Some(&dark_only));
        // 4x4 samples at even coordinates, half of them dark.
        assert_eq!(hist.total, 16);
        assert_eq!(hist.masked, 8);
        assert_eq!(hist.bins[10], 8);
        assert_eq!(hist.bins[240], 0);
    }

    #[test]
    fn dark_fraction_is_median_run_over_height() {
        let mut img = RgbaImage::new(5, 9);
        for y in 0..9 {
            for x in 0..5 {
                img.set(x, y, gray(250));
            }
        }
        // Center column: one run of 1, one run of 3.
        img.set(2, 0, gray(5));
        for y in 4..7 {
            img.set(2, y, gray(5));
        }
        let f = estimate_dark_fraction(&img.view(), 128);
        assert!((f - 3.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn dark_fraction_falls_back_without_runs() {
        let mut img = RgbaImage::new(6, 6);
        for y in 0..6 {
            for x in 0..6 {
                img.set(x, y, gray(250));
            }
        }
        assert_eq!(estimate_dark_fraction(&img.view(), 128), 0.02);
    }

    #[test]
    fn auto_setup_on_bimodal_image() {
        let mut img = RgbaImage::new(16, 16);
        for y in 0..16 {
            for x in 0..16 {
                img.set(x, y, if x < 8 { gray(40) } else { gray(200) });
            }
        }
        let est = auto_setup(&img.view());
        assert!(est.threshold >= 40 && est.threshold < 200);
        // Center column sits in the light half: fallback fraction applies.
        assert_eq!(est.dark_fraction, 0.02);
    }
}
