//! Grid-line search over the cropped board region.

use gobancrop_core::{IntRect, Quad, RgbaImage, RgbaImageView};

use crate::color::{hue_delta, rgb_to_hsv};
use crate::histogram::auto_setup;
use crate::observer::{DetectionEvent, Observer};
use crate::quantize::reduce_palette;
use crate::segments::{refine_lines, scan_segments};

use super::{GobanCropError, GobanDetectorParams, GridClassifier};

/// Classify every crop pixel once; the sweep only re-scans counts.
fn grid_mask(crop: &RgbaImage, classifier: &GridClassifier, otsu_threshold: u8) -> Vec<bool> {
    let mut mask = Vec::with_capacity(crop.width * crop.height);
    for y in 0..crop.height {
        for x in 0..crop.width {
            let px = crop.get(x, y);
            let line_like = match *classifier {
                GridClassifier::HueDistance {
                    reference_hue,
                    min_hue_delta,
                    dark_cutoff,
                } => {
                    let (r, g, b) = px.rgb_unit();
                    let (hue, _, _) = rgb_to_hsv(r, g, b);
                    hue_delta(hue, reference_hue) > min_hue_delta || px.brightness() < dark_cutoff
                }
                GridClassifier::BrightnessThreshold => px.brightness() < otsu_threshold,
            };
            mask.push(line_like);
        }
    }
    mask
}

/// Refine a coarse board quad by finding the 19x19 grid inside it.
///
/// Crops to the coarse quad's bounding rectangle, optionally
/// palette-reduces the crop, estimates a brightness threshold and coverage
/// fraction, then sweeps coverage fractions and maximum line widths until
/// both axes refine to 19 lines. The extreme grid intersections, normalized
/// over the crop, map back into image space through the coarse quad's
/// bilinear blend.
pub(crate) fn find_actual_board(
    img: &RgbaImageView<'_>,
    coarse: &Quad,
    params: &GobanDetectorParams,
    observer: &dyn Observer,
) -> Result<Quad, GobanCropError> {
    let bounds = IntRect::new(0, 0, img.width as i32, img.height as i32);
    let rect = coarse.bounding_rect().intersect(bounds);
    if rect.width() < 2 || rect.height() < 2 {
        return Err(GobanCropError::GridNotFound {
            horizontal: 0,
            vertical: 0,
        });
    }

    let mut crop = img.crop(rect);
    if let Some(colors) = params.grid_colors {
        match reduce_palette(&crop.view(), colors) {
            Ok(reduced) => {
                observer.event(&DetectionEvent::PaletteReduced { colors });
                crop = reduced;
            }
            Err(err) => observer.event(&DetectionEvent::PaletteReductionFailed {
                reason: err.to_string(),
            }),
        }
    }

    let est = auto_setup(&crop.view());
    observer.event(&DetectionEvent::ThresholdEstimated {
        threshold: est.threshold,
        dark_fraction: est.dark_fraction,
    });

    let (w, h) = (crop.width, crop.height);
    let line_mask = grid_mask(&crop, &params.classifier, est.threshold);

    // The estimated fraction leads, then the configured descending sweep.
    let mut fractions = Vec::with_capacity(1 + params.coverage_fractions.len());
    fractions.push(est.dark_fraction);
    fractions.extend_from_slice(&params.coverage_fractions);

    let mut last = (0usize, 0usize);
    for &fraction in &fractions {
        for &max_width in &params.max_line_widths {
            // Horizontal lines: scan rows, count dark pixels across each
            // row. Vertical lines: the transpose.
            let hs = scan_segments(
                h,
                w,
                fraction,
                max_width,
                |y, x| line_mask[y * w + x],
                |_, _| true,
            );
            let vs = scan_segments(
                w,
                h,
                fraction,
                max_width,
                |x, y| line_mask[y * w + x],
                |_, _| true,
            );
            observer.event(&DetectionEvent::SweepAttempt {
                fraction,
                max_width,
                horizontal: hs.len(),
                vertical: vs.len(),
            });
            last = (hs.len(), vs.len());

            let (Some(ys), Some(xs)) = (
                refine_lines(&hs, params.line_fit),
                refine_lines(&vs, params.line_fit),
            ) else {
                continue;
            };

            let u0 = xs[0] / (w - 1) as f64;
            let u1 = xs[xs.len() - 1] / (w - 1) as f64;
            let v0 = ys[0] / (h - 1) as f64;
            let v1 = ys[ys.len() - 1] / (h - 1) as f64;

            let refined = Quad::new(
                coarse.interpolate(u0, v0),
                coarse.interpolate(u1, v0),
                coarse.interpolate(u1, v1),
                coarse.interpolate(u0, v1),
            );
            observer.event(&DetectionEvent::GridRefined { quad: refined });
            return Ok(refined);
        }
    }

    observer.event(&DetectionEvent::GridSearchExhausted);
    Err(GobanCropError::GridNotFound {
        horizontal: last.0,
        vertical: last.1,
    })
}
