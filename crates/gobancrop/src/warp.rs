//! Perspective resampling of a quad region into a square top-down image.

use gobancrop_core::{sample_bilinear, Quad, RgbaImage, RgbaImageView};

use crate::detector::GobanCropError;
use crate::observer::{DetectionEvent, Observer};

/// Resample the region under `quad` into a new `size` x `size` image.
///
/// Every output pixel `(x, y)` maps to `(u, v) = (x/(N-1), y/(N-1))`,
/// through the quad's bilinear corner blend into source space, and is then
/// bilinear-sampled there; neighbors outside the source read as transparent
/// black. The source image is never mutated.
///
/// `size` 0 is a caller configuration error.
pub fn crop_and_correct(
    img: &RgbaImageView<'_>,
    quad: &Quad,
    size: usize,
    observer: &dyn Observer,
) -> Result<RgbaImage, GobanCropError> {
    if size == 0 {
        return Err(GobanCropError::InvalidOutputSize { size });
    }

    // A 1x1 output has no second endpoint; sample the top-left corner.
    let denom = (size - 1).max(1) as f64;

    let mut out = RgbaImage::new(size, size);
    for y in 0..size {
        let v = y as f64 / denom;
        for x in 0..size {
            let u = x as f64 / denom;
            let src = quad.interpolate(u, v);
            out.set(x, y, sample_bilinear(img, src.x, src.y));
        }
    }

    observer.event(&DetectionEvent::Warped { size });
    Ok(out)
}
