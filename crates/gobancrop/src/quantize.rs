//! Palette reduction used to denoise compressed screenshots before
//! detection.

use color_quant::NeuQuant;
use gobancrop_core::{RgbaImage, RgbaImageView};

/// NeuQuant sampling factor: every pixel contributes to training. Inputs
/// here are board-sized crops, not photographs, so speed is not a concern.
const SAMPLE_FACTOR: i32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum QuantizeError {
    #[error("palette size {0} out of range (2..=256)")]
    InvalidColorCount(usize),
    #[error("cannot quantize an empty image")]
    EmptyImage,
}

/// Map the image onto a learned palette of at most `colors` colors.
///
/// Errors here are recoverable by contract: callers proceed with the
/// original image when reduction fails.
pub fn reduce_palette(img: &RgbaImageView<'_>, colors: usize) -> Result<RgbaImage, QuantizeError> {
    if !(2..=256).contains(&colors) {
        return Err(QuantizeError::InvalidColorCount(colors));
    }
    if img.width == 0 || img.height == 0 {
        return Err(QuantizeError::EmptyImage);
    }

    let nq = NeuQuant::new(SAMPLE_FACTOR, colors, img.data);
    let palette = nq.color_map_rgba();

    let mut out = RgbaImage::new(img.width, img.height);
    for (src, dst) in img.data.chunks_exact(4).zip(out.data.chunks_exact_mut(4)) {
        let idx = nq.index_of(src) * 4;
        dst.copy_from_slice(&palette[idx..idx + 4]);
    }
    Ok(out)
}
