/// Errors returned by the detection pipeline.
///
/// Quantization failures never surface here: by contract they are recovered
/// locally by proceeding with the unquantized image.
#[derive(thiserror::Error, Debug)]
pub enum GobanCropError {
    /// The full-image scan classified zero pixels as board material. Hard
    /// failure for the call; there is no internal retry.
    #[error("no wood-colored region found")]
    NoRegionFound,

    /// The grid search exhausted its parameter sweep without 19 lines on
    /// both axes. The counts are the surviving segments of the final
    /// attempt. Callers are expected to fall back to the inset quad.
    #[error("grid not found (last attempt: {horizontal} horizontal / {vertical} vertical segments)")]
    GridNotFound { horizontal: usize, vertical: usize },

    /// The resampler was asked for a non-positive output size.
    #[error("invalid output size {size}")]
    InvalidOutputSize { size: usize },
}
