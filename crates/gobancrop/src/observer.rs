//! Structured progress events emitted by the detection pipeline.
//!
//! The pipeline itself performs no I/O: callers inject an [`Observer`] to
//! receive events and decide what to do with them. [`LogObserver`] forwards
//! everything to the `log` facade for callers that just want diagnostics.

use gobancrop_core::Quad;
use serde::Serialize;

/// One step of the detection pipeline.
#[derive(Clone, Debug, Serialize)]
pub enum DetectionEvent {
    /// Coarse wood-colored region located.
    RegionFound { quad: Quad },
    /// Palette reduction applied before detection.
    PaletteReduced { colors: usize },
    /// Palette reduction failed; the unreduced image is used instead.
    PaletteReductionFailed { reason: String },
    /// Otsu threshold and coverage estimate for the cropped sub-image.
    ThresholdEstimated { threshold: u8, dark_fraction: f64 },
    /// One parameter-sweep attempt and the line counts it produced.
    SweepAttempt {
        fraction: f64,
        max_width: usize,
        horizontal: usize,
        vertical: usize,
    },
    /// Grid detection succeeded with the refined quad.
    GridRefined { quad: Quad },
    /// The full fraction/width sweep ran out without a 19x19 result.
    GridSearchExhausted,
    /// Caller-side fallback: inset quad substituted after a failed grid
    /// search.
    FallbackShrink { quad: Quad },
    /// Perspective warp finished.
    Warped { size: usize },
}

/// Sink for [`DetectionEvent`]s.
pub trait Observer {
    fn event(&self, event: &DetectionEvent);
}

/// Discards every event; the default when callers do not opt in.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn event(&self, _event: &DetectionEvent) {}
}

/// Forwards events to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn event(&self, event: &DetectionEvent) {
        match event {
            DetectionEvent::RegionFound { quad } => {
                log::info!("region found: {:?}..{:?}", quad.tl, quad.br)
            }
            DetectionEvent::PaletteReduced { colors } => {
                log::debug!("palette reduced to {colors} colors")
            }
            DetectionEvent::PaletteReductionFailed { reason } => {
                log::warn!("palette reduction failed, using original image: {reason}")
            }
            DetectionEvent::ThresholdEstimated {
                threshold,
                dark_fraction,
            } => log::debug!("otsu threshold {threshold}, dark fraction {dark_fraction:.4}"),
            DetectionEvent::SweepAttempt {
                fraction,
                max_width,
                horizontal,
                vertical,
            } => log::debug!(
                "sweep fraction={fraction:.4} max_width={max_width}: h={horizontal} v={vertical}"
            ),
            DetectionEvent::GridRefined { quad } => {
                log::info!("grid refined: {:?}..{:?}", quad.tl, quad.br)
            }
            DetectionEvent::GridSearchExhausted => log::info!("grid search exhausted"),
            DetectionEvent::FallbackShrink { quad } => {
                log::info!("falling back to inset quad: {:?}..{:?}", quad.tl, quad.br)
            }
            DetectionEvent::Warped { size } => log::debug!("warped to {size}x{size}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Recorder(RefCell<Vec<String>>);

    impl Observer for Recorder {
        fn event(&self, event: &DetectionEvent) {
            self.0.borrow_mut().push(format!("{event:?}"));
        }
    }

    #[test]
    fn events_reach_an_injected_sink() {
        let rec = Recorder(RefCell::new(Vec::new()));
        rec.event(&DetectionEvent::GridSearchExhausted);
        rec.event(&DetectionEvent::Warped { size: 256 });
        assert_eq!(rec.0.borrow().len(), 2);
        assert!(rec.0.borrow()[1].contains("256"));
    }

    #[test]
    fn events_serialize_for_structured_sinks() {
        let json = serde_json::to_string(&DetectionEvent::SweepAttempt {
            fraction: 0.03,
            max_width: 8,
            horizontal: 17,
            vertical: 19,
        })
        .expect("serializable");
        assert!(json.contains("SweepAttempt"));
        assert!(json.contains("\"max_width\":8"));
    }
}
