//! Scanning for line-like pixel runs and refining them into 19 grid lines.

use gobancrop_core::GRID_LINES;
use serde::{Deserialize, Serialize};

/// Inclusive index range of a candidate grid line along one scan axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

impl Segment {
    #[inline]
    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) as f64 / 2.0
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }
}

/// How the refiner places the 19 line positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineFit {
    /// Interpolate 19 evenly spaced positions between the two extreme
    /// segment midpoints. Assumes uniform grid spacing; interior segments
    /// only anchor the span.
    #[default]
    Extremes,
    /// Use the 19 sorted midpoints directly when exactly 19 segments
    /// survive, falling back to `Extremes` otherwise.
    AllMidpoints,
}

/// Scan `limit` indices, counting dark pixels along the `depth`
/// perpendicular run for each.
///
/// An index is line-like when at least `fraction * depth` (truncated) of its
/// unmasked perpendicular pixels satisfy `is_line`. Contiguous line-like
/// indices group into segments; segments wider than `max_width` are dropped
/// as noise, since true grid lines are thin and wide dark runs are stones,
/// shadows, or borders.
///
/// `is_line(i, j)` and `mask(i, j)` receive the scan index `i` and the
/// perpendicular index `j`; callers orient them for row or column scans.
pub fn scan_segments<F, M>(
    limit: usize,
    depth: usize,
    fraction: f64,
    max_width: usize,
    mut is_line: F,
    mut mask: M,
) -> Vec<Segment>
where
    F: FnMut(usize, usize) -> bool,
    M: FnMut(usize, usize) -> bool,
{
    let min_dark = (fraction * depth as f64) as usize;
    let mut segments = Vec::new();
    let mut current: Option<Segment> = None;

    for i in 0..limit {
        let mut count = 0usize;
        for j in 0..depth {
            if !mask(i, j) {
                continue;
            }
            if is_line(i, j) {
                count += 1;
            }
        }
        if count >= min_dark {
            current = match current {
                Some(seg) => Some(Segment {
                    start: seg.start,
                    end: i,
                }),
                None => Some(Segment { start: i, end: i }),
            };
        } else if let Some(seg) = current.take() {
            segments.push(seg);
        }
    }
    if let Some(seg) = current {
        segments.push(seg);
    }

    segments.retain(|s| s.width() <= max_width);
    segments
}

/// Convert candidate segments into exactly 19 line positions.
///
/// Needs at least two segments; returns `None` otherwise rather than a
/// partial set. With `LineFit::Extremes` the two extreme midpoints anchor 19
/// evenly spaced positions (step = span/18).
pub fn refine_lines(segments: &[Segment], fit: LineFit) -> Option<Vec<f64>> {
    if segments.len() < 2 {
        return None;
    }

    let mut mids: Vec<f64> = segments.iter().map(Segment::midpoint).collect();
    mids.sort_by(|a, b| a.total_cmp(b));

    if fit == LineFit::AllMidpoints && mids.len() == GRID_LINES {
        return Some(mids);
    }

    let start = mids[0];
    let end = mids[mids.len() - 1];
    let step = (end - start) / (GRID_LINES - 1) as f64;
    Some((0..GRID_LINES).map(|i| start + i as f64 * step).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_MASK: fn(usize, usize) -> bool = |_, _| true;

    #[test]
    fn groups_contiguous_indices() {
        // Indices 2-3 and 7 are fully dark along a depth of 10.
        let dark = |i: usize, _j: usize| i == 2 || i == 3 || i == 7;
        let segs = scan_segments(10, 10, 0.5, 5, dark, NO_MASK);
        assert_eq!(
            segs,
            vec![Segment { start: 2, end: 3 }, Segment { start: 7, end: 7 }]
        );
    }

    #[test]
    fn wide_runs_are_discarded() {
        let dark = |i: usize, _j: usize| (2..=8).contains(&i) || i == 0;
        let segs = scan_segments(10, 10, 0.5, 3, dark, NO_MASK);
        assert_eq!(segs, vec![Segment { start: 0, end: 0 }]);
    }

    #[test]
    fn coverage_threshold_gates_indices() {
        // Index 1 is dark for 4 of 10 perpendicular pixels, index 5 for 8.
        let dark = |i: usize, j: usize| (i == 1 && j < 4) || (i == 5 && j < 8);
        let segs = scan_segments(10, 10, 0.5, 3, dark, NO_MASK);
        assert_eq!(segs, vec![Segment { start: 5, end: 5 }]);
    }

    #[test]
    fn masked_pixels_are_ignored() {
        // Everything is dark, but the mask admits nothing: zero coverage
        // still meets a zero minimum, so the whole axis fuses into one run
        // that the width filter then rejects.
        let segs = scan_segments(10, 10, 0.0, 3, |_, _| true, |_, _| false);
        assert!(segs.is_empty());

        // With a real fraction the masked-out pixels stop counting.
        let segs = scan_segments(10, 10, 0.5, 3, |_, _| true, |_i, j| j < 4);
        assert!(segs.is_empty());
    }

    #[test]
    fn nineteen_even_lines_recovered_exactly() {
        // Lines at 10, 25, 40, ..., 280 (step 15), each one index wide.
        let positions: Vec<usize> = (0..19).map(|i| 10 + 15 * i).collect();
        let pos = positions.clone();
        let dark = move |i: usize, _j: usize| pos.contains(&i);
        let segs = scan_segments(300, 50, 0.5, 4, dark, NO_MASK);
        assert_eq!(segs.len(), 19);

        let lines = refine_lines(&segs, LineFit::Extremes).expect("19 lines");
        assert_eq!(lines.len(), 19);
        for (line, expect) in lines.iter().zip(&positions) {
            assert!(
                (line - *expect as f64).abs() < 1.0,
                "line {line} vs expected {expect}"
            );
        }
    }

    #[test]
    fn fewer_than_two_segments_is_insufficient() {
        assert!(refine_lines(&[], LineFit::Extremes).is_none());
        assert!(refine_lines(&[Segment { start: 4, end: 5 }], LineFit::Extremes).is_none());
    }

    #[test]
    fn extremes_fit_ignores_interior_midpoints() {
        // Two segments anchor the span; a skewed interior segment must not
        // shift the result.
        let segs = [
            Segment { start: 0, end: 0 },
            Segment { start: 100, end: 100 },
            Segment { start: 180, end: 180 },
        ];
        let lines = refine_lines(&segs, LineFit::Extremes).expect("lines");
        assert_eq!(lines[0], 0.0);
        assert_eq!(lines[18], 180.0);
        assert_eq!(lines[9], 90.0);
    }

    #[test]
    fn all_midpoints_fit_keeps_uneven_spacing() {
        let segs: Vec<Segment> = (0..19)
            .map(|i| {
                let p = 10 * i + if i == 9 { 3 } else { 0 };
                Segment { start: p, end: p }
            })
            .collect();
        let lines = refine_lines(&segs, LineFit::AllMidpoints).expect("lines");
        assert_eq!(lines[9], 93.0);

        // Any other segment count falls back to the extremes fit.
        let lines = refine_lines(&segs[..18], LineFit::AllMidpoints).expect("lines");
        assert_eq!(lines.len(), 19);
        assert!((lines[9] - 85.0).abs() < 1e-9);
    }
}
