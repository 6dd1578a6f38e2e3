//! Peak extraction from a correlation surface.

use crate::raster::QUANTUM;
use crate::surface::CorrelationSurface;
use crate::util::{NormXCorrError, NormXCorrResult};

/// Best-match location and score on a correlation surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchResult {
    /// X coordinate (column) of the peak.
    pub x: usize,
    /// Y coordinate (row) of the peak.
    pub y: usize,
    /// The surface maximum, conceptually in `[-1, 1]`. The reported cell can
    /// differ from the argmax only within one quantization step, so this is
    /// the maximum itself rather than the cell's own value.
    pub score: f32,
}

/// Finds the peak of a correlation surface.
///
/// The maximum is taken over the fully materialized surface, then the
/// reported cell is the first one in row-major order whose score lies within
/// one quantization step of that maximum, carrying the maximum as its score.
/// Ties therefore resolve deterministically (top-to-bottom, left-to-right)
/// regardless of how the surface was computed.
pub fn find_peak(surface: &CorrelationSurface) -> NormXCorrResult<MatchResult> {
    let scores = surface.scores();
    if scores.is_empty() {
        return Err(NormXCorrError::EmptyInput {
            width: surface.width(),
            height: surface.height(),
        });
    }

    let max = scores
        .iter()
        .copied()
        .fold(f32::NEG_INFINITY, |acc, v| if v.total_cmp(&acc).is_gt() { v } else { acc });

    let tolerance = QUANTUM;
    let idx = scores
        .iter()
        .position(|&v| v >= max - tolerance)
        .unwrap_or(0);

    Ok(MatchResult {
        x: idx % surface.width(),
        y: idx / surface.width(),
        score: max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(data: Vec<f32>, width: usize, height: usize) -> CorrelationSurface {
        CorrelationSurface::new(data, width, height).unwrap()
    }

    #[test]
    fn finds_unique_maximum() {
        let s = surface(vec![0.1, 0.2, 0.9, 0.3, 0.0, 0.4], 3, 2);
        let peak = find_peak(&s).unwrap();
        assert_eq!((peak.x, peak.y), (2, 0));
        assert!((peak.score - 0.9).abs() < 1e-6);
    }

    #[test]
    fn tie_resolves_to_first_in_row_major_order() {
        let s = surface(vec![0.0, 0.8, 0.0, 0.8, 0.0, 0.0], 3, 2);
        let peak = find_peak(&s).unwrap();
        assert_eq!((peak.x, peak.y), (1, 0));
    }

    #[test]
    fn near_tie_within_one_quantum_counts_as_tie() {
        // Second cell is within one quantization step of the true maximum,
        // so it wins by scan order; the score still reports the maximum.
        let near = 0.8 - QUANTUM * 0.5;
        let s = surface(vec![0.0, near, 0.0, 0.8], 2, 2);
        let peak = find_peak(&s).unwrap();
        assert_eq!((peak.x, peak.y), (1, 0));
        assert!((peak.score - 0.8).abs() < 1e-6);
    }

    #[test]
    fn negative_surface_still_reports_a_peak() {
        let s = surface(vec![-0.9, -0.2, -0.5, -0.7], 2, 2);
        let peak = find_peak(&s).unwrap();
        assert_eq!((peak.x, peak.y), (1, 0));
        assert!((peak.score + 0.2).abs() < 1e-6);
    }
}
