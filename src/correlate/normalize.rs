//! Combines the raw cross terms into the normalized correlation surface.

use crate::correlate::terms::CrossTerms;
use crate::correlate::{prepare::PreparedOperands, CorrelateConfig};
use crate::raster::FULL_SCALE;
use crate::surface::CorrelationSurface;
use crate::util::NormXCorrResult;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Normalizes the cross terms and crops to the original search footprint.
///
/// Per cell: `local_var = energy/N - (local_sum/N)^2` recovers the window
/// variance (the local sum is squared here, after the correlation), and the
/// score is `(signal/N) / (sd_T * local_sd)`. When either standard deviation
/// falls under the configured floor the denominator is treated as 1, so
/// near-constant regions flatten to ~0 instead of dividing by zero (the
/// zero-mean template annihilates the numerator there). The padded border
/// beyond the search footprint was computed against fabricated fill and is
/// discarded.
pub(crate) fn normalize_and_crop(
    terms: &CrossTerms,
    ops: &PreparedOperands,
    config: &CorrelateConfig,
    out_width: usize,
    out_height: usize,
) -> NormXCorrResult<CorrelationSurface> {
    let n = ops.tpl_area as f32;
    let tpl_sd = ops.tpl_stats.sd;
    let sd_floor = config.sd_floor * FULL_SCALE;
    let padded_width = ops.width;

    let signal = terms.signal.as_slice();
    let energy = terms.energy.as_slice();
    let local_sum = terms.local_sum.as_slice();

    let normalize_row = |y: usize, row: &mut [f32]| {
        let base = y * padded_width;
        for (x, out) in row.iter_mut().enumerate() {
            let idx = base + x;
            let local_var = (energy[idx] / n - (local_sum[idx] / n).powi(2)).max(0.0);
            let local_sd = local_var.sqrt();
            let denom = if tpl_sd < sd_floor || local_sd < sd_floor {
                1.0
            } else {
                tpl_sd * local_sd
            };
            *out = (signal[idx] / n) / denom;
        }
    };

    let mut data = vec![0.0f32; out_width * out_height];

    #[cfg(feature = "rayon")]
    data.par_chunks_mut(out_width)
        .enumerate()
        .for_each(|(y, row)| normalize_row(y, row));

    #[cfg(not(feature = "rayon"))]
    for (y, row) in data.chunks_mut(out_width).enumerate() {
        normalize_row(y, row);
    }

    CorrelationSurface::new(data, out_width, out_height)
}
