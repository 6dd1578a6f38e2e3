//! Frequency-domain evaluation of the three correlation terms.
//!
//! Each term is a full cross-correlation computed through the convolution
//! theorem: forward-transform both operands, multiply one spectrum by the
//! conjugate of the other, inverse-transform. One transform pair replaces a
//! sliding-window pass per offset, turning O(N^2 M^2) work into O(N^2 log N).

use crate::correlate::prepare::PreparedOperands;
use crate::raster::Raster;
use crate::transform::TransformEngine;
use crate::util::NormXCorrResult;

/// Raw spatial-domain cross terms, all at the padded working size.
///
/// None of these are divided by the template area yet; the normalizer owns
/// that convention so the three terms cannot drift apart.
pub(crate) struct CrossTerms {
    /// Zero-mean template against zero-mean search (signal-energy term).
    pub signal: Raster,
    /// Unit mask against squared search (local-energy term).
    pub energy: Raster,
    /// Unit mask against search (local-mean term; squared later, after the
    /// correlation, never before).
    pub local_sum: Raster,
}

/// Cross-correlates `kernel` against `signal` at every shift.
///
/// Spectra combine as `conj(K) * S`, so cell `(x, y)` of the result is the
/// inner product of the kernel with the signal window whose top-left corner
/// sits at `(x, y)` (circularly wrapped at the padded border).
pub(crate) fn cross_correlate(
    engine: &TransformEngine,
    kernel: &Raster,
    signal: &Raster,
) -> NormXCorrResult<Raster> {
    let kernel_freq = engine.forward(kernel)?;
    let mut product = engine.forward(signal)?;
    for (s, k) in product.as_mut_slice().iter_mut().zip(kernel_freq.as_slice()) {
        *s *= k.conj();
    }
    engine.inverse(product)
}

/// Computes all three cross terms.
///
/// The terms are mutually independent; with the `rayon` feature they run as a
/// fork/join and the join happens before normalization, so the output is
/// identical to the sequential evaluation.
pub(crate) fn compute_terms(
    engine: &TransformEngine,
    ops: &PreparedOperands,
) -> NormXCorrResult<CrossTerms> {
    let search_mean = ops.search_stats.mean;
    let search_zero_mean = Raster::from_fn(ops.width, ops.height, |x, y| {
        // Mean-filled padding cells land exactly on zero here.
        ops.search.get(x, y).unwrap_or(search_mean) - search_mean
    })?;

    let signal_task = || cross_correlate(engine, &ops.tpl_zero_mean, &search_zero_mean);
    let energy_task = || cross_correlate(engine, &ops.unit_mask, &ops.search_sq);
    let local_sum_task = || cross_correlate(engine, &ops.unit_mask, &ops.search);

    #[cfg(feature = "rayon")]
    let (signal, (energy, local_sum)) =
        rayon::join(signal_task, || rayon::join(energy_task, local_sum_task));

    #[cfg(not(feature = "rayon"))]
    let (signal, (energy, local_sum)) = (signal_task(), (energy_task(), local_sum_task()));

    Ok(CrossTerms {
        signal: signal?,
        energy: energy?,
        local_sum: local_sum?,
    })
}
