//! Normalized cross-correlation pipeline.
//!
//! A strict linear pipeline: validate, pad and gather statistics, evaluate
//! the three frequency-domain cross terms, normalize, crop, extract the peak.
//! Every invocation owns its grids; nothing is shared or retained across
//! calls, so concurrent invocations need no locking.

use crate::peak::{find_peak, MatchResult};
use crate::raster::Raster;
use crate::surface::CorrelationSurface;
use crate::trace::{trace_event, trace_span};
use crate::transform::TransformEngine;
use crate::util::NormXCorrResult;

pub mod prepare;
pub(crate) mod normalize;
pub(crate) mod terms;

/// Padded-size policy for the transform working grid.
///
/// The exact rounding is caller-visible configuration rather than a hidden
/// constant: the working size is raised to even dimensions and then to a
/// square by default, matching the transform conventions the pipeline was
/// validated against.
#[derive(Clone, Copy, Debug)]
pub struct PadConfig {
    /// Round each working dimension up to the next even integer.
    pub round_to_even: bool,
    /// Raise both working dimensions to their common maximum.
    pub force_square: bool,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            round_to_even: true,
            force_square: true,
        }
    }
}

/// Tuning knobs for the correlation pipeline.
#[derive(Clone, Copy, Debug)]
pub struct CorrelateConfig {
    /// Padded-size policy.
    pub pad: PadConfig,
    /// Denominator floor as a fraction of full scale. A window (or template)
    /// whose standard deviation falls below this treats the denominator as 1
    /// instead of dividing by a vanishing value.
    pub sd_floor: f32,
}

impl Default for CorrelateConfig {
    fn default() -> Self {
        Self {
            pad: PadConfig::default(),
            sd_floor: 0.002,
        }
    }
}

/// Computes the normalized cross-correlation surface with default
/// configuration.
///
/// The returned surface has exactly the search raster's dimensions and holds
/// signed scores conceptually in `[-1, 1]`.
///
/// # Errors
///
/// [`TemplateExceedsSearch`](crate::NormXCorrError::TemplateExceedsSearch) if
/// the template is larger than the search raster in either axis, and
/// [`EmptyInput`](crate::NormXCorrError::EmptyInput) for zero-area rasters.
/// Both are checked before any transform work begins.
pub fn correlate(template: &Raster, search: &Raster) -> NormXCorrResult<CorrelationSurface> {
    correlate_with(template, search, &CorrelateConfig::default())
}

/// Computes the normalized cross-correlation surface with an explicit
/// configuration.
pub fn correlate_with(
    template: &Raster,
    search: &Raster,
    config: &CorrelateConfig,
) -> NormXCorrResult<CorrelationSurface> {
    let _guard = trace_span!("correlate").entered();

    let ops = prepare::prepare(template, search, &config.pad)?;
    trace_event!(
        "operands_prepared",
        padded_width = ops.width,
        padded_height = ops.height,
        tpl_area = ops.tpl_area,
    );

    let engine = TransformEngine::new(ops.width, ops.height)?;
    let cross = terms::compute_terms(&engine, &ops)?;
    normalize::normalize_and_crop(&cross, &ops, config, search.width(), search.height())
}

/// Correlates and extracts the best match in one call.
pub fn match_template(
    template: &Raster,
    search: &Raster,
) -> NormXCorrResult<(CorrelationSurface, MatchResult)> {
    let surface = correlate(template, search)?;
    let peak = find_peak(&surface)?;
    Ok((surface, peak))
}
