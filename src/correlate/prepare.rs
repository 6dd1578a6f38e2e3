//! Padding and per-raster statistics for the correlation pipeline.
//!
//! All operands of one correlation share a single padded working size. The
//! search raster is padded with its own mean so the fabricated border adds no
//! spurious edge energy; the zero-mean template and the unit mask sit at the
//! origin corner over zero fill.

use crate::correlate::PadConfig;
use crate::raster::{Raster, FULL_SCALE};
use crate::util::{NormXCorrError, NormXCorrResult};

/// Per-raster mean and standard deviation.
///
/// Computed once over the unpadded raster and reused throughout the
/// correlation; recomputing with a different normalization mid-pipeline is a
/// classic source of scale-factor bugs, so nothing downstream re-derives
/// these.
#[derive(Clone, Copy, Debug)]
pub struct Statistics {
    /// Mean sample intensity.
    pub mean: f32,
    /// Population standard deviation.
    pub sd: f32,
}

impl Statistics {
    /// Computes mean and population standard deviation of a raster.
    pub fn of(raster: &Raster) -> Self {
        let n = raster.as_slice().len() as f64;
        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;
        for &v in raster.as_slice() {
            let v = v as f64;
            sum += v;
            sum_sq += v * v;
        }
        let mean = sum / n;
        let var = (sum_sq / n - mean * mean).max(0.0);
        Self {
            mean: mean as f32,
            sd: var.sqrt() as f32,
        }
    }
}

/// Working size for the padded transforms: the smallest even dimensions at
/// least as large as the search raster, raised to a square unless the policy
/// says otherwise.
pub fn padded_size(search_w: usize, search_h: usize, pad: &PadConfig) -> (usize, usize) {
    let round = |v: usize| if pad.round_to_even && v % 2 == 1 { v + 1 } else { v };
    let mut w = round(search_w);
    let mut h = round(search_h);
    if pad.force_square && w != h {
        let side = w.max(h);
        w = side;
        h = side;
    }
    (w, h)
}

/// Extends a raster to `(width, height)` with a constant fill, original
/// content at the origin corner.
pub fn pad_with_fill(
    raster: &Raster,
    width: usize,
    height: usize,
    fill: f32,
) -> NormXCorrResult<Raster> {
    Raster::from_fn(width, height, |x, y| raster.get(x, y).unwrap_or(fill))
}

/// Padded operands and statistics for one (template, search) pair.
pub struct PreparedOperands {
    /// Padded working width.
    pub width: usize,
    /// Padded working height.
    pub height: usize,
    /// Template pixel count `N_s` (unpadded footprint).
    pub tpl_area: usize,
    /// Template statistics over the unpadded template.
    pub tpl_stats: Statistics,
    /// Search statistics over the unpadded search raster.
    pub search_stats: Statistics,
    /// Search raster padded with its mean.
    pub search: Raster,
    /// Element-wise square of the padded search raster.
    pub search_sq: Raster,
    /// Zero-mean template, zero-padded at the origin corner.
    pub tpl_zero_mean: Raster,
    /// Unit mask: full scale over the template footprint, zero elsewhere.
    pub unit_mask: Raster,
}

/// Validates the pair and builds all padded operands.
///
/// Fails before any transform work: zero-area rasters and templates
/// exceeding the search bounds are rejected here (fail fast).
pub fn prepare(
    template: &Raster,
    search: &Raster,
    pad: &PadConfig,
) -> NormXCorrResult<PreparedOperands> {
    validate_pair(template, search)?;

    let (width, height) = padded_size(search.width(), search.height(), pad);
    let search_stats = Statistics::of(search);
    let tpl_stats = Statistics::of(template);
    let tpl_area = template.width() * template.height();

    let padded_search = pad_with_fill(search, width, height, search_stats.mean)?;
    let search_sq = Raster::from_fn(width, height, |x, y| {
        let v = padded_search.get(x, y).unwrap_or(0.0);
        v * v
    })?;
    let tpl_zero_mean = Raster::from_fn(width, height, |x, y| {
        template.get(x, y).map_or(0.0, |v| v - tpl_stats.mean)
    })?;
    let unit_mask = Raster::from_fn(width, height, |x, y| {
        if x < template.width() && y < template.height() {
            FULL_SCALE
        } else {
            0.0
        }
    })?;

    Ok(PreparedOperands {
        width,
        height,
        tpl_area,
        tpl_stats,
        search_stats,
        search: padded_search,
        search_sq,
        tpl_zero_mean,
        unit_mask,
    })
}

fn validate_pair(template: &Raster, search: &Raster) -> NormXCorrResult<()> {
    for raster in [template, search] {
        if raster.width() == 0 || raster.height() == 0 || raster.as_slice().is_empty() {
            return Err(NormXCorrError::EmptyInput {
                width: raster.width(),
                height: raster.height(),
            });
        }
    }
    if template.width() > search.width() || template.height() > search.height() {
        return Err(NormXCorrError::TemplateExceedsSearch {
            tpl_width: template.width(),
            tpl_height: template.height(),
            img_width: search.width(),
            img_height: search.height(),
        });
    }
    Ok(())
}
