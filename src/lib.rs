//! NormXCorr locates a template image inside a larger search image via
//! FFT-based normalized cross-correlation.
//!
//! The correlation surface is evaluated for every alignment offset through
//! the convolution theorem (three frequency-domain cross terms, combined and
//! variance-normalized per window), then the peak offset and score are
//! extracted deterministically. Optional parallelism is available via the
//! `rayon` feature and image loading via the `image-io` feature.

pub mod correlate;
pub mod peak;
pub mod raster;
pub mod surface;
mod trace;
pub mod transform;
pub mod util;

pub use correlate::{correlate, correlate_with, match_template, CorrelateConfig, PadConfig};
pub use correlate::prepare::Statistics;
pub use peak::{find_peak, MatchResult};
pub use raster::{Raster, FULL_SCALE, QUANTUM};
pub use surface::CorrelationSurface;
pub use transform::{FrequencyGrid, TransformEngine};
pub use util::{NormXCorrError, NormXCorrResult};

#[cfg(feature = "image-io")]
pub use raster::io::{load_gray_raster, raster_from_dynamic_image, raster_from_gray_image};
