//! Error types for normxcorr.

use thiserror::Error;

/// Result alias for normxcorr operations.
pub type NormXCorrResult<T> = std::result::Result<T, NormXCorrError>;

/// Errors that can occur when running the correlation pipeline.
#[derive(Debug, Error)]
pub enum NormXCorrError {
    /// A raster or surface has zero area.
    #[error("empty input: {width}x{height} raster has zero area")]
    EmptyInput {
        /// Width of the offending raster.
        width: usize,
        /// Height of the offending raster.
        height: usize,
    },
    /// The template does not fit inside the search raster.
    #[error("template {tpl_width}x{tpl_height} exceeds search raster {img_width}x{img_height}")]
    TemplateExceedsSearch {
        /// Template width in pixels.
        tpl_width: usize,
        /// Template height in pixels.
        tpl_height: usize,
        /// Search raster width in pixels.
        img_width: usize,
        /// Search raster height in pixels.
        img_height: usize,
    },
    /// Width/height pair that cannot describe a raster.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// Backing buffer shorter than the dimensions require.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall {
        /// Required element count.
        needed: usize,
        /// Provided element count.
        got: usize,
    },
    /// The transform engine could not be set up or run.
    #[error("transform failure: {reason}")]
    Transform {
        /// Human-readable failure description.
        reason: String,
    },
    /// Image decoding or loading failed.
    #[cfg(feature = "image-io")]
    #[error("image io failure: {reason}")]
    ImageIo {
        /// Human-readable failure description.
        reason: String,
    },
}
