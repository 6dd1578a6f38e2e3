//! Convenience helpers for loading rasters via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Color inputs are reduced
//! to a single luma channel and alpha is discarded before correlation.

use crate::raster::Raster;
use crate::util::{NormXCorrError, NormXCorrResult};
use std::path::Path;

/// Creates a raster from a grayscale image buffer.
pub fn raster_from_gray_image(img: &image::GrayImage) -> NormXCorrResult<Raster> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    Raster::from_luma8(img.as_raw(), width, height)
}

/// Creates a raster from a dynamic image, reducing to a single channel.
pub fn raster_from_dynamic_image(img: &image::DynamicImage) -> NormXCorrResult<Raster> {
    let gray = img.to_luma8();
    raster_from_gray_image(&gray)
}

/// Loads an image from disk and converts it to a single-channel raster.
pub fn load_gray_raster<P: AsRef<Path>>(path: P) -> NormXCorrResult<Raster> {
    let img = image::open(path).map_err(|err| NormXCorrError::ImageIo {
        reason: err.to_string(),
    })?;
    raster_from_dynamic_image(&img)
}
