//! Owned single-channel rasters.
//!
//! A `Raster` is a contiguous row-major `f32` grid with samples nominally in
//! `[0.0, FULL_SCALE]`. Color and integer inputs are reduced to this
//! representation before correlation; all pipeline arithmetic stays in `f32`
//! so intermediate products never overflow an integer sample type.

use crate::util::{NormXCorrError, NormXCorrResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Maximum nominal sample intensity ("full scale").
///
/// Integer ingest maps its own full scale onto this value, so one
/// quantization step of an 8-bit source is `FULL_SCALE / 255`.
pub const FULL_SCALE: f32 = 1.0;

/// One 8-bit quantization step of full scale.
pub const QUANTUM: f32 = FULL_SCALE / 255.0;

/// Owned contiguous single-channel raster.
#[derive(Clone, Debug)]
pub struct Raster {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl Raster {
    /// Creates a raster from a row-major buffer of exactly `width * height`
    /// samples.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> NormXCorrResult<Self> {
        let needed = checked_area(width, height)?;
        if data.len() < needed {
            return Err(NormXCorrError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(NormXCorrError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates a raster by evaluating `f(x, y)` at every cell.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> NormXCorrResult<Self>
    where
        F: FnMut(usize, usize) -> f32,
    {
        let needed = checked_area(width, height)?;
        let mut data = Vec::with_capacity(needed);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self::new(data, width, height)
    }

    /// Creates a raster from 8-bit grayscale samples, mapped onto
    /// `[0, FULL_SCALE]`.
    pub fn from_luma8(data: &[u8], width: usize, height: usize) -> NormXCorrResult<Self> {
        let needed = checked_area(width, height)?;
        if data.len() < needed {
            return Err(NormXCorrError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(NormXCorrError::InvalidDimensions { width, height });
        }
        let scaled = data[..needed]
            .iter()
            .map(|&v| f32::from(v) * (FULL_SCALE / 255.0))
            .collect();
        Self::new(scaled, width, height)
    }

    /// Returns the raster width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the raster height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the backing row-major slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns the sample at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Returns a contiguous slice for row `y`.
    pub fn row(&self, y: usize) -> Option<&[f32]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.data.get(start..start + self.width)
    }
}

/// Zero-area rasters are representable (and rejected with `EmptyInput` at the
/// pipeline boundary), so only overflowing dimensions are invalid here.
pub(crate) fn checked_area(width: usize, height: usize) -> NormXCorrResult<usize> {
    width
        .checked_mul(height)
        .ok_or(NormXCorrError::InvalidDimensions { width, height })
}
