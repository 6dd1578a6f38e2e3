//! Correlation surface produced by the pipeline.

use crate::util::{NormXCorrError, NormXCorrResult};

/// Grid of normalized correlation scores, one per alignment offset.
///
/// Scores are signed and conceptually lie in `[-1, 1]`; the core never clamps
/// negatives (clamping for unsigned output encodings is a presentation-layer
/// decision). Dimensions always equal the original search raster, never the
/// padded working size. The surface is immutable once built.
#[derive(Clone, Debug)]
pub struct CorrelationSurface {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl CorrelationSurface {
    pub(crate) fn new(data: Vec<f32>, width: usize, height: usize) -> NormXCorrResult<Self> {
        let needed = crate::raster::checked_area(width, height)?;
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

    /// Returns the surface width (equals the search raster width).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the surface height (equals the search raster height).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the scores in row-major order.
    pub fn scores(&self) -> &[f32] {
        &self.data
    }

    /// Returns the score at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }
}
