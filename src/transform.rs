//! 2D discrete Fourier transform engine.
//!
//! Thin wrapper over `rustfft`: plans are created once per padded working
//! size and shared by every operand of a correlation. The 2D transform is
//! computed row-column: FFT each row, transpose, FFT again, transpose back.
//! Forward output is unnormalized; the inverse divides by the cell count so a
//! forward/inverse pair is the identity.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

use crate::raster::Raster;
use crate::util::{NormXCorrError, NormXCorrResult};

/// Frequency-domain representation of a padded raster.
///
/// Same width/height as the padded raster, one complex (real, imaginary)
/// sample per cell. Ephemeral: produced by [`TransformEngine::forward`],
/// consumed by the correlator, never persisted.
pub struct FrequencyGrid {
    data: Vec<Complex<f32>>,
    width: usize,
    height: usize,
}

impl FrequencyGrid {
    /// Returns the grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the complex samples in row-major order.
    pub fn as_slice(&self) -> &[Complex<f32>] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Complex<f32>] {
        &mut self.data
    }
}

/// Planned forward/inverse 2D FFTs for one working size.
///
/// The engine is cheap to share: the plans are `Arc<dyn Fft>` and `forward` /
/// `inverse` allocate their own working buffers, so independent terms can run
/// concurrently against one engine.
pub struct TransformEngine {
    width: usize,
    height: usize,
    fwd_row: Arc<dyn Fft<f32>>,
    fwd_col: Arc<dyn Fft<f32>>,
    inv_row: Arc<dyn Fft<f32>>,
    inv_col: Arc<dyn Fft<f32>>,
}

impl TransformEngine {
    /// Plans transforms for a `width` x `height` working grid.
    pub fn new(width: usize, height: usize) -> NormXCorrResult<Self> {
        if width == 0 || height == 0 {
            return Err(NormXCorrError::InvalidDimensions { width, height });
        }
        width
            .checked_mul(height)
            .ok_or_else(|| NormXCorrError::Transform {
                reason: format!("working size {width}x{height} overflows the address space"),
            })?;
        let mut planner = FftPlanner::new();
        let fwd_row = planner.plan_fft_forward(width);
        let inv_row = planner.plan_fft_inverse(width);
        let fwd_col = planner.plan_fft_forward(height);
        let inv_col = planner.plan_fft_inverse(height);
        Ok(Self {
            width,
            height,
            fwd_row,
            fwd_col,
            inv_row,
            inv_col,
        })
    }

    /// Returns the working grid width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the working grid height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Forward-transforms a padded raster into the frequency domain.
    ///
    /// The raster must already be padded to the engine's working size.
    pub fn forward(&self, raster: &Raster) -> NormXCorrResult<FrequencyGrid> {
        self.check_dims(raster.width(), raster.height())?;
        let mut data: Vec<Complex<f32>> = raster
            .as_slice()
            .iter()
            .map(|&v| Complex::new(v, 0.0))
            .collect();
        self.pass_2d(&mut data, &self.fwd_row, &self.fwd_col);
        Ok(FrequencyGrid {
            data,
            width: self.width,
            height: self.height,
        })
    }

    /// Inverse-transforms a frequency grid back to a spatial raster.
    ///
    /// Applies the `1/(width*height)` normalization that `rustfft` leaves to
    /// the caller; imaginary residue (roundoff from real-valued input) is
    /// dropped.
    pub fn inverse(&self, mut grid: FrequencyGrid) -> NormXCorrResult<Raster> {
        self.check_dims(grid.width, grid.height)?;
        self.pass_2d(&mut grid.data, &self.inv_row, &self.inv_col);
        let norm = 1.0 / (self.width * self.height) as f32;
        let spatial: Vec<f32> = grid.data.iter().map(|c| c.re * norm).collect();
        Raster::new(spatial, self.width, self.height)
    }

    fn check_dims(&self, width: usize, height: usize) -> NormXCorrResult<()> {
        if width != self.width || height != self.height {
            return Err(NormXCorrError::Transform {
                reason: format!(
                    "operand is {width}x{height}, engine planned for {}x{}",
                    self.width, self.height
                ),
            });
        }
        Ok(())
    }

    /// Row-column 2D pass: FFT all rows in place, transpose, FFT all rows of
    /// the transposed grid (the original columns), transpose back.
    fn pass_2d(&self, data: &mut [Complex<f32>], row: &Arc<dyn Fft<f32>>, col: &Arc<dyn Fft<f32>>) {
        row.process(data);
        let mut transposed = transpose(data, self.width, self.height);
        col.process(&mut transposed);
        let back = transpose(&transposed, self.height, self.width);
        data.copy_from_slice(&back);
    }
}

fn transpose(data: &[Complex<f32>], width: usize, height: usize) -> Vec<Complex<f32>> {
    let mut out = vec![Complex::new(0.0, 0.0); data.len()];
    for y in 0..height {
        let row = &data[y * width..(y + 1) * width];
        for (x, &v) in row.iter().enumerate() {
            out[x * height + y] = v;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_transforms_to_flat_spectrum() {
        let raster = Raster::from_fn(4, 4, |x, y| if x == 0 && y == 0 { 1.0 } else { 0.0 }).unwrap();
        let engine = TransformEngine::new(4, 4).unwrap();
        let grid = engine.forward(&raster).unwrap();
        for c in grid.as_slice() {
            assert!((c.re - 1.0).abs() < 1e-5);
            assert!(c.im.abs() < 1e-5);
        }
    }

    #[test]
    fn forward_inverse_restores_input() {
        let raster = Raster::from_fn(6, 4, |x, y| (x as f32 * 0.3 + y as f32 * 0.1).sin()).unwrap();
        let engine = TransformEngine::new(6, 4).unwrap();
        let restored = engine.inverse(engine.forward(&raster).unwrap()).unwrap();
        for (a, b) in raster.as_slice().iter().zip(restored.as_slice()) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn rejects_mismatched_operand_size() {
        let raster = Raster::from_fn(4, 4, |_, _| 0.0).unwrap();
        let engine = TransformEngine::new(8, 8).unwrap();
        assert!(matches!(
            engine.forward(&raster),
            Err(NormXCorrError::Transform { .. })
        ));
    }
}
