//! Fixed-size 2D inverse FFT from the centred spectrum to the spatial patch.
//!
//! A [`RadixPlan`] is built once per grid side and reused every tick: it runs
//! the 1D radix plan across every row, transposes, runs it across every row
//! again (the former columns) and transposes back. The transform is the
//! unnormalized sum `h(x) = Σ_k H(k)·e^{ik·x}`.
//!
//! Because the spectrum is stored centred (`k = 0` at `(n/2, n/2)`), the
//! plain FFT output carries a `(-1)^(row+col)` factor; [`SpectralTransform`]
//! multiplies it back out.

use std::fmt;
use std::sync::Arc;

use log::info;
use rustfft::{Fft, FftPlanner};
use wavefield_core::{Complex32, ComplexGrid, OceanError, RealGrid};

use crate::evolve::EvolvedField;

/// Reusable 2D inverse FFT for one grid side.
pub struct RadixPlan {
    dimension: usize,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex32>,
}

impl RadixPlan {
    /// Plans an `n x n` inverse transform.
    ///
    /// Returns `ConfigInvalid` unless `dimension` is a power of two.
    pub fn new(dimension: usize) -> Result<Self, OceanError> {
        if !dimension.is_power_of_two() {
            return Err(OceanError::config(
                "dimension",
                format!("radix plan needs a power of two, got {dimension}"),
            ));
        }
        let fft = FftPlanner::new().plan_fft_inverse(dimension);
        let scratch = vec![Complex32::new(0.0, 0.0); fft.get_inplace_scratch_len()];
        info!("built {dimension}x{dimension} inverse radix plan");
        Ok(Self {
            dimension,
            fft,
            scratch,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// In-place unnormalized 2D inverse FFT of `grid`.
    pub fn inverse_2d(&mut self, grid: &mut ComplexGrid) -> Result<(), OceanError> {
        if grid.dimension() != self.dimension {
            return Err(OceanError::DimensionMismatch {
                expected: self.dimension,
                got: grid.dimension(),
            });
        }
        let n = self.dimension;
        let data = grid.data_mut();
        // The buffer is a whole number of rows, so one call covers every row.
        self.fft.process_with_scratch(data, &mut self.scratch);
        transpose_in_place(data, n);
        self.fft.process_with_scratch(data, &mut self.scratch);
        transpose_in_place(data, n);
        Ok(())
    }
}

impl fmt::Debug for RadixPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadixPlan")
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

fn transpose_in_place(data: &mut [Complex32], n: usize) {
    for row in 0..n {
        for col in row + 1..n {
            data.swap(row * n + col, col * n + row);
        }
    }
}

/// Real-valued spatial grids for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialField {
    pub height: RealGrid,
    pub displacement_x: RealGrid,
    pub displacement_y: RealGrid,
}

/// Centred-spectrum inverse transform owning its [`RadixPlan`].
#[derive(Debug)]
pub struct SpectralTransform {
    plan: RadixPlan,
}

impl SpectralTransform {
    pub fn new(dimension: usize) -> Result<Self, OceanError> {
        Ok(Self {
            plan: RadixPlan::new(dimension)?,
        })
    }

    pub fn dimension(&self) -> usize {
        self.plan.dimension()
    }

    /// Inverse transform with the origin-shift sign correction, keeping the
    /// imaginary part (near zero for a Hermitian spectrum).
    pub fn inverse_complex(&mut self, spectrum: &ComplexGrid) -> Result<ComplexGrid, OceanError> {
        let mut out = spectrum.clone();
        self.plan.inverse_2d(&mut out)?;
        let n = out.dimension();
        for (idx, value) in out.data_mut().iter_mut().enumerate() {
            if (idx / n + idx % n) % 2 == 1 {
                *value = -*value;
            }
        }
        Ok(out)
    }

    /// Inverse transform keeping only the real part.
    pub fn inverse_transform(&mut self, spectrum: &ComplexGrid) -> Result<RealGrid, OceanError> {
        Ok(self.inverse_complex(spectrum)?.map(|c| c.re))
    }

    /// Transforms H(t), Dx(t) and Dy(t) to the spatial domain.
    pub fn inverse_transform_all(
        &mut self,
        height: &ComplexGrid,
        choppy_x: &ComplexGrid,
        choppy_y: &ComplexGrid,
    ) -> Result<SpatialField, OceanError> {
        Ok(SpatialField {
            height: self.inverse_transform(height)?,
            displacement_x: self.inverse_transform(choppy_x)?,
            displacement_y: self.inverse_transform(choppy_y)?,
        })
    }

    /// [`inverse_transform_all`](Self::inverse_transform_all) over an [`EvolvedField`].
    pub fn transform_evolved(&mut self, evolved: &EvolvedField) -> Result<SpatialField, OceanError> {
        self.inverse_transform_all(&evolved.height, &evolved.choppy_x, &evolved.choppy_y)
    }
}
