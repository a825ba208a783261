//! Time evolution of the initial field under the dispersion relation.
//!
//! ```text
//! H(t,k)  = H0(k)·e^{iωt} + conj(H0(-k))·e^{-iωt}
//! Dx(t,k) = -i·(kx/|k|)·H(t,k)
//! Dy(t,k) = -i·(ky/|k|)·H(t,k)
//! ```
//!
//! Pairing each wave with its mirror makes `H(t)` Hermitian, so its inverse
//! transform is real. The phase is computed in `f64` so long-running
//! simulations keep their precision.

use glam::Vec2;
use wavefield_core::{Complex32, ComplexGrid, OceanError, RealGrid};

use crate::initial::InitialField;
use crate::lattice::lattice_offset;

/// Squared offsets below this are the zero wavevector (no direction).
const MIN_OFFSET_SQ: f32 = 1e-12;

/// Height and choppy-displacement spectra at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolvedField {
    /// H(t, k)
    pub height: ComplexGrid,
    /// Dx(t, k)
    pub choppy_x: ComplexGrid,
    /// Dy(t, k)
    pub choppy_y: ComplexGrid,
}

/// Evolves `initial` to simulated time `time`.
pub fn evolve(initial: &InitialField, time: f64) -> EvolvedField {
    evolve_cells(initial.h0(), initial.omega(), time)
}

/// Evolves raw H0 / ω grids, as uploaded to a compute backend.
///
/// Returns `DimensionMismatch` if the grids differ in size.
pub fn evolve_grids(
    h0: &ComplexGrid,
    omega: &RealGrid,
    time: f64,
) -> Result<EvolvedField, OceanError> {
    h0.ensure_same_dimension(omega)?;
    Ok(evolve_cells(h0, omega, time))
}

fn evolve_cells(h0: &ComplexGrid, omega: &RealGrid, time: f64) -> EvolvedField {
    let n = h0.dimension();
    let mut height = h0.clone();
    let mut choppy_x = h0.clone();
    let mut choppy_y = h0.clone();

    for idx in 0..h0.len() {
        let theta = f64::from(omega.data()[idx]) * time;
        let (sin, cos) = theta.sin_cos();
        let phase = Complex32::new(cos as f32, sin as f32);

        let h0_k = h0.data()[idx];
        let h0_minus_k = h0.data()[h0.mirror_index(idx)];
        let h = h0_k * phase + h0_minus_k.conj() * phase.conj();

        let offset = lattice_offset(idx / n, idx % n, n);
        let len_sq = offset.length_squared();
        let dir = if len_sq > MIN_OFFSET_SQ {
            offset / len_sq.sqrt()
        } else {
            Vec2::ZERO
        };

        height.data_mut()[idx] = h;
        choppy_x.data_mut()[idx] = Complex32::new(0.0, -dir.x) * h;
        choppy_y.data_mut()[idx] = Complex32::new(0.0, -dir.y) * h;
    }

    EvolvedField {
        height,
        choppy_x,
        choppy_y,
    }
}
