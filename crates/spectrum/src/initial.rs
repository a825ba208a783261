//! Frequency-domain initial condition: H0(k) and ω(k).
//!
//! Built once per spectrum-affecting configuration and then shared read-only
//! by every tick. Each cell draws two Gaussian samples in row-major order,
//! whether or not it carries energy, so the random stream (and therefore
//! the ocean) only depends on the seed and the grid size.

use std::f32::consts::FRAC_1_SQRT_2;

use log::debug;
use wavefield_core::{Complex32, ComplexGrid, Grid, OceanError, RealGrid, SpectrumConfig, Xorshift64};

use crate::lattice::wavevector;
use crate::phillips::PhillipsSpectrum;

/// H0 and ω over the wavevector torus, plus the config that produced them.
#[derive(Debug, Clone)]
pub struct InitialField {
    config: SpectrumConfig,
    generation: u64,
    h0: ComplexGrid,
    omega: RealGrid,
}

impl InitialField {
    /// Complex amplitudes H0(k).
    pub fn h0(&self) -> &ComplexGrid {
        &self.h0
    }

    /// Angular frequencies ω(k) = sqrt(g·|k|).
    pub fn omega(&self) -> &RealGrid {
        &self.omega
    }

    pub fn config(&self) -> &SpectrumConfig {
        &self.config
    }

    pub fn dimension(&self) -> usize {
        self.h0.dimension()
    }

    /// Configuration generation this field belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Tags the field with a configuration generation.
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }
}

/// Builds [`InitialField`]s from a [`SpectrumConfig`].
pub struct InitialFieldGenerator;

impl InitialFieldGenerator {
    /// Validates `config` and builds its initial field (generation 0).
    ///
    /// Deterministic: identical configs yield bit-identical fields.
    pub fn generate(config: &SpectrumConfig) -> Result<InitialField, OceanError> {
        config.validate()?;
        let n = config.dimension;
        let spectrum = PhillipsSpectrum::new(config);
        let gravity = config.gravity;
        let mut rng = Xorshift64::new(config.seed);

        let h0 = Grid::from_fn(n, |row, col| {
            let k = wavevector(row, col, n, config.patch_length);
            let amplitude = spectrum.value(k).sqrt() * FRAC_1_SQRT_2;
            let re = rng.next_gaussian();
            let im = rng.next_gaussian();
            Complex32::new(re, im) * amplitude
        })?;
        let omega = Grid::from_fn(n, |row, col| {
            let k = wavevector(row, col, n, config.patch_length);
            (gravity * k.length()).sqrt()
        })?;

        debug!(
            "generated initial field: {n}x{n}, largest wave {:.1}, seed {}",
            spectrum.largest_wave(),
            config.seed
        );
        Ok(InitialField {
            config: *config,
            generation: 0,
            h0,
            omega,
        })
    }
}
