//! The boundary object a host drives: configure once, tick every frame.

use std::sync::Arc;

use log::{debug, trace};
use wavefield_core::{Grid, OceanError, Simulator, SpectrumConfig, TextureHandle};

use crate::backend::{ComputeBackend, CpuBackend, GridBuffer, GridSlot, Kernel};
use crate::compose::{MapComposer, OutputMaps};
use crate::evolve::evolve;
use crate::initial::{InitialField, InitialFieldGenerator};
use crate::transform::SpectralTransform;

/// Height map texel of a calm sea.
const FLAT_HEIGHT_TEXEL: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
/// Normal map texel of a calm sea.
const FLAT_NORMAL_TEXEL: [f32; 4] = [0.0, 0.0, 1.0, 0.0];

/// Evolve, transform and compose in one call, without a backend.
pub fn synthesize(
    initial: &InitialField,
    transform: &mut SpectralTransform,
    config: &SpectrumConfig,
    time: f64,
) -> Result<OutputMaps, OceanError> {
    let evolved = evolve(initial, time);
    let spatial = transform.transform_evolved(&evolved)?;
    MapComposer::compose(&spatial, config)
}

/// Spectral ocean simulator over a [`ComputeBackend`].
///
/// The initial field is an immutable, versioned snapshot: a rebuild swaps in a
/// new `Arc` with the next generation, so readers holding the old one keep a
/// consistent view.
pub struct OceanSimulator<B: ComputeBackend = CpuBackend> {
    config: SpectrumConfig,
    initial: Arc<InitialField>,
    backend: B,
    simulated_time: f64,
    height_map: TextureHandle,
    normal_map: TextureHandle,
    published_generation: Option<u64>,
}

impl OceanSimulator<CpuBackend> {
    /// Builds a simulator on the CPU reference backend.
    pub fn new(config: SpectrumConfig) -> Result<Self, OceanError> {
        Self::with_backend(config, CpuBackend::new())
    }
}

impl<B: ComputeBackend> OceanSimulator<B> {
    /// Builds the first initial field (generation 1) and uploads it.
    pub fn with_backend(config: SpectrumConfig, mut backend: B) -> Result<Self, OceanError> {
        let initial = InitialFieldGenerator::generate(&config)?.with_generation(1);
        upload_initial(&mut backend, &initial)?;
        let n = config.dimension;
        Ok(Self {
            config,
            initial: Arc::new(initial),
            backend,
            simulated_time: 0.0,
            height_map: Arc::new(Grid::filled(n, FLAT_HEIGHT_TEXEL)?),
            normal_map: Arc::new(Grid::filled(n, FLAT_NORMAL_TEXEL)?),
            published_generation: None,
        })
    }

    /// Simulated seconds elapsed, already scaled by `time_scale`.
    pub fn simulated_time(&self) -> f64 {
        self.simulated_time
    }

    /// Generation of the current initial field.
    pub fn generation(&self) -> u64 {
        self.initial.generation()
    }

    /// Generation the published maps were computed from; `None` before the
    /// first tick.
    pub fn published_generation(&self) -> Option<u64> {
        self.published_generation
    }

    /// Shared snapshot of the current initial field.
    pub fn initial_field(&self) -> Arc<InitialField> {
        Arc::clone(&self.initial)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn run_kernels(&mut self, time: f64) -> Result<(TextureHandle, TextureHandle), OceanError> {
        let kernels = [
            Kernel::UpdateSpectrum { time },
            Kernel::InverseFft,
            Kernel::UpdateDisplacement {
                choppy_scale: self.config.choppy_scale,
            },
            Kernel::GenerateGradient {
                patch_length: self.config.patch_length,
            },
        ];
        for kernel in &kernels {
            self.backend.dispatch_kernel(kernel)?;
        }
        let height = self.backend.download_texture(GridSlot::DisplacementMap)?;
        let normal = self.backend.download_texture(GridSlot::NormalMap)?;
        Ok((Arc::new(height), Arc::new(normal)))
    }
}

fn upload_initial<B: ComputeBackend>(backend: &mut B, initial: &InitialField) -> Result<(), OceanError> {
    backend.upload_grid(GridSlot::H0, GridBuffer::Complex(initial.h0().clone()))?;
    backend.upload_grid(GridSlot::Omega, GridBuffer::Real(initial.omega().clone()))
}

impl<B: ComputeBackend> Simulator for OceanSimulator<B> {
    fn configure(&mut self, config: SpectrumConfig) -> Result<(), OceanError> {
        if config == self.config {
            debug!("configure: unchanged");
            return Ok(());
        }
        config.validate()?;
        if !config.affects_spectrum(&self.config) {
            debug!(
                "configure: per-tick change (time_scale {}, choppy_scale {}), keeping generation {}",
                config.time_scale,
                config.choppy_scale,
                self.generation()
            );
            self.config = config;
            return Ok(());
        }

        let generation = self.generation() + 1;
        let initial = InitialFieldGenerator::generate(&config)?.with_generation(generation);
        upload_initial(&mut self.backend, &initial)?;
        debug!("configure: rebuilt initial field, generation {generation}");
        self.initial = Arc::new(initial);
        self.config = config;
        Ok(())
    }

    fn tick(&mut self, time_delta: f32) -> Result<(), OceanError> {
        if !time_delta.is_finite() {
            return Err(OceanError::config(
                "time_delta",
                format!("must be finite, got {time_delta}"),
            ));
        }
        let time = self.simulated_time + f64::from(time_delta) * f64::from(self.config.time_scale);
        let (height, normal) = self.run_kernels(time)?;
        self.height_map = height;
        self.normal_map = normal;
        self.simulated_time = time;
        self.published_generation = Some(self.generation());
        trace!("tick: t = {time:.4}, generation {}", self.generation());
        Ok(())
    }

    fn height_map(&self) -> TextureHandle {
        Arc::clone(&self.height_map)
    }

    fn normal_map(&self) -> TextureHandle {
        Arc::clone(&self.normal_map)
    }

    fn config(&self) -> &SpectrumConfig {
        &self.config
    }
}
