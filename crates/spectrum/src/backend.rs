//! Compute backend seam: named grid slots plus the four per-tick kernels.
//!
//! A GPU backend maps slots to device buffers and kernels to compute
//! shaders. [`CpuBackend`] is the reference implementation and runs each
//! kernel with the pure functions of this crate.

use std::collections::HashMap;

use log::debug;
use wavefield_core::{ComplexGrid, OceanError, RealGrid, Texture};

use crate::compose::MapComposer;
use crate::evolve::evolve_grids;
use crate::transform::SpectralTransform;

/// Named buffers shared between the host and the kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridSlot {
    H0,
    Omega,
    HeightSpectrum,
    ChoppyX,
    ChoppyY,
    Height,
    DisplacementX,
    DisplacementY,
    DisplacementMap,
    NormalMap,
}

/// Contents of a slot.
#[derive(Debug, Clone, PartialEq)]
pub enum GridBuffer {
    Complex(ComplexGrid),
    Real(RealGrid),
    Texture(Texture),
}

impl GridBuffer {
    pub fn dimension(&self) -> usize {
        match self {
            GridBuffer::Complex(g) => g.dimension(),
            GridBuffer::Real(g) => g.dimension(),
            GridBuffer::Texture(g) => g.dimension(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            GridBuffer::Complex(_) => "complex",
            GridBuffer::Real(_) => "real",
            GridBuffer::Texture(_) => "texture",
        }
    }
}

/// Per-tick kernels, listed in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kernel {
    /// `H0`, `Omega` -> `HeightSpectrum`, `ChoppyX`, `ChoppyY`.
    UpdateSpectrum { time: f64 },
    /// Spectra -> `Height`, `DisplacementX`, `DisplacementY`.
    InverseFft,
    /// Spatial grids -> `DisplacementMap`.
    UpdateDisplacement { choppy_scale: f32 },
    /// `DisplacementMap` -> `NormalMap`.
    GenerateGradient { patch_length: f32 },
}

/// Minimal buffer/kernel interface the simulator drives each tick.
pub trait ComputeBackend {
    fn upload_grid(&mut self, slot: GridSlot, buffer: GridBuffer) -> Result<(), OceanError>;

    fn dispatch_kernel(&mut self, kernel: &Kernel) -> Result<(), OceanError>;

    fn download_grid(&self, slot: GridSlot) -> Result<GridBuffer, OceanError>;

    /// Downloads a texture slot, failing with `Backend` for other kinds.
    fn download_texture(&self, slot: GridSlot) -> Result<Texture, OceanError> {
        match self.download_grid(slot)? {
            GridBuffer::Texture(texture) => Ok(texture),
            other => Err(wrong_kind(slot, "texture", &other)),
        }
    }
}

/// Host-memory backend.
#[derive(Default)]
pub struct CpuBackend {
    buffers: HashMap<GridSlot, GridBuffer>,
    transform: Option<SpectralTransform>,
}

impl CpuBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Side length of the cached radix plan, if one has been built.
    pub fn plan_dimension(&self) -> Option<usize> {
        self.transform.as_ref().map(SpectralTransform::dimension)
    }

    /// True if `slot` currently holds a buffer.
    pub fn has_slot(&self, slot: GridSlot) -> bool {
        self.buffers.contains_key(&slot)
    }
}

impl ComputeBackend for CpuBackend {
    fn upload_grid(&mut self, slot: GridSlot, buffer: GridBuffer) -> Result<(), OceanError> {
        self.buffers.insert(slot, buffer);
        Ok(())
    }

    fn dispatch_kernel(&mut self, kernel: &Kernel) -> Result<(), OceanError> {
        let buffers = &mut self.buffers;
        match *kernel {
            Kernel::UpdateSpectrum { time } => {
                let h0 = complex(buffers, GridSlot::H0)?;
                let omega = real(buffers, GridSlot::Omega)?;
                let evolved = evolve_grids(h0, omega, time)?;
                buffers.insert(GridSlot::HeightSpectrum, GridBuffer::Complex(evolved.height));
                buffers.insert(GridSlot::ChoppyX, GridBuffer::Complex(evolved.choppy_x));
                buffers.insert(GridSlot::ChoppyY, GridBuffer::Complex(evolved.choppy_y));
            }
            Kernel::InverseFft => {
                let height = complex(buffers, GridSlot::HeightSpectrum)?;
                let choppy_x = complex(buffers, GridSlot::ChoppyX)?;
                let choppy_y = complex(buffers, GridSlot::ChoppyY)?;
                let transform = plan_for(&mut self.transform, height.dimension())?;
                let spatial = transform.inverse_transform_all(height, choppy_x, choppy_y)?;
                buffers.insert(GridSlot::Height, GridBuffer::Real(spatial.height));
                buffers.insert(GridSlot::DisplacementX, GridBuffer::Real(spatial.displacement_x));
                buffers.insert(GridSlot::DisplacementY, GridBuffer::Real(spatial.displacement_y));
            }
            Kernel::UpdateDisplacement { choppy_scale } => {
                let map = MapComposer::displacement_map(
                    real(buffers, GridSlot::Height)?,
                    real(buffers, GridSlot::DisplacementX)?,
                    real(buffers, GridSlot::DisplacementY)?,
                    choppy_scale,
                )?;
                buffers.insert(GridSlot::DisplacementMap, GridBuffer::Texture(map));
            }
            Kernel::GenerateGradient { patch_length } => {
                let map = texture(buffers, GridSlot::DisplacementMap)?;
                let normals = MapComposer::normal_map(map, patch_length);
                buffers.insert(GridSlot::NormalMap, GridBuffer::Texture(normals));
            }
        }
        Ok(())
    }

    fn download_grid(&self, slot: GridSlot) -> Result<GridBuffer, OceanError> {
        slot_ref(&self.buffers, slot).cloned()
    }
}

/// The cached plan, rebuilt only when the grid side changes.
fn plan_for(
    cache: &mut Option<SpectralTransform>,
    dimension: usize,
) -> Result<&mut SpectralTransform, OceanError> {
    match cache {
        Some(transform) if transform.dimension() == dimension => {}
        _ => {
            debug!("radix plan cache miss for {dimension}x{dimension}");
            *cache = Some(SpectralTransform::new(dimension)?);
        }
    }
    cache
        .as_mut()
        .ok_or_else(|| OceanError::Backend("radix plan missing after build".into()))
}

fn slot_ref(buffers: &HashMap<GridSlot, GridBuffer>, slot: GridSlot) -> Result<&GridBuffer, OceanError> {
    buffers
        .get(&slot)
        .ok_or_else(|| OceanError::Backend(format!("slot {slot:?} is empty")))
}

fn complex(buffers: &HashMap<GridSlot, GridBuffer>, slot: GridSlot) -> Result<&ComplexGrid, OceanError> {
    match slot_ref(buffers, slot)? {
        GridBuffer::Complex(g) => Ok(g),
        other => Err(wrong_kind(slot, "complex", other)),
    }
}

fn real(buffers: &HashMap<GridSlot, GridBuffer>, slot: GridSlot) -> Result<&RealGrid, OceanError> {
    match slot_ref(buffers, slot)? {
        GridBuffer::Real(g) => Ok(g),
        other => Err(wrong_kind(slot, "real", other)),
    }
}

fn texture(buffers: &HashMap<GridSlot, GridBuffer>, slot: GridSlot) -> Result<&Texture, OceanError> {
    match slot_ref(buffers, slot)? {
        GridBuffer::Texture(g) => Ok(g),
        other => Err(wrong_kind(slot, "texture", other)),
    }
}

fn wrong_kind(slot: GridSlot, expected: &str, got: &GridBuffer) -> OceanError {
    OceanError::Backend(format!(
        "slot {slot:?} holds a {} grid, expected {expected}",
        got.kind()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::MapComposer;
    use crate::evolve::evolve;
    use crate::initial::InitialFieldGenerator;
    use wavefield_core::SpectrumConfig;

    fn config(dimension: usize) -> SpectrumConfig {
        SpectrumConfig {
            dimension,
            patch_length: 200.0,
            wind_speed: 30.0,
            ..Default::default()
        }
    }

    fn loaded(config: &SpectrumConfig) -> CpuBackend {
        let field = InitialFieldGenerator::generate(config).unwrap();
        let mut backend = CpuBackend::new();
        backend
            .upload_grid(GridSlot::H0, GridBuffer::Complex(field.h0().clone()))
            .unwrap();
        backend
            .upload_grid(GridSlot::Omega, GridBuffer::Real(field.omega().clone()))
            .unwrap();
        backend
    }

    fn run_tick(backend: &mut CpuBackend, config: &SpectrumConfig, time: f64) {
        for kernel in [
            Kernel::UpdateSpectrum { time },
            Kernel::InverseFft,
            Kernel::UpdateDisplacement {
                choppy_scale: config.choppy_scale,
            },
            Kernel::GenerateGradient {
                patch_length: config.patch_length,
            },
        ] {
            backend.dispatch_kernel(&kernel).unwrap();
        }
    }

    #[test]
    fn download_of_empty_slot_is_backend_error() {
        let backend = CpuBackend::new();
        assert!(matches!(
            backend.download_grid(GridSlot::NormalMap),
            Err(OceanError::Backend(_))
        ));
    }

    #[test]
    fn kernel_without_inputs_is_backend_error() {
        let mut backend = CpuBackend::new();
        assert!(matches!(
            backend.dispatch_kernel(&Kernel::InverseFft),
            Err(OceanError::Backend(_))
        ));
    }

    #[test]
    fn wrong_buffer_kind_is_backend_error() {
        let mut backend = CpuBackend::new();
        backend
            .upload_grid(GridSlot::H0, GridBuffer::Real(RealGrid::new(16).unwrap()))
            .unwrap();
        backend
            .upload_grid(GridSlot::Omega, GridBuffer::Real(RealGrid::new(16).unwrap()))
            .unwrap();
        let err = backend
            .dispatch_kernel(&Kernel::UpdateSpectrum { time: 0.0 })
            .unwrap_err();
        assert!(err.to_string().contains("expected complex"), "{err}");
    }

    #[test]
    fn download_texture_rejects_non_texture_slot() {
        let backend = loaded(&config(16));
        assert!(matches!(
            backend.download_texture(GridSlot::Omega),
            Err(OceanError::Backend(_))
        ));
    }

    #[test]
    fn kernels_fill_every_slot() {
        let config = config(16);
        let mut backend = loaded(&config);
        run_tick(&mut backend, &config, 1.0);
        for slot in [
            GridSlot::HeightSpectrum,
            GridSlot::ChoppyX,
            GridSlot::ChoppyY,
            GridSlot::Height,
            GridSlot::DisplacementX,
            GridSlot::DisplacementY,
            GridSlot::DisplacementMap,
            GridSlot::NormalMap,
        ] {
            assert!(backend.has_slot(slot), "{slot:?} empty");
            assert_eq!(backend.download_grid(slot).unwrap().dimension(), 16);
        }
    }

    #[test]
    fn kernels_match_pure_pipeline() {
        let config = config(32);
        let mut backend = loaded(&config);
        run_tick(&mut backend, &config, 2.5);

        let field = InitialFieldGenerator::generate(&config).unwrap();
        let evolved = evolve(&field, 2.5);
        let spatial = SpectralTransform::new(32)
            .unwrap()
            .transform_evolved(&evolved)
            .unwrap();
        let maps = MapComposer::compose(&spatial, &config).unwrap();

        assert_eq!(
            backend.download_texture(GridSlot::DisplacementMap).unwrap(),
            maps.height_map
        );
        assert_eq!(
            backend.download_texture(GridSlot::NormalMap).unwrap(),
            maps.normal_map
        );
    }

    #[test]
    fn radix_plan_is_rebuilt_only_on_size_change() {
        let small = config(16);
        let mut backend = loaded(&small);
        assert_eq!(backend.plan_dimension(), None);
        run_tick(&mut backend, &small, 0.0);
        assert_eq!(backend.plan_dimension(), Some(16));

        let large = config(32);
        let field = InitialFieldGenerator::generate(&large).unwrap();
        backend
            .upload_grid(GridSlot::H0, GridBuffer::Complex(field.h0().clone()))
            .unwrap();
        backend
            .upload_grid(GridSlot::Omega, GridBuffer::Real(field.omega().clone()))
            .unwrap();
        run_tick(&mut backend, &large, 0.0);
        assert_eq!(backend.plan_dimension(), Some(32));
    }
}
