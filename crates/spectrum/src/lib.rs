#![deny(unsafe_code)]
//! Tessendorf-style spectral ocean synthesis.
//!
//! A Phillips spectrum seeds random complex amplitudes on a centred
//! wavevector lattice ([`InitialFieldGenerator`]). Each tick evolves them
//! under deep-water dispersion ([`evolve`]), inverse-transforms height and
//! choppy displacement to the spatial patch ([`SpectralTransform`]), and packs
//! the result into a displacement map and a normal map ([`MapComposer`]).
//! [`OceanSimulator`] drives those stages through a [`ComputeBackend`].

pub mod backend;
pub mod compose;
pub mod evolve;
pub mod initial;
pub mod lattice;
pub mod ocean;
pub mod phillips;
pub mod transform;

pub use backend::{ComputeBackend, CpuBackend, GridBuffer, GridSlot, Kernel};
pub use compose::{MapComposer, OutputMaps};
pub use evolve::{evolve, evolve_grids, EvolvedField};
pub use initial::{InitialField, InitialFieldGenerator};
pub use ocean::{synthesize, OceanSimulator};
pub use phillips::PhillipsSpectrum;
pub use transform::{RadixPlan, SpatialField, SpectralTransform};
