#![deny(unsafe_code)]
//! Core types for the wavefield spectral ocean simulator.
//!
//! Provides the `Simulator` trait, `SpectrumConfig`, the toroidal `Grid`
//! arena used for every frequency- and spatial-domain buffer, RGBA
//! `Texture` maps, the `Xorshift64` PRNG, and JSON parameter helpers.

pub mod config;
pub mod error;
pub mod grid;
pub mod params;
pub mod prng;
pub mod simulator;
pub mod texture;

pub use config::SpectrumConfig;
pub use error::OceanError;
pub use grid::{ComplexGrid, Grid, RealGrid};
pub use prng::Xorshift64;
pub use rustfft::num_complex::Complex32;
pub use simulator::Simulator;
pub use texture::{Texel, Texture, TextureHandle};
