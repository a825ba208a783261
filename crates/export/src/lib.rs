#![deny(unsafe_code)]
//! Turns published ocean textures into viewable images.
//!
//! [`pixel`] converts a float [`Texture`](wavefield_core::Texture) into an
//! RGBA8 buffer under one of the [`Encoding`]s and is always available;
//! [`snapshot`] writes PNG files and sits behind the `png` feature so
//! embedders that upload textures directly need not pull in `image`.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

pub use pixel::{texture_to_rgba, Encoding};
