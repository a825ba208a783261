//! The centred wavevector lattice.
//!
//! Cell `(row, col)` of an `n x n` frequency grid holds the wavevector with
//! integer offset `(col - n/2, row - n/2)`, so the zero wavevector sits at
//! `(n/2, n/2)` and `-k` lives at the mirrored cell
//! `((n - row) mod n, (n - col) mod n)`.

use std::f32::consts::TAU;

use glam::Vec2;

/// Integer lattice offset of `(row, col)`, as floats: `(kx, ky)` in cycles per patch.
pub fn lattice_offset(row: usize, col: usize, dimension: usize) -> Vec2 {
    let half = (dimension / 2) as f32;
    Vec2::new(col as f32 - half, row as f32 - half)
}

/// World-space wavevector of `(row, col)`: `2π · offset / patch_length`.
pub fn wavevector(row: usize, col: usize, dimension: usize, patch_length: f32) -> Vec2 {
    lattice_offset(row, col, dimension) * (TAU / patch_length)
}

/// Flat index of the zero wavevector.
pub fn origin_index(dimension: usize) -> usize {
    (dimension / 2) * dimension + dimension / 2
}
