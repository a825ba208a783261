//! Square two-dimensional grid with toroidal wrapping.
//!
//! A `Grid<T>` stores `dimension * dimension` values in row-major order.
//! Coordinate access uses toroidal (wrap-around) addressing so negative and
//! overflowing indices are valid, which is exactly the topology of a periodic
//! ocean patch and of the discrete wavevector lattice.

use crate::error::OceanError;
use rustfft::num_complex::Complex32;

/// Frequency-domain grid: one complex amplitude per wavevector.
pub type ComplexGrid = Grid<Complex32>;

/// Real-valued grid: angular frequencies, spatial heights, displacements.
pub type RealGrid = Grid<f32>;

/// A square grid with toroidal coordinate wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    dimension: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    /// Creates a grid of `T::default()` values.
    ///
    /// Returns `OceanError::ConfigInvalid` if `dimension` is zero or
    /// `dimension * dimension` overflows `usize`.
    pub fn new(dimension: usize) -> Result<Self, OceanError> {
        Self::filled(dimension, T::default())
    }

    /// Creates a grid with every cell set to `value`.
    pub fn filled(dimension: usize, value: T) -> Result<Self, OceanError> {
        let len = cell_count(dimension)?;
        Ok(Self {
            dimension,
            data: vec![value; len],
        })
    }

    /// Creates a grid from a pre-built row-major data vector.
    ///
    /// Returns `OceanError::DimensionMismatch` if `data.len()` is not
    /// `dimension * dimension`.
    pub fn from_data(dimension: usize, data: Vec<T>) -> Result<Self, OceanError> {
        let expected = cell_count(dimension)?;
        if data.len() != expected {
            return Err(OceanError::DimensionMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { dimension, data })
    }

    /// Builds a grid by evaluating `f(row, col)` for every cell in row-major order.
    pub fn from_fn(
        dimension: usize,
        mut f: impl FnMut(usize, usize) -> T,
    ) -> Result<Self, OceanError> {
        let len = cell_count(dimension)?;
        let mut data = Vec::with_capacity(len);
        for row in 0..dimension {
            for col in 0..dimension {
                data.push(f(row, col));
            }
        }
        Ok(Self { dimension, data })
    }

    /// Side length in cells.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read-only access to the underlying row-major data.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable access to the underlying row-major data.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the grid, returning its row-major data.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Converts signed coordinates to a flat index using toroidal wrapping.
    pub fn index(&self, row: isize, col: isize) -> usize {
        let n = self.dimension as isize;
        let r = row.rem_euclid(n) as usize;
        let c = col.rem_euclid(n) as usize;
        r * self.dimension + c
    }

    /// Flat index of the cell mirrored through the origin:
    /// `((n - row) mod n, (n - col) mod n)`.
    ///
    /// On a centred wavevector lattice this is the cell holding `-k`.
    pub fn mirror_index(&self, idx: usize) -> usize {
        let n = self.dimension;
        let row = idx / n;
        let col = idx % n;
        ((n - row) % n) * n + (n - col) % n
    }

    /// Value at `(row, col)` with toroidal wrapping.
    pub fn get(&self, row: isize, col: isize) -> T {
        self.data[self.index(row, col)]
    }

    /// Sets the value at `(row, col)` with toroidal wrapping.
    pub fn set(&mut self, row: isize, col: isize, value: T) {
        let idx = self.index(row, col);
        self.data[idx] = value;
    }

    /// Returns `DimensionMismatch` unless `other` has the same side length.
    pub fn ensure_same_dimension<U>(&self, other: &Grid<U>) -> Result<(), OceanError> {
        if self.dimension != other.dimension {
            return Err(OceanError::DimensionMismatch {
                expected: self.dimension,
                got: other.dimension,
            });
        }
        Ok(())
    }

    /// Applies `f` to every value, producing a new grid of the same size.
    pub fn map<U: Copy + Default>(&self, f: impl Fn(T) -> U) -> Grid<U> {
        Grid {
            dimension: self.dimension,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Builds a same-sized grid from `f(row, col)`, for stencils that read
    /// neighbours of `self`.
    pub fn map_indexed<U: Copy + Default>(&self, f: impl Fn(usize, usize) -> U) -> Grid<U> {
        let n = self.dimension;
        Grid {
            dimension: n,
            data: (0..self.data.len()).map(|i| f(i / n, i % n)).collect(),
        }
    }

    /// Iterates over all cells yielding `(row, col, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.data.iter().enumerate().map(|(i, &v)| {
            let row = i / self.dimension;
            let col = i % self.dimension;
            (row, col, v)
        })
    }
}

/// `dimension * dimension`, or `ConfigInvalid` for zero / overflowing sizes.
fn cell_count(dimension: usize) -> Result<usize, OceanError> {
    if dimension == 0 {
        return Err(OceanError::config("dimension", "must be non-zero"));
    }
    dimension
        .checked_mul(dimension)
        .ok_or_else(|| OceanError::config("dimension", format!("{dimension} overflows")))
}
