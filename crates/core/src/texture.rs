//! RGBA float textures published to the renderer.
//!
//! A [`Texture`] is a [`Grid`] of four-channel `f32` texels. The simulator
//! publishes its maps as [`TextureHandle`]s: immutable, reference-counted
//! snapshots that stay valid for as long as a reader holds them, no matter how
//! many ticks happen in the meantime.

use std::sync::Arc;

use crate::grid::{Grid, RealGrid};

/// One RGBA texel.
pub type Texel = [f32; 4];

/// Square grid of RGBA texels.
pub type Texture = Grid<Texel>;

/// Shared, immutable handle to a published texture.
pub type TextureHandle = Arc<Texture>;

/// Channel index of the x displacement in a displacement map.
pub const CHANNEL_DISPLACEMENT_X: usize = 0;
/// Channel index of the y displacement in a displacement map.
pub const CHANNEL_DISPLACEMENT_Y: usize = 1;
/// Channel index of the height in a displacement map.
pub const CHANNEL_HEIGHT: usize = 2;
/// Channel index of the folding term in a normal map.
pub const CHANNEL_FOLD: usize = 3;

/// Summary statistics of one texture channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStats {
    pub min: f32,
    pub max: f32,
    pub mean: f64,
    pub variance: f64,
    /// True when every value is finite (no NaN or infinity).
    pub finite: bool,
}

impl Grid<Texel> {
    /// Extracts one channel (0..4) as a real grid.
    ///
    /// # Panics
    ///
    /// Panics if `channel >= 4`.
    pub fn channel(&self, channel: usize) -> RealGrid {
        self.map(|texel| texel[channel])
    }

    /// Min, max, mean, variance and finiteness of one channel.
    ///
    /// Accumulates in `f64` so the variance of a 512 x 512 map is stable.
    ///
    /// # Panics
    ///
    /// Panics if `channel >= 4`.
    pub fn channel_stats(&self, channel: usize) -> ChannelStats {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0_f64;
        let mut sum_sq = 0.0_f64;
        let mut finite = true;
        for texel in self.data() {
            let v = texel[channel];
            finite &= v.is_finite();
            min = min.min(v);
            max = max.max(v);
            sum += f64::from(v);
            sum_sq += f64::from(v) * f64::from(v);
        }
        let n = self.len() as f64;
        let mean = sum / n;
        let variance = (sum_sq / n - mean * mean).max(0.0);
        ChannelStats {
            min,
            max,
            mean,
            variance,
            finite,
        }
    }
}
