//! The boundary trait a host (game actor, renderer, CLI) drives.
//!
//! The trait is object-safe so hosts can hold a `Box<dyn Simulator>` and
//! swap implementations (CPU reference, GPU backends) at runtime.

use serde_json::Value;

use crate::config::SpectrumConfig;
use crate::error::OceanError;
use crate::texture::TextureHandle;

/// A configurable, tickable ocean surface simulator.
///
/// `configure` and `tick` fail only with [`OceanError::ConfigInvalid`] for
/// well-formed hosts; on failure the previously published maps stay valid.
pub trait Simulator {
    /// (Re)builds the initial field for `config`. Idempotent for an
    /// identical config.
    fn configure(&mut self, config: SpectrumConfig) -> Result<(), OceanError>;

    /// Advances simulated time by `time_delta * time_scale` and publishes
    /// fresh maps.
    fn tick(&mut self, time_delta: f32) -> Result<(), OceanError>;

    /// Most recently published displacement/height map.
    fn height_map(&self) -> TextureHandle;

    /// Most recently published normal map.
    fn normal_map(&self) -> TextureHandle;

    /// The active configuration.
    fn config(&self) -> &SpectrumConfig;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value {
        self.config().to_json()
    }

    /// Schema describing all parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value {
        SpectrumConfig::schema()
    }
}
