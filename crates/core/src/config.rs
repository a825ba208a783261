//! Spectrum configuration: patch geometry and wind-driven spectrum shape.
//!
//! A [`SpectrumConfig`] fully determines the initial wave field (together with
//! its `seed`), so two identical configs produce bit-identical oceans. Fields
//! fall into two groups:
//!
//! - spectrum-affecting fields, whose change requires rebuilding the initial
//!   field (`dimension`, `patch_length`, `wave_amplitude`, `wind_direction`,
//!   `wind_speed`, `wind_dependency`, `seed`, `gravity`);
//! - per-tick fields, read fresh every tick (`time_scale`, `choppy_scale`).

use glam::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::OceanError;
use crate::params::{param_f32, param_u64, param_usize, param_vec2};

/// Grid side used unless configured otherwise.
pub const DEFAULT_DIMENSION: usize = 512;
/// Smallest supported grid side.
pub const MIN_DIMENSION: usize = 16;
/// Largest supported grid side.
pub const MAX_DIMENSION: usize = 2048;
/// Largest accepted `wave_amplitude`; keeps spectrum values inside `f32`.
pub const MAX_WAVE_AMPLITUDE: f32 = 1.0e6;

const DEFAULT_PATCH_LENGTH: f32 = 2000.0;
const DEFAULT_TIME_SCALE: f32 = 0.8;
const DEFAULT_WAVE_AMPLITUDE: f32 = 0.35;
const DEFAULT_WIND_DIRECTION: Vec2 = Vec2::new(0.8, 0.6);
const DEFAULT_WIND_SPEED: f32 = 600.0;
const DEFAULT_WIND_DEPENDENCY: f32 = 0.07;
const DEFAULT_CHOPPY_SCALE: f32 = 1.3;
const DEFAULT_SEED: u64 = 0;
/// Standard gravity in m/s^2. Worlds authored in centimetres use 981.
pub const DEFAULT_GRAVITY: f32 = 9.81;

/// True if `dimension` is a power of two in `MIN_DIMENSION..=MAX_DIMENSION`.
pub fn is_supported_dimension(dimension: usize) -> bool {
    dimension.is_power_of_two() && (MIN_DIMENSION..=MAX_DIMENSION).contains(&dimension)
}

/// Parameter set describing the simulated patch and its wave spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrumConfig {
    /// Grid side in cells; a supported power of two.
    pub dimension: usize,
    /// World-space side length of the square patch.
    pub patch_length: f32,
    /// Simulation speed multiplier applied to every tick's time delta.
    pub time_scale: f32,
    /// Transverse wave amplitude, around 1.0 (not a world-space height).
    pub wave_amplitude: f32,
    /// Wind direction; need not be normalized.
    pub wind_direction: Vec2,
    /// Wind speed. Larger values produce longer wave crests.
    pub wind_speed: f32,
    /// Damping of waves travelling against the wind, in (0, 1].
    /// Smaller means stronger wind dependency.
    pub wind_dependency: f32,
    /// Longitudinal (choppy) wave amplitude; higher makes pointier crests.
    pub choppy_scale: f32,
    /// Seed of the Gaussian random source for the initial field.
    pub seed: u64,
    /// Gravitational acceleration, in world units per second squared.
    pub gravity: f32,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            patch_length: DEFAULT_PATCH_LENGTH,
            time_scale: DEFAULT_TIME_SCALE,
            wave_amplitude: DEFAULT_WAVE_AMPLITUDE,
            wind_direction: DEFAULT_WIND_DIRECTION,
            wind_speed: DEFAULT_WIND_SPEED,
            wind_dependency: DEFAULT_WIND_DEPENDENCY,
            choppy_scale: DEFAULT_CHOPPY_SCALE,
            seed: DEFAULT_SEED,
            gravity: DEFAULT_GRAVITY,
        }
    }
}

impl SpectrumConfig {
    /// Builds a config from a partial JSON object, falling back to defaults
    /// for missing or mistyped keys. The result is not validated.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            dimension: param_usize(params, "dimension", d.dimension),
            patch_length: param_f32(params, "patch_length", d.patch_length),
            time_scale: param_f32(params, "time_scale", d.time_scale),
            wave_amplitude: param_f32(params, "wave_amplitude", d.wave_amplitude),
            wind_direction: param_vec2(params, "wind_direction", d.wind_direction),
            wind_speed: param_f32(params, "wind_speed", d.wind_speed),
            wind_dependency: param_f32(params, "wind_dependency", d.wind_dependency),
            choppy_scale: param_f32(params, "choppy_scale", d.choppy_scale),
            seed: param_u64(params, "seed", d.seed),
            gravity: param_f32(params, "gravity", d.gravity),
        }
    }

    /// Checks every field, returning the first violation as `ConfigInvalid`.
    pub fn validate(&self) -> Result<(), OceanError> {
        if !is_supported_dimension(self.dimension) {
            return Err(OceanError::config(
                "dimension",
                format!(
                    "must be a power of two in {MIN_DIMENSION}..={MAX_DIMENSION}, got {}",
                    self.dimension
                ),
            ));
        }
        positive("patch_length", self.patch_length)?;
        positive("choppy_scale", self.choppy_scale)?;
        positive("gravity", self.gravity)?;
        positive("wind_dependency", self.wind_dependency)?;
        if self.wind_dependency > 1.0 {
            return Err(OceanError::config(
                "wind_dependency",
                format!("must be at most 1, got {}", self.wind_dependency),
            ));
        }
        non_negative("wave_amplitude", self.wave_amplitude)?;
        if self.wave_amplitude > MAX_WAVE_AMPLITUDE {
            return Err(OceanError::config(
                "wave_amplitude",
                format!(
                    "must be at most {MAX_WAVE_AMPLITUDE}, got {}",
                    self.wave_amplitude
                ),
            ));
        }
        non_negative("wind_speed", self.wind_speed)?;
        finite("time_scale", self.time_scale)?;
        if !self.wind_direction.is_finite() {
            return Err(OceanError::config(
                "wind_direction",
                format!("must be finite, got {}", self.wind_direction),
            ));
        }
        Ok(())
    }

    /// True if moving from `self` to `other` invalidates the initial field.
    ///
    /// Only `time_scale` and `choppy_scale` may change without a rebuild.
    pub fn affects_spectrum(&self, other: &SpectrumConfig) -> bool {
        self.dimension != other.dimension
            || self.patch_length != other.patch_length
            || self.wave_amplitude != other.wave_amplitude
            || self.wind_direction != other.wind_direction
            || self.wind_speed != other.wind_speed
            || self.wind_dependency != other.wind_dependency
            || self.seed != other.seed
            || self.gravity != other.gravity
    }

    /// World-space distance between adjacent grid cells.
    pub fn cell_size(&self) -> f32 {
        self.patch_length / self.dimension as f32
    }

    /// Current values as a JSON object.
    pub fn to_json(&self) -> Value {
        json!({
            "dimension": self.dimension,
            "patch_length": self.patch_length,
            "time_scale": self.time_scale,
            "wave_amplitude": self.wave_amplitude,
            "wind_direction": [self.wind_direction.x, self.wind_direction.y],
            "wind_speed": self.wind_speed,
            "wind_dependency": self.wind_dependency,
            "choppy_scale": self.choppy_scale,
            "seed": self.seed,
            "gravity": self.gravity,
        })
    }

    /// Schema describing every parameter: type, default, range, description.
    pub fn schema() -> Value {
        json!({
            "dimension": {
                "type": "integer",
                "default": DEFAULT_DIMENSION,
                "min": MIN_DIMENSION,
                "max": MAX_DIMENSION,
                "description": "Displacement map side in texels; must be a power of two"
            },
            "patch_length": {
                "type": "number",
                "default": DEFAULT_PATCH_LENGTH,
                "min": 0.0,
                "description": "World-space side length of the square patch"
            },
            "time_scale": {
                "type": "number",
                "default": DEFAULT_TIME_SCALE,
                "description": "Simulation speed multiplier"
            },
            "wave_amplitude": {
                "type": "number",
                "default": DEFAULT_WAVE_AMPLITUDE,
                "min": 0.0,
                "max": MAX_WAVE_AMPLITUDE,
                "description": "Transverse wave amplitude, around 1.0"
            },
            "wind_direction": {
                "type": "vec2",
                "default": [DEFAULT_WIND_DIRECTION.x, DEFAULT_WIND_DIRECTION.y],
                "description": "Wind direction; normalization not required"
            },
            "wind_speed": {
                "type": "number",
                "default": DEFAULT_WIND_SPEED,
                "min": 0.0,
                "description": "Wind speed; larger values give larger wave crests"
            },
            "wind_dependency": {
                "type": "number",
                "default": DEFAULT_WIND_DEPENDENCY,
                "min": 0.0,
                "max": 1.0,
                "description": "Damping of waves against the wind; smaller is stronger"
            },
            "choppy_scale": {
                "type": "number",
                "default": DEFAULT_CHOPPY_SCALE,
                "min": 0.0,
                "description": "Longitudinal wave amplitude; higher gives pointier crests"
            },
            "seed": {
                "type": "integer",
                "default": DEFAULT_SEED,
                "description": "Seed of the random source for the initial field"
            },
            "gravity": {
                "type": "number",
                "default": DEFAULT_GRAVITY,
                "min": 0.0,
                "description": "Gravitational acceleration in world units per second squared"
            }
        })
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), OceanError> {
    if !value.is_finite() {
        return Err(OceanError::config(field, format!("must be finite, got {value}")));
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), OceanError> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(OceanError::config(field, format!("must be positive, got {value}")));
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f32) -> Result<(), OceanError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(OceanError::config(
            field,
            format!("must not be negative, got {value}"),
        ));
    }
    Ok(())
}
