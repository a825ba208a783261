//! Phillips spectrum for wind-driven waves.
//!
//! ```text
//! P(k) = A · exp(-1 / (|k|·L)²) / |k|⁴ · (k̂·ŵ)² · exp(-|k|²·l²)
//! ```
//!
//! with `L = V² / g` the largest wave a constant wind of speed `V` can raise
//! and `l = L / 1000` the length below which ripples are damped out. Waves
//! travelling against the wind (`k̂·ŵ < 0`) are further multiplied by the
//! configured wind dependency.

use glam::{DVec2, Vec2};
use wavefield_core::SpectrumConfig;

/// Editor-scale amplitude factor: a config amplitude around 1.0 maps to a
/// spectrum constant around 1e-7.
pub const AMPLITUDE_SCALE: f64 = 1e-7;

/// Ratio of the small-wave damping length to the largest wave length.
pub const SMALL_WAVE_RATIO: f64 = 1e-3;

/// Wavenumbers below this carry no energy (removes the DC term).
pub const MIN_WAVENUMBER: f64 = 1e-6;

/// Phillips spectrum evaluator for one configuration.
#[derive(Debug, Clone, Copy)]
pub struct PhillipsSpectrum {
    amplitude: f64,
    /// Unit wind direction, or zero when the config has no wind direction.
    wind: DVec2,
    largest_wave: f64,
    damping_length: f64,
    wind_dependency: f64,
}

impl PhillipsSpectrum {
    pub fn new(config: &SpectrumConfig) -> Self {
        let speed = f64::from(config.wind_speed);
        let largest_wave = speed * speed / f64::from(config.gravity);
        Self {
            amplitude: f64::from(config.wave_amplitude) * AMPLITUDE_SCALE,
            wind: config.wind_direction.as_dvec2().normalize_or_zero(),
            largest_wave,
            damping_length: largest_wave * SMALL_WAVE_RATIO,
            wind_dependency: f64::from(config.wind_dependency),
        }
    }

    /// Largest wave length `L = V² / g`.
    pub fn largest_wave(&self) -> f64 {
        self.largest_wave
    }

    /// Spectrum value at wavevector `k`; always `>= 0`, exactly 0 at `k = 0`.
    pub fn value(&self, k: Vec2) -> f32 {
        let k = k.as_dvec2();
        let k_len = k.length();
        if k_len < MIN_WAVENUMBER || self.largest_wave <= 0.0 {
            return 0.0;
        }
        let k_cos = (k / k_len).dot(self.wind);
        let kl = k_len * self.largest_wave;
        let mut phillips =
            self.amplitude * (-1.0 / (kl * kl)).exp() / k_len.powi(4) * (k_cos * k_cos);
        if k_cos < 0.0 {
            phillips *= self.wind_dependency;
        }
        let damped = phillips * (-k_len * k_len * self.damping_length * self.damping_length).exp();
        // Saturate rather than let the narrowing cast produce infinity.
        damped.min(f64::from(f32::MAX)) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spectrum() -> PhillipsSpectrum {
        PhillipsSpectrum::new(&SpectrumConfig::default())
    }

    #[test]
    fn zero_wavevector_has_zero_energy() {
        assert_eq!(spectrum().value(Vec2::ZERO), 0.0);
    }

    #[test]
    fn largest_wave_follows_wind_speed_squared_over_gravity() {
        let config = SpectrumConfig {
            wind_speed: 31.32,
            gravity: 9.81,
            ..Default::default()
        };
        let s = PhillipsSpectrum::new(&config);
        assert!((s.largest_wave() - 31.32_f64.powi(2) / 9.81).abs() < 1e-3);
    }

    #[test]
    fn waves_along_the_wind_carry_energy() {
        let k = Vec2::new(0.8, 0.6) * 0.01;
        assert!(spectrum().value(k) > 0.0);
    }

    #[test]
    fn waves_across_the_wind_carry_none() {
        // Perpendicular to (0.8, 0.6).
        let k = Vec2::new(-0.6, 0.8) * 0.01;
        assert!(spectrum().value(k) < 1e-6 * spectrum().value(Vec2::new(0.8, 0.6) * 0.01));
    }

    #[test]
    fn waves_against_the_wind_are_scaled_by_wind_dependency() {
        let s = spectrum();
        let k = Vec2::new(0.8, 0.6) * 0.01;
        let with = f64::from(s.value(k));
        let against = f64::from(s.value(-k));
        let ratio = against / with;
        assert!((ratio - 0.07).abs() < 1e-4, "ratio {ratio}");
    }

    #[test]
    fn zero_wind_direction_yields_no_energy() {
        let config = SpectrumConfig {
            wind_direction: Vec2::ZERO,
            ..Default::default()
        };
        let s = PhillipsSpectrum::new(&config);
        assert_eq!(s.value(Vec2::new(0.01, 0.02)), 0.0);
    }

    #[test]
    fn zero_wind_speed_yields_no_energy() {
        let config = SpectrumConfig {
            wind_speed: 0.0,
            ..Default::default()
        };
        let s = PhillipsSpectrum::new(&config);
        assert_eq!(s.value(Vec2::new(0.01, 0.0)), 0.0);
    }

    #[test]
    fn short_waves_are_damped() {
        let s = spectrum();
        let dir = Vec2::new(0.8, 0.6);
        // l = 36.7 here, so |k| = 1 is deep in the damped range.
        assert!(s.value(dir * 1.0) < s.value(dir * 0.005) * 1e-12);
    }

    #[test]
    fn wind_direction_magnitude_is_irrelevant() {
        let a = PhillipsSpectrum::new(&SpectrumConfig::default());
        let b = PhillipsSpectrum::new(&SpectrumConfig {
            wind_direction: Vec2::new(8.0, 6.0),
            ..Default::default()
        });
        // Normalizing (0.8, 0.6) and (8, 6) can differ in the last ulp.
        for k in [Vec2::new(0.003, -0.002), Vec2::new(0.004, 0.003), Vec2::new(-0.002, -0.001)] {
            let (pa, pb) = (a.value(k), b.value(k));
            assert!(pa > 0.0);
            assert!((pa - pb).abs() <= 1e-6 * pa, "{pa} vs {pb} at {k}");
        }
    }

    #[test]
    fn oversized_amplitude_saturates_instead_of_overflowing() {
        let spectrum = PhillipsSpectrum::new(&SpectrumConfig {
            wave_amplitude: 1.0e37,
            ..Default::default()
        });
        let k = Vec2::new(0.004, 0.003);
        let p = spectrum.value(k);
        assert!(p.is_finite(), "P = {p}");
        assert!(p > 0.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn spectrum_is_non_negative_and_finite(
                kx in -5.0_f32..5.0,
                ky in -5.0_f32..5.0,
                wx in -1.0_f32..1.0,
                wy in -1.0_f32..1.0,
                speed in 0.0_f32..1000.0,
                dependency in 0.001_f32..=1.0,
                amplitude in 0.0_f32..10.0,
            ) {
                let config = SpectrumConfig {
                    wind_direction: Vec2::new(wx, wy),
                    wind_speed: speed,
                    wind_dependency: dependency,
                    wave_amplitude: amplitude,
                    ..Default::default()
                };
                let p = PhillipsSpectrum::new(&config).value(Vec2::new(kx, ky));
                prop_assert!(p >= 0.0, "P = {p}");
                prop_assert!(p.is_finite(), "P = {p}");
            }
        }
    }
}
