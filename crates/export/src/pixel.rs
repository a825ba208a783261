//! Pure-computation RGBA8 conversion of float textures.

use wavefield_core::texture::{
    CHANNEL_DISPLACEMENT_X, CHANNEL_DISPLACEMENT_Y, CHANNEL_FOLD, CHANNEL_HEIGHT,
};
use wavefield_core::{OceanError, Texel, Texture};

/// All encoding names, in [`Encoding::ALL`] order.
const ENCODING_NAMES: &[&str] = &["height", "normal", "displacement"];

/// How a texture's channels map to image colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Height channel, min..max stretched to black..white.
    Height,
    /// `0.5 + 0.5·n` in RGB; folding darkens alpha from opaque.
    Normal,
    /// Horizontal displacement in red/green, centred on mid grey.
    Displacement,
}

impl Encoding {
    pub const ALL: [Encoding; 3] = [Encoding::Height, Encoding::Normal, Encoding::Displacement];

    /// Parses an encoding name.
    ///
    /// Returns `ConfigInvalid` for unknown names.
    pub fn from_name(name: &str) -> Result<Self, OceanError> {
        match name {
            "height" => Ok(Encoding::Height),
            "normal" => Ok(Encoding::Normal),
            "displacement" => Ok(Encoding::Displacement),
            _ => Err(OceanError::config(
                "encoding",
                format!("unknown encoding '{name}', expected one of {ENCODING_NAMES:?}"),
            )),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Encoding::Height => "height",
            Encoding::Normal => "normal",
            Encoding::Displacement => "displacement",
        }
    }

    /// File name used for snapshots, e.g. `height.png`.
    pub fn file_name(self) -> String {
        format!("{}.png", self.name())
    }
}

/// Converts a texture to an RGBA8 buffer of `dimension² · 4` bytes.
///
/// Non-finite values encode as 0 so a corrupt map is visible rather than fatal.
pub fn texture_to_rgba(texture: &Texture, encoding: Encoding) -> Vec<u8> {
    match encoding {
        Encoding::Height => {
            let (lo, hi) = finite_range(texture, |t| t[CHANNEL_HEIGHT]);
            texture
                .data()
                .iter()
                .flat_map(|t| {
                    let g = to_byte(stretch(t[CHANNEL_HEIGHT], lo, hi));
                    [g, g, g, 255]
                })
                .collect()
        }
        Encoding::Normal => texture
            .data()
            .iter()
            .flat_map(|t| {
                let [r, g, b] = [t[0], t[1], t[2]].map(|n| to_byte(0.5 + 0.5 * n));
                [r, g, b, to_byte(1.0 - t[CHANNEL_FOLD])]
            })
            .collect(),
        Encoding::Displacement => {
            let extent = texture
                .data()
                .iter()
                .flat_map(|t| [t[CHANNEL_DISPLACEMENT_X], t[CHANNEL_DISPLACEMENT_Y]])
                .filter(|v| v.is_finite())
                .fold(0.0_f32, |acc, v| acc.max(v.abs()));
            let centred = |v: f32| {
                if !v.is_finite() {
                    v
                } else if extent > 0.0 {
                    0.5 + 0.5 * v / extent
                } else {
                    0.5
                }
            };
            texture
                .data()
                .iter()
                .flat_map(|t| {
                    [
                        to_byte(centred(t[CHANNEL_DISPLACEMENT_X])),
                        to_byte(centred(t[CHANNEL_DISPLACEMENT_Y])),
                        0,
                        255,
                    ]
                })
                .collect()
        }
    }
}

/// Min and max of the finite values of one channel; `(0, 0)` if none.
fn finite_range(texture: &Texture, channel: impl Fn(&Texel) -> f32) -> (f32, f32) {
    let (lo, hi) = texture
        .data()
        .iter()
        .map(channel)
        .filter(|v| v.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if lo > hi {
        (0.0, 0.0)
    } else {
        (lo, hi)
    }
}

/// Maps `v` from `[lo, hi]` onto `[0, 1]`; a flat range maps to 0.5.
/// Non-finite input passes through so [`to_byte`] zeroes it.
fn stretch(v: f32, lo: f32, hi: f32) -> f32 {
    if !v.is_finite() {
        v
    } else if hi > lo {
        (v - lo) / (hi - lo)
    } else {
        0.5
    }
}

fn to_byte(t: f32) -> u8 {
    if t.is_finite() {
        (t.clamp(0.0, 1.0) * 255.0).round() as u8
    } else {
        0
    }
}
