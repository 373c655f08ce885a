#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Visual encoding primitives: color palettes, the continuous color scale,
//! threshold bins, and proportional sizing.
//!
//! Every function here is pure. Encoders run once per region per render
//! cycle and must yield identical output for identical input, so nothing
//! in this crate reads clocks, caches, or globals.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form used in scene JSON.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Supported color schemes, each an ordered low-to-high ramp.
///
/// The stops are the standard `ColorBrewer` / matplotlib anchors, so scenes
/// keep the colors the dashboards have always used. `RdYlBu` runs blue to
/// red: it doubles as the classification ramp where blue means low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Palette {
    YlOrRd,
    RdYlBu,
    Blues,
    Greens,
    Viridis,
}

impl Palette {
    /// All supported palettes, in sidebar display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::YlOrRd,
            Self::RdYlBu,
            Self::Blues,
            Self::Greens,
            Self::Viridis,
        ]
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::YlOrRd => "ylorrd",
            Self::RdYlBu => "rdylbu",
            Self::Blues => "blues",
            Self::Greens => "greens",
            Self::Viridis => "viridis",
        }
    }

    /// Ordered color stops, low to high.
    #[must_use]
    pub const fn stops(self) -> &'static [Rgb] {
        const YLORRD: &[Rgb] = &[
            Rgb::new(0xff, 0xff, 0xb2),
            Rgb::new(0xfe, 0xcc, 0x5c),
            Rgb::new(0xfd, 0x8d, 0x3c),
            Rgb::new(0xf0, 0x3b, 0x20),
            Rgb::new(0xbd, 0x00, 0x26),
        ];
        const RDYLBU: &[Rgb] = &[
            Rgb::new(0x2c, 0x7b, 0xb6),
            Rgb::new(0xab, 0xd9, 0xe9),
            Rgb::new(0xfd, 0xae, 0x61),
            Rgb::new(0xd7, 0x19, 0x1c),
        ];
        const BLUES: &[Rgb] = &[
            Rgb::new(0xef, 0xf3, 0xff),
            Rgb::new(0xbd, 0xd7, 0xe7),
            Rgb::new(0x6b, 0xae, 0xd6),
            Rgb::new(0x31, 0x82, 0xbd),
            Rgb::new(0x08, 0x51, 0x9c),
        ];
        const GREENS: &[Rgb] = &[
            Rgb::new(0xed, 0xf8, 0xe9),
            Rgb::new(0xba, 0xe4, 0xb3),
            Rgb::new(0x74, 0xc4, 0x76),
            Rgb::new(0x31, 0xa3, 0x54),
            Rgb::new(0x00, 0x6d, 0x2c),
        ];
        const VIRIDIS: &[Rgb] = &[
            Rgb::new(0x44, 0x01, 0x54),
            Rgb::new(0x3b, 0x52, 0x8b),
            Rgb::new(0x21, 0x91, 0x8c),
            Rgb::new(0x5e, 0xc9, 0x62),
            Rgb::new(0xfd, 0xe7, 0x25),
        ];
        match self {
            Self::YlOrRd => YLORRD,
            Self::RdYlBu => RDYLBU,
            Self::Blues => BLUES,
            Self::Greens => GREENS,
            Self::Viridis => VIRIDIS,
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Palette {
    type Err = InvalidPaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ylorrd" => Ok(Self::YlOrRd),
            "rdylbu" => Ok(Self::RdYlBu),
            "blues" => Ok(Self::Blues),
            "greens" => Ok(Self::Greens),
            "viridis" => Ok(Self::Viridis),
            _ => Err(InvalidPaletteError {
                name: s.to_string(),
            }),
        }
    }
}

/// Error returned for a palette name outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown palette: {name:?}")]
pub struct InvalidPaletteError {
    /// The name that failed to parse.
    pub name: String,
}

/// Linearly interpolates `value` within `[scale_min, scale_max]` against
/// the palette ramp.
///
/// Values outside the range clamp to the nearest endpoint. A degenerate
/// range (`scale_max <= scale_min`) maps every value to the low endpoint.
#[must_use]
pub fn continuous_color(value: f64, scale_min: f64, scale_max: f64, palette: Palette) -> Rgb {
    let t = if scale_max > scale_min {
        ((value - scale_min) / (scale_max - scale_min)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    sample_stops(palette.stops(), t)
}

/// Samples an ordered ramp at `t` in `[0, 1]`.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sample_stops(stops: &[Rgb], t: f64) -> Rgb {
    debug_assert!(!stops.is_empty());
    if stops.len() == 1 {
        return stops[0];
    }

    let scaled = t * (stops.len() - 1) as f64;
    let index = (scaled.floor() as usize).min(stops.len() - 2);
    let local = scaled - index as f64;
    lerp(stops[index], stops[index + 1], local)
}

fn lerp(from: Rgb, to: Rgb, t: f64) -> Rgb {
    Rgb::new(
        lerp_channel(from.r, to.r, t),
        lerp_channel(from.g, to.g, t),
        lerp_channel(from.b, to.b, t),
    )
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp_channel(from: u8, to: u8, t: f64) -> u8 {
    (f64::from(from) + (f64::from(to) - f64::from(from)) * t).round() as u8
}

/// Index of the bin `value` falls into: the first threshold strictly
/// greater than `value` wins, and values at or beyond the last threshold
/// land in the final bin.
///
/// `thresholds` must be ascending; they partition the number line into
/// `thresholds.len() + 1` bins.
#[must_use]
pub fn discrete_bin(value: f64, thresholds: &[f64]) -> usize {
    thresholds
        .iter()
        .position(|threshold| value < *threshold)
        .unwrap_or(thresholds.len())
}

/// Linear size scaling into `[min_size, max_size]`.
///
/// A non-positive `max_in_set` (an all-zero metric column) degenerates to
/// `min_size` for every value, keeping markers visible rather than
/// dividing by zero.
#[must_use]
pub fn proportional_size(value: f64, max_in_set: f64, min_size: f64, max_size: f64) -> f64 {
    if max_in_set <= 0.0 {
        return min_size;
    }
    min_size + (value / max_in_set) * (max_size - min_size)
}

/// Samples `count` evenly spaced colors from the palette ramp, low to
/// high, for coloring discrete bins.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn discrete_colors(palette: Palette, count: usize) -> Vec<Rgb> {
    let stops = palette.stops();
    match count {
        0 => Vec::new(),
        1 => vec![stops[stops.len() / 2]],
        _ => (0..count)
            .map(|i| sample_stops(stops, i as f64 / (count - 1) as f64))
            .collect(),
    }
}
