//! Chart colors.
//!
//! Every color is a pure function of its input: the same sector, rating,
//! issuer or score always renders the same way within and across sessions.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An sRGB color, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a color from channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` or `rrggbb`.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Linear interpolation towards `other`; `t` is clamped to [0, 1].
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| {
            let v = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color '{raw}'")))
    }
}

/// Neutral color for anything without a palette entry.
pub const FALLBACK: Rgb = Rgb::new(0x9c, 0xa3, 0xaf);

const SECTOR_PALETTE: [(&str, Rgb); 10] = [
    ("Government", Rgb::new(0x3b, 0x82, 0xf6)),
    ("Corporate", Rgb::new(0x10, 0xb9, 0x81)),
    ("Financial", Rgb::new(0xf5, 0x9e, 0x0b)),
    ("Utilities", Rgb::new(0x8b, 0x5c, 0xf6)),
    ("Technology", Rgb::new(0x06, 0xb6, 0xd4)),
    ("Healthcare", Rgb::new(0xec, 0x48, 0x99)),
    ("Energy", Rgb::new(0xef, 0x44, 0x44)),
    ("Real Estate", Rgb::new(0x84, 0xcc, 0x16)),
    ("Infrastructure", Rgb::new(0xf9, 0x73, 0x16)),
    ("Municipal", Rgb::new(0x63, 0x66, 0xf1)),
];

const ISSUER_PALETTE: [Rgb; 10] = [
    Rgb::new(0x0e, 0xa5, 0xe9),
    Rgb::new(0x22, 0xc5, 0x5e),
    Rgb::new(0xa8, 0x55, 0xf7),
    Rgb::new(0xf4, 0x3f, 0x5e),
    Rgb::new(0xea, 0xb3, 0x08),
    Rgb::new(0x14, 0xb8, 0xa6),
    Rgb::new(0xf9, 0x73, 0x16),
    Rgb::new(0x63, 0x66, 0xf1),
    Rgb::new(0x84, 0xcc, 0x16),
    Rgb::new(0xd9, 0x46, 0xef),
];

/// Fixed palette lookup for sectors (case-insensitive).
#[must_use]
pub fn sector_color(sector: &str) -> Rgb {
    SECTOR_PALETTE
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(sector.trim()))
        .map_or(FALLBACK, |(_, color)| *color)
}

/// Stable palette slot for an issuer name.
///
/// Uses a 31-multiplier string hash so identical names always land on the
/// same slot, independent of process or platform.
#[must_use]
pub fn issuer_color(issuer: &str) -> Rgb {
    ISSUER_PALETTE[issuer_palette_index(issuer)]
}

pub(crate) fn issuer_palette_index(issuer: &str) -> usize {
    let hash = issuer
        .chars()
        .fold(0i32, |h, c| h.wrapping_shl(5).wrapping_sub(h).wrapping_add(c as i32));
    hash.unsigned_abs() as usize % ISSUER_PALETTE.len()
}
