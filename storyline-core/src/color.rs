//! Stable category colors.
//!
//! A category key (place or character name) is hashed with FNV-1a and the
//! hash picks the hue. The result depends only on the key, so colors do not
//! shift when categories are added, removed or filtered out.

use std::fmt;

use serde::Serialize;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// HSV saturation used for every category color (0-255 scale).
pub const SATURATION: u8 = 180;
/// HSV value used for every category color (0-255 scale).
pub const VALUE: u8 = 200;

/// Outline factor used for marker strokes (percent, as in "150% darker").
pub const OUTLINE_DARKNESS: u32 = 150;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Color for events without a category key.
    pub const FALLBACK: Color = Color::rgb(30, 144, 255);

    pub const AXIS: Color = Color::rgb(120, 120, 120);
    pub const TICK: Color = Color::rgb(150, 150, 150);
    pub const TICK_LABEL: Color = Color::rgb(80, 80, 80);
    pub const LABEL: Color = Color::rgb(30, 30, 30);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Build a color from hue (degrees), saturation and value (0-255).
    pub fn from_hsv(hue: u16, saturation: u8, value: u8) -> Self {
        let h = f64::from(hue % 360) / 60.0;
        let s = f64::from(saturation) / 255.0;
        let v = f64::from(value) / 255.0;

        let c = v * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match h as u8 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Color::rgb(to_channel(r + m), to_channel(g + m), to_channel(b + m))
    }

    /// Darken by `factor` percent; 200 halves the brightness.
    pub fn darker(self, factor: u32) -> Self {
        if factor <= 100 {
            return self;
        }
        let scale = |c: u8| (u32::from(c) * 100 / factor) as u8;
        Color::rgb(scale(self.r), scale(self.g), scale(self.b))
    }

    /// `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// 32-bit FNV-1a over the UTF-8 bytes of `key`.
pub fn fnv1a(key: &str) -> u32 {
    key.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Hue in degrees assigned to a category key.
pub fn hue_for(key: &str) -> u16 {
    (fnv1a(key) % 360) as u16
}

/// Display color for a category key; empty keys get [`Color::FALLBACK`].
pub fn color_for(key: &str) -> Color {
    if key.is_empty() {
        return Color::FALLBACK;
    }
    Color::from_hsv(hue_for(key), SATURATION, VALUE)
}
