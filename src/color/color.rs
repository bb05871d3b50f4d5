use std::str::FromStr;

use crate::foundation::error::{GlyphfxError, GlyphfxResult};

/// 24-bit RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn distance_sq(self, other: Rgb) -> u32 {
        let d = |a: u8, b: u8| {
            let v = i32::from(a) - i32::from(b);
            (v * v) as u32
        };
        d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b)
    }
}

/// Terminal color: either a true-color RGB value or a legacy 256-color palette index.
///
/// Both forms are immutable and convert into each other through the xterm palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// True color.
    Rgb(Rgb),
    /// xterm-256 palette index.
    Xterm(u8),
}

const SYSTEM_COLORS: [Rgb; 16] = [
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0x80, 0x00, 0x00),
    Rgb::new(0x00, 0x80, 0x00),
    Rgb::new(0x80, 0x80, 0x00),
    Rgb::new(0x00, 0x00, 0x80),
    Rgb::new(0x80, 0x00, 0x80),
    Rgb::new(0x00, 0x80, 0x80),
    Rgb::new(0xc0, 0xc0, 0xc0),
    Rgb::new(0x80, 0x80, 0x80),
    Rgb::new(0xff, 0x00, 0x00),
    Rgb::new(0x00, 0xff, 0x00),
    Rgb::new(0xff, 0xff, 0x00),
    Rgb::new(0x00, 0x00, 0xff),
    Rgb::new(0xff, 0x00, 0xff),
    Rgb::new(0x00, 0xff, 0xff),
    Rgb::new(0xff, 0xff, 0xff),
];

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// RGB value of palette entry `index`.
pub fn xterm_to_rgb(index: u8) -> Rgb {
    match index {
        0..=15 => SYSTEM_COLORS[usize::from(index)],
        16..=231 => {
            let i = usize::from(index - 16);
            Rgb::new(
                CUBE_LEVELS[i / 36],
                CUBE_LEVELS[(i / 6) % 6],
                CUBE_LEVELS[i % 6],
            )
        }
        _ => {
            let v = 8 + 10 * (index - 232);
            Rgb::new(v, v, v)
        }
    }
}

/// Nearest palette index to `rgb` by squared RGB distance; ties keep the lowest index.
pub fn rgb_to_xterm(rgb: Rgb) -> u8 {
    let mut best = 0u8;
    let mut best_d = u32::MAX;
    for index in 0..=255u8 {
        let d = rgb.distance_sq(xterm_to_rgb(index));
        if d < best_d {
            best = index;
            best_d = d;
            if d == 0 {
                break;
            }
        }
    }
    best
}

impl Color {
    /// Parse `RRGGBB` (an optional leading `#` is accepted, case-insensitive).
    pub fn from_hex(s: &str) -> GlyphfxResult<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(GlyphfxError::invalid_color(format!(
                "\"{s}\" is not a 6 digit hex color"
            )));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| GlyphfxError::invalid_color(format!("invalid hex byte in \"{s}\"")))
        };
        Ok(Self::Rgb(Rgb::new(byte(0)?, byte(2)?, byte(4)?)))
    }

    /// Palette color `index` in `0..=255`.
    pub fn xterm(index: u16) -> GlyphfxResult<Self> {
        u8::try_from(index).map(Self::Xterm).map_err(|_| {
            GlyphfxError::invalid_color(format!("xterm index {index} is outside 0..=255"))
        })
    }

    /// True-color value; palette colors resolve through the xterm table.
    pub fn to_rgb(self) -> Rgb {
        match self {
            Self::Rgb(rgb) => rgb,
            Self::Xterm(i) => xterm_to_rgb(i),
        }
    }

    /// Palette index; RGB colors map to the nearest palette entry.
    pub fn to_xterm(self) -> u8 {
        match self {
            Self::Rgb(rgb) => rgb_to_xterm(rgb),
            Self::Xterm(i) => i,
        }
    }

    /// Lowercase `rrggbb` string of the RGB value.
    pub fn hex(self) -> String {
        let Rgb { r, g, b } = self.to_rgb();
        format!("{r:02x}{g:02x}{b:02x}")
    }

    /// Scale the HSL lightness by `factor` (clamped to `[0, 1]`), keeping hue and saturation.
    ///
    /// Channels are truncated when converting back, so `ff0000` at `0.5` gives `7f0000`.
    pub fn adjust_brightness(self, factor: f64) -> Self {
        let Rgb { r, g, b } = self.to_rgb();
        let (r, g, b) = (
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        );
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (max + min) / 2.0;
        let (hue, saturation) = if max == min {
            (0.0, 0.0)
        } else {
            let d = max - min;
            let saturation = if lightness > 0.5 {
                d / (2.0 - max - min)
            } else {
                d / (max + min)
            };
            let hue = if max == r {
                (g - b) / d + if g < b { 6.0 } else { 0.0 }
            } else if max == g {
                (b - r) / d + 2.0
            } else {
                (r - g) / d + 4.0
            };
            (hue / 6.0, saturation)
        };

        let l = (lightness * factor).clamp(0.0, 1.0);
        let (r, g, b) = if saturation == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 {
                l * (1.0 + saturation)
            } else {
                l + saturation - l * saturation
            };
            let p = 2.0 * l - q;
            (
                hue_to_channel(p, q, hue + 1.0 / 3.0),
                hue_to_channel(p, q, hue),
                hue_to_channel(p, q, hue - 1.0 / 3.0),
            )
        };
        let channel = |v: f64| (v * 255.0).clamp(0.0, 255.0) as u8;
        Self::Rgb(Rgb::new(channel(r), channel(g), channel(b)))
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl FromStr for Color {
    type Err = GlyphfxError;

    /// Accepts either a hex color or a decimal palette index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if !t.is_empty() && t.len() <= 3 && t.bytes().all(|b| b.is_ascii_digit()) {
            let index: u16 = t
                .parse()
                .map_err(|_| GlyphfxError::invalid_color(format!("invalid xterm index \"{t}\"")))?;
            return Self::xterm(index);
        }
        Self::from_hex(t)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rgb(_) => f.write_str(&self.hex()),
            Self::Xterm(i) => write!(f, "{i}"),
        }
    }
}

impl serde::Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Rgb(_) => serializer.serialize_str(&self.hex()),
            Self::Xterm(i) => serializer.serialize_u8(*i),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Index(i64),
            Hex(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Self::from_hex(&s).map_err(serde::de::Error::custom),
            Repr::Index(i) => u16::try_from(i)
                .map_err(|_| GlyphfxError::invalid_color(format!("xterm index {i} is negative")))
                .and_then(Self::xterm)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/color.rs"]
mod tests;
