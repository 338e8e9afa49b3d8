//! Color types and parsing
//!
//! Colors are stored as straight (non-premultiplied) RGBA with f32 components
//! in the `0.0..=1.0` range. Theme documents spell them as text:
//!
//! - `#RGB`, `#RRGGBB`, `#RRGGBBAA`
//! - `rgb(r, g, b)` and `rgba(r, g, b, a)` with 0-255 channels and a 0-1 alpha
//! - `transparent`, `white`, `black`

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// RGBA color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Error returned when a color literal cannot be parsed
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid color literal `{0}`")]
pub struct ColorParseError(pub String);

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from u8 components (0-255)
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create from a 0xRRGGBB value
    pub fn from_hex(hex: u32) -> Self {
        Self::from_rgba8(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
            255,
        )
    }

    /// Set alpha and return new color
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: alpha, ..self }
    }

    /// Convert to u8 array [r, g, b, a]
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        ]
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque
    pub fn to_hex_string(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let src = s.trim();
        let err = || ColorParseError(s.to_string());

        match src.to_ascii_lowercase().as_str() {
            "transparent" => return Ok(Color::TRANSPARENT),
            "white" => return Ok(Color::WHITE),
            "black" => return Ok(Color::BLACK),
            _ => {}
        }

        if let Some(hex) = src.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(err);
        }

        if let Some(args) = function_args(src, "rgba") {
            let [r, g, b, a] = split_args::<4>(args).ok_or_else(err)?;
            let alpha: f32 = a.parse().map_err(|_| err())?;
            if !(0.0..=1.0).contains(&alpha) {
                return Err(err());
            }
            return Ok(Color::from_rgba8(
                parse_channel(r).ok_or_else(err)?,
                parse_channel(g).ok_or_else(err)?,
                parse_channel(b).ok_or_else(err)?,
                255,
            )
            .with_alpha(alpha));
        }

        if let Some(args) = function_args(src, "rgb") {
            let [r, g, b] = split_args::<3>(args).ok_or_else(err)?;
            return Ok(Color::from_rgba8(
                parse_channel(r).ok_or_else(err)?,
                parse_channel(g).ok_or_else(err)?,
                parse_channel(b).ok_or_else(err)?,
                255,
            ));
        }

        Err(err())
    }
}

fn channel_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Color::from_rgba8(
            nibble(0)? * 17,
            nibble(1)? * 17,
            nibble(2)? * 17,
            255,
        )),
        6 => Some(Color::from_rgba8(byte(0)?, byte(2)?, byte(4)?, 255)),
        8 => Some(Color::from_rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

/// Returns the text between the parentheses of `name(...)`
fn function_args<'a>(src: &'a str, name: &str) -> Option<&'a str> {
    let head = src.get(..name.len())?;
    if !head.eq_ignore_ascii_case(name) {
        return None;
    }
    src[name.len()..]
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn split_args<const N: usize>(args: &str) -> Option<[&str; N]> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    parts.try_into().ok()
}

fn parse_channel(s: &str) -> Option<u8> {
    s.parse().ok()
}
