// Simple color struct, created from an unsigned 32 representing RRGGBBAA
// or from a css hex string, and rendered back to css for the 2d context

use crate::error::Error;
use serde::Deserialize;
use std::convert::TryFrom;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    // #22c55e
    pub const ACCENT: Color = Color {
        r: 0x22,
        g: 0xc5,
        b: 0x5e,
        a: 0xff,
    };

    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    /// Parses `#rrggbb` or `#rrggbbaa`, the leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Color, Error> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || Error::InvalidColor(hex.to_owned());
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let num = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        match digits.len() {
            6 => Ok(Color::from_u32((num << 8) | 0xff)),
            8 => Ok(Color::from_u32(num)),
            _ => Err(invalid()),
        }
    }

    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }

    pub fn to_css(&self) -> String {
        self.to_css_with_opacity(self.opacity())
    }

    /// Css text for this color with its alpha replaced by `opacity`, clamped
    /// to [0, 1] but otherwise written as is.
    pub fn to_css_with_opacity(&self, opacity: f64) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            clamp_opacity(opacity)
        )
    }
}

pub fn clamp_opacity(opacity: f64) -> f64 {
    if opacity.is_nan() {
        0.0
    } else {
        opacity.max(0.0).min(1.0)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(hex: String) -> Result<Self, Self::Error> {
        Color::from_hex(&hex)
    }
}
