//! Data-driven visual encoding: colors and proportional bar lengths.

use std::fmt;

use serde::{Deserialize, Serialize};

use dermassist_core::RiskTier;

/// An sRGB color. Serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Six lowercase hex digits without the leading `#`.
    pub fn hex_digits(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels scaled to `0.0..=1.0`.
    pub fn unit_rgb(&self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex_digits())
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let digits = s.strip_prefix('#').unwrap_or(&s);
        if digits.len() != 6 {
            return Err(format!("invalid color '{s}': expected #rrggbb"));
        }
        u32::from_str_radix(digits, 16)
            .map(Color::from_hex)
            .map_err(|e| format!("invalid color '{s}': {e}"))
    }
}

/// Fixed report palette.
pub mod palette {
    use super::Color;

    pub const BRAND_BLUE: Color = Color::from_hex(0x1d4ed8);
    pub const BRAND_DARK: Color = Color::from_hex(0x0f172a);
    pub const BRAND_GRAY: Color = Color::from_hex(0x64748b);
    pub const BRAND_LIGHT: Color = Color::from_hex(0xf8fafc);
    pub const BRAND_BORDER: Color = Color::from_hex(0xe2e8f0);
    pub const WHITE: Color = Color::from_hex(0xffffff);

    pub const HEADER_TINT: Color = Color::from_hex(0xbfdbfe);
    pub const HEADER_MUTED: Color = Color::from_hex(0x93c5fd);
    pub const BODY_TEXT: Color = Color::from_hex(0x374151);
    pub const PRIMARY_ROW: Color = Color::from_hex(0xeff6ff);

    pub const RISK_HIGH: Color = Color::from_hex(0xdc2626);
    pub const RISK_MODERATE: Color = Color::from_hex(0xd97706);
    pub const RISK_LOW: Color = Color::from_hex(0x059669);

    pub const RISK_HIGH_BG: Color = Color::from_hex(0xfff5f5);
    pub const RISK_MODERATE_BG: Color = Color::from_hex(0xfffbeb);
    pub const RISK_LOW_BG: Color = Color::from_hex(0xf0fdf4);

    /// Accent for differential rows the model did not pick.
    pub const MUTED_ACCENT: Color = Color::from_hex(0x93c5fd);
}

/// Fraction of the full bar width a score occupies.
///
/// Clamped to `[0, 1]` so corrupt scores never overflow the bar; NaN maps to 0.
pub fn bar_fraction(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

/// Saturated severity color of a tier.
pub fn tier_color(tier: RiskTier) -> Color {
    match tier {
        RiskTier::High => palette::RISK_HIGH,
        RiskTier::Moderate => palette::RISK_MODERATE,
        RiskTier::Low => palette::RISK_LOW,
        RiskTier::Unknown => palette::BRAND_GRAY,
    }
}

/// Pale panel background paired with [`tier_color`].
pub fn tier_background(tier: RiskTier) -> Color {
    match tier {
        RiskTier::High => palette::RISK_HIGH_BG,
        RiskTier::Moderate => palette::RISK_MODERATE_BG,
        RiskTier::Low => palette::RISK_LOW_BG,
        RiskTier::Unknown => palette::BRAND_LIGHT,
    }
}

/// Accent color of a differential entry.
///
/// Severity color is reserved for the model's chosen label; every other entry
/// gets the same muted accent whatever its tier.
pub fn color(tier: RiskTier, is_primary: bool) -> Color {
    if is_primary {
        tier_color(tier)
    } else {
        palette::MUTED_ACCENT
    }
}
