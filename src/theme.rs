use std::fmt;

use serde::Deserialize;

use crate::error::Error;

/// Semantic color slots. Rendered output refers to these, never to values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    Background,
    OnBackground,
    Primary,
}

/// Semantic text style slots: six heading tiers, body text and code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextRole {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Body1,
    Code,
}

impl TextRole {
    /// Heading tier for a level, or None outside 1..=6.
    pub fn heading(level: u8) -> Option<TextRole> {
        match level {
            1 => Some(TextRole::H1),
            2 => Some(TextRole::H2),
            3 => Some(TextRole::H3),
            4 => Some(TextRole::H4),
            5 => Some(TextRole::H5),
            6 => Some(TextRole::H6),
            _ => None,
        }
    }
}

/// An opaque RGB color, configured as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color(pub u32);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let hex = value
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| Error::InvalidColor(value.clone()))?;
        u32::from_str_radix(hex, 16)
            .map(Color)
            .map_err(|_| Error::InvalidColor(value.clone()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Light,
    #[default]
    Normal,
    Medium,
    Bold,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Default,
    Monospace,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub family: FontFamily,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 16.0,
            weight: FontWeight::Normal,
            family: FontFamily::Default,
        }
    }
}

/// Read-only lookup from semantic roles to concrete styles.
pub trait ThemeProvider {
    fn text_style(&self, role: TextRole) -> TextStyle;
    fn color(&self, role: ColorRole) -> Color;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Typography {
    pub h1: TextStyle,
    pub h2: TextStyle,
    pub h3: TextStyle,
    pub h4: TextStyle,
    pub h5: TextStyle,
    pub h6: TextStyle,
    pub body1: TextStyle,
    pub code: TextStyle,
}

impl Default for Typography {
    fn default() -> Self {
        let sized = |size, weight| TextStyle {
            size,
            weight,
            family: FontFamily::Default,
        };
        Self {
            h1: sized(96.0, FontWeight::Light),
            h2: sized(60.0, FontWeight::Light),
            h3: sized(48.0, FontWeight::Normal),
            h4: sized(34.0, FontWeight::Normal),
            h5: sized(24.0, FontWeight::Normal),
            h6: sized(20.0, FontWeight::Medium),
            body1: sized(16.0, FontWeight::Normal),
            code: TextStyle {
                size: 14.0,
                weight: FontWeight::Normal,
                family: FontFamily::Monospace,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Colors {
    pub background: Color,
    pub on_background: Color,
    pub primary: Color,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            background: Color::rgb(0xff, 0xff, 0xff),
            on_background: Color::rgb(0, 0, 0),
            primary: Color::rgb(0x62, 0x00, 0xee),
        }
    }
}

/// The configured theme.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    pub typography: Typography,
    pub colors: Colors,
}

impl ThemeProvider for Theme {
    fn text_style(&self, role: TextRole) -> TextStyle {
        let t = &self.typography;
        match role {
            TextRole::H1 => t.h1,
            TextRole::H2 => t.h2,
            TextRole::H3 => t.h3,
            TextRole::H4 => t.h4,
            TextRole::H5 => t.h5,
            TextRole::H6 => t.h6,
            TextRole::Body1 => t.body1,
            TextRole::Code => t.code,
        }
    }

    fn color(&self, role: ColorRole) -> Color {
        match role {
            ColorRole::Background => self.colors.background,
            ColorRole::OnBackground => self.colors.on_background,
            ColorRole::Primary => self.colors.primary,
        }
    }
}
