//! Composition backgrounds: solid colours, preset gradients and custom gradients.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// A validated `#rrggbb` colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor([u8; 3]);

impl HexColor {
    /// Black.
    pub const BLACK: Self = Self([0, 0, 0]);

    /// Create from RGB components.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Parse `#rgb` or `#rrggbb` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidColor`] for anything else.
    pub fn parse(input: &str) -> CoreResult<Self> {
        let invalid = || CoreError::InvalidColor(input.to_string());
        let hex = input.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map_err(|_| invalid());
        let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        match hex.len() {
            3 => Ok(Self([digit(0)? * 17, digit(1)? * 17, digit(2)? * 17])),
            6 => Ok(Self([pair(0)?, pair(2)?, pair(4)?])),
            _ => Err(invalid()),
        }
    }

    /// RGB components.
    #[must_use]
    pub fn components(self) -> [u8; 3] {
        self.0
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl FromStr for HexColor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

/// Direction a gradient runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientDirection {
    /// Left to right.
    ToRight,
    /// Top to bottom.
    ToBottom,
}

/// A two-stop linear gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gradient {
    /// Direction of the gradient.
    pub direction: GradientDirection,
    /// Start colour.
    pub from: HexColor,
    /// End colour.
    pub to: HexColor,
}

impl Gradient {
    /// Build the custom gradient from two user-chosen colours (runs top to bottom).
    #[must_use]
    pub fn custom(from: HexColor, to: HexColor) -> Self {
        Self {
            direction: GradientDirection::ToBottom,
            from,
            to,
        }
    }

    /// Look up a preset gradient by name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownName`] if no preset has that name.
    pub fn preset(name: &str) -> CoreResult<Self> {
        GRADIENT_PRESETS
            .iter()
            .find(|preset| preset.name == name)
            .map(|preset| preset.gradient)
            .ok_or_else(|| CoreError::unknown("gradient preset", name))
    }

    /// Name of the preset this gradient matches, if any.
    #[must_use]
    pub fn preset_name(&self) -> Option<&'static str> {
        GRADIENT_PRESETS
            .iter()
            .find(|preset| preset.gradient == *self)
            .map(|preset| preset.name)
    }
}

/// A named gradient offered in the background picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradientPreset {
    /// Picker name.
    pub name: &'static str,
    /// The gradient.
    pub gradient: Gradient,
}

const fn preset(
    name: &'static str,
    direction: GradientDirection,
    from: HexColor,
    to: HexColor,
) -> GradientPreset {
    GradientPreset {
        name,
        gradient: Gradient {
            direction,
            from,
            to,
        },
    }
}

const RED_500: HexColor = HexColor::rgb(0xef, 0x44, 0x44);
const ORANGE_500: HexColor = HexColor::rgb(0xf9, 0x73, 0x16);
const YELLOW_400: HexColor = HexColor::rgb(0xfa, 0xcc, 0x15);
const YELLOW_500: HexColor = HexColor::rgb(0xea, 0xb3, 0x08);
const GREEN_400: HexColor = HexColor::rgb(0x4a, 0xde, 0x80);
const GREEN_500: HexColor = HexColor::rgb(0x22, 0xc5, 0x5e);
const TEAL_400: HexColor = HexColor::rgb(0x2d, 0xd4, 0xbf);
const TEAL_500: HexColor = HexColor::rgb(0x14, 0xb8, 0xa6);
const BLUE_500: HexColor = HexColor::rgb(0x3b, 0x82, 0xf6);
const INDIGO_500: HexColor = HexColor::rgb(0x63, 0x66, 0xf1);
const PURPLE_500: HexColor = HexColor::rgb(0xa8, 0x55, 0xf7);
const PINK_500: HexColor = HexColor::rgb(0xec, 0x48, 0x99);

/// The gradient picker, in display order.
pub const GRADIENT_PRESETS: [GradientPreset; 11] = [
    preset("red-yellow", GradientDirection::ToRight, RED_500, YELLOW_500),
    preset("green-blue", GradientDirection::ToRight, GREEN_400, BLUE_500),
    preset("purple-pink", GradientDirection::ToRight, PURPLE_500, PINK_500),
    preset("yellow-orange", GradientDirection::ToRight, YELLOW_400, ORANGE_500),
    preset("blue-indigo", GradientDirection::ToRight, BLUE_500, INDIGO_500),
    preset("indigo-purple", GradientDirection::ToRight, INDIGO_500, PURPLE_500),
    preset("pink-red", GradientDirection::ToRight, PINK_500, RED_500),
    preset("teal-blue", GradientDirection::ToRight, TEAL_400, BLUE_500),
    preset("orange-red", GradientDirection::ToRight, ORANGE_500, RED_500),
    preset("green-teal", GradientDirection::ToRight, GREEN_500, TEAL_500),
    preset(
        "sky",
        GradientDirection::ToBottom,
        HexColor::rgb(0x13, 0x80, 0xff),
        HexColor::rgb(0x50, 0xb1, 0xfe),
    ),
];

/// The active background of the composition's content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Background {
    /// A single colour.
    Solid(HexColor),
    /// A preset or custom gradient.
    Gradient(Gradient),
}

impl Default for Background {
    fn default() -> Self {
        Self::Gradient(GRADIENT_PRESETS[2].gradient)
    }
}

impl FromStr for Background {
    type Err = CoreError;

    /// Accepts a hex colour (`#1380ff`) or a preset name (`purple-pink`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim_start().starts_with('#') {
            HexColor::parse(s).map(Self::Solid)
        } else {
            Gradient::preset(s.trim()).map(Self::Gradient)
        }
    }
}
