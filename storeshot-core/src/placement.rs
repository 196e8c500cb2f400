//! Placement engine: named grid slots, axis sliders and z-order shortcuts.
//!
//! Everything here produces a [`Position`]; the document stores it.

use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CoreError, Position};

/// Z-index set by "bring to front".
pub const FRONT_Z_INDEX: i32 = 10;

/// Z-index set by "send to back".
pub const BACK_Z_INDEX: i32 = 1;

/// One of the nine predefined grid slots on the 300×600 logical canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamedPosition {
    /// Top row, left column.
    TopLeft,
    /// Top row, centre column.
    TopCenter,
    /// Top row, right column.
    TopRight,
    /// Middle row, left column.
    MiddleLeft,
    /// Middle row, centre column.
    MiddleCenter,
    /// Middle row, right column.
    MiddleRight,
    /// Bottom row, left column.
    BottomLeft,
    /// Bottom row, centre column.
    BottomCenter,
    /// Bottom row, right column.
    BottomRight,
}

impl NamedPosition {
    /// All slots in grid order.
    pub const ALL: [Self; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::MiddleLeft,
        Self::MiddleCenter,
        Self::MiddleRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// The literal `(x, y)` pair for this slot.
    #[must_use]
    pub fn coordinates(self) -> (f32, f32) {
        let x = match self {
            Self::TopLeft | Self::MiddleLeft | Self::BottomLeft => 20.0,
            Self::TopCenter | Self::MiddleCenter | Self::BottomCenter => 120.0,
            Self::TopRight | Self::MiddleRight | Self::BottomRight => 220.0,
        };
        let y = match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => 60.0,
            Self::MiddleLeft | Self::MiddleCenter | Self::MiddleRight => 280.0,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => 500.0,
        };
        (x, y)
    }

    /// Kebab-case name, e.g. `top-left`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::TopRight => "top-right",
            Self::MiddleLeft => "middle-left",
            Self::MiddleCenter => "middle-center",
            Self::MiddleRight => "middle-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
            Self::BottomRight => "bottom-right",
        }
    }

    /// Move `current` to this slot, keeping its z-index and alignment.
    #[must_use]
    pub fn apply(self, current: Position) -> Position {
        let (x, y) = self.coordinates();
        Position { x, y, ..current }
    }
}

impl std::fmt::Display for NamedPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NamedPosition {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.name() == s)
            .ok_or_else(|| CoreError::unknown("position", s))
    }
}

/// A slider axis in continuous placement mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal offset.
    X,
    /// Vertical offset.
    Y,
    /// Stacking order.
    Z,
}

impl Axis {
    /// Slider bounds for this axis.
    #[must_use]
    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            Self::X => -100.0..=260.0,
            Self::Y => -100.0..=560.0,
            #[allow(clippy::cast_precision_loss)]
            Self::Z => BACK_Z_INDEX as f32..=FRONT_Z_INDEX as f32,
        }
    }

    /// Clamp a slider value into this axis' range.
    #[must_use]
    pub fn clamp(self, value: f32) -> f32 {
        let range = self.range();
        value.clamp(*range.start(), *range.end())
    }

    /// Move one axis of `current`; the other fields are untouched.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn apply(self, current: Position, value: f32) -> Position {
        let value = self.clamp(value);
        match self {
            Self::X => Position { x: value, ..current },
            Self::Y => Position { y: value, ..current },
            Self::Z => Position {
                z_index: value.round() as i32,
                ..current
            },
        }
    }
}

/// Bring-to-front / send-to-back shortcuts.
///
/// These set a fixed z-index rather than reordering relative to other
/// elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZOrder {
    /// Set z-index to [`FRONT_Z_INDEX`].
    BringToFront,
    /// Set z-index to [`BACK_Z_INDEX`].
    SendToBack,
}

impl ZOrder {
    /// Apply the shortcut to `current`.
    #[must_use]
    pub fn apply(self, current: Position) -> Position {
        let z_index = match self {
            Self::BringToFront => FRONT_Z_INDEX,
            Self::SendToBack => BACK_Z_INDEX,
        };
        Position { z_index, ..current }
    }
}
