//! Positions on the dial and the labelled pairs that anchor them.

use serde::{Deserialize, Serialize};

/// A location on the spectrum, always within `[0.0, 1.0]`.
///
/// `0.0` sits fully on the left label, `1.0` fully on the right.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Position(f64);

impl Position {
    /// Far left end of the dial.
    pub const LEFT: Position = Position(0.0);
    /// Centre of the dial, where sliders reset between turns.
    pub const CENTER: Position = Position(0.5);
    /// Far right end of the dial.
    pub const RIGHT: Position = Position(1.0);

    /// Create a position, clamping into `[0.0, 1.0]`. NaN becomes the centre.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self::CENTER
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// Create a position from a percentage (`0..=100`), clamped.
    pub fn from_percent(percent: f64) -> Self {
        Self::new(percent / 100.0)
    }

    /// The raw value in `[0.0, 1.0]`.
    pub fn value(self) -> f64 {
        self.0
    }

    /// The value as a percentage of the dial.
    pub fn percent(self) -> f64 {
        self.0 * 100.0
    }

    /// Absolute distance between two positions.
    pub fn distance(self, other: Position) -> f64 {
        (self.0 - other.0).abs()
    }

    /// Linear interpolation from `self` toward `to` by `t` in `[0, 1]`.
    pub fn lerp(self, to: Position, t: f64) -> Position {
        Position::new(self.0 + (to.0 - self.0) * t)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::CENTER
    }
}

impl From<f64> for Position {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Position> for f64 {
    fn from(position: Position) -> Self {
        position.0
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.percent())
    }
}

/// Two opposing concepts that label the ends of the dial for one round.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct SpectrumPair {
    /// Concept at position `0.0`.
    pub left: String,
    /// Concept at position `1.0`.
    pub right: String,
}

impl SpectrumPair {
    /// Create a pair from its two labels.
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

impl From<(String, String)> for SpectrumPair {
    fn from((left, right): (String, String)) -> Self {
        Self { left, right }
    }
}

impl From<SpectrumPair> for (String, String) {
    fn from(pair: SpectrumPair) -> Self {
        (pair.left, pair.right)
    }
}

impl std::fmt::Display for SpectrumPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <-> {}", self.left, self.right)
    }
}
