//! Unit representation with conversion factors

use std::fmt;
use serde::Serialize;
use thiserror::Error;
use crate::Dimension;

/// A catalog entry: a named unit with its dimension and conversion factors
///
/// A quantity `v` in this unit corresponds to `(v + offset) * scale`
/// in the dimension's base unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Unit {
    /// The dimensional category
    pub dimension: Dimension,
    /// Whether metric prefixes may be composed with this unit
    pub metric: bool,
    /// Canonical lowercase name (e.g. "meter")
    pub name: &'static str,
    /// Factor converting to the base unit
    pub scale: f64,
    /// Shift applied before scaling, nonzero only for affine units
    pub offset: f64,
    /// Alternate lowercase names (e.g. "m", "metre")
    pub aliases: &'static [&'static str],
}

impl Unit {
    /// Create a proportional unit (no offset)
    pub const fn new(
        dimension: Dimension,
        metric: bool,
        name: &'static str,
        scale: f64,
        aliases: &'static [&'static str],
    ) -> Self {
        Unit { dimension, metric, name, scale, offset: 0.0, aliases }
    }

    /// Create an affine unit (temperature scales)
    pub const fn with_offset(
        dimension: Dimension,
        metric: bool,
        name: &'static str,
        scale: f64,
        offset: f64,
        aliases: &'static [&'static str],
    ) -> Self {
        Unit { dimension, metric, name, scale, offset, aliases }
    }

    /// Check if this is the base unit of its dimension
    pub fn is_base(&self) -> bool {
        self.scale == 1.0 && self.offset == 0.0
    }

    /// Check if this unit has an offset (non-proportional conversion)
    pub fn has_offset(&self) -> bool {
        self.offset != 0.0
    }

    /// Check if two units measure the same dimension
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Every string this unit answers to: the name, then the aliases
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        let aliases: &'static [&'static str] = self.aliases;
        std::iter::once(self.name).chain(aliases.iter().copied())
    }

    /// Convert a value in this unit to the base unit
    pub fn to_base(&self, value: f64) -> f64 {
        (value + self.offset) * self.scale
    }

    /// Convert a value in the base unit to this unit
    pub fn from_base(&self, base: f64) -> f64 {
        base / self.scale - self.offset
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Which side of a `from => to` request a token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Start,
    End,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Start => write!(f, "start"),
            Side::End => write!(f, "end"),
        }
    }
}

/// Errors that can occur while handling one conversion request
///
/// The `Display` text of each variant is the diagnostic line shown to
/// the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("Invalid conversion, no separator (=>)")]
    MissingSeparator,

    #[error("Invalid conversion, no value")]
    MissingValue,

    #[error("Unknown {side} unit `{token}`")]
    UnknownUnit { side: Side, token: String },

    #[error("Dimension mismatch: `{from}` vs `{to}`")]
    DimensionMismatch { from: Dimension, to: Dimension },

    #[error("Metric prefix `{prefix}` cannot be applied to offset unit `{unit}`")]
    AffinePrefix { prefix: &'static str, unit: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    const METER: Unit = Unit::new(Dimension::Length, true, "meter", 1.0, &["m"]);
    const FOOT: Unit = Unit::new(Dimension::Length, false, "foot", 0.3048, &["ft", "feet"]);
    const GRAM: Unit = Unit::new(Dimension::Mass, true, "gram", 1.0, &["g"]);
    const FAHRENHEIT: Unit = Unit::with_offset(Dimension::Temperature, false, "fahrenheit", 5.0 / 9.0, -32.0, &["f"]);

    #[test]
    fn test_base_unit() {
        assert!(METER.is_base());
        assert!(!FOOT.is_base());
        assert!(!FAHRENHEIT.is_base());
    }

    #[test]
    fn test_compatible_units() {
        assert!(METER.is_compatible(&FOOT));
        assert!(!METER.is_compatible(&GRAM));
    }

    #[test]
    fn test_names_include_aliases() {
        let names: Vec<_> = FOOT.names().collect();
        assert_eq!(names, vec!["foot", "ft", "feet"]);
    }

    #[test]
    fn test_to_base_affine() {
        assert!(FAHRENHEIT.has_offset());
        assert!((FAHRENHEIT.to_base(212.0) - 100.0).abs() < 1e-9);
        assert!((FAHRENHEIT.from_base(100.0) - 212.0).abs() < 1e-9);
    }

    #[test]
    fn test_error_messages() {
        let e = ConversionError::UnknownUnit { side: Side::End, token: "parsec".into() };
        assert_eq!(e.to_string(), "Unknown end unit `parsec`");

        let e = ConversionError::DimensionMismatch {
            from: Dimension::Length,
            to: Dimension::Mass,
        };
        assert_eq!(e.to_string(), "Dimension mismatch: `length` vs `mass`");

        assert_eq!(
            ConversionError::MissingSeparator.to_string(),
            "Invalid conversion, no separator (=>)"
        );
    }
}
