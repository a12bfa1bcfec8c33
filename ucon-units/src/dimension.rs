//! Physical dimensions
//!
//! Every unit belongs to exactly one dimension, and conversions never
//! cross dimensions. The set is closed: compound dimensions such as
//! velocity are not representable.

use std::fmt;
use serde::Serialize;

/// The physical quantity a unit measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Base unit: meter
    Length,
    /// Base unit: gram
    Mass,
    /// Base unit: celsius
    Temperature,
}

impl Dimension {
    /// All dimensions, in catalog order
    pub const ALL: [Dimension; 3] = [Dimension::Length, Dimension::Mass, Dimension::Temperature];

    /// Lowercase display name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Length => "length",
            Dimension::Mass => "mass",
            Dimension::Temperature => "temperature",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Dimension::Length), "length");
        assert_eq!(format!("{}", Dimension::Mass), "mass");
        assert_eq!(format!("{}", Dimension::Temperature), "temperature");
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&Dimension::Temperature).unwrap();
        assert_eq!(json, "\"temperature\"");
    }

    #[test]
    fn test_all_distinct() {
        for (i, a) in Dimension::ALL.iter().enumerate() {
            for b in &Dimension::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
