//! Unit definitions and the catalog that resolves names to units

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::trace;
use crate::{Unit, Dimension};
use crate::prefix::{Prefix, PREFIXES, strip_prefix};

/// Standard unit table
///
/// Order matters: it is the lookup priority and the listing order.
/// Base units (scale 1, offset 0) are meter, gram and celsius.
#[rustfmt::skip]
pub static UNITS: [Unit; 14] = [
    // Length
    Unit::new(Dimension::Length, true,  "meter",  1.0,       &["m", "metre"]),
    Unit::new(Dimension::Length, false, "mile",   1609.344,  &["mi"]),
    Unit::new(Dimension::Length, false, "inch",   0.0254,    &["in"]),
    Unit::new(Dimension::Length, false, "foot",   0.3048,    &["ft", "feet"]),
    Unit::new(Dimension::Length, false, "yard",   0.9144,    &["yd"]),
    Unit::new(Dimension::Length, false, "thou",   0.0000254, &["mil"]),
    Unit::new(Dimension::Length, false, "league", 4828.0417, &[]),

    // Mass
    Unit::new(Dimension::Mass, true,  "gram",  1.0,          &["g"]),
    Unit::new(Dimension::Mass, false, "tonne", 1000000.0,    &["t"]),
    Unit::new(Dimension::Mass, false, "pound", 453.59237,    &["lb", "lbs"]),
    Unit::new(Dimension::Mass, false, "ounce", 28.349523125, &["oz"]),

    // Temperature
    Unit::with_offset(Dimension::Temperature, false, "celsius",    1.0,       0.0,     &["c"]),
    Unit::with_offset(Dimension::Temperature, false, "fahrenheit", 5.0 / 9.0, -32.0,   &["f"]),
    Unit::with_offset(Dimension::Temperature, true,  "kelvin",     1.0,       -273.15, &["k"]),
];

/// Process-wide catalog over the standard tables
pub static CATALOG: LazyLock<Catalog> = LazyLock::new(|| Catalog::build(&UNITS, &PREFIXES));

/// A catalog unit paired with the metric prefix found on the token
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedUnit<'a> {
    pub unit: &'a Unit,
    pub prefix: &'a Prefix,
}

impl<'a> ResolvedUnit<'a> {
    pub fn new(unit: &'a Unit, prefix: &'a Prefix) -> Self {
        ResolvedUnit { unit, prefix }
    }

    /// Same unit and same prefix
    pub fn same_as(&self, other: &ResolvedUnit<'_>) -> bool {
        self.unit.name == other.unit.name && self.prefix.power == other.prefix.power
    }
}

impl fmt::Display for ResolvedUnit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix.name, self.unit.name)
    }
}

/// Errors found while validating a unit table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("name `{name}` is used by both `{first}` and `{second}`")]
    DuplicateName {
        name: &'static str,
        first: &'static str,
        second: &'static str,
    },

    #[error("name `{0}` must be non-empty lowercase")]
    NotLowercase(&'static str),

    #[error("unit `{unit}` has invalid scale {scale}")]
    InvalidScale { unit: &'static str, scale: f64 },
}

/// Immutable registry of units and prefixes
///
/// Names and aliases are indexed up front; since they are unique the
/// result is the same as scanning the table in order.
#[derive(Debug, Clone)]
pub struct Catalog {
    units: Vec<Unit>,
    prefixes: Vec<Prefix>,
    index: HashMap<&'static str, usize>,
}

impl Catalog {
    /// Build a catalog, checking that every name and alias is unique,
    /// lowercase, and that every scale is usable
    pub fn new(units: &[Unit], prefixes: &[Prefix]) -> Result<Self, CatalogError> {
        let mut seen: HashMap<&'static str, &'static str> = HashMap::new();

        for unit in units {
            if !unit.scale.is_finite() || unit.scale <= 0.0 || !unit.offset.is_finite() {
                return Err(CatalogError::InvalidScale { unit: unit.name, scale: unit.scale });
            }

            for name in unit.names() {
                if name.is_empty() || name.to_lowercase() != name {
                    return Err(CatalogError::NotLowercase(name));
                }
                if let Some(first) = seen.insert(name, unit.name) {
                    return Err(CatalogError::DuplicateName { name, first, second: unit.name });
                }
            }
        }

        Ok(Self::build(units, prefixes))
    }

    /// The standard catalog
    pub fn standard() -> &'static Catalog {
        &CATALOG
    }

    fn build(units: &[Unit], prefixes: &[Prefix]) -> Self {
        let mut index = HashMap::new();
        for (i, unit) in units.iter().enumerate() {
            for name in unit.names() {
                // First entry wins, as with a linear scan
                index.entry(name).or_insert(i);
            }
        }

        Catalog {
            units: units.to_vec(),
            prefixes: prefixes.to_vec(),
            index,
        }
    }

    /// Exact lookup by name or alias (already lowercase)
    pub fn get(&self, name: &str) -> Option<&Unit> {
        self.index.get(name).map(|&i| &self.units[i])
    }

    /// Resolve a user token to a unit, stripping one metric prefix if needed
    ///
    /// Exact names always win over prefixed readings, and a prefix is
    /// only accepted in front of a metric unit.
    pub fn resolve(&self, token: &str) -> Option<ResolvedUnit<'_>> {
        // U+00B5 (keyboard micro sign) reads as the Greek mu in the table
        let token = token.to_lowercase().replace('\u{b5}', "\u{3bc}");

        if let Some(unit) = self.get(&token) {
            return Some(ResolvedUnit::new(unit, &Prefix::IDENTITY));
        }

        let (rest, prefix) = strip_prefix(&token, &self.prefixes)?;
        let unit = self.get(rest)?;
        if !unit.metric {
            trace!(token = %token, unit = unit.name, "prefix rejected on non-metric unit");
            return None;
        }

        trace!(token = %token, prefix = prefix.name, unit = unit.name, "resolved prefixed unit");
        Some(ResolvedUnit::new(unit, prefix))
    }

    /// All units in catalog order
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Canonical names in catalog order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.units.iter().map(|u| u.name)
    }
}
