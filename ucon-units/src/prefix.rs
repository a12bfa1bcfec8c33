//! Metric prefixes

use std::fmt;
use serde::Serialize;

/// A decimal metric prefix such as kilo (k, 10^3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Prefix {
    pub name: &'static str,
    pub symbol: &'static str,
    pub power: i32,
}

impl Prefix {
    /// The "no prefix" prefix
    pub const IDENTITY: Prefix = Prefix::new("", "", 0);

    pub const fn new(name: &'static str, symbol: &'static str, power: i32) -> Self {
        Prefix { name, symbol, power }
    }

    pub fn is_identity(&self) -> bool {
        self.power == 0 && self.name.is_empty()
    }
}

impl Default for Prefix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// SI prefixes, scanned in this order when stripping
///
/// Deca must precede deci so that "dam" strips "da" rather than "d".
#[rustfmt::skip]
pub static PREFIXES: [Prefix; 24] = [
    Prefix::new("quetta", "Q",  30),
    Prefix::new("ronna",  "R",  27),
    Prefix::new("yotta",  "Y",  24),
    Prefix::new("zetta",  "Z",  21),
    Prefix::new("exa",    "E",  18),
    Prefix::new("peta",   "P",  15),
    Prefix::new("tera",   "T",  12),
    Prefix::new("giga",   "G",  9),
    Prefix::new("mega",   "M",  6),
    Prefix::new("kilo",   "k",  3),
    Prefix::new("hecto",  "h",  2),
    Prefix::new("deca",   "da", 1),
    Prefix::new("deci",   "d", -1),
    Prefix::new("centi",  "c", -2),
    Prefix::new("milli",  "m", -3),
    Prefix::new("micro",  "μ", -6),
    Prefix::new("nano",   "n", -9),
    Prefix::new("pico",   "p", -12),
    Prefix::new("femto",  "f", -15),
    Prefix::new("atto",   "a", -18),
    Prefix::new("zepto",  "z", -21),
    Prefix::new("yocto",  "y", -24),
    Prefix::new("ronto",  "r", -27),
    Prefix::new("quecto", "q", -30),
];

/// Strip the first matching prefix from `token`
///
/// For each prefix in table order the name is tried before the symbol.
/// Only one prefix is ever stripped.
pub fn strip_prefix<'t, 'p>(token: &'t str, prefixes: &'p [Prefix]) -> Option<(&'t str, &'p Prefix)> {
    prefixes.iter().find_map(|prefix| {
        [prefix.name, prefix.symbol]
            .into_iter()
            .filter(|s| !s.is_empty())
            .find_map(|s| token.strip_prefix(s))
            .map(|rest| (rest, prefix))
    })
}
