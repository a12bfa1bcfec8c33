//! Conversion engine
//!
//! Every conversion goes through the dimension's base unit:
//!
//! ```text
//! base   = (value + from.offset) * from.scale
//! result = base / to.scale - to.offset
//! result = result * 10^(from.prefix - to.prefix)
//! ```

use std::fmt;
use serde::Serialize;
use tracing::debug;
use crate::{Dimension, Catalog};
use crate::parse::parse_input;
use crate::unit::{ConversionError, Side};
use crate::units::ResolvedUnit;

/// Default number of digits after the decimal point when printing
pub const DEFAULT_PRECISION: usize = 6;

/// Knobs for the conversion engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Permit metric prefixes on units with an offset (e.g. millikelvin).
    ///
    /// The prefix is applied after the affine step, so the result is only
    /// meaningful when both sides carry the same offset.
    pub allow_affine_prefix: bool,
}

/// One side of a finished conversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Endpoint {
    pub prefix: &'static str,
    pub unit: &'static str,
    pub dimension: Dimension,
}

impl From<ResolvedUnit<'_>> for Endpoint {
    fn from(r: ResolvedUnit<'_>) -> Self {
        Endpoint {
            prefix: r.prefix.name,
            unit: r.unit.name,
            dimension: r.unit.dimension,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.unit)
    }
}

/// A completed request: `value from => result to`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Conversion {
    pub value: f64,
    pub from: Endpoint,
    pub result: f64,
    pub to: Endpoint,
}

impl Conversion {
    /// Render with a fixed number of decimals
    pub fn format(&self, precision: usize) -> String {
        format!(
            "{:.p$} {} => {:.p$} {}",
            self.value, self.from, self.result, self.to,
            p = precision
        )
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(DEFAULT_PRECISION))
    }
}

/// Resolves and converts against a catalog
#[derive(Debug, Clone, Copy)]
pub struct Converter<'c> {
    catalog: &'c Catalog,
    options: ConvertOptions,
}

impl<'c> Converter<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Converter { catalog, options: ConvertOptions::default() }
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Resolve a token, naming the side it came from on failure
    pub fn resolve(&self, token: &str, side: Side) -> Result<ResolvedUnit<'c>, ConversionError> {
        self.catalog.resolve(token).ok_or_else(|| ConversionError::UnknownUnit {
            side,
            token: token.to_string(),
        })
    }

    /// Convert `value` between two resolved units of the same dimension
    pub fn convert(
        &self,
        value: f64,
        from: &ResolvedUnit<'_>,
        to: &ResolvedUnit<'_>,
    ) -> Result<f64, ConversionError> {
        if !from.unit.is_compatible(to.unit) {
            return Err(ConversionError::DimensionMismatch {
                from: from.unit.dimension,
                to: to.unit.dimension,
            });
        }

        if !self.options.allow_affine_prefix {
            for side in [from, to] {
                if side.unit.has_offset() && !side.prefix.is_identity() {
                    return Err(ConversionError::AffinePrefix {
                        prefix: side.prefix.name,
                        unit: side.unit.name,
                    });
                }
            }
        }

        if from.same_as(to) {
            return Ok(value);
        }

        let base = from.unit.to_base(value);
        let result = to.unit.from_base(base);
        Ok(result * 10f64.powi(from.prefix.power - to.prefix.power))
    }

    /// Tokenize, resolve and convert one request line
    ///
    /// Failures are reported in pipeline order: tokenizing, start unit,
    /// end unit, then the conversion itself.
    pub fn convert_line(&self, line: &str) -> Result<Conversion, ConversionError> {
        let input = parse_input(line)?;
        let from = self.resolve(&input.from, Side::Start)?;
        let to = self.resolve(&input.to, Side::End)?;

        let result = self.convert(input.value, &from, &to)?;
        debug!(value = input.value, from = %from, to = %to, result, "converted");

        Ok(Conversion {
            value: input.value,
            from: from.into(),
            result,
            to: to.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-6;

    fn converter() -> Converter<'static> {
        Converter::new(Catalog::standard())
    }

    fn convert(line: &str) -> Result<f64, ConversionError> {
        converter().convert_line(line).map(|c| c.result)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= TOLERANCE * expected.abs().max(1.0),
            "expected {}, got {}", expected, actual
        );
    }

    #[test]
    fn test_miles_to_feet() {
        assert_close(convert("12 mi => ft").unwrap(), 63360.0);
        let c = converter().convert_line("12 mi => ft").unwrap();
        assert_eq!(c.to_string(), "12.000000 mile => 63360.000000 foot");
    }

    #[test]
    fn test_celsius_to_fahrenheit() {
        let c = converter().convert_line("0 c => f").unwrap();
        assert_close(c.result, 32.0);
        assert_eq!(c.format(6), "0.000000 celsius => 32.000000 fahrenheit");

        assert_close(convert("100 c => f").unwrap(), 212.0);
        assert_close(convert("-40 c => f").unwrap(), -40.0);
        assert_close(convert("212 f => c").unwrap(), 100.0);
    }

    #[test]
    fn test_kelvin() {
        assert_close(convert("0 c => k").unwrap(), 273.15);
        assert_close(convert("32 f => kelvin").unwrap(), 273.15);
        assert_close(convert("0 k => c").unwrap(), -273.15);
    }

    #[test]
    fn test_prefixed_source() {
        let c = converter().convert_line("1 kg => g").unwrap();
        assert_close(c.result, 1000.0);
        assert_eq!(c.from.prefix, "kilo");
        assert_eq!(c.from.unit, "gram");
        assert_eq!(c.to_string(), "1.000000 kilogram => 1000.000000 gram");
    }

    #[test]
    fn test_prefixed_both_sides() {
        assert_close(convert("2.5 km => cm").unwrap(), 250000.0);
        assert_close(convert("1 mile => km").unwrap(), 1.609344);
        assert_close(convert("1 lb => kg").unwrap(), 0.45359237);
    }

    #[test]
    fn test_other_units() {
        assert_close(convert("1 yd => in").unwrap(), 36.0);
        assert_close(convert("1000 mil => in").unwrap(), 1.0);
        assert_close(convert("16 oz => lb").unwrap(), 1.0);
        assert_close(convert("1 tonne => kg").unwrap(), 1000.0);
    }

    #[test]
    fn test_identity_is_exact() {
        let conv = converter();
        for unit in Catalog::standard().units() {
            let r = Catalog::standard().resolve(unit.name).unwrap();
            for v in [0.0, 1.0, -17.3, 98.6, 1e12] {
                assert_eq!(conv.convert(v, &r, &r).unwrap(), v, "{}", unit.name);
            }
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        assert_eq!(
            convert("5 meter => gram"),
            Err(ConversionError::DimensionMismatch {
                from: Dimension::Length,
                to: Dimension::Mass,
            })
        );
        assert_eq!(
            convert("5 c => kg").unwrap_err().to_string(),
            "Dimension mismatch: `temperature` vs `mass`"
        );
    }

    #[test]
    fn test_missing_separator() {
        assert_eq!(convert("5 meter feet"), Err(ConversionError::MissingSeparator));
    }

    #[test]
    fn test_unknown_units_reported_in_order() {
        assert_eq!(
            convert("1 parsec => furlong"),
            Err(ConversionError::UnknownUnit { side: Side::Start, token: "parsec".into() })
        );
        assert_eq!(
            convert("1 m => furlong"),
            Err(ConversionError::UnknownUnit { side: Side::End, token: "furlong".into() })
        );
    }

    #[test]
    fn test_unknown_keeps_raw_token() {
        assert_eq!(
            convert("1 KiloMile => m").unwrap_err().to_string(),
            "Unknown start unit `KiloMile`"
        );
    }

    #[test]
    fn test_affine_prefix_rejected_by_default() {
        assert_eq!(
            convert("1000 mk => c"),
            Err(ConversionError::AffinePrefix { prefix: "milli", unit: "kelvin" })
        );
        assert_eq!(
            convert("1 c => mk"),
            Err(ConversionError::AffinePrefix { prefix: "milli", unit: "kelvin" })
        );
    }

    #[test]
    fn test_affine_prefix_allowed_uses_plain_formula() {
        let conv = converter().with_options(ConvertOptions { allow_affine_prefix: true });

        // (1000 - 273.15) * 1 / 1 - 0, then scaled by 10^-3
        let r = conv.convert_line("1000 mk => c").unwrap();
        assert_close(r.result, 0.72685);

        // Same unit on both sides still scales cleanly
        let r = conv.convert_line("1 kk => k").unwrap();
        assert_close(r.result, 1000.0);
    }

    #[test]
    fn test_serialize_conversion() {
        let c = converter().convert_line("1 kg => g").unwrap();
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["from"]["prefix"], "kilo");
        assert_eq!(json["from"]["unit"], "gram");
        assert_eq!(json["to"]["dimension"], "mass");
        assert_eq!(json["result"], 1000.0);
    }
}
