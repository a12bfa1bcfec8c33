//! ucon units - unit resolution and conversion
//!
//! Converts requests such as `12 mi => ft` or `1 kg => lb`.
//!
//! Pipeline:
//! - `parse`: split a line into value, start token and end token
//! - `units`: resolve tokens against the catalog, stripping a metric
//!   prefix (`km`, `milligram`) when the unit allows it
//! - `convert`: check dimensions and convert through the base unit
//!
//! Dimensions:
//! - Length (meter, mile, inch, foot, yard, thou, league)
//! - Mass (gram, tonne, pound, ounce)
//! - Temperature (celsius, fahrenheit, kelvin)

mod dimension;
mod unit;
mod prefix;
mod units;
mod parse;
mod convert;

pub use dimension::Dimension;
pub use unit::{Unit, ConversionError, Side};
pub use prefix::{Prefix, PREFIXES, strip_prefix};
pub use units::{Catalog, CatalogError, ResolvedUnit, UNITS, CATALOG};
pub use parse::{parse_input, ParsedInput, SEPARATOR};
pub use convert::{Converter, ConvertOptions, Conversion, Endpoint, DEFAULT_PRECISION};

/// Convert one request line against the standard catalog
pub fn convert_line(line: &str) -> Result<Conversion, ConversionError> {
    Converter::new(Catalog::standard()).convert_line(line)
}
