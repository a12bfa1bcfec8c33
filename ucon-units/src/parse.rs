//! Input line tokenizing - split "12 mi => ft" into value and unit tokens

use serde::Serialize;
use tracing::debug;
use crate::unit::ConversionError;

/// Separator between the source and destination units
pub const SEPARATOR: &str = "=>";

/// One tokenized request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedInput {
    pub value: f64,
    pub from: String,
    pub to: String,
}

/// Tokenize a request line
///
/// Anything before the first digit is skipped, so "about 12 mi => ft"
/// reads the same as "12 mi => ft". Unit tokens end at whitespace or `=`.
pub fn parse_input(line: &str) -> Result<ParsedInput, ConversionError> {
    let (value, rest) = read_number(line).ok_or(ConversionError::MissingValue)?;
    let (from, rest) = read_token(rest);

    let rest = rest
        .trim_start()
        .strip_prefix(SEPARATOR)
        .ok_or(ConversionError::MissingSeparator)?;

    let (to, rest) = read_token(rest);
    if !rest.trim().is_empty() {
        debug!(trailing = rest.trim(), "ignoring text after destination unit");
    }

    Ok(ParsedInput {
        value,
        from: from.to_string(),
        to: to.to_string(),
    })
}

/// Read the first numeric literal, returning it and the text after it
///
/// The literal is the run of digits and dots starting at the first digit,
/// cut at the second dot. A dot and then a minus sign directly in front of
/// the digits are part of it.
fn read_number(s: &str) -> Option<(f64, &str)> {
    let digits = s.find(|c: char| c.is_ascii_digit())?;
    let run = s[digits..]
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .map_or(s.len(), |n| digits + n);

    let mut start = digits;
    if s[..start].ends_with('.') {
        start -= 1;
    }
    let negative = s[..start].ends_with('-');

    let literal = &s[start..run];
    let literal = match literal.match_indices('.').nth(1) {
        Some((second_dot, _)) => &literal[..second_dot],
        None => literal,
    };

    let value: f64 = literal.parse().ok()?;
    Some((if negative { -value } else { value }, &s[run..]))
}

/// Read one unit token after optional whitespace
fn read_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    let end = s
        .find(|c: char| c.is_whitespace() || c == '=')
        .unwrap_or(s.len());
    s.split_at(end)
}
