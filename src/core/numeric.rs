//! Form input helpers shared by the ledger forms.
//!
//! Numeric inputs never block a save: anything that does not parse to a finite
//! number is stored as `0`. Presence of required fields is checked separately,
//! before coercion.

use crate::errors::{Error, Result};

/// Parses a user-entered number, coercing blank or malformed input to `0`.
#[must_use]
pub fn coerce_number(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Returns the trimmed value, or a validation error naming `field` if it is blank.
pub fn require<'a>(field: &str, input: &'a str) -> Result<&'a str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!("{field} is required")));
    }
    Ok(trimmed)
}

/// Parses a required reference to another row (priest, province).
pub fn require_id(field: &str, input: &str) -> Result<i64> {
    require(field, input)?
        .parse()
        .map_err(|_| Error::validation(format!("{field} must be a valid identifier")))
}

/// Parses a required discriminator and checks it falls in `min..=max`.
pub fn require_discriminator(field: &str, input: &str, (min, max): (i32, i32)) -> Result<i32> {
    let value: i32 = require(field, input)?
        .parse()
        .map_err(|_| Error::validation(format!("{field} must be a number")))?;
    if !(min..=max).contains(&value) {
        return Err(Error::validation(format!(
            "{field} must be between {min} and {max}"
        )));
    }
    Ok(value)
}

/// Trims optional free text, mapping blank input to `None`.
#[must_use]
pub fn optional_text(input: Option<&str>) -> Option<String> {
    input
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
}
