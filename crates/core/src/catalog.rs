//! Field validation and characteristics parsing for catalog entities.
//!
//! Multipart form fields arrive as text, so required-field checks and the
//! characteristics JSON shape are validated here before anything touches
//! the database.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One name/value attribute pair attached to a product.
///
/// Characteristics are an ordered sequence; order is preserved through
/// storage (JSONB array) and back out in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Characteristic {
    pub name: String,
    pub value: String,
}

/// Validate that a required text field is present and non-empty.
///
/// Trims before checking so a whitespace-only value is rejected too.
pub fn require_field(value: Option<&str>, field: &str) -> Result<String, CoreError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
        _ => Err(CoreError::Validation(format!(
            "Missing required field '{field}'"
        ))),
    }
}

/// Parse the JSON-encoded characteristics field of a product form.
///
/// The frontend submits characteristics as a JSON array of
/// `{ "name": ..., "value": ... }` objects in a single text field. A parse
/// failure or wrong shape is a validation error, not an internal one.
pub fn parse_characteristics(raw: &str) -> Result<Vec<Characteristic>, CoreError> {
    serde_json::from_str(raw).map_err(|e| {
        CoreError::Validation(format!("Malformed characteristics: {e}"))
    })
}

/// Parse a non-negative quantity from a form text field.
pub fn parse_quantity(raw: &str) -> Result<i32, CoreError> {
    let quantity: i32 = raw
        .trim()
        .parse()
        .map_err(|_| CoreError::Validation(format!("Invalid quantity '{raw}'")))?;
    if quantity < 0 {
        return Err(CoreError::Validation(
            "Quantity must not be negative".into(),
        ));
    }
    Ok(quantity)
}

/// Normalize an optional form value: absent or empty both mean "not given".
///
/// Patch endpoints treat an empty text field the same as an omitted one
/// (the field keeps its stored value), so empty strings collapse to `None`
/// at the boundary and the rest of the code only deals with `Option`.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
