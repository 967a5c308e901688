//! Parses and validates the monetary amount entered in the record form.

use crate::Error;

/// The HTML `pattern` attribute for the amount text input.
///
/// Mirrors [parse_amount]: whole currency units, optionally followed by a
/// comma or period and exactly two decimal digits.
pub const AMOUNT_PATTERN: &str = r"\d+([,.]\d{2})?";

/// Parse a monetary amount entered by the user.
///
/// The accepted forms are bare digits ("1234") or digits followed by a comma
/// or a period and exactly two decimal digits ("1234,56" or "1234.56"). The
/// comma is the canonical display form.
///
/// # Errors
/// Returns [Error::EmptyAmount] for an empty (or whitespace-only) input and
/// [Error::InvalidAmount] for anything else that does not match.
pub fn parse_amount(input: &str) -> Result<f64, Error> {
    let input = input.trim();

    if input.is_empty() {
        return Err(Error::EmptyAmount);
    }

    if !matches_amount_pattern(input) {
        return Err(Error::InvalidAmount(input.to_owned()));
    }

    input
        .replace(',', ".")
        .parse()
        .map_err(|_| Error::InvalidAmount(input.to_owned()))
}

fn matches_amount_pattern(input: &str) -> bool {
    let (whole, decimals) = match input.find([',', '.']) {
        Some(separator_index) => (
            &input[..separator_index],
            Some(&input[separator_index + 1..]),
        ),
        None => (input, None),
    };

    if whole.is_empty() || !whole.bytes().all(|byte| byte.is_ascii_digit()) {
        return false;
    }

    match decimals {
        Some(decimals) => {
            decimals.len() == 2 && decimals.bytes().all(|byte| byte.is_ascii_digit())
        }
        None => true,
    }
}
