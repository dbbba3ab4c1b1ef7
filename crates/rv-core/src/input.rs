//! Lenient parsing of form field text.
//!
//! Numeric fields accept the longest numeric prefix of the input and ignore
//! whatever follows (`"2.5m"` → 2.5). Input with no numeric prefix yields
//! `NaN`, which is written through to the model unchanged; renderers skip
//! geometry that is not finite.
//!
//! Built on `winnow` 0.7.

use winnow::combinator::{alt, opt};
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

/// Parse a float the lenient way. Never fails; returns `NaN` instead.
pub fn parse_float(text: &str) -> f32 {
    let mut rest = text.trim_start();
    match parse_numeric_prefix.parse_next(&mut rest) {
        Ok(v) => v,
        Err(_) => f32::NAN,
    }
}

/// Parse an integer field (e.g. rotation degrees). Fractions are truncated
/// toward zero; `None` when there is no finite numeric prefix.
pub fn parse_degrees(text: &str) -> Option<i32> {
    let v = parse_float(text);
    v.is_finite().then(|| v.trunc() as i32)
}

// ─── Low-level parsers ──────────────────────────────────────────────────

fn parse_numeric_prefix(input: &mut &str) -> ModalResult<f32> {
    let start = *input;
    let negative = opt(one_of(['+', '-'])).parse_next(input)? == Some('-');

    if input.starts_with("Infinity") {
        *input = &input["Infinity".len()..];
        return Ok(if negative {
            f32::NEG_INFINITY
        } else {
            f32::INFINITY
        });
    }

    let mantissa: &str = alt((
        (digits, opt(('.', opt(digits)))).take(),
        ('.', digits).take(),
    ))
    .parse_next(input)?;

    // An incomplete exponent (`1e`) backtracks and is left unconsumed.
    let exponent = opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digits).take())
        .parse_next(input)?;

    let literal = format!("{mantissa}{}", exponent.unwrap_or(""));
    let value = literal
        .parse::<f32>()
        .map_err(|_| winnow::error::ErrMode::Backtrack(ContextError::new()))?;
    log::trace!("lenient number {:?} -> {value}", &start[..start.len() - input.len()]);
    Ok(if negative { -value } else { value })
}

fn digits<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers() {
        assert_eq!(parse_float("5"), 5.0);
        assert_eq!(parse_float("2.5"), 2.5);
        assert_eq!(parse_float("-0.75"), -0.75);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("3."), 3.0);
        assert_eq!(parse_float("  4"), 4.0);
    }

    #[test]
    fn trailing_garbage_is_ignored() {
        assert_eq!(parse_float("12abc"), 12.0);
        assert_eq!(parse_float("2.5m"), 2.5);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float("1e2x"), 100.0);
    }

    #[test]
    fn no_numeric_prefix_is_nan() {
        assert!(parse_float("abc").is_nan());
        assert!(parse_float("").is_nan());
        assert!(parse_float("-").is_nan());
        assert!(parse_float(".").is_nan());
    }

    #[test]
    fn infinity_literal() {
        assert_eq!(parse_float("Infinity"), f32::INFINITY);
        assert_eq!(parse_float("-Infinity"), f32::NEG_INFINITY);
    }

    #[test]
    fn degrees_truncate() {
        assert_eq!(parse_degrees("90"), Some(90));
        assert_eq!(parse_degrees("-45.9"), Some(-45));
        assert_eq!(parse_degrees("north"), None);
    }
}
