//! Value coercion.
//!
//! Every textual value first goes through the yes/no token mapping. Fields
//! of a numeric class then have their remaining text parsed as a number;
//! values already normalized to `"yes"` or `"no"` are left alone.

use septoctor_model::FieldValue;
use septoctor_standards::ValueClass;

const TRUE_TOKENS: &[&str] = &["yes", "y", "true", "1"];
const FALSE_TOKENS: &[&str] = &["no", "n", "false", "0"];

/// Coerces a resolved value for a field of the given class.
pub fn coerce_value(class: ValueClass, value: &FieldValue) -> FieldValue {
    let value = coerce_boolean(value);
    if class.is_numeric() && !is_yes_no(&value) {
        coerce_numeric(&value)
    } else {
        value
    }
}

fn is_yes_no(value: &FieldValue) -> bool {
    matches!(value.as_text(), Some("yes" | "no"))
}

/// Maps yes/no style tokens to `"yes"` or `"no"`.
///
/// Matching is case-insensitive and ignores surrounding whitespace. Numbers
/// and unrecognized text pass through unchanged.
pub fn coerce_boolean(value: &FieldValue) -> FieldValue {
    let FieldValue::Text(text) = value else {
        return value.clone();
    };
    let token = text.trim().to_lowercase();
    if TRUE_TOKENS.contains(&token.as_str()) {
        FieldValue::text("yes")
    } else if FALSE_TOKENS.contains(&token.as_str()) {
        FieldValue::text("no")
    } else {
        value.clone()
    }
}

/// Replaces text with its leading number; text without one is kept.
pub fn coerce_numeric(value: &FieldValue) -> FieldValue {
    match value {
        FieldValue::Text(text) => parse_leading_number(text)
            .map(FieldValue::Number)
            .unwrap_or_else(|| value.clone()),
        FieldValue::Number(_) => value.clone(),
    }
}

/// Parses the longest decimal prefix of `text` after leading whitespace.
///
/// `"2450 g"` gives 2450, `".5"` gives 0.5, `"1e3"` gives 1000. Returns `None`
/// when no digits lead the text or the result is not finite.
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_tokens() {
        for raw in ["Y", "yes", " TRUE ", "1"] {
            assert_eq!(coerce_boolean(&FieldValue::text(raw)), FieldValue::text("yes"));
        }
        for raw in ["n", "No", "false", "0"] {
            assert_eq!(coerce_boolean(&FieldValue::text(raw)), FieldValue::text("no"));
        }
        assert_eq!(
            coerce_boolean(&FieldValue::text("maybe")),
            FieldValue::text("maybe")
        );
    }

    #[test]
    fn test_boolean_keeps_numbers() {
        assert_eq!(
            coerce_boolean(&FieldValue::Number(1.0)),
            FieldValue::Number(1.0)
        );
    }

    #[test]
    fn test_leading_number_prefixes() {
        assert_eq!(parse_leading_number("1800"), Some(1800.0));
        assert_eq!(parse_leading_number("  2450 g"), Some(2450.0));
        assert_eq!(parse_leading_number("37.5C"), Some(37.5));
        assert_eq!(parse_leading_number("-0.25"), Some(-0.25));
        assert_eq!(parse_leading_number(".5"), Some(0.5));
        assert_eq!(parse_leading_number("5."), Some(5.0));
        assert_eq!(parse_leading_number("1e3 units"), Some(1000.0));
        assert_eq!(parse_leading_number("2e"), Some(2.0));
        assert_eq!(parse_leading_number("3.2.1"), Some(3.2));
    }

    #[test]
    fn test_leading_number_rejections() {
        assert_eq!(parse_leading_number(""), None);
        assert_eq!(parse_leading_number("abc"), None);
        assert_eq!(parse_leading_number("g 2450"), None);
        assert_eq!(parse_leading_number("-"), None);
        assert_eq!(parse_leading_number("."), None);
        assert_eq!(parse_leading_number("Infinity"), None);
        assert_eq!(parse_leading_number("1e999"), None);
    }

    #[test]
    fn test_numeric_keeps_unparseable_text() {
        assert_eq!(
            coerce_numeric(&FieldValue::text("unknown")),
            FieldValue::text("unknown")
        );
        assert_eq!(coerce_numeric(&FieldValue::text("")), FieldValue::text(""));
        assert_eq!(
            coerce_numeric(&FieldValue::text("150 bpm")),
            FieldValue::Number(150.0)
        );
    }

    #[test]
    fn test_unmatched_text_is_untouched() {
        let value = FieldValue::text(" Female ");
        assert_eq!(coerce_value(ValueClass::FreeText, &value), value);
        assert_eq!(
            coerce_value(ValueClass::BooleanLike, &FieldValue::text("42")),
            FieldValue::text("42")
        );
    }

    #[test]
    fn test_yes_no_tokens_win_over_numeric_parse() {
        assert_eq!(
            coerce_value(ValueClass::Numeric, &FieldValue::text("0")),
            FieldValue::text("no")
        );
        assert_eq!(
            coerce_value(ValueClass::CategoricalSource, &FieldValue::text(" 1 ")),
            FieldValue::text("yes")
        );
        assert_eq!(
            coerce_value(ValueClass::FreeText, &FieldValue::text("N")),
            FieldValue::text("no")
        );
        assert_eq!(
            coerce_value(ValueClass::Numeric, &FieldValue::text("10")),
            FieldValue::Number(10.0)
        );
        assert_eq!(
            coerce_value(ValueClass::Numeric, &FieldValue::Number(0.0)),
            FieldValue::Number(0.0)
        );
    }
}
