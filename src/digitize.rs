//! Digit derivation.
//!
//! Turns a display [`Value`] - number, string, or nested sequence - into an
//! ordered sequence of single-character digit strings: nested sequences are
//! deep-flattened, single-character segments get a leading zero, and the
//! whole result is left-padded with zeros to the minimum digit count.

use crate::types::Value;

/// Options for [`digitize`].
#[derive(Debug, Clone)]
pub struct DigitizeOptions {
    /// Left-pad the result with `"0"` up to this many digits.
    pub minimum_digits: usize,
    /// Prepend a zero to single-character segments (`5` -> `05`).
    pub prepend_leading_zero: bool,
}

impl Default for DigitizeOptions {
    fn default() -> Self {
        DigitizeOptions {
            minimum_digits: 0,
            prepend_leading_zero: true,
        }
    }
}

/// Deep-flatten a value into scalar string segments.
fn flatten_into(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::List(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
        scalar => out.push(scalar.to_string()),
    }
}

/// Digitize a value into single-character digit strings.
pub fn digitize(value: &Value, options: &DigitizeOptions) -> Vec<String> {
    let mut segments = Vec::new();
    flatten_into(value, &mut segments);

    let mut digits: Vec<String> = Vec::new();
    for segment in segments {
        let prepend = options.prepend_leading_zero && segment.chars().count() == 1;
        if prepend {
            digits.push("0".to_string());
        }
        digits.extend(segment.chars().map(|c| c.to_string()));
    }

    while digits.len() < options.minimum_digits {
        digits.insert(0, "0".to_string());
    }

    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(value: Value, minimum: usize) -> Vec<String> {
        digitize(
            &value,
            &DigitizeOptions {
                minimum_digits: minimum,
                ..Default::default()
            },
        )
    }

    #[test]
    fn single_digit_gets_leading_zero() {
        assert_eq!(digits(Value::Int(5), 0), vec!["0", "5"]);
    }

    #[test]
    fn multi_digit_splits_into_characters() {
        assert_eq!(digits(Value::Int(123), 0), vec!["1", "2", "3"]);
    }

    #[test]
    fn minimum_pads_from_the_left() {
        assert_eq!(digits(Value::Int(42), 4), vec!["0", "0", "4", "2"]);
    }

    #[test]
    fn nested_lists_flatten_in_order() {
        let value = Value::List(vec![
            Value::Int(12),
            Value::List(vec![Value::Int(34)]),
        ]);
        assert_eq!(digits(value, 0), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn strings_pass_through_characterwise() {
        assert_eq!(digits(Value::from("07"), 0), vec!["0", "7"]);
    }

    #[test]
    fn leading_zero_can_be_disabled() {
        let result = digitize(
            &Value::Int(5),
            &DigitizeOptions {
                minimum_digits: 0,
                prepend_leading_zero: false,
            },
        );
        assert_eq!(result, vec!["5"]);
    }
}
