//! Face value.
//!
//! The displayed value of a clock face, together with its derived digit
//! array and the minimum digit count. The minimum never shrinks across
//! [`FaceValue::copy`], so a counter that once showed three digits keeps
//! showing three.

use crate::digitize::{DigitizeOptions, digitize};
use crate::types::Value;

/// A face's displayed value with its digit breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceValue {
    value: Value,
    digits: Vec<String>,
    minimum_digits: usize,
}

impl FaceValue {
    /// Wrap a value with no minimum digit count.
    pub fn new(value: impl Into<Value>) -> Self {
        Self::with_minimum_digits(value, 0)
    }

    /// Wrap a value, padding its digits to at least `minimum_digits`.
    pub fn with_minimum_digits(value: impl Into<Value>, minimum_digits: usize) -> Self {
        let value = value.into();
        let digits = digitize(
            &value,
            &DigitizeOptions {
                minimum_digits,
                ..Default::default()
            },
        );
        let minimum_digits = minimum_digits.max(digits.len());
        FaceValue {
            value,
            digits,
            minimum_digits,
        }
    }

    /// The wrapped value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The derived digit array.
    pub fn digits(&self) -> &[String] {
        &self.digits
    }

    /// One digit by position, if present.
    pub fn digit(&self, index: usize) -> Option<&str> {
        self.digits.get(index).map(String::as_str)
    }

    /// The effective minimum digit count.
    pub fn minimum_digits(&self) -> usize {
        self.minimum_digits
    }

    /// A new instance holding `value`, carrying this instance's digit
    /// minimum forward (grown to the current digit count).
    pub fn copy(&self, value: impl Into<Value>) -> FaceValue {
        Self::with_minimum_digits(value, self.minimum_digits.max(self.digits.len()))
    }
}

impl From<Value> for FaceValue {
    fn from(value: Value) -> Self {
        FaceValue::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_derive_from_the_value() {
        let fv = FaceValue::new(7);
        assert_eq!(fv.digits(), ["0", "7"]);
        assert_eq!(fv.minimum_digits(), 2);
    }

    #[test]
    fn copy_keeps_the_digit_minimum() {
        let fv = FaceValue::new(100);
        assert_eq!(fv.digits(), ["1", "0", "0"]);

        let next = fv.copy(99);
        assert_eq!(next.digits(), ["0", "9", "9"]);
        assert_eq!(next.minimum_digits(), 3);
    }

    #[test]
    fn explicit_minimum_pads() {
        let fv = FaceValue::with_minimum_digits(5, 4);
        assert_eq!(fv.digits(), ["0", "0", "0", "5"]);
    }

    #[test]
    fn structural_equality() {
        assert_eq!(FaceValue::new(5), FaceValue::new(5));
        assert_ne!(FaceValue::new(5), FaceValue::new(6));
    }
}
