//! Integer money amounts and parsing of user-entered decimal strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An amount of money in minor currency units.
#[derive(
    Debug, Clone, Copy, Default, PartialOrd, Ord, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cents(pub i64);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("amount is empty")]
    Empty,
    #[error("{0:?} is not a decimal amount")]
    Invalid(String),
    #[error("amount is too large")]
    Overflow,
}

impl Cents {
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Parses a decimal amount such as `12.5`, `-3`, `0,995` into cents, rounding half away
    /// from zero. Both `.` and `,` are accepted as the decimal separator; grouping separators
    /// are not.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ParseError::Empty);
        }
        let invalid = || ParseError::Invalid(s.to_owned());

        let (negative, unsigned) = if let Some(rest) = s.strip_prefix('-') {
            (true, rest)
        } else if let Some(rest) = s.strip_prefix('+') {
            (false, rest)
        } else {
            (false, s)
        };
        let (whole, fraction) = match unsigned.find(|c: char| c == '.' || c == ',') {
            Some(i) => (&unsigned[..i], &unsigned[i + 1..]),
            None => (unsigned, ""),
        };
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(invalid());
        }

        let mut magnitude: i64 = 0;
        for digit in whole.bytes() {
            magnitude = magnitude
                .checked_mul(10)
                .and_then(|m| m.checked_add(i64::from(digit - b'0')))
                .ok_or(ParseError::Overflow)?;
        }
        let mut fraction_digits = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tenths = fraction_digits.next().unwrap_or(0);
        let hundredths = fraction_digits.next().unwrap_or(0);
        let round_up = fraction_digits.next().map_or(false, |d| d >= 5);

        let cents = magnitude
            .checked_mul(100)
            .and_then(|m| m.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
            .ok_or(ParseError::Overflow)?;
        Ok(Self(if negative { -cents } else { cents }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("5", 500)]
    #[case("5.00", 500)]
    #[case("12.5", 1250)]
    #[case("0,99", 99)]
    #[case(".5", 50)]
    #[case("7.", 700)]
    #[case("  3.21 ", 321)]
    #[case("+1.01", 101)]
    #[case("-2.50", -250)]
    #[case("0.005", 1)]
    #[case("0.004", 0)]
    #[case("1.999", 200)]
    #[case("-0.125", -13)]
    fn parses_decimal_amounts(#[case] input: &str, #[case] expected: i64) {
        assert_eq!(Cents::parse(input), Ok(Cents(expected)));
    }

    #[rstest]
    #[case("abc")]
    #[case(".")]
    #[case("1.2.3")]
    #[case("1,000.00")]
    #[case("12abc")]
    #[case("--1")]
    #[case("1e3")]
    fn rejects_malformed_amounts(#[case] input: &str) {
        assert!(matches!(Cents::parse(input), Err(ParseError::Invalid(_))));
    }

    #[test]
    fn rejects_empty_amounts() {
        assert_eq!(Cents::parse("   "), Err(ParseError::Empty));
    }

    #[test]
    fn rejects_amounts_that_overflow() {
        assert_eq!(
            Cents::parse("99999999999999999999"),
            Err(ParseError::Overflow)
        );
        assert_eq!(Cents::parse("92233720368547758.08"), Err(ParseError::Overflow));
    }
}
