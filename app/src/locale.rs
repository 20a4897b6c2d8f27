//! Display formatting for amounts and timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cents::Cents;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "de-DE")]
    DeDe,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }
}

/// Formats amounts and timestamps for one locale and currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Formatter {
    pub locale: Locale,
    pub currency: Currency,
}

impl Locale {
    /// BCP 47 language tag.
    pub fn tag(self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::EnGb => "en-GB",
            Locale::DeDe => "de-DE",
        }
    }

    fn separators(self) -> (char, char) {
        match self {
            Locale::EnUs | Locale::EnGb => (',', '.'),
            Locale::DeDe => ('.', ','),
        }
    }

    fn timestamp_pattern(self) -> &'static str {
        match self {
            Locale::EnUs => "%b %-d, %Y, %-I:%M %p",
            Locale::EnGb => "%-d %b %Y, %H:%M",
            Locale::DeDe => "%d.%m.%Y, %H:%M",
        }
    }
}

impl Formatter {
    pub fn new(locale: Locale, currency: Currency) -> Self {
        Self { locale, currency }
    }

    /// Formats an amount, e.g. `$1,234.56` or `-1.234,56 €`.
    pub fn amount(&self, amount: Cents) -> String {
        let sign = if amount.0 < 0 { "-" } else { "" };
        self.unsigned(sign, amount)
    }

    /// Formats an amount with an explicit sign, e.g. `+$5.00` or `-$5.00`.
    pub fn signed_amount(&self, amount: Cents) -> String {
        let sign = if amount.0 < 0 { "-" } else { "+" };
        self.unsigned(sign, amount)
    }

    pub fn timestamp(&self, timestamp: &DateTime<Utc>) -> String {
        timestamp
            .format(self.locale.timestamp_pattern())
            .to_string()
    }

    fn unsigned(&self, sign: &str, amount: Cents) -> String {
        let magnitude = amount.0.unsigned_abs();
        let (group, decimal) = self.locale.separators();
        let number = format!(
            "{}{}{:02}",
            group_digits(magnitude / 100, group),
            decimal,
            magnitude % 100
        );
        let symbol = self.currency.symbol();
        match self.locale {
            Locale::EnUs | Locale::EnGb => format!("{sign}{symbol}{number}"),
            Locale::DeDe => format!("{sign}{number}\u{a0}{symbol}"),
        }
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case(Locale::EnUs, Currency::Usd, 0, "$0.00")]
    #[case(Locale::EnUs, Currency::Usd, 5, "$0.05")]
    #[case(Locale::EnUs, Currency::Usd, 12500, "$125.00")]
    #[case(Locale::EnUs, Currency::Usd, 123456789, "$1,234,567.89")]
    #[case(Locale::EnUs, Currency::Usd, -50, "-$0.50")]
    #[case(Locale::EnGb, Currency::Gbp, 100000, "£1,000.00")]
    #[case(Locale::DeDe, Currency::Eur, 123456, "1.234,56\u{a0}€")]
    #[case(Locale::DeDe, Currency::Eur, -865, "-8,65\u{a0}€")]
    fn formats_amounts(
        #[case] locale: Locale,
        #[case] currency: Currency,
        #[case] cents: i64,
        #[case] expected: &str,
    ) {
        assert_eq!(Formatter::new(locale, currency).amount(Cents(cents)), expected);
    }

    #[test]
    fn formats_signed_amounts() {
        let formatter = Formatter::default();
        assert_eq!(formatter.signed_amount(Cents(500)), "+$5.00");
        assert_eq!(formatter.signed_amount(Cents(-500)), "-$5.00");
    }

    #[test]
    fn formats_extreme_amounts() {
        assert_eq!(
            Formatter::default().amount(Cents(i64::MIN)),
            "-$92,233,720,368,547,758.08"
        );
    }

    #[rstest]
    #[case(Locale::EnUs, "Jan 5, 2024, 3:07 PM")]
    #[case(Locale::EnGb, "5 Jan 2024, 15:07")]
    #[case(Locale::DeDe, "05.01.2024, 15:07")]
    fn formats_timestamps(#[case] locale: Locale, #[case] expected: &str) {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 5, 15, 7, 30).unwrap();
        let formatter = Formatter::new(locale, Currency::Usd);
        assert_eq!(formatter.timestamp(&timestamp), expected);
    }

    #[test]
    fn deserializes_config_names() {
        let locale: Locale = serde_json::from_str("\"de-DE\"").unwrap();
        let currency: Currency = serde_json::from_str("\"GBP\"").unwrap();
        assert_eq!(locale, Locale::DeDe);
        assert_eq!(currency, Currency::Gbp);
    }
}
