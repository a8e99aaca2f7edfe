//! Money amounts as they appear in Timepad payloads.
//!
//! Timepad is inconsistent about numbers: `900`, `900.0` and `"900.00"` all
//! show up depending on the webhook version. Amounts are kept in kopecks so
//! sums stay exact.

use std::fmt;

use serde::Deserialize;

/// Largest accepted amount in kopecks (one quadrillion rubles). Two of them
/// still add up well inside `i64`.
pub const MAX_KOPECKS: i64 = 100_000_000_000_000_000;

/// A non-negative ruble amount stored as whole kopecks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "RawAmount")]
pub struct Amount(i64);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn from_kopecks(kopecks: i64) -> Self {
        Amount(kopecks)
    }

    pub fn from_rubles(rubles: i64) -> Self {
        Amount(rubles * 100)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Sum of two amounts, `None` if it would leave the accepted range.
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0
            .checked_add(rhs.0)
            .filter(|sum| *sum <= MAX_KOPECKS)
            .map(Amount)
    }

    fn from_f64(value: f64) -> Result<Self, String> {
        if !value.is_finite() {
            return Err(format!("amount is not a finite number: {}", value));
        }
        let kopecks = (value * 100.0).round();
        if kopecks < 0.0 {
            return Err(format!("amount is negative: {}", value));
        }
        if kopecks > MAX_KOPECKS as f64 {
            return Err(format!("amount is out of range: {}", value));
        }
        Ok(Amount(kopecks as i64))
    }
}

impl TryFrom<RawAmount> for Amount {
    type Error = String;

    fn try_from(raw: RawAmount) -> Result<Self, Self::Error> {
        match raw {
            RawAmount::Number(n) => Amount::from_f64(n),
            RawAmount::Text(s) => {
                let trimmed = s.trim();
                let parsed: f64 = trimmed
                    .parse()
                    .map_err(|_| format!("amount is not numeric: {:?}", s))?;
                Amount::from_f64(parsed)
            }
        }
    }
}

/// Whole rubles print bare (`900`), anything else with two decimals (`900.50`).
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let (rubles, kopecks) = (abs / 100, abs % 100);
        if kopecks == 0 {
            write!(f, "{}{}", sign, rubles)
        } else {
            write!(f, "{}{}.{:02}", sign, rubles, kopecks)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_numbers_and_strings() {
        let from_int: Amount = serde_json::from_str("900").unwrap();
        let from_float: Amount = serde_json::from_str("900.0").unwrap();
        let from_text: Amount = serde_json::from_str("\"900.00\"").unwrap();

        assert_eq!(from_int, Amount::from_rubles(900));
        assert_eq!(from_float, Amount::from_rubles(900));
        assert_eq!(from_text, Amount::from_rubles(900));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Amount>("\"free\"").is_err());
        assert!(serde_json::from_str::<Amount>("null").is_err());
        assert!(serde_json::from_str::<Amount>("[1]").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::from_rubles(500).to_string(), "500");
        assert_eq!(Amount::from_kopecks(90050).to_string(), "900.50");
        assert_eq!(Amount::from_kopecks(5).to_string(), "0.05");
        assert_eq!(Amount::ZERO.to_string(), "0");
        assert_eq!(Amount::from_kopecks(-150).to_string(), "-1.50");
    }

    #[test]
    fn test_add_is_exact() {
        let a: Amount = serde_json::from_str("\"0.10\"").unwrap();
        let b: Amount = serde_json::from_str("0.20").unwrap();
        assert_eq!(a.checked_add(b).unwrap().to_string(), "0.30");
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(serde_json::from_str::<Amount>("9.2e16").is_err());
        assert!(serde_json::from_str::<Amount>("\"1e300\"").is_err());

        let max = Amount::from_kopecks(MAX_KOPECKS);
        assert!(max.checked_add(Amount::from_kopecks(1)).is_none());
        assert_eq!(max.checked_add(Amount::ZERO), Some(max));
    }

    #[test]
    fn test_rejects_negative() {
        assert!(serde_json::from_str::<Amount>("-100").is_err());
        assert!(serde_json::from_str::<Amount>("\"-0.5\"").is_err());
        // Rounds to zero kopecks
        assert_eq!(serde_json::from_str::<Amount>("-0.001").unwrap(), Amount::ZERO);
    }
}
