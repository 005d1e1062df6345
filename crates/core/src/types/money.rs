//! Monetary amounts as reported by the commerce backend.
//!
//! Amounts stay decimal strings end to end so no precision is lost between
//! the upstream API and the rendered price. Arithmetic and comparisons go
//! through [`rust_decimal::Decimal`].

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Amount used when the upstream record has none.
pub const DEFAULT_AMOUNT: &str = "0";

/// ISO 4217 code used when the upstream record has none.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Monetary amount with currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Default for Money {
    fn default() -> Self {
        Self {
            amount: DEFAULT_AMOUNT.to_string(),
            currency_code: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl Money {
    /// Create a money value from an amount string and currency code.
    #[must_use]
    pub fn new(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency_code: currency_code.into(),
        }
    }

    /// Build a money value from optional upstream parts.
    ///
    /// Missing or empty fields fall back to `"0"` and `"USD"` independently.
    #[must_use]
    pub fn from_parts(amount: Option<&str>, currency_code: Option<&str>) -> Self {
        Self {
            amount: amount
                .filter(|a| !a.trim().is_empty())
                .unwrap_or(DEFAULT_AMOUNT)
                .to_string(),
            currency_code: currency_code
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(DEFAULT_CURRENCY)
                .to_string(),
        }
    }

    /// Parse the amount as a decimal, if it is one.
    #[must_use]
    pub fn decimal(&self) -> Option<Decimal> {
        Decimal::from_str(self.amount.trim()).ok()
    }

    /// Format for display (e.g., "$19.99").
    ///
    /// Unparsable amounts render as zero.
    #[must_use]
    pub fn format(&self) -> String {
        let mut amount = self
            .decimal()
            .unwrap_or_default()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(2);

        match currency_symbol(&self.currency_code) {
            Some(symbol) if amount.is_sign_negative() => format!("-{symbol}{}", amount.abs()),
            Some(symbol) => format!("{symbol}{amount}"),
            None => format!("{amount} {}", self.currency_code),
        }
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero_usd() {
        let money = Money::default();
        assert_eq!(money.amount, "0");
        assert_eq!(money.currency_code, "USD");
    }

    #[test]
    fn test_from_parts_defaults_each_field() {
        assert_eq!(Money::from_parts(None, None), Money::default());
        assert_eq!(
            Money::from_parts(Some("12.50"), None),
            Money::new("12.50", "USD")
        );
        assert_eq!(
            Money::from_parts(Some(""), Some("EUR")),
            Money::new("0", "EUR")
        );
    }

    #[test]
    fn test_decimal_parsing() {
        assert_eq!(
            Money::new("19.99", "USD").decimal(),
            Some(Decimal::new(1999, 2))
        );
        assert_eq!(Money::new("n/a", "USD").decimal(), None);
    }

    #[test]
    fn test_format_known_currencies() {
        assert_eq!(Money::new("19.9", "USD").format(), "$19.90");
        assert_eq!(Money::new("5", "EUR").format(), "€5.00");
        assert_eq!(Money::new("3.505", "GBP").format(), "£3.51");
    }

    #[test]
    fn test_format_unknown_currency_uses_code() {
        assert_eq!(Money::new("12", "CAD").format(), "12.00 CAD");
    }

    #[test]
    fn test_format_garbage_amount_is_zero() {
        assert_eq!(Money::new("abc", "USD").format(), "$0.00");
    }
}
