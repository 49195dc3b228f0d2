use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use agency_core::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("amount {0} is negative")]
    Negative(Decimal),
}

impl From<MoneyError> for ServiceError {
    fn from(e: MoneyError) -> Self {
        ServiceError::Validation(e.to_string())
    }
}

/// A non-negative monetary amount.
///
/// Stored exactly as a decimal string; `Display` renders the two-decimal
/// currency form (`$12.50`) with banker's rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount));
        }
        Ok(Self(amount))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Money::new(amount)
    }
}

impl From<Money> for Decimal {
    fn from(m: Money) -> Self {
        m.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0.round_dp(2))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn rejects_negative() {
        assert!(Money::new(dec("0")).is_ok());
        assert!(Money::new(dec("19.99")).is_ok());
        assert_eq!(
            Money::new(dec("-0.01")).unwrap_err(),
            MoneyError::Negative(dec("-0.01"))
        );
    }

    #[test]
    fn display_rounds_to_cents() {
        assert_eq!(Money::new(dec("12.5")).unwrap().to_string(), "$12.50");
        assert_eq!(Money::new(dec("100")).unwrap().to_string(), "$100.00");
        assert_eq!(Money::new(dec("0.125")).unwrap().to_string(), "$0.12");
        assert_eq!(Money::new(dec("0.135")).unwrap().to_string(), "$0.14");
    }

    #[test]
    fn no_float_drift() {
        let a = Money::new(dec("0.1")).unwrap().amount();
        let b = Money::new(dec("0.2")).unwrap().amount();
        assert_eq!(a + b, dec("0.3"));
    }

    #[test]
    fn serde_keeps_exact_value() {
        let m = Money::new(dec("1234.5678")).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "\"1234.5678\"");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);

        assert!(serde_json::from_str::<Money>("\"-5\"").is_err());
    }
}
