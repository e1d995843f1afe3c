//! Money amounts and text-to-number coercion
//!
//! Front ends collect amounts as free text. Coercion happens once, at the
//! boundary where a tagged action becomes an [`crate::Action`]; the reducer
//! only ever sees decimals.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BankError, Result};

/// Account amounts are exact decimals, never floats.
pub type Amount = rust_decimal::Decimal;

/// What to do with text that is not a number
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoercionPolicy {
    /// Malformed text becomes zero
    #[default]
    Lenient,
    /// Malformed text is rejected with [`BankError::InvalidAmount`]
    Strict,
}

impl FromStr for CoercionPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(CoercionPolicy::Lenient),
            "strict" => Ok(CoercionPolicy::Strict),
            _ => Err(format!(
                "Invalid coercion policy: '{}'. Valid options: lenient, strict",
                s
            )),
        }
    }
}

impl std::fmt::Display for CoercionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoercionPolicy::Lenient => write!(f, "lenient"),
            CoercionPolicy::Strict => write!(f, "strict"),
        }
    }
}

/// Coerce user-entered text into an amount
///
/// Empty or whitespace-only text is zero under either policy. Plain and
/// scientific decimal notation are accepted (`"200"`, `"-12.50"`, `"1e3"`).
pub fn coerce_amount(text: &str, policy: CoercionPolicy) -> Result<Amount> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Amount::ZERO);
    }

    match parse_decimal(trimmed) {
        Some(amount) => Ok(amount),
        None => match policy {
            CoercionPolicy::Lenient => {
                tracing::debug!(input = text, "Malformed amount coerced to zero");
                Ok(Amount::ZERO)
            }
            CoercionPolicy::Strict => Err(BankError::InvalidAmount(text.to_string())),
        },
    }
}

fn parse_decimal(text: &str) -> Option<Amount> {
    Amount::from_str(text)
        .ok()
        .or_else(|| Amount::from_scientific(text).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(text: &str) -> Amount {
        Amount::from_str(text).unwrap()
    }

    #[test]
    fn test_empty_input_is_zero() {
        assert_eq!(coerce_amount("", CoercionPolicy::Strict).unwrap(), Amount::ZERO);
        assert_eq!(coerce_amount("   ", CoercionPolicy::Lenient).unwrap(), Amount::ZERO);
    }

    #[test]
    fn test_plain_numbers_parse_exactly() {
        assert_eq!(coerce_amount("200", CoercionPolicy::Strict).unwrap(), amount("200"));
        assert_eq!(coerce_amount(" 12.50 ", CoercionPolicy::Strict).unwrap(), amount("12.5"));
        assert_eq!(coerce_amount("-75", CoercionPolicy::Strict).unwrap(), amount("-75"));
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(coerce_amount("1e3", CoercionPolicy::Strict).unwrap(), amount("1000"));
    }

    #[test]
    fn test_malformed_lenient_is_zero() {
        assert_eq!(coerce_amount("12abc", CoercionPolicy::Lenient).unwrap(), Amount::ZERO);
        assert_eq!(coerce_amount("1.2.3", CoercionPolicy::Lenient).unwrap(), Amount::ZERO);
    }

    #[test]
    fn test_malformed_strict_is_rejected() {
        let err = coerce_amount("12abc", CoercionPolicy::Strict).unwrap_err();
        assert!(matches!(err, BankError::InvalidAmount(ref text) if text == "12abc"));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("lenient".parse::<CoercionPolicy>().unwrap(), CoercionPolicy::Lenient);
        assert_eq!("STRICT".parse::<CoercionPolicy>().unwrap(), CoercionPolicy::Strict);
        assert!("loose".parse::<CoercionPolicy>().is_err());
    }

    #[test]
    fn test_policy_display_round_trips_through_from_str() {
        for policy in [CoercionPolicy::Lenient, CoercionPolicy::Strict] {
            assert_eq!(policy.to_string().parse::<CoercionPolicy>().unwrap(), policy);
        }
    }
}
