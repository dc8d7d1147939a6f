//! Value Objects for weight pricing

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grams in one billed kilogram.
pub const GRAMS_PER_KG: Decimal = Decimal::ONE_THOUSAND;

/// ISO-4217 style currency code, stored upper-cased (`"bdt"` becomes `"BDT"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(value: impl Into<String>) -> Result<Self, CurrencyCodeError> {
        let value = value.into().trim().to_uppercase();
        if value.is_empty() { return Err(CurrencyCodeError::Empty); }
        if value.len() != 3 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CurrencyCodeError::Malformed(value));
        }
        Ok(Self(value))
    }
    pub fn bdt() -> Self { Self("BDT".to_string()) }
    pub fn as_str(&self) -> &str { &self.0 }

    /// Symbol used in front of formatted amounts, if the code has a well known one.
    pub fn symbol(&self) -> Option<&'static str> {
        match self.0.as_str() {
            "BDT" => Some("৳"),
            "USD" => Some("$"),
            "EUR" => Some("€"),
            "GBP" => Some("£"),
            "INR" => Some("₹"),
            _ => None,
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CurrencyCodeError;
    fn try_from(value: String) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self { code.0 }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum CurrencyCodeError { Empty, Malformed(String) }
impl std::error::Error for CurrencyCodeError {}
impl fmt::Display for CurrencyCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "currency code empty"),
            Self::Malformed(v) => write!(f, "currency code must be three letters, got {v:?}"),
        }
    }
}

/// Money value object. Amounts are whole currency units, not cents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money { amount: Decimal, currency: CurrencyCode }

impl Money {
    pub fn new(amount: Decimal, currency: &CurrencyCode) -> Self { Self { amount, currency: currency.clone() } }
    pub fn zero(currency: &CurrencyCode) -> Self { Self::new(Decimal::ZERO, currency) }
    pub fn amount(&self) -> Decimal { self.amount }
    pub fn currency(&self) -> &CurrencyCode { &self.currency }
    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency { return Err(MoneyError::CurrencyMismatch); }
        let amount = self.amount.checked_add(other.amount).ok_or(MoneyError::Overflow)?;
        Ok(Money::new(amount, &self.currency))
    }
    pub fn multiply(&self, qty: u32) -> Result<Money, MoneyError> {
        let amount = self.amount.checked_mul(Decimal::from(qty)).ok_or(MoneyError::Overflow)?;
        Ok(Money::new(amount, &self.currency))
    }
    pub fn is_zero(&self) -> bool { self.amount.is_zero() }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum MoneyError { CurrencyMismatch, Overflow }
impl std::error::Error for MoneyError {}
impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Self::CurrencyMismatch => write!(f, "Currency mismatch"), Self::Overflow => write!(f, "Amount too large") }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_code_normalized() {
        let code = CurrencyCode::new(" bdt ").unwrap();
        assert_eq!(code.as_str(), "BDT");
        assert_eq!(code.symbol(), Some("৳"));
    }

    #[test]
    fn test_currency_code_rejects_malformed() {
        assert_eq!(CurrencyCode::new(""), Err(CurrencyCodeError::Empty));
        assert!(matches!(CurrencyCode::new("taka"), Err(CurrencyCodeError::Malformed(_))));
        assert!(matches!(CurrencyCode::new("u5d"), Err(CurrencyCodeError::Malformed(_))));
    }

    #[test]
    fn test_money_add() {
        let a = Money::new(dec!(100), &CurrencyCode::bdt());
        let b = Money::new(dec!(40), &CurrencyCode::bdt());
        assert_eq!(a.add(&b).unwrap().amount(), dec!(140));
    }

    #[test]
    fn test_money_add_currency_mismatch() {
        let a = Money::new(dec!(1), &CurrencyCode::bdt());
        let b = Money::new(dec!(1), &CurrencyCode::new("usd").unwrap());
        assert_eq!(a.add(&b), Err(MoneyError::CurrencyMismatch));
    }

    #[test]
    fn test_money_overflow() {
        let max = Money::new(Decimal::MAX, &CurrencyCode::bdt());
        assert_eq!(max.multiply(2), Err(MoneyError::Overflow));
        assert_eq!(max.add(&Money::new(dec!(1), &CurrencyCode::bdt())), Err(MoneyError::Overflow));
        assert_eq!(Money::new(dec!(380), &CurrencyCode::bdt()).multiply(3).unwrap().amount(), dec!(1140));
    }
}
