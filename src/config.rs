//! Service settings read from the environment (after `.env` is loaded).
//!
//! | Variable                  | Default |
//! |---------------------------|---------|
//! | `PORT`                    | `8083`  |
//! | `FREE_THRESHOLD_GRAMS`    | `1000`  |
//! | `WEIGHT_RATE_PER_KG`      | `20`    |
//! | `DEFAULT_CURRENCY_CODE`   | `bdt`   |
//! | `CURRENCY_DISPLAY_LOCALE` | `en-BD` |

use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::services::surcharge::{DEFAULT_FREE_THRESHOLD_GRAMS, DEFAULT_RATE_PER_KG};
use crate::domain::services::{BreakdownFormatter, DisplayLocale, WeightSurchargePricer};
use crate::domain::value_objects::CurrencyCode;

pub const DEFAULT_PORT: u16 = 8083;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}: cannot parse {value:?}: {reason}")]
    Invalid { key: &'static str, value: String, reason: String },

    #[error("{key} must not be negative, got {value}")]
    Negative { key: &'static str, value: Decimal },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub port: u16,
    pub free_threshold_grams: Decimal,
    pub rate_per_kg: Decimal,
    pub default_currency: CurrencyCode,
    pub display_locale: DisplayLocale,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            free_threshold_grams: Decimal::from(DEFAULT_FREE_THRESHOLD_GRAMS),
            rate_per_kg: Decimal::from(DEFAULT_RATE_PER_KG),
            default_currency: CurrencyCode::bdt(),
            display_locale: DisplayLocale::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Self::default();

        if let Some(v) = get("PORT") {
            settings.port = parse("PORT", &v, |s| u16::from_str(s).map_err(|e| e.to_string()))?;
        }
        if let Some(v) = get("FREE_THRESHOLD_GRAMS") {
            settings.free_threshold_grams = non_negative("FREE_THRESHOLD_GRAMS", &v)?;
        }
        if let Some(v) = get("WEIGHT_RATE_PER_KG") {
            settings.rate_per_kg = non_negative("WEIGHT_RATE_PER_KG", &v)?;
        }
        if let Some(v) = get("DEFAULT_CURRENCY_CODE") {
            settings.default_currency = parse("DEFAULT_CURRENCY_CODE", &v, |s| CurrencyCode::new(s).map_err(|e| e.to_string()))?;
        }
        if let Some(v) = get("CURRENCY_DISPLAY_LOCALE") {
            settings.display_locale = parse("CURRENCY_DISPLAY_LOCALE", &v, DisplayLocale::from_str)?;
        }
        Ok(settings)
    }

    pub fn pricer(&self) -> WeightSurchargePricer {
        WeightSurchargePricer::new(self.free_threshold_grams, self.rate_per_kg)
    }

    pub fn formatter(&self) -> BreakdownFormatter {
        BreakdownFormatter::new(self.default_currency.clone(), self.display_locale)
    }
}

fn parse<T>(key: &'static str, value: &str, f: impl Fn(&str) -> Result<T, String>) -> Result<T, ConfigError> {
    f(value.trim()).map_err(|reason| ConfigError::Invalid { key, value: value.to_string(), reason })
}

fn non_negative(key: &'static str, value: &str) -> Result<Decimal, ConfigError> {
    let d = parse(key, value, |s| Decimal::from_str(s).map_err(|e| e.to_string()))?;
    if d < Decimal::ZERO { return Err(ConfigError::Negative { key, value: d }); }
    Ok(d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[]).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.pricer(), WeightSurchargePricer::default());
        assert_eq!(s.port, 8083);
    }

    #[test]
    fn test_overrides() {
        let s = settings(&[
            ("PORT", "9000"),
            ("FREE_THRESHOLD_GRAMS", "2000"),
            ("WEIGHT_RATE_PER_KG", "15.5"),
            ("DEFAULT_CURRENCY_CODE", "usd"),
            ("CURRENCY_DISPLAY_LOCALE", "en-US"),
        ]).unwrap();
        assert_eq!(s.port, 9000);
        assert_eq!(s.pricer().free_threshold_grams(), dec!(2000));
        assert_eq!(s.pricer().rate_per_kg(), dec!(15.5));
        assert_eq!(s.default_currency.as_str(), "USD");
        assert_eq!(s.display_locale, DisplayLocale::EnUs);
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        assert_eq!(settings(&[("WEIGHT_RATE_PER_KG", "  ")]).unwrap().rate_per_kg, dec!(20));
    }

    #[test]
    fn test_rejects_negative_rate() {
        assert_eq!(
            settings(&[("WEIGHT_RATE_PER_KG", "-1")]),
            Err(ConfigError::Negative { key: "WEIGHT_RATE_PER_KG", value: dec!(-1) })
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(settings(&[("FREE_THRESHOLD_GRAMS", "one kilo")]), Err(ConfigError::Invalid { key: "FREE_THRESHOLD_GRAMS", .. })));
        assert!(matches!(settings(&[("CURRENCY_DISPLAY_LOCALE", "xx")]), Err(ConfigError::Invalid { .. })));
    }
}
