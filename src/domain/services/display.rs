//! Presentation breakdown for the "Extra Charge on Weight" panel.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::surcharge::PricingResult;
use crate::domain::value_objects::{CurrencyCode, GRAMS_PER_KG};

/// Digit grouping convention used when printing amounts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayLocale {
    /// `12,34,567`: thousands first, then groups of two.
    #[default]
    #[serde(rename = "en-BD")]
    EnBd,
    /// `1,234,567`
    #[serde(rename = "en-US")]
    EnUs,
}

impl FromStr for DisplayLocale {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en-bd" => Ok(Self::EnBd),
            "en-us" => Ok(Self::EnUs),
            other => Err(format!("unsupported display locale {other:?}")),
        }
    }
}

impl fmt::Display for DisplayLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Self::EnBd => write!(f, "en-BD"), Self::EnUs => write!(f, "en-US") }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayBreakdown {
    /// Total weight in kilograms, two decimals.
    pub total_weight_kg: String,
    pub chargeable_weight_kg: String,
    /// `(2 kg × 20 ৳)`
    pub calculation: String,
    /// Formatted surcharge, or the free-tier label when nothing is charged.
    pub amount: String,
    pub is_free: bool,
}

/// Formats pricing results. Holds only the currency and locale fallbacks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreakdownFormatter {
    default_currency: CurrencyCode,
    locale: DisplayLocale,
}

impl Default for BreakdownFormatter {
    fn default() -> Self { Self::new(CurrencyCode::bdt(), DisplayLocale::default()) }
}

impl BreakdownFormatter {
    pub fn new(default_currency: CurrencyCode, locale: DisplayLocale) -> Self { Self { default_currency, locale } }

    pub fn format_display(&self, result: &PricingResult) -> DisplayBreakdown {
        let currency = result.currency_code.as_ref().unwrap_or(&self.default_currency);
        let total_kg = (result.total_weight_grams / GRAMS_PER_KG)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let rate = self.format_number(result.rate_per_kg);
        let rate_label = match currency.symbol() {
            Some(symbol) => format!("{rate} {symbol}"),
            None => format!("{rate} {currency}"),
        };

        let amount = if result.is_free() {
            let free_kg = (result.free_threshold_grams / GRAMS_PER_KG).normalize();
            format!("Free (up to {free_kg} kg)")
        } else {
            self.format_currency(result.surcharge_amount, currency)
        };

        DisplayBreakdown {
            total_weight_kg: format!("{total_kg:.2} kg"),
            chargeable_weight_kg: format!("{} kg", result.chargeable_weight_kg),
            calculation: format!("({} kg × {rate_label})", result.chargeable_weight_kg),
            amount,
            is_free: result.is_free(),
        }
    }

    /// `৳1,234.5` style: up to two fraction digits, no trailing zeros.
    pub fn format_currency(&self, amount: Decimal, currency: &CurrencyCode) -> String {
        let number = self.format_number(amount.abs());
        let sign = if amount < Decimal::ZERO { "-" } else { "" };
        match currency.symbol() {
            Some(symbol) => format!("{sign}{symbol}{number}"),
            None => format!("{sign}{currency} {number}"),
        }
    }

    fn format_number(&self, value: Decimal) -> String {
        let rounded = value
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
            .to_string();
        let (int_part, frac_part) = match rounded.split_once('.') {
            Some((i, f)) => (i.to_string(), Some(f.to_string())),
            None => (rounded, None),
        };
        let grouped = group_digits(&int_part, self.locale);
        match frac_part {
            Some(f) => format!("{grouped}.{f}"),
            None => grouped,
        }
    }
}

fn group_digits(digits: &str, locale: DisplayLocale) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, last_three) = digits.split_at(digits.len() - 3);
    let width = match locale { DisplayLocale::EnBd => 2, DisplayLocale::EnUs => 3 };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(width);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(last_three);
    groups.join(",")
}
