//! Weight surcharge pricing
//!
//! Orders up to the free threshold ship without an extra charge. Every
//! started kilogram above it is billed at a flat rate:
//!
//! ```text
//! chargeable_kg = ceil((total_grams - threshold_grams) / 1000)
//! surcharge     = chargeable_kg * rate_per_kg
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::{CurrencyCode, Money, GRAMS_PER_KG};

/// Default weight shipped for free, in grams.
pub const DEFAULT_FREE_THRESHOLD_GRAMS: u32 = 1000;
/// Default charge per started kilogram above the threshold, in whole currency units.
pub const DEFAULT_RATE_PER_KG: u32 = 20;

/// A priced line: how many units and what one unit weighs.
///
/// `unit_weight_grams` is already resolved, see
/// [`WeightResolutionChain`](crate::domain::services::WeightResolutionChain).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub quantity: i64,
    #[serde(default)]
    pub unit_weight_grams: Decimal,
}

impl LineItem {
    pub fn new(quantity: i64, unit_weight_grams: Decimal) -> Self { Self { quantity, unit_weight_grams } }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    pub total_weight_grams: Decimal,
    pub free_threshold_grams: Decimal,
    pub chargeable_weight_kg: u64,
    pub rate_per_kg: Decimal,
    pub surcharge_amount: Decimal,
    pub currency_code: Option<CurrencyCode>,
}

impl PricingResult {
    pub fn is_free(&self) -> bool { self.chargeable_weight_kg == 0 }

    /// Surcharge as money, or `None` when no currency was supplied.
    pub fn surcharge(&self) -> Option<Money> {
        self.currency_code.as_ref().map(|c| Money::new(self.surcharge_amount, c))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("line item list is missing")]
    MissingItems,

    #[error("line {index}: quantity must be positive, got {quantity}")]
    NonPositiveQuantity { index: usize, quantity: i64 },

    #[error("line {index}: unit weight must not be negative, got {grams} g")]
    NegativeWeight { index: usize, grams: Decimal },

    #[error("total weight is too large to price")]
    WeightOverflow,
}

/// Stateless pricer holding the two tariff constants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightSurchargePricer {
    free_threshold_grams: Decimal,
    rate_per_kg: Decimal,
}

impl Default for WeightSurchargePricer {
    fn default() -> Self { Self::new(Decimal::from(DEFAULT_FREE_THRESHOLD_GRAMS), Decimal::from(DEFAULT_RATE_PER_KG)) }
}

impl WeightSurchargePricer {
    /// Both values must be non-negative; `Settings` enforces this when loading.
    pub fn new(free_threshold_grams: Decimal, rate_per_kg: Decimal) -> Self {
        Self { free_threshold_grams, rate_per_kg }
    }

    pub fn free_threshold_grams(&self) -> Decimal { self.free_threshold_grams }
    pub fn rate_per_kg(&self) -> Decimal { self.rate_per_kg }

    /// Prices `items`. `None` means the caller had no item list at all, which
    /// is rejected; an empty slice prices to zero.
    ///
    /// `currency_code` is carried through for display only. A blank or
    /// malformed code is dropped rather than failing the calculation.
    pub fn compute_surcharge(&self, items: Option<&[LineItem]>, currency_code: &str) -> Result<PricingResult, PricingError> {
        let items = items.ok_or(InvalidInput::MissingItems)?;
        let total_weight_grams = total_weight_grams(items)?;

        let chargeable_weight_kg = if total_weight_grams <= self.free_threshold_grams {
            0
        } else {
            let excess = total_weight_grams - self.free_threshold_grams;
            (excess / GRAMS_PER_KG).ceil().to_u64().ok_or(InvalidInput::WeightOverflow)?
        };
        let surcharge_amount = Decimal::from(chargeable_weight_kg)
            .checked_mul(self.rate_per_kg)
            .ok_or(InvalidInput::WeightOverflow)?;

        Ok(PricingResult {
            total_weight_grams,
            free_threshold_grams: self.free_threshold_grams,
            chargeable_weight_kg,
            rate_per_kg: self.rate_per_kg,
            surcharge_amount,
            currency_code: CurrencyCode::new(currency_code).ok(),
        })
    }
}

fn total_weight_grams(items: &[LineItem]) -> Result<Decimal, InvalidInput> {
    items.iter().enumerate().try_fold(Decimal::ZERO, |acc, (index, item)| {
        if item.quantity <= 0 {
            return Err(InvalidInput::NonPositiveQuantity { index, quantity: item.quantity });
        }
        if item.unit_weight_grams < Decimal::ZERO {
            return Err(InvalidInput::NegativeWeight { index, grams: item.unit_weight_grams });
        }
        Decimal::from(item.quantity)
            .checked_mul(item.unit_weight_grams)
            .and_then(|line| acc.checked_add(line))
            .ok_or(InvalidInput::WeightOverflow)
    })
}
