//! Unit weight resolution for catalog line items.
//!
//! A storefront line item may carry a weight on its variant, on its product,
//! or only on the product linked to the variant. The chain walks its steps in
//! order and takes the first weight found; an item with no weight anywhere
//! weighs nothing, so missing catalog data never blocks checkout.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::surcharge::LineItem;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductWeight {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub weight: Option<Decimal>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantWeight {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub product: Option<ProductWeight>,
}

/// Line item as the cart and order views send it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogLineItem {
    #[serde(default)]
    pub title: Option<String>,
    pub quantity: i64,
    #[serde(default)]
    pub variant: Option<VariantWeight>,
    #[serde(default)]
    pub product: Option<ProductWeight>,
}

/// One level of the fallback chain.
pub trait WeightStep: fmt::Debug + Send + Sync {
    fn weight_grams(&self, item: &CatalogLineItem) -> Option<Decimal>;
}

/// Built-in levels, in their default precedence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeightSource {
    /// Weight set on the purchased variant itself.
    Variant,
    /// Default weight of the line's product.
    Product,
    /// Default weight of the product the variant belongs to.
    VariantProduct,
}

impl WeightStep for WeightSource {
    fn weight_grams(&self, item: &CatalogLineItem) -> Option<Decimal> {
        match self {
            Self::Variant => item.variant.as_ref()?.weight,
            Self::Product => item.product.as_ref()?.weight,
            Self::VariantProduct => item.variant.as_ref()?.product.as_ref()?.weight,
        }
    }
}

#[derive(Debug)]
pub struct WeightResolutionChain {
    steps: Vec<Box<dyn WeightStep>>,
}

impl Default for WeightResolutionChain {
    fn default() -> Self {
        Self::empty()
            .then(WeightSource::Variant)
            .then(WeightSource::Product)
            .then(WeightSource::VariantProduct)
    }
}

impl WeightResolutionChain {
    pub fn empty() -> Self { Self { steps: vec![] } }

    /// Appends a step with lower precedence than every existing one.
    pub fn then(mut self, step: impl WeightStep + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn len(&self) -> usize { self.steps.len() }
    pub fn is_empty(&self) -> bool { self.steps.is_empty() }

    pub fn unit_weight_grams(&self, item: &CatalogLineItem) -> Option<Decimal> {
        self.steps.iter().find_map(|step| step.weight_grams(item))
    }

    /// Quantity is passed through untouched; the pricer validates it.
    pub fn resolve(&self, item: &CatalogLineItem) -> LineItem {
        LineItem::new(item.quantity, self.unit_weight_grams(item).unwrap_or_default())
    }

    pub fn resolve_all(&self, items: &[CatalogLineItem]) -> Vec<LineItem> {
        items.iter().map(|i| self.resolve(i)).collect()
    }
}
