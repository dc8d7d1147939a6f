//! Cart Aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;
use crate::domain::services::{LineItem, PricingError, PricingResult, WeightSurchargePricer};
use crate::domain::value_objects::{CurrencyCode, Money, MoneyError};

#[derive(Clone, Debug)]
pub struct Cart {
    id: String,
    customer_id: Option<String>,
    items: Vec<CartItem>,
    subtotal: Money,
    currency: CurrencyCode,
    updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartItem {
    pub product_id: String,
    pub variant_id: Option<String>,
    pub title: String,
    pub quantity: u32,
    pub unit_price: Money,
    /// Already resolved through the weight chain; 0 when the catalog has none.
    pub unit_weight_grams: Decimal,
}

impl CartItem {
    pub fn line_total(&self) -> Result<Money, MoneyError> { self.unit_price.multiply(self.quantity) }
    pub fn line_item(&self) -> LineItem { LineItem::new(i64::from(self.quantity), self.unit_weight_grams) }
    fn same_line(&self, product_id: &str, variant_id: Option<&str>) -> bool {
        self.product_id == product_id && self.variant_id.as_deref() == variant_id
    }
}

impl Cart {
    pub fn new(currency: &CurrencyCode) -> Self {
        Self {
            id: Uuid::new_v4().to_string(), customer_id: None,
            items: vec![], subtotal: Money::zero(currency), currency: currency.clone(),
            updated_at: Utc::now(),
        }
    }

    pub fn for_customer(customer_id: impl Into<String>, currency: &CurrencyCode) -> Self {
        let mut cart = Self::new(currency);
        cart.customer_id = Some(customer_id.into());
        cart
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn customer_id(&self) -> Option<&str> { self.customer_id.as_deref() }
    pub fn currency(&self) -> &CurrencyCode { &self.currency }
    pub fn items(&self) -> &[CartItem] { &self.items }
    pub fn subtotal(&self) -> &Money { &self.subtotal }
    pub fn item_count(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

    /// Adds a line, merging into an existing line for the same product and variant.
    /// A line keeps the weight it was first added with.
    pub fn add_item(&mut self, item: CartItem) -> Result<(), CartError> {
        if item.unit_price.currency() != &self.currency { return Err(CartError::CurrencyMismatch); }
        if item.unit_price.amount() < Decimal::ZERO { return Err(CartError::NegativePrice(item.unit_price.amount())); }
        let mut items = self.items.clone();
        if let Some(existing) = items.iter_mut().find(|i| i.same_line(&item.product_id, item.variant_id.as_deref())) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            items.push(item);
        }
        self.replace_items(items)
    }

    /// Setting a quantity of 0 removes the line.
    pub fn update_quantity(&mut self, product_id: &str, variant_id: Option<&str>, quantity: u32) -> Result<(), CartError> {
        let mut items = self.items.clone();
        let item = items.iter_mut().find(|i| i.same_line(product_id, variant_id)).ok_or(CartError::ItemNotFound)?;
        if quantity == 0 { items.retain(|i| !i.same_line(product_id, variant_id)); }
        else { item.quantity = quantity; }
        self.replace_items(items)
    }

    pub fn remove_item(&mut self, product_id: &str, variant_id: Option<&str>) -> Result<(), CartError> {
        let mut items = self.items.clone();
        items.retain(|i| !i.same_line(product_id, variant_id));
        if items.len() == self.items.len() { return Err(CartError::ItemNotFound); }
        self.replace_items(items)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.subtotal = Money::zero(&self.currency);
        self.updated_at = Utc::now();
    }

    pub fn line_items(&self) -> Vec<LineItem> { self.items.iter().map(CartItem::line_item).collect() }

    /// Prices the current lines. Recomputed on every call; the cart keeps no copy.
    pub fn weight_charge(&self, pricer: &WeightSurchargePricer) -> Result<PricingResult, PricingError> {
        pricer.compute_surcharge(Some(&self.line_items()), self.currency.as_str())
    }

    /// Commits `items` only if their subtotal can be represented.
    fn replace_items(&mut self, items: Vec<CartItem>) -> Result<(), CartError> {
        let subtotal = items.iter().try_fold(Money::zero(&self.currency), |acc, i| acc.add(&i.line_total()?))?;
        self.items = items;
        self.subtotal = subtotal;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("Item not found")]
    ItemNotFound,
    #[error("Item priced in a different currency than the cart")]
    CurrencyMismatch,
    #[error("Unit price must not be negative, got {0}")]
    NegativePrice(Decimal),
    #[error("Cart total: {0}")]
    Money(#[from] MoneyError),
}
