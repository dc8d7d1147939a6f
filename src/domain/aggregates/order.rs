//! Order Aggregate

use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::domain::aggregates::cart::{Cart, CartItem};
use crate::domain::events::{DomainEvent, OrderEvent};
use crate::domain::services::{LineItem, PricingError, PricingResult, WeightSurchargePricer};
use crate::domain::value_objects::{CurrencyCode, Money, MoneyError};

#[derive(Clone, Debug)]
pub struct Order {
    id: String,
    email: String,
    currency: CurrencyCode,
    status: OrderStatus,
    items: Vec<CartItem>,
    subtotal: Money,
    shipping: Money,
    total: Money,
    updated_at: DateTime<Utc>,
    events: Vec<DomainEvent>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)] pub enum OrderStatus { #[default] Pending, Confirmed }

impl Order {
    pub fn create(email: impl Into<String>, currency: &CurrencyCode) -> Self {
        let id = Uuid::now_v7().to_string();
        let email = email.into();
        let mut order = Self {
            id: id.clone(), email: email.clone(), currency: currency.clone(), status: OrderStatus::Pending,
            items: vec![], subtotal: Money::zero(currency), shipping: Money::zero(currency), total: Money::zero(currency),
            updated_at: Utc::now(), events: vec![],
        };
        order.raise_event(DomainEvent::Order(OrderEvent::Created { order_id: id, email }));
        order
    }

    /// Places the cart's lines on a new order at the cart's subtotal.
    pub fn from_cart(cart: &Cart, email: impl Into<String>) -> Self {
        let mut order = Self::create(email, cart.currency());
        order.items = cart.items().to_vec();
        order.subtotal = cart.subtotal().clone();
        order.total = cart.subtotal().clone();
        order
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn email(&self) -> &str { &self.email }
    pub fn currency(&self) -> &CurrencyCode { &self.currency }
    pub fn status(&self) -> &OrderStatus { &self.status }
    pub fn items(&self) -> &[CartItem] { &self.items }
    pub fn subtotal(&self) -> &Money { &self.subtotal }
    pub fn shipping(&self) -> &Money { &self.shipping }
    pub fn total(&self) -> &Money { &self.total }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

    pub fn line_items(&self) -> Vec<LineItem> { self.items.iter().map(CartItem::line_item).collect() }

    /// Prices the order's weight and books the surcharge as its shipping amount.
    /// On invalid lines or an unrepresentable total the order is left as it was.
    pub fn apply_weight_surcharge(&mut self, pricer: &WeightSurchargePricer) -> Result<PricingResult, OrderError> {
        let result = pricer.compute_surcharge(Some(&self.line_items()), self.currency.as_str())?;
        let shipping = Money::new(result.surcharge_amount, &self.currency);
        self.total = self.subtotal.add(&shipping)?;
        self.shipping = shipping;
        self.touch();
        self.raise_event(DomainEvent::Order(OrderEvent::WeightSurchargeApplied {
            order_id: self.id.clone(),
            total_weight_grams: result.total_weight_grams,
            chargeable_weight_kg: result.chargeable_weight_kg,
            amount: result.surcharge_amount,
        }));
        Ok(result)
    }

    pub fn confirm(&mut self) -> Result<(), OrderError> {
        if self.items.is_empty() { return Err(OrderError::NoItems); }
        if self.status == OrderStatus::Confirmed { return Err(OrderError::AlreadyConfirmed); }
        self.status = OrderStatus::Confirmed;
        self.touch();
        self.raise_event(DomainEvent::Order(OrderEvent::Confirmed { order_id: self.id.clone(), total: self.total.amount() }));
        Ok(())
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: DomainEvent) { self.events.push(e); }
    fn touch(&mut self) { self.updated_at = Utc::now(); }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("No items")]
    NoItems,
    #[error("Order already confirmed")]
    AlreadyConfirmed,
    #[error(transparent)]
    Pricing(#[from] PricingError),
    #[error("Order total: {0}")]
    Money(#[from] MoneyError),
}
