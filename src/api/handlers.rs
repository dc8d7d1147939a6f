use axum::{extract::State, http::StatusCode, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::AppState;
use crate::domain::aggregates::{Cart, CartItem, Order, OrderError};
use crate::domain::events::{DomainEvent, OrderEvent};
use crate::domain::services::{CatalogLineItem, DisplayBreakdown, PricingResult, ProductWeight, VariantWeight};
use crate::domain::value_objects::{CurrencyCode, Money};
use crate::SurchargeError;

type ApiError = (StatusCode, String);

impl From<SurchargeError> for ApiError {
    fn from(e: SurchargeError) -> Self {
        let status = match &e {
            SurchargeError::Pricing(_) | SurchargeError::Cart(_) | SurchargeError::Request(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SurchargeError::Order(OrderError::NoItems | OrderError::AlreadyConfirmed) => StatusCode::CONFLICT,
            SurchargeError::Order(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SurchargeError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!(error = %e, status = %status, "request rejected");
        (status, e.to_string())
    }
}

fn invalid(e: impl std::fmt::Display) -> SurchargeError { SurchargeError::Request(e.to_string()) }

/// `items` stays optional so a missing list can be told apart from an empty one.
#[derive(Debug, Deserialize)]
pub struct WeightChargeRequest {
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<CatalogLineItem>>,
}

#[derive(Debug, Serialize)]
pub struct WeightChargeResponse { pub result: PricingResult, pub display: DisplayBreakdown }

pub async fn weight_charge(State(s): State<AppState>, Json(r): Json<WeightChargeRequest>) -> Result<Json<WeightChargeResponse>, ApiError> {
    let lines = r.items.as_deref().map(|items| s.weights.resolve_all(items));
    let result = s.pricer.compute_surcharge(lines.as_deref(), r.currency_code.as_deref().unwrap_or_default())
        .map_err(SurchargeError::from)?;
    tracing::debug!(total_grams = %result.total_weight_grams, chargeable_kg = result.chargeable_weight_kg, "weight charge computed");
    let display = s.formatter.format_display(&result);
    Ok(Json(WeightChargeResponse { result, display }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(equal = 3))]
    pub currency_code: String,
    #[validate(length(min = 1))]
    pub items: Vec<CheckoutItem>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CheckoutItem {
    pub product_id: String,
    #[serde(default)] pub variant_id: Option<String>,
    #[serde(default)] pub title: Option<String>,
    pub quantity: i64,
    pub unit_price: Decimal,
    #[serde(default)] pub variant: Option<VariantWeight>,
    #[serde(default)] pub product: Option<ProductWeight>,
}

impl CheckoutItem {
    fn catalog_line(&self) -> CatalogLineItem {
        CatalogLineItem { title: self.title.clone(), quantity: self.quantity, variant: self.variant.clone(), product: self.product.clone() }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order_id: String,
    pub currency_code: CurrencyCode,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
    pub weight: PricingResult,
    pub display: DisplayBreakdown,
}

pub async fn checkout(State(s): State<AppState>, Json(r): Json<CheckoutRequest>) -> Result<Json<CheckoutResponse>, ApiError> {
    Ok(Json(place_order(&s, r)?))
}

fn place_order(s: &AppState, r: CheckoutRequest) -> crate::Result<CheckoutResponse> {
    r.validate().map_err(invalid)?;
    let currency = CurrencyCode::new(&r.currency_code).map_err(invalid)?;

    let catalog: Vec<CatalogLineItem> = r.items.iter().map(CheckoutItem::catalog_line).collect();
    let lines = s.weights.resolve_all(&catalog);
    // Rejects bad quantities and weights before they reach the cart.
    s.pricer.compute_surcharge(Some(&lines), currency.as_str())?;

    let mut cart = Cart::new(&currency);
    for (item, line) in r.items.iter().zip(&lines) {
        let quantity = u32::try_from(line.quantity).map_err(|_| invalid(format!("quantity {} is too large", line.quantity)))?;
        cart.add_item(CartItem {
            product_id: item.product_id.clone(),
            variant_id: item.variant_id.clone(),
            title: item.title.clone().unwrap_or_default(),
            quantity,
            unit_price: Money::new(item.unit_price, &currency),
            unit_weight_grams: line.unit_weight_grams,
        })?;
    }

    let mut order = Order::from_cart(&cart, r.email);
    let weight = order.apply_weight_surcharge(&s.pricer)?;
    order.confirm()?;

    for event in order.take_events() {
        match event {
            DomainEvent::Order(OrderEvent::WeightSurchargeApplied { order_id, chargeable_weight_kg, amount, .. }) => {
                tracing::info!(%order_id, chargeable_weight_kg, %amount, "weight surcharge applied");
            }
            DomainEvent::Order(e) => tracing::debug!(event = ?e, "order event"),
        }
    }

    let display = s.formatter.format_display(&weight);
    Ok(CheckoutResponse {
        order_id: order.id().to_string(),
        currency_code: currency,
        subtotal: order.subtotal().amount(),
        shipping: order.shipping().amount(),
        total: order.total().amount(),
        weight,
        display,
    })
}
