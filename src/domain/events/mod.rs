//! Domain events
use rust_decimal::Decimal;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainEvent {
    Order(OrderEvent),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderEvent {
    Created { order_id: String, email: String },
    WeightSurchargeApplied { order_id: String, total_weight_grams: Decimal, chargeable_weight_kg: u64, amount: Decimal },
    Confirmed { order_id: String, total: Decimal },
}
