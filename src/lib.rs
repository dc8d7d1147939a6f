//! Weight-based shipping surcharge
//!
//! One pricing component shared by the storefront cart page, the admin order
//! widget and checkout.
//!
//! ## Features
//! - Surcharge per started kilogram above a free threshold
//! - Ordered unit-weight fallback (variant, product, variant's product)
//! - Cart and order aggregates priced through the same pricer
//! - Display breakdown with locale-aware currency formatting
//! - HTTP preview and checkout endpoints

pub mod api;
pub mod config;
pub mod domain;

use thiserror::Error;

pub use config::{ConfigError, Settings};
pub use domain::services::{
    BreakdownFormatter, CatalogLineItem, DisplayBreakdown, DisplayLocale, InvalidInput, LineItem, PricingError,
    PricingResult, WeightResolutionChain, WeightSurchargePricer,
};
pub use domain::value_objects::{CurrencyCode, Money};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum SurchargeError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Cart error: {0}")]
    Cart(#[from] domain::aggregates::CartError),

    #[error("Order error: {0}")]
    Order(#[from] domain::aggregates::OrderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid request: {0}")]
    Request(String),
}

pub type Result<T> = std::result::Result<T, SurchargeError>;
