//! HTTP surface shared by the storefront cart page, the admin order widget
//! and checkout.

pub mod handlers;

use axum::{routing::{get, post}, Json, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Settings;
use crate::domain::services::{BreakdownFormatter, WeightResolutionChain, WeightSurchargePricer};

pub const SERVICE_NAME: &str = "weight-surcharge";

#[derive(Clone)]
pub struct AppState {
    pub pricer: Arc<WeightSurchargePricer>,
    pub formatter: Arc<BreakdownFormatter>,
    pub weights: Arc<WeightResolutionChain>,
}

impl AppState {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            pricer: Arc::new(settings.pricer()),
            formatter: Arc::new(settings.formatter()),
            weights: Arc::new(WeightResolutionChain::default()),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": SERVICE_NAME})) }))
        .route("/api/v1/weight-charge", post(handlers::weight_charge))
        .route("/api/v1/checkout", post(handlers::checkout))
        .layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()).with_state(state)
}
