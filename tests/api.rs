//! HTTP tests for the weight-charge preview and checkout endpoints.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

use weight_surcharge::api::{router, AppState};
use weight_surcharge::Settings;

fn app() -> axum::Router {
    router(AppState::from_settings(&Settings::default()))
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = body.map(|b| Body::from(serde_json::to_string(&b).unwrap())).unwrap_or_else(Body::empty);
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_weight_charge_uses_fallback_weights() {
    let payload = json!({
        "currency_code": "bdt",
        "items": [
            { "title": "Rice 2kg", "quantity": 1, "variant": { "weight": 2000 } },
            { "title": "Lentils", "quantity": 1, "product": { "weight": 500 } },
            { "title": "Tea", "quantity": 2, "variant": { "product": { "weight": 250 } } },
            { "title": "Gift card", "quantity": 1 }
        ]
    });
    let (status, body) = send(&app(), "POST", "/api/v1/weight-charge", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["chargeable_weight_kg"], 2);
    assert_eq!(body["result"]["currency_code"], "BDT");
    assert_eq!(body["display"]["total_weight_kg"], "3.00 kg");
    assert_eq!(body["display"]["calculation"], "(2 kg × 20 ৳)");
    assert_eq!(body["display"]["amount"], "৳40");
    assert_eq!(body["display"]["is_free"], false);
}

#[tokio::test]
async fn test_weight_charge_empty_list_is_free() {
    let (status, body) = send(&app(), "POST", "/api/v1/weight-charge", Some(json!({ "items": [] }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["chargeable_weight_kg"], 0);
    assert_eq!(body["display"]["is_free"], true);
    assert_eq!(body["display"]["amount"], "Free (up to 1 kg)");
}

#[tokio::test]
async fn test_weight_charge_missing_list_rejected() {
    let (status, body) = send(&app(), "POST", "/api/v1/weight-charge", Some(json!({ "currency_code": "bdt" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.as_str().unwrap().contains("line item list is missing"));
}

#[tokio::test]
async fn test_weight_charge_negative_weight_rejected() {
    let payload = json!({ "items": [ { "quantity": 1, "variant": { "weight": -10 } } ] });
    let (status, body) = send(&app(), "POST", "/api/v1/weight-charge", Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.as_str().unwrap().contains("must not be negative"));
}

#[tokio::test]
async fn test_checkout_books_surcharge_as_shipping() {
    let payload = json!({
        "email": "buyer@example.com",
        "currency_code": "bdt",
        "items": [
            { "product_id": "prod_rice", "quantity": 1, "unit_price": 380, "variant": { "weight": 2500 } },
            { "product_id": "prod_rice", "quantity": 1, "unit_price": 380, "variant": { "weight": 2500 } }
        ]
    });
    let (status, body) = send(&app(), "POST", "/api/v1/checkout", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weight"]["chargeable_weight_kg"], 4);
    assert_eq!(body["subtotal"], "760");
    assert_eq!(body["shipping"], "80");
    assert_eq!(body["total"], "840");
    assert_eq!(body["display"]["amount"], "৳80");
}

#[tokio::test]
async fn test_checkout_rejects_bad_email() {
    let payload = json!({
        "email": "not-an-email",
        "currency_code": "bdt",
        "items": [ { "product_id": "p", "quantity": 1, "unit_price": 10 } ]
    });
    let (status, _) = send(&app(), "POST", "/api/v1/checkout", Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_checkout_rejects_zero_quantity() {
    let payload = json!({
        "email": "buyer@example.com",
        "currency_code": "bdt",
        "items": [ { "product_id": "p", "quantity": 0, "unit_price": 10 } ]
    });
    let (status, body) = send(&app(), "POST", "/api/v1/checkout", Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.as_str().unwrap().contains("quantity must be positive"));
}

#[tokio::test]
async fn test_checkout_rejects_negative_price() {
    let payload = json!({
        "email": "buyer@example.com",
        "currency_code": "bdt",
        "items": [ { "product_id": "prod_rice", "quantity": 1, "unit_price": -500, "variant": { "weight": 2500 } } ]
    });
    let (status, body) = send(&app(), "POST", "/api/v1/checkout", Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.as_str().unwrap().contains("must not be negative"));
}

#[tokio::test]
async fn test_checkout_rejects_price_too_large_to_total() {
    let payload = json!({
        "email": "buyer@example.com",
        "currency_code": "bdt",
        "items": [ { "product_id": "prod_gold", "quantity": 2, "unit_price": "79228162514264337593543950335" } ]
    });
    let (status, body) = send(&app(), "POST", "/api/v1/checkout", Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.as_str().unwrap().contains("Amount too large"));
}
