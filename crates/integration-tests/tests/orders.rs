//! End-to-end tests for the order routes.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use shopfront_core::{Cart, ContactDetails, LineItem, OrderDraft, ShippingAddress};
use shopfront_integration_tests::{
    FakeUpstream, TestProxy, raw_reply, reply, unreachable_base_url,
};

async fn body(resp: reqwest::Response) -> Value {
    resp.json().await.unwrap()
}

// ============================================================================
// Submission
// ============================================================================

#[tokio::test]
async fn test_create_relays_upstream_success() {
    let upstream =
        FakeUpstream::start(|_| reply(StatusCode::CREATED, json!({"orderId": "abc"}))).await;
    let proxy = TestProxy::start(&upstream).await;

    let payload = r#"{"items":[{"id":1,"quantity":2}],"note":"kept as sent"}"#;
    let resp = proxy
        .client
        .post(proxy.url("/api/orders"))
        .header("authorization", "Bearer t0ken")
        .header("content-type", "application/json")
        .header("x-request-id", "req-123")
        .body(payload)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(body(resp).await, json!({"orderId": "abc"}));

    let seen = upstream.last();
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.path, "/orders");
    assert_eq!(seen.authorization.as_deref(), Some("Bearer t0ken"));
    assert_eq!(seen.request_id.as_deref(), Some("req-123"));
    assert_eq!(&seen.body[..], payload.as_bytes());
}

#[tokio::test]
async fn test_create_without_credential_is_forwarded() {
    let upstream = FakeUpstream::start(|_| reply(StatusCode::CREATED, json!({"orderId": "g1"}))).await;
    let proxy = TestProxy::start(&upstream).await;

    let resp = proxy
        .client
        .post(proxy.url("/api/orders"))
        .json(&json!({"items": []}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert!(upstream.last().authorization.is_none());
}

#[tokio::test]
async fn test_create_submits_a_cart_draft() {
    let upstream = FakeUpstream::start(|_| reply(StatusCode::CREATED, json!({"orderId": "d1"}))).await;
    let proxy = TestProxy::start(&upstream).await;

    let mut cart = Cart::new();
    cart.add(LineItem::new(1, "Shirt", Decimal::from(10)).with_quantity(2));
    cart.add(LineItem::new("mug", "Mug", Decimal::from(5)).with_quantity(3));
    let draft = OrderDraft::from_cart(
        &cart,
        ShippingAddress {
            full_name: "Ada Lovelace".to_string(),
            address_line1: "12 Analytical Way".to_string(),
            address_line2: None,
            city: "London".to_string(),
            state: None,
            postal_code: "N1 9GU".to_string(),
            country: "GB".to_string(),
        },
        ContactDetails {
            email: "ada@example.com".to_string(),
            phone: None,
        },
    )
    .unwrap();

    let resp = proxy
        .client
        .post(proxy.url("/api/orders"))
        .bearer_auth("t0ken")
        .json(&draft)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let sent = upstream.last().json().unwrap();
    assert_eq!(sent["total"], json!(35.0));
    assert_eq!(sent["itemCount"], json!(5));
    assert_eq!(sent["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_relays_upstream_error_message() {
    let upstream =
        FakeUpstream::start(|_| reply(StatusCode::BAD_REQUEST, json!({"error": "Cart is empty"})))
            .await;
    let proxy = TestProxy::start(&upstream).await;

    let resp = proxy
        .client
        .post(proxy.url("/api/orders"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(resp).await, json!({"message": "Cart is empty"}));
}

#[tokio::test]
async fn test_create_defaults_error_message() {
    let upstream = FakeUpstream::start(|_| raw_reply(StatusCode::SERVICE_UNAVAILABLE, "")).await;
    let proxy = TestProxy::start(&upstream).await;

    let resp = proxy
        .client
        .post(proxy.url("/api/orders"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body(resp).await, json!({"message": "Failed to create order"}));
}

#[tokio::test]
async fn test_create_unreachable_upstream() {
    let proxy = TestProxy::start_with_base_url(&unreachable_base_url()).await;

    let resp = proxy
        .client
        .post(proxy.url("/api/orders"))
        .json(&json!({"items": []}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body(resp).await, json!({"message": "Internal server error"}));
}

#[tokio::test]
async fn test_create_malformed_upstream_body() {
    let upstream =
        FakeUpstream::start(|_| raw_reply(StatusCode::OK, "<html>maintenance</html>")).await;
    let proxy = TestProxy::start(&upstream).await;

    let resp = proxy
        .client
        .post(proxy.url("/api/orders"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let text = resp.text().await.unwrap();
    assert_eq!(text, r#"{"message":"Internal server error"}"#);
    assert!(!text.contains("maintenance"));
}

// ============================================================================
// Retrieval
// ============================================================================

#[tokio::test]
async fn test_list_without_authorization_never_reaches_upstream() {
    let upstream = FakeUpstream::start(|_| reply(StatusCode::OK, json!([]))).await;
    let proxy = TestProxy::start(&upstream).await;

    let resp = proxy
        .client
        .get(proxy.url("/api/orders"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body(resp).await,
        json!({"message": "Authorization token required"})
    );
    assert_eq!(upstream.hits(), 0);
}

#[tokio::test]
async fn test_list_passes_query_through() {
    let upstream =
        FakeUpstream::start(|_| reply(StatusCode::OK, json!({"orders": [], "page": 2}))).await;
    let proxy = TestProxy::start(&upstream).await;

    let resp = proxy
        .client
        .get(proxy.url("/api/orders?page=2&limit=10"))
        .bearer_auth("t0ken")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body(resp).await, json!({"orders": [], "page": 2}));

    let seen = upstream.last();
    assert_eq!(seen.path, "/orders");
    assert_eq!(seen.query.as_deref(), Some("page=2&limit=10"));
    assert_eq!(seen.authorization.as_deref(), Some("Bearer t0ken"));
}

#[tokio::test]
async fn test_show_encodes_id() {
    let upstream = FakeUpstream::start(|_| reply(StatusCode::OK, json!({"id": "ord 1"}))).await;
    let proxy = TestProxy::start(&upstream).await;

    let resp = proxy
        .client
        .get(proxy.url("/api/orders/ord%201"))
        .bearer_auth("t0ken")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(upstream.last().path, "/orders/ord%201");
}

#[tokio::test]
async fn test_show_requires_bearer() {
    let upstream = FakeUpstream::start(|_| reply(StatusCode::OK, json!({}))).await;
    let proxy = TestProxy::start(&upstream).await;

    let resp = proxy
        .client
        .get(proxy.url("/api/orders/42"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(upstream.hits(), 0);
}

#[tokio::test]
async fn test_show_relays_not_found() {
    let upstream =
        FakeUpstream::start(|_| reply(StatusCode::NOT_FOUND, json!({"message": "Order not found"})))
            .await;
    let proxy = TestProxy::start(&upstream).await;

    let resp = proxy
        .client
        .get(proxy.url("/api/orders/999"))
        .bearer_auth("t0ken")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body(resp).await, json!({"message": "Order not found"}));
}

#[tokio::test]
async fn test_my_orders_is_not_an_order_id() {
    let upstream = FakeUpstream::start(|_| reply(StatusCode::OK, json!([]))).await;
    let proxy = TestProxy::start(&upstream).await;

    let resp = proxy
        .client
        .get(proxy.url("/api/orders/my-orders?status=shipped"))
        .bearer_auth("t0ken")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let seen = upstream.last();
    assert_eq!(seen.path, "/orders/my-orders");
    assert_eq!(seen.query.as_deref(), Some("status=shipped"));
}

#[tokio::test]
async fn test_retrieval_is_never_cached() {
    let upstream = FakeUpstream::start(|_| reply(StatusCode::OK, json!([]))).await;
    let proxy = TestProxy::start(&upstream).await;

    for _ in 0..3 {
        let resp = proxy
            .client
            .get(proxy.url("/api/orders"))
            .bearer_auth("t0ken")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    assert_eq!(upstream.hits(), 3);
}
