//! HTTP route handlers for the proxy.
//!
//! # Route Structure
//!
//! Everything below is mounted under `/api` and mirrors the upstream path
//! one-to-one.
//!
//! ```text
//! # Auth
//! POST /auth/signin            - Sign in (rate limited per client IP)
//!
//! # Orders
//! GET  /orders                 - List orders (bearer required, query passed through)
//! POST /orders                 - Submit an order (bearer optional)
//! GET  /orders/my-orders       - Caller's orders (bearer required)
//! GET  /orders/{id}            - One order (bearer required)
//!
//! # Subscriptions
//! GET  /subscriptions          - Caller's subscriptions (bearer required)
//!
//! # Catalog
//! GET  /products               - Normalized product listing (cached)
//! GET  /products/{id}          - Normalized product (cached)
//! ```

pub mod auth;
pub mod orders;
pub mod products;
pub mod subscriptions;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::signin_rate_limiter;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes(rate_limit: bool) -> Router<AppState> {
    let router = Router::new().route("/signin", post(auth::signin));

    if rate_limit {
        router.route_layer(signin_rate_limiter())
    } else {
        router
    }
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index).post(orders::create))
        // Static segment wins over `{id}`
        .route("/my-orders", get(orders::mine))
        .route("/{id}", get(orders::show))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create all `/api` routes.
pub fn routes(rate_limit: bool) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes(rate_limit))
        .nest("/orders", order_routes())
        .route("/subscriptions", get(subscriptions::index))
        .nest("/products", product_routes())
}
