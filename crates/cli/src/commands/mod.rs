//! CLI command implementations.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;
pub mod wishlist;

use shopfront_core::OrderError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The proxy could not be reached.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The proxy answered with an error status.
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    /// A response was not the JSON we expected.
    #[error("Unexpected response: {0}")]
    Json(#[from] serde_json::Error),

    /// Checkout could not build an order.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// No line in the cart (or wishlist) has this id.
    #[error("No item with id {0}")]
    UnknownItem(String),

    /// Adding an item by hand needs a title and a price.
    #[error("Provide both --title and --price, or neither to look the product up")]
    IncompleteItem,
}
