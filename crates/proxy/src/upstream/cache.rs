//! Cache types for catalog responses.

use std::sync::Arc;

use shopfront_core::Product;

/// Cache key for catalog reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    /// A single product by its upstream id.
    Product(String),
    /// A product listing for one raw query string.
    Products { query: Option<String> },
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Arc<Vec<Product>>),
}
