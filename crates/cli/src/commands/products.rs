//! Catalog commands.

use serde::Deserialize;
use shopfront_core::{Product, ProductId};

use super::CliError;
use crate::client::ProxyClient;
use crate::output;

#[derive(Deserialize)]
struct ProductList {
    products: Vec<Product>,
}

/// List products; `query` is passed through (e.g. `page=2&limit=20`).
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn list(client: &ProxyClient, query: Option<&str>) -> Result<(), CliError> {
    let value = client.get("/products", query).await?;
    let list: ProductList = serde_json::from_value(value)?;

    if list.products.is_empty() {
        output::line("No products");
    }
    for product in &list.products {
        output::product(product);
    }
    Ok(())
}

/// Show one product.
///
/// # Errors
///
/// Returns an error if the request fails or the product is unknown.
pub async fn show(client: &ProxyClient, id: &ProductId) -> Result<(), CliError> {
    let product = client.product(id).await?;
    output::product(&product);
    if !product.description.is_empty() {
        output::line(&product.description);
    }
    Ok(())
}
