//! Order history commands. All of them need `SHOPFRONT_TOKEN`.

use super::CliError;
use crate::client::ProxyClient;
use crate::output;

/// List orders.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn list(client: &ProxyClient, query: Option<&str>) -> Result<(), CliError> {
    output::json(&client.get("/orders", query).await?);
    Ok(())
}

/// List the signed-in customer's orders.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn mine(client: &ProxyClient, query: Option<&str>) -> Result<(), CliError> {
    output::json(&client.get("/orders/my-orders", query).await?);
    Ok(())
}

/// Show one order.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn show(client: &ProxyClient, id: &str) -> Result<(), CliError> {
    let path = format!("/orders/{}", urlencoding::encode(id));
    output::json(&client.get(&path, None).await?);
    Ok(())
}

/// List the signed-in customer's subscriptions.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn subscriptions(client: &ProxyClient, query: Option<&str>) -> Result<(), CliError> {
    output::json(&client.get("/subscriptions", query).await?);
    Ok(())
}
