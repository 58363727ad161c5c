//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! # Add a catalog product (title and price looked up through the proxy)
//! shop cart add 42 --quantity 2
//!
//! # Add an item by hand, no network needed
//! shop cart add sku-7 --title "Mug" --price 12.50
//!
//! shop cart set 42 3
//! shop cart remove sku-7
//! shop cart show
//! ```

use rust_decimal::Decimal;
use shopfront_core::{LineItem, ProductId};

use super::CliError;
use crate::client::ProxyClient;
use crate::output;
use crate::session::Session;

/// What to put in the cart.
pub struct NewItem {
    pub id: ProductId,
    pub quantity: u32,
    pub title: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
    pub category: Option<String>,
}

impl NewItem {
    /// Build the line item, fetching the product when no title and price
    /// were given.
    async fn resolve(self, client: &ProxyClient) -> Result<LineItem, CliError> {
        let mut item = match (self.title, self.price) {
            (Some(title), Some(price)) => LineItem::new(self.id, title, price),
            (None, None) => LineItem::from(&client.product(&self.id).await?),
            _ => return Err(CliError::IncompleteItem),
        };

        if let Some(image) = self.image {
            item = item.with_image(image);
        }
        if let Some(category) = self.category {
            item = item.with_category(category);
        }
        Ok(item.with_quantity(self.quantity))
    }
}

/// Add an item to the cart.
///
/// # Errors
///
/// Returns an error if the product lookup fails.
pub async fn add(session: &mut Session, client: &ProxyClient, new: NewItem) -> Result<(), CliError> {
    let item = new.resolve(client).await?;
    tracing::info!(id = %item.id, quantity = item.quantity, "Adding to cart");

    session.cart.add_to_cart(item);
    output::cart(session.cart.state());
    Ok(())
}

/// Remove a line from the cart.
///
/// # Errors
///
/// Returns an error if the cart has no line for `id`.
pub fn remove(session: &mut Session, id: &ProductId) -> Result<(), CliError> {
    if !session.cart.remove_from_cart(id) {
        return Err(CliError::UnknownItem(id.to_string()));
    }
    output::cart(session.cart.state());
    Ok(())
}

/// Set a line's quantity (values below 1 become 1).
///
/// # Errors
///
/// Returns an error if the cart has no line for `id`.
pub fn set(session: &mut Session, id: &ProductId, quantity: u32) -> Result<(), CliError> {
    if !session.cart.update_quantity(id, quantity) {
        return Err(CliError::UnknownItem(id.to_string()));
    }
    output::cart(session.cart.state());
    Ok(())
}

pub fn clear(session: &mut Session) {
    session.cart.clear();
    output::line("Cart cleared");
}

pub fn show(session: &Session) {
    output::cart(session.cart.state());
}
