//! Checkout: turn the cart into an order and submit it.

use shopfront_core::{ContactDetails, OrderDraft, ShippingAddress};

use super::CliError;
use crate::client::ProxyClient;
use crate::output;
use crate::session::Session;

/// Submit the cart as an order. The cart is cleared only once upstream
/// has accepted the order.
///
/// # Errors
///
/// Returns an error if the cart is empty or the submission fails.
pub async fn checkout(
    session: &mut Session,
    client: &ProxyClient,
    shipping: ShippingAddress,
    contact: ContactDetails,
    notes: Option<String>,
) -> Result<(), CliError> {
    let mut draft = OrderDraft::from_cart(session.cart.state(), shipping, contact)?;
    if let Some(notes) = notes {
        draft = draft.with_notes(notes);
    }

    tracing::info!(
        lines = draft.items.len(),
        item_count = draft.item_count,
        total = %draft.total,
        "Submitting order"
    );
    let (status, body) = client.post("/orders", &draft).await?;

    session.cart.clear();
    tracing::info!(status = status.as_u16(), "Order accepted");
    output::json(&body);
    Ok(())
}
