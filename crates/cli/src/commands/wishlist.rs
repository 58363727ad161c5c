//! Wishlist commands. Items are always looked up in the catalog.

use shopfront_core::{ProductId, WishlistItem};

use super::CliError;
use crate::client::ProxyClient;
use crate::output;
use crate::session::Session;

/// Save a catalog product.
///
/// # Errors
///
/// Returns an error if the product lookup fails.
pub async fn add(session: &mut Session, client: &ProxyClient, id: &ProductId) -> Result<(), CliError> {
    let product = client.product(id).await?;
    if !session.wishlist.add_to_wishlist(WishlistItem::from(&product)) {
        output::line("Already in wishlist");
    }
    output::wishlist(session.wishlist.state());
    Ok(())
}

/// Drop a saved product.
///
/// # Errors
///
/// Returns an error if `id` is not saved.
pub fn remove(session: &mut Session, id: &ProductId) -> Result<(), CliError> {
    if !session.wishlist.remove_from_wishlist(id) {
        return Err(CliError::UnknownItem(id.to_string()));
    }
    output::wishlist(session.wishlist.state());
    Ok(())
}

/// Save the product if absent, drop it if present.
///
/// # Errors
///
/// Returns an error if the product has to be looked up and the lookup
/// fails.
pub async fn toggle(
    session: &mut Session,
    client: &ProxyClient,
    id: &ProductId,
) -> Result<(), CliError> {
    if session.wishlist.state().contains(id) {
        session.wishlist.remove_from_wishlist(id);
        output::line("Removed from wishlist");
    } else {
        let product = client.product(id).await?;
        session.wishlist.toggle_wishlist(WishlistItem::from(&product));
        output::line("Added to wishlist");
    }
    Ok(())
}

/// Move a saved product into the cart with quantity 1.
///
/// # Errors
///
/// Returns an error if `id` is not saved.
pub fn move_to_cart(session: &mut Session, id: &ProductId) -> Result<(), CliError> {
    let item = session
        .wishlist
        .state()
        .items()
        .iter()
        .find(|item| &item.id == id)
        .map(WishlistItem::to_line_item)
        .ok_or_else(|| CliError::UnknownItem(id.to_string()))?;

    session.cart.add_to_cart(item);
    session.wishlist.remove_from_wishlist(id);
    output::cart(session.cart.state());
    Ok(())
}

pub fn show(session: &Session) {
    output::wishlist(session.wishlist.state());
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_move_to_cart() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::open(dir.path());
        session.wishlist.add_to_wishlist(WishlistItem {
            id: ProductId::from("mug"),
            title: "Mug".to_string(),
            price: Decimal::from(12),
            image: String::new(),
            category: None,
        });

        move_to_cart(&mut session, &ProductId::from("mug")).unwrap();

        assert!(session.wishlist.state().is_empty());
        assert_eq!(session.cart.total(), Decimal::from(12));
        assert!(move_to_cart(&mut session, &ProductId::from("mug")).is_err());
    }

    #[tokio::test]
    async fn test_toggle_off_needs_no_network() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::open(dir.path());
        session.wishlist.add_to_wishlist(WishlistItem {
            id: ProductId::Number(3),
            title: "Hat".to_string(),
            price: Decimal::from(20),
            image: String::new(),
            category: None,
        });

        let offline = ProxyClient::new("http://127.0.0.1:1", None);
        toggle(&mut session, &offline, &ProductId::Number(3)).await.unwrap();
        assert!(session.wishlist.state().is_empty());
    }
}
