//! Client-side wishlist state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::LineItem;
use crate::persistence::SnapshotStore;
use crate::product::Product;
use crate::store::{Snapshot, Store};
use crate::types::ProductId;

/// Snapshot key for the wishlist.
pub const WISHLIST_KEY: &str = "wishlist";

/// A saved product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl WishlistItem {
    /// Turn a saved product into a cart line with quantity 1.
    #[must_use]
    pub fn to_line_item(&self) -> LineItem {
        LineItem {
            id: self.id.clone(),
            title: self.title.clone(),
            price: self.price,
            quantity: 1,
            image: self.image.clone(),
            category: self.category.clone(),
        }
    }
}

impl From<&Product> for WishlistItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
        }
    }
}

/// Saved products, at most one entry per id, in the order they were saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wishlist {
    items: Vec<WishlistItem>,
}

impl Wishlist {
    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.id == id)
    }

    /// Save an item. Returns `false` if it was already saved.
    pub fn add(&mut self, item: WishlistItem) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Drop an item. Returns whether it was saved.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() != before
    }

    /// Save the item if absent, drop it if present.
    ///
    /// Returns whether the item is saved afterwards.
    pub fn toggle(&mut self, item: WishlistItem) -> bool {
        if self.remove(&item.id) {
            false
        } else {
            self.items.push(item);
            true
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Snapshot for Wishlist {
    const KEY: &'static str = WISHLIST_KEY;
}

/// The wishlist state container held by UI code.
pub type WishlistStore<P> = Store<Wishlist, P>;

impl<P: SnapshotStore> Store<Wishlist, P> {
    pub fn add_to_wishlist(&mut self, item: WishlistItem) -> bool {
        self.update(|wishlist| wishlist.add(item))
    }

    pub fn remove_from_wishlist(&mut self, id: &ProductId) -> bool {
        self.update(|wishlist| wishlist.remove(id))
    }

    pub fn toggle_wishlist(&mut self, item: WishlistItem) -> bool {
        self.update(|wishlist| wishlist.toggle(item))
    }

    pub fn clear(&mut self) {
        self.update(Wishlist::clear);
    }
}
