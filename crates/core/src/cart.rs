//! Client-side cart state.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s with at most one line per
//! product id. [`CartStore`] wraps it in a [`Store`] so every change is
//! persisted and observable; the store is what UI code holds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::persistence::SnapshotStore;
use crate::product::Product;
use crate::store::{Snapshot, Store};
use crate::types::ProductId;

/// Snapshot key for the cart.
pub const CART_KEY: &str = "cart";

const fn default_quantity() -> u32 {
    1
}

/// One product-plus-quantity entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    /// Always at least 1 once the item is in a cart.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl LineItem {
    /// Create a line item with quantity 1 and no image or category.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            quantity: 1,
            image: String::new(),
            category: None,
        }
    }

    /// Set the quantity to add.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Price multiplied by quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

impl From<&Product> for LineItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            quantity: 1,
            image: product.image.clone(),
            category: product.category.clone(),
        }
    }
}

/// Cart contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up the line for `id`.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Add an item, merging with an existing line for the same id.
    ///
    /// The incoming `quantity` is what gets added; `0` counts as `1`.
    pub fn add(&mut self, item: LineItem) {
        let quantity = item.quantity.max(1);
        if let Some(existing) = self.items.iter_mut().find(|line| line.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            self.items.push(LineItem { quantity, ..item });
        }
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() != before
    }

    /// Set the quantity of the line for `id`, clamping to at least 1.
    ///
    /// Returns whether a line for `id` exists.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| &item.id == id) else {
            return false;
        };
        item.quantity = quantity.max(1);
        true
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of price × quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |count, item| count.saturating_add(item.quantity))
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Snapshot for Cart {
    const KEY: &'static str = CART_KEY;
}

/// The cart state container held by UI code.
pub type CartStore<P> = Store<Cart, P>;

impl<P: SnapshotStore> Store<Cart, P> {
    /// Add an item to the cart. See [`Cart::add`].
    pub fn add_to_cart(&mut self, item: LineItem) {
        self.update(|cart| cart.add(item));
    }

    /// Remove a product from the cart. See [`Cart::remove`].
    pub fn remove_from_cart(&mut self, id: &ProductId) -> bool {
        self.update(|cart| cart.remove(id))
    }

    /// Change a line's quantity. See [`Cart::set_quantity`].
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) -> bool {
        self.update(|cart| cart.set_quantity(id, quantity))
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.update(Cart::clear);
    }

    /// Current cart total.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.state().total()
    }

    /// Current number of units in the cart.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.state().item_count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::persistence::MemoryStore;

    fn shirt() -> LineItem {
        LineItem::new(1, "Shirt", Decimal::from(10))
    }

    #[test]
    fn test_same_id_adds_sum_into_one_line() {
        let mut cart = Cart::new();
        cart.add(shirt().with_quantity(2));
        cart.add(shirt());
        cart.add(shirt().with_quantity(4));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&ProductId::Number(1)).unwrap().quantity, 7);
    }

    #[test]
    fn test_remove_then_add_starts_fresh() {
        let mut cart = Cart::new();
        cart.add(shirt().with_quantity(5));
        assert!(cart.remove(&ProductId::Number(1)));

        cart.add(shirt().with_quantity(2));
        assert_eq!(cart.get(&ProductId::Number(1)).unwrap().quantity, 2);
    }

    #[test]
    fn test_zero_quantity_counts_as_one() {
        let mut cart = Cart::new();
        cart.add(shirt().with_quantity(0));
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_set_quantity_clamps() {
        let mut cart = Cart::new();
        cart.add(shirt().with_quantity(3));

        assert!(cart.set_quantity(&ProductId::Number(1), 0));
        assert_eq!(cart.get(&ProductId::Number(1)).unwrap().quantity, 1);

        assert!(!cart.set_quantity(&ProductId::Number(99), 4));
    }

    #[test]
    fn test_total_and_count() {
        let mut cart = Cart::new();
        cart.add(LineItem::new(1, "A", Decimal::from(10)).with_quantity(2));
        cart.add(LineItem::new("b", "B", Decimal::from(5)).with_quantity(3));

        assert_eq!(cart.total(), Decimal::from(35));
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_numeric_and_text_ids_do_not_merge() {
        let mut cart = Cart::new();
        cart.add(LineItem::new(1, "A", Decimal::ONE));
        cart.add(LineItem::new("1", "A", Decimal::ONE));
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut cart = Cart::new();
        cart.add(LineItem::new(3, "C", Decimal::ONE));
        cart.add(LineItem::new(1, "A", Decimal::ONE));
        cart.add(LineItem::new(3, "C", Decimal::ONE));

        let ids: Vec<_> = cart.items().iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids, vec![ProductId::Number(3), ProductId::Number(1)]);
    }

    #[test]
    fn test_line_item_from_product() {
        let product = Product::from_upstream(&serde_json::json!({
            "id": "sku-1",
            "name": "Cap",
            "price": "15",
            "category": "hats"
        }))
        .unwrap();

        let item = LineItem::from(&product);
        assert_eq!(item.id, ProductId::from("sku-1"));
        assert_eq!(item.quantity, 1);
        assert_eq!(item.category.as_deref(), Some("hats"));
    }

    #[test]
    fn test_snapshot_defaults_missing_fields() {
        let cart: Cart = serde_json::from_str(
            r#"{"items":[{"id":4,"title":"Sock","price":"2.50"}]}"#,
        )
        .unwrap();

        let item = cart.get(&ProductId::Number(4)).unwrap();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.image, "");
        assert_eq!(item.price, Decimal::new(250, 2));
    }

    #[test]
    fn test_store_survives_reload() {
        let backing = Arc::new(MemoryStore::new());

        let mut store = CartStore::load(Arc::clone(&backing));
        store.add_to_cart(shirt().with_quantity(2));
        store.add_to_cart(LineItem::new(2, "Hat", Decimal::from(5)).with_quantity(3));
        store.update_quantity(&ProductId::Number(2), 1);
        drop(store);

        let reloaded = CartStore::load(backing);
        assert_eq!(reloaded.state().len(), 2);
        assert_eq!(reloaded.total(), Decimal::from(25));
        assert_eq!(reloaded.item_count(), 3);
    }

    #[test]
    fn test_store_notifies_on_add_and_clear() {
        let mut store = CartStore::load(MemoryStore::new());
        let mut rx = store.subscribe();

        store.add_to_cart(shirt());
        assert_eq!(rx.borrow_and_update().item_count(), 1);

        store.clear();
        assert!(rx.borrow_and_update().is_empty());
    }

    #[test]
    fn test_store_remove_unknown_is_noop() {
        let mut store = CartStore::load(MemoryStore::new());
        let rx = store.subscribe();

        assert!(!store.remove_from_cart(&ProductId::Number(42)));
        assert!(!rx.has_changed().unwrap());
    }
}
