//! Shopfront Core - Shared types and client-side state.
//!
//! This crate provides the pieces shared by the proxy service and the CLI:
//! - `proxy` - Backend-for-frontend HTTP service in front of the upstream API
//! - `cli` - Command-line storefront client that owns the cart and wishlist
//!
//! # Architecture
//!
//! Nothing here speaks HTTP. State containers are owned explicitly by their
//! caller and persist through an injected [`SnapshotStore`] adapter, so the
//! same cart logic runs against a file on disk, an in-memory map in tests,
//! or anything else that can hold a JSON string under a fixed key.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers and decimal prices
//! - [`product`] - Normalization of loosely-typed upstream product payloads
//! - [`cart`] - Cart line items and the cart state
//! - [`wishlist`] - Wishlist state
//! - [`store`] - Observable, persisted state container
//! - [`persistence`] - Snapshot storage adapters
//! - [`order`] - Order draft assembly from cart contents

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod order;
pub mod persistence;
pub mod product;
pub mod store;
pub mod types;
pub mod wishlist;

pub use cart::{Cart, CartStore, LineItem};
pub use order::{ContactDetails, OrderDraft, OrderError, OrderLine, ShippingAddress};
pub use persistence::{FileStore, MemoryStore, PersistError, SnapshotStore};
pub use product::Product;
pub use store::{Snapshot, Store};
pub use types::*;
pub use wishlist::{Wishlist, WishlistItem, WishlistStore};
