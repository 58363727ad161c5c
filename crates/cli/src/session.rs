//! The CLI's cart and wishlist, persisted under the data directory.

use std::path::Path;

use shopfront_core::{CartStore, FileStore, WishlistStore};

/// Both client-side stores, loaded from the same directory.
pub struct Session {
    pub cart: CartStore<FileStore>,
    pub wishlist: WishlistStore<FileStore>,
}

impl Session {
    /// Load (or start empty) the stores kept in `data_dir`.
    pub fn open(data_dir: &Path) -> Self {
        tracing::debug!(dir = %data_dir.display(), "Opening session");
        Self {
            cart: CartStore::load(FileStore::new(data_dir)),
            wishlist: WishlistStore::load(FileStore::new(data_dir)),
        }
    }
}
