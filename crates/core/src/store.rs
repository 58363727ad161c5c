//! Observable, persisted state container.
//!
//! [`Store`] owns one piece of client state (the cart, the wishlist) and is
//! the only way to change it. Every mutation goes through [`Store::update`],
//! which pushes the new state to subscribers and writes a snapshot through
//! the injected [`SnapshotStore`]. Mutation requires `&mut self`, so a store
//! has exactly one writer; readers hold `watch` receivers.
//!
//! Persistence is best effort. A failed save is logged and otherwise
//! ignored, and a missing or unreadable snapshot starts the state empty.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;

use crate::persistence::{PersistError, SnapshotStore};

/// State that can live in a [`Store`].
pub trait Snapshot:
    Serialize + DeserializeOwned + Default + Clone + PartialEq + Send + Sync + 'static
{
    /// Fixed key the snapshot is persisted under.
    const KEY: &'static str;
}

/// Explicitly-owned state container with persistence and change
/// notification.
pub struct Store<T: Snapshot, P: SnapshotStore> {
    state: T,
    persistence: P,
    tx: watch::Sender<T>,
}

impl<T: Snapshot, P: SnapshotStore> Store<T, P> {
    /// Restore state from `persistence`, or start empty.
    pub fn load(persistence: P) -> Self {
        let state = match persistence.load(T::KEY) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!(key = T::KEY, error = %e, "Discarding unreadable snapshot");
                T::default()
            }),
            Ok(None) => T::default(),
            Err(e) => {
                tracing::debug!(key = T::KEY, error = %e, "Snapshot storage unavailable");
                T::default()
            }
        };

        Self::with_state(state, persistence)
    }

    /// Start from an explicit state without reading persistence.
    pub fn with_state(state: T, persistence: P) -> Self {
        let (tx, _rx) = watch::channel(state.clone());
        Self {
            state,
            persistence,
            tx,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &T {
        &self.state
    }

    /// Receive every committed state from now on.
    ///
    /// The receiver starts out holding the current state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// The persistence adapter this store writes to.
    #[must_use]
    pub const fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Apply a mutation and commit it.
    ///
    /// Subscribers are notified and a snapshot is saved only when the state
    /// actually changed.
    pub fn update<R>(&mut self, mutate: impl FnOnce(&mut T) -> R) -> R {
        let before = self.state.clone();
        let result = mutate(&mut self.state);
        if self.state != before {
            self.commit();
        }
        result
    }

    fn commit(&self) {
        self.tx.send_replace(self.state.clone());

        let saved = serde_json::to_string(&self.state)
            .map_err(PersistError::from)
            .and_then(|json| self.persistence.save(T::KEY, &json));
        if let Err(e) = saved {
            tracing::debug!(key = T::KEY, error = %e, "Snapshot not persisted");
        }
    }
}
