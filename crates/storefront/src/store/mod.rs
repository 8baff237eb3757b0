//! Cart and favorites state with transparent persistence.
//!
//! [`StoreState`] holds the pure transition rules; [`Store`] pairs one
//! with a [`SnapshotStore`] backend, rehydrating at startup and writing
//! the complete snapshot back after every mutation. The store is the
//! single source of truth: mutations are synchronous, so a read after a
//! mutator call always sees the post-mutation value.

mod snapshot;
mod state;

pub use snapshot::{JsonSnapshotStore, MemorySnapshotStore, SnapshotError, SnapshotStore};
pub use state::{LineItem, StoreState};

use glow_beauty_core::{Price, ProductId};

use crate::catalog::Product;

/// The cart/favorites store.
///
/// Constructed with [`Store::open`], which loads the persisted snapshot
/// or starts empty. Mutators never fail: a backend that cannot be written
/// is logged and the in-memory state stays authoritative for the session.
pub struct Store {
    state: StoreState,
    snapshots: Box<dyn SnapshotStore>,
}

impl Store {
    /// Open a store backed by the given snapshot backend.
    ///
    /// Reads the persisted snapshot once. An absent snapshot starts the
    /// store empty; a malformed or unreadable one is discarded with a
    /// warning. Initialization never fails because of bad durable state.
    #[must_use]
    pub fn open(snapshots: Box<dyn SnapshotStore>) -> Self {
        let state = match snapshots.load() {
            Ok(Some(state)) => state,
            Ok(None) => StoreState::default(),
            Err(error) => {
                tracing::warn!(%error, "discarding unreadable snapshot, starting empty");
                StoreState::default()
            }
        };

        Self { state, snapshots }
    }

    /// Add one unit of a product to the cart.
    pub fn add_to_cart(&mut self, product: &Product) {
        self.state.add_to_cart(product);
        self.persist();
    }

    /// Remove a product's line from the cart; no-op if absent.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) {
        self.state.remove_from_cart(product_id);
        self.persist();
    }

    /// Set a line's quantity; any `quantity <= 0` removes the line.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        self.state.update_quantity(product_id, quantity);
        self.persist();
    }

    /// Empty the cart unconditionally.
    pub fn clear_cart(&mut self) {
        self.state.clear_cart();
        self.persist();
    }

    /// Toggle a product id in the favorite set.
    pub fn toggle_favorite(&mut self, product_id: &ProductId) {
        self.state.toggle_favorite(product_id);
        self.persist();
    }

    /// Whether a product id is currently favorited.
    #[must_use]
    pub fn is_favorite(&self, product_id: &ProductId) -> bool {
        self.state.is_favorite(product_id)
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.state.cart_total()
    }

    /// Total unit count (sum of quantities, not distinct products).
    #[must_use]
    pub fn cart_item_count(&self) -> u64 {
        self.state.cart_item_count()
    }

    /// Cart lines in insertion order of first add.
    #[must_use]
    pub fn cart(&self) -> &[LineItem] {
        self.state.cart()
    }

    /// Favorited product ids in insertion order.
    #[must_use]
    pub fn favorites(&self) -> &[ProductId] {
        self.state.favorites()
    }

    /// The current state as a read snapshot.
    #[must_use]
    pub fn state(&self) -> &StoreState {
        &self.state
    }

    /// Write the complete current snapshot to the backend.
    fn persist(&self) {
        if let Err(error) = self.snapshots.save(&self.state) {
            tracing::error!(%error, "failed to persist store snapshot");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str, price: u32) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            brand: "GlowBeauty".to_owned(),
            price: Price::from(price),
            category: "makeup".to_owned(),
            rating: 4.0,
            reviews: 3,
            images: Vec::new(),
            shades: None,
            sizes: None,
            description: String::new(),
            featured: false,
            bestseller: false,
        }
    }

    #[test]
    fn test_open_with_no_snapshot_starts_empty() {
        let store = Store::open(Box::new(MemorySnapshotStore::new()));
        assert!(store.cart().is_empty());
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn test_open_rehydrates_saved_snapshot() {
        let mut state = StoreState::default();
        state.add_to_cart(&product("a", 12));
        state.toggle_favorite(&ProductId::new("b"));

        let store = Store::open(Box::new(MemorySnapshotStore::with_snapshot(state.clone())));
        assert_eq!(store.state(), &state);
    }

    #[test]
    fn test_every_mutator_persists_the_full_snapshot() {
        let backend = MemorySnapshotStore::new();
        let mut store = Store::open(Box::new(backend.clone()));
        let serum = product("a", 12);

        store.add_to_cart(&serum);
        assert_eq!(backend.snapshot().unwrap(), *store.state());

        store.update_quantity(&serum.id, 4);
        assert_eq!(backend.snapshot().unwrap(), *store.state());

        store.toggle_favorite(&serum.id);
        assert_eq!(backend.snapshot().unwrap(), *store.state());

        store.remove_from_cart(&serum.id);
        assert_eq!(backend.snapshot().unwrap(), *store.state());

        store.clear_cart();
        assert_eq!(backend.snapshot().unwrap(), *store.state());
    }

    #[test]
    fn test_noop_mutations_still_persist() {
        let backend = MemorySnapshotStore::new();
        let mut store = Store::open(Box::new(backend.clone()));

        store.remove_from_cart(&ProductId::new("missing"));
        assert!(backend.snapshot().is_some());
    }

    #[test]
    fn test_reads_see_mutations_immediately() {
        let mut store = Store::open(Box::new(MemorySnapshotStore::new()));
        let serum = product("a", 10);

        store.add_to_cart(&serum);
        assert_eq!(store.cart_total(), Price::from(10));
        assert_eq!(store.cart_item_count(), 1);

        store.add_to_cart(&serum);
        assert_eq!(store.cart_total(), Price::from(20));
        assert_eq!(store.cart_item_count(), 2);
    }
}
