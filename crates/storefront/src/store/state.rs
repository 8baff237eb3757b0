//! Pure cart/favorites transition rules.

use serde::{Deserialize, Deserializer, Serialize};

use glow_beauty_core::{Price, ProductId};

use crate::catalog::Product;

/// A cart entry: a product's full field set plus a quantity.
///
/// Identity is the product id; the cart holds at most one line per id, and
/// a line's quantity is at least 1 for as long as the line exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Denormalized product data, serialized inline with the line.
    #[serde(flatten)]
    pub product: Product,
    /// Units of the product in the cart.
    #[serde(deserialize_with = "positive_quantity")]
    pub quantity: u32,
}

impl LineItem {
    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }
}

/// A persisted line with quantity 0 would violate the cart invariant, so
/// such a snapshot is rejected as malformed.
fn positive_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let quantity = u32::deserialize(deserializer)?;
    if quantity == 0 {
        return Err(serde::de::Error::custom("line item quantity must be at least 1"));
    }
    Ok(quantity)
}

/// Cart and favorites state with its transition rules.
///
/// This type owns no storage: it is the unit-testable core of the store.
/// It serializes directly as the durable snapshot layout,
/// `{"cart": [...], "favorites": [...]}`.
///
/// The cart keeps insertion order of first add; the favorite set keeps
/// insertion order and holds no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreState {
    cart: Vec<LineItem>,
    favorites: Vec<ProductId>,
}

impl StoreState {
    /// Add one unit of a product to the cart.
    ///
    /// An existing line for the product gains one unit; otherwise a new
    /// line with quantity 1 is appended. Safe to call repeatedly - each
    /// call adds exactly one unit.
    pub fn add_to_cart(&mut self, product: &Product) {
        if let Some(item) = self
            .cart
            .iter_mut()
            .find(|item| item.product.id == product.id)
        {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            self.cart.push(LineItem {
                product: product.clone(),
                quantity: 1,
            });
        }
    }

    /// Remove a product's line from the cart; silently a no-op if absent.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) {
        self.cart.retain(|item| item.product.id != *product_id);
    }

    /// Set a line's quantity; any `quantity <= 0` removes the line.
    ///
    /// Absent product ids are left alone - this never creates a line.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(product_id);
            return;
        }

        if let Some(item) = self
            .cart
            .iter_mut()
            .find(|item| item.product.id == *product_id)
        {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// Empty the cart unconditionally.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Toggle a product id in the favorite set.
    pub fn toggle_favorite(&mut self, product_id: &ProductId) {
        if self.is_favorite(product_id) {
            self.favorites.retain(|id| id != product_id);
        } else {
            self.favorites.push(product_id.clone());
        }
    }

    /// Whether a product id is currently favorited.
    #[must_use]
    pub fn is_favorite(&self, product_id: &ProductId) -> bool {
        self.favorites.contains(product_id)
    }

    /// Sum of price times quantity over all lines, recomputed fresh.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.cart.iter().map(LineItem::line_total).sum()
    }

    /// Total unit count (sum of quantities, not distinct products).
    #[must_use]
    pub fn cart_item_count(&self) -> u64 {
        self.cart.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Cart lines in insertion order of first add.
    #[must_use]
    pub fn cart(&self) -> &[LineItem] {
        &self.cart
    }

    /// Favorited product ids in insertion order.
    #[must_use]
    pub fn favorites(&self) -> &[ProductId] {
        &self.favorites
    }
}
