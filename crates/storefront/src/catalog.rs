//! Static product catalog.
//!
//! The catalog is an immutable, in-memory list of products known at build
//! time. It is loaded once at startup - either the document embedded in
//! this crate (`content/catalog.json`) or an alternate file - and is
//! read-only afterwards. Nothing in this crate ever creates, edits, or
//! deletes a product.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use glow_beauty_core::{Price, ProductId};

/// The catalog document shipped with this crate.
const BUILTIN_CATALOG: &str = include_str!("../content/catalog.json");

/// Errors that can occur while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Reading the catalog file failed.
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The catalog document is not valid JSON for a product list.
    #[error("failed to parse catalog document: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two products in the document share an identifier.
    #[error("duplicate product id in catalog: {0}")]
    DuplicateId(ProductId),
}

/// A product in the store.
///
/// Every field except `id` and `price` tolerates absence when
/// deserializing, so denormalized copies of a product (cart line items in
/// persisted snapshots) load even when written by an older layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier, unique within the catalog.
    pub id: ProductId,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Brand name.
    #[serde(default)]
    pub brand: String,
    /// Unit price.
    pub price: Price,
    /// Category slug (e.g. `skincare`, `makeup`, `hair`, `fragrance`).
    #[serde(default)]
    pub category: String,
    /// Average review rating.
    #[serde(default)]
    pub rating: f64,
    /// Number of reviews behind the rating.
    #[serde(default)]
    pub reviews: u32,
    /// Image references, primary image first.
    #[serde(default)]
    pub images: Vec<String>,
    /// Available shades, for products sold in shades.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shades: Option<Vec<String>>,
    /// Available sizes, for products sold in sizes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    /// Descriptive text.
    #[serde(default)]
    pub description: String,
    /// Whether the product is featured on the home page.
    #[serde(default)]
    pub featured: bool,
    /// Whether the product is a bestseller.
    #[serde(default)]
    pub bestseller: bool,
}

/// Sort keys for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductSortKey {
    /// Featured products first.
    #[default]
    Featured,
    /// Bestsellers first.
    BestSelling,
    /// Most recent catalog additions first.
    Newest,
    /// Cheapest first.
    PriceLowToHigh,
    /// Most expensive first.
    PriceHighToLow,
    /// Highest rated first.
    Rating,
}

/// Immutable, in-memory product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Products in document order; position doubles as the recency signal.
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Load the catalog embedded in this crate.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the embedded document is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_slice(BUILTIN_CATALOG.as_bytes())
    }

    /// Load a catalog document from a file.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read, is not a
    /// valid product list, or contains duplicate product ids.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let bytes = std::fs::read(path).map_err(|source| CatalogError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_slice(&bytes)
    }

    /// Parse a catalog document from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the document is not a valid product
    /// list or contains duplicate product ids.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_slice(bytes)?;
        Self::from_products(products)
    }

    /// Build a catalog from already-parsed products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two products share an id.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }

        tracing::info!(products = products.len(), "catalog loaded");
        Ok(Self { products, index })
    }

    /// Look up a product by identifier.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index
            .get(id)
            .and_then(|&position| self.products.get(position))
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products in the given category, in catalog order.
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.category == category)
            .collect()
    }

    /// Products flagged as featured, in catalog order.
    #[must_use]
    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.featured).collect()
    }

    /// Products flagged as bestsellers, in catalog order.
    #[must_use]
    pub fn bestsellers(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.bestseller).collect()
    }

    /// Up to `limit` products sharing a product's category, excluding the
    /// product itself.
    #[must_use]
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|other| other.category == product.category && other.id != product.id)
            .take(limit)
            .collect()
    }

    /// Distinct category slugs in first-appearance order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(product.category.as_str());
            }
        }
        seen
    }

    /// A shop-page listing: optional category filter, then sort.
    ///
    /// Sorts are stable, so ties keep catalog order. `Newest` orders by
    /// reverse catalog position - later entries in the document are newer.
    #[must_use]
    pub fn sorted(&self, category: Option<&str>, sort: ProductSortKey) -> Vec<&Product> {
        let mut listing = match category {
            Some(category) => self.by_category(category),
            None => self.products.iter().collect(),
        };

        match sort {
            ProductSortKey::Featured => listing.sort_by_key(|p| Reverse(p.featured)),
            ProductSortKey::BestSelling => listing.sort_by_key(|p| Reverse(p.bestseller)),
            ProductSortKey::Newest => listing.reverse(),
            ProductSortKey::PriceLowToHigh => listing.sort_by_key(|p| p.price),
            ProductSortKey::PriceHighToLow => listing.sort_by_key(|p| Reverse(p.price)),
            ProductSortKey::Rating => {
                listing.sort_by(|a, b| b.rating.total_cmp(&a.rating));
            }
        }

        listing
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str, category: &str, price: u32) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            brand: "GlowBeauty".to_owned(),
            price: Price::from(price),
            category: category.to_owned(),
            rating: 4.0,
            reviews: 12,
            images: vec![format!("/images/{id}.jpg")],
            shades: None,
            sizes: None,
            description: String::new(),
            featured: false,
            bestseller: false,
        }
    }

    fn fixture() -> Catalog {
        let mut serum = product("serum", "skincare", 42);
        serum.featured = true;
        serum.rating = 4.9;

        let mut lipstick = product("lipstick", "makeup", 24);
        lipstick.bestseller = true;
        lipstick.rating = 4.2;

        let mut cleanser = product("cleanser", "skincare", 18);
        cleanser.bestseller = true;
        cleanser.rating = 4.5;

        let shampoo = product("shampoo", "hair", 28);

        Catalog::from_products(vec![serum, lipstick, cleanser, shampoo]).unwrap()
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result =
            Catalog::from_products(vec![product("a", "skincare", 1), product("a", "makeup", 2)]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(_))));
    }

    #[test]
    fn test_get_by_id() {
        let catalog = fixture();
        let found = catalog.get(&ProductId::new("lipstick")).unwrap();
        assert_eq!(found.category, "makeup");
        assert!(catalog.get(&ProductId::new("missing")).is_none());
    }

    #[test]
    fn test_by_category_preserves_order() {
        let catalog = fixture();
        let skincare: Vec<&str> = catalog
            .by_category("skincare")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(skincare, vec!["serum", "cleanser"]);
    }

    #[test]
    fn test_flag_filters() {
        let catalog = fixture();
        assert_eq!(catalog.featured().len(), 1);
        assert_eq!(catalog.bestsellers().len(), 2);
    }

    #[test]
    fn test_related_excludes_self_and_caps() {
        let catalog = fixture();
        let serum = catalog.get(&ProductId::new("serum")).unwrap().clone();

        let related = catalog.related(&serum, 4);
        assert_eq!(related.len(), 1);
        assert_eq!(related.first().unwrap().id.as_str(), "cleanser");

        assert!(catalog.related(&serum, 0).is_empty());
    }

    #[test]
    fn test_categories_first_appearance_order() {
        let catalog = fixture();
        assert_eq!(catalog.categories(), vec!["skincare", "makeup", "hair"]);
    }

    #[test]
    fn test_sorted_price_ascending() {
        let catalog = fixture();
        let ids: Vec<&str> = catalog
            .sorted(None, ProductSortKey::PriceLowToHigh)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["cleanser", "lipstick", "shampoo", "serum"]);
    }

    #[test]
    fn test_sorted_rating_descending() {
        let catalog = fixture();
        let ids: Vec<&str> = catalog
            .sorted(None, ProductSortKey::Rating)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["serum", "cleanser", "lipstick", "shampoo"]);
    }

    #[test]
    fn test_sorted_newest_is_reverse_catalog_order() {
        let catalog = fixture();
        let ids: Vec<&str> = catalog
            .sorted(None, ProductSortKey::Newest)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["shampoo", "cleanser", "lipstick", "serum"]);
    }

    #[test]
    fn test_sorted_featured_is_stable() {
        let catalog = fixture();
        let ids: Vec<&str> = catalog
            .sorted(None, ProductSortKey::Featured)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        // Featured first, everything else keeps catalog order.
        assert_eq!(ids, vec!["serum", "lipstick", "cleanser", "shampoo"]);
    }

    #[test]
    fn test_sorted_with_category_filter() {
        let catalog = fixture();
        let ids: Vec<&str> = catalog
            .sorted(Some("skincare"), ProductSortKey::PriceHighToLow)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["serum", "cleanser"]);
    }

    #[test]
    fn test_product_deserializes_with_partial_fields() {
        let product: Product = serde_json::from_str(r#"{"id": "a", "price": 5}"#).unwrap();
        assert_eq!(product.id.as_str(), "a");
        assert_eq!(product.price, Price::from(5));
        assert!(product.title.is_empty());
        assert!(!product.featured);
    }
}
