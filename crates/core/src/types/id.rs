//! Newtype ID for type-safe product references.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A catalog product identifier.
///
/// Product IDs are opaque strings supplied by the catalog. The newtype keeps
/// them from being mixed up with other string data (category slugs, image
/// paths) and is the identity used for cart line items and favorites.
///
/// ## Examples
///
/// ```
/// use glow_beauty_core::ProductId;
///
/// let id = ProductId::new("rose-quartz-serum");
/// assert_eq!(id.as_str(), "rose-quartz-serum");
/// assert_eq!(id, ProductId::from("rose-quartz-serum"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from a string value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_equality() {
        assert_eq!(ProductId::new("1"), ProductId::from("1".to_string()));
        assert_ne!(ProductId::new("1"), ProductId::new("2"));
    }

    #[test]
    fn test_product_id_serde_transparent() {
        let id = ProductId::new("velvet-matte-lipstick");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"velvet-matte-lipstick\"");

        let parsed: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_product_id_display() {
        assert_eq!(ProductId::new("42").to_string(), "42");
    }
}
