//! Cache key scheme for product entries.

/// Key naming for the two kinds of product cache entries.
///
/// Both population and invalidation go through [`item`](Self::item),
/// so a per-id entry written on read is always the entry removed on
/// update or delete.
#[derive(Debug, Clone)]
pub struct CacheKeys {
    listing: String,
    item_prefix: String,
}

impl Default for CacheKeys {
    fn default() -> Self {
        Self {
            listing: "products:all".to_string(),
            item_prefix: "products:".to_string(),
        }
    }
}

impl CacheKeys {
    /// Creates a key scheme with a custom listing key and per-id prefix.
    #[must_use]
    pub fn new(listing: impl Into<String>, item_prefix: impl Into<String>) -> Self {
        Self {
            listing: listing.into(),
            item_prefix: item_prefix.into(),
        }
    }

    /// The key holding the full product listing.
    #[must_use]
    pub fn listing(&self) -> &str {
        &self.listing
    }

    /// The key holding a single product.
    #[must_use]
    pub fn item(&self, id: i64) -> String {
        format!("{}{}", self.item_prefix, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scheme_matches_documented_keys() {
        let keys = CacheKeys::default();
        assert_eq!(keys.listing(), "products:all");
        assert_eq!(keys.item(42), "products:42");
    }

    #[test]
    fn custom_scheme() {
        let keys = CacheKeys::new("inv:list", "inv:item:");
        assert_eq!(keys.listing(), "inv:list");
        assert_eq!(keys.item(7), "inv:item:7");
    }
}
