//! Catalog entry entity: a combination-to-product mapping.

/// One row of the catalog index.
///
/// Keyed externally by the canonical combination string; immutable after
/// load. `image_url` is optional; a row without one still resolves to a
/// purchasable product.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub article: String,
    pub target_url: String,
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_entry_construction() {
        let entry = CatalogEntry {
            article: "12345".to_string(),
            target_url: "https://www.wildberries.ru/catalog/12345/detail.aspx".to_string(),
            image_url: None,
        };

        assert_eq!(entry.article, "12345");
        assert!(entry.image_url.is_none());
    }
}
