//! Catalog index: the immutable combination-to-product mapping.
//!
//! Loaded once at startup from a CSV table with the columns
//! `combination,article,image_url`. Keys are the canonical join of
//! per-question option labels in question order. A row with an empty
//! `image_url` falls back to the derived Wildberries CDN photo URL.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::entities::CatalogEntry;
use crate::error::AppError;
use crate::utils::wildberries;

/// In-memory catalog, immutable after load.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    entries: HashMap<String, CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    combination: String,
    article: String,
    #[serde(default)]
    image_url: Option<String>,
}

impl CatalogIndex {
    /// An index with no entries; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds an index from `(combination, entry)` pairs. Test seam.
    pub fn from_entries(pairs: impl IntoIterator<Item = (String, CatalogEntry)>) -> Self {
        Self {
            entries: pairs.into_iter().collect(),
        }
    }

    /// Loads the index from a CSV file.
    ///
    /// Rows with an empty combination or article are skipped with a
    /// warning. Duplicate combinations keep the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CatalogUnavailable`] when the file cannot be
    /// opened or a row cannot be parsed.
    pub fn load_from_csv(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| AppError::CatalogUnavailable(format!("{}: {e}", path.display())))?;

        let mut entries = HashMap::new();

        for row in reader.deserialize::<CatalogRow>() {
            let row = row.map_err(|e| {
                AppError::CatalogUnavailable(format!("{}: {e}", path.display()))
            })?;

            let combination = row.combination.trim().to_string();
            let article = row.article.trim().to_string();

            if combination.is_empty() || article.is_empty() {
                tracing::warn!("skipping catalog row with empty combination or article");
                continue;
            }

            let image_url = row
                .image_url
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .or_else(|| wildberries::image_url(&article));

            let entry = CatalogEntry {
                target_url: wildberries::detail_url(&article),
                article,
                image_url,
            };

            if entries.contains_key(&combination) {
                tracing::warn!(%combination, "duplicate catalog combination, keeping first");
                continue;
            }

            entries.insert(combination, entry);
        }

        tracing::info!(entries = entries.len(), path = %path.display(), "catalog loaded");
        Ok(Self { entries })
    }

    /// Looks up the entry for a canonical combination key.
    pub fn lookup(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
