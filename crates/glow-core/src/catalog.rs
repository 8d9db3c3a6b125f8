//! Product catalog: the static product list plus the filter/search predicate.
//!
//! The catalog is immutable once loaded.  Filtering is a pure full recompute
//! over the whole list — there is no incremental patching, so the visible set
//! is always derivable from (catalog, filter state) alone.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use glow_config::CatalogConfig;

/// A single catalog item.  `id` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: String,
    /// Image reference passed through to the rendering surface untouched.
    pub image: String,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

/// The full product list, in document order.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Return the bundled default catalog.
    pub fn bundled() -> Catalog {
        let json = include_str!("../products.json");
        let file: CatalogFile =
            serde_json::from_str(json).expect("bundled products.json must be valid");
        Catalog { products: file.products }
    }

    /// Load a catalog document of shape `{"products": [...]}` from disk.
    pub fn load(path: &Path) -> anyhow::Result<Catalog> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        let file: CatalogFile = serde_json::from_str(&text)
            .with_context(|| format!("parsing catalog {}", path.display()))?;
        Ok(Catalog { products: file.products })
    }

    /// Resolve the catalog from configuration: explicit path, or the bundled
    /// default when none is configured.
    pub fn from_config(cfg: &CatalogConfig) -> anyhow::Result<Catalog> {
        match &cfg.path {
            Some(p) => Catalog::load(p),
            None => Ok(Catalog::bundled()),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by its natural key.
    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct categories in catalog order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for p in &self.products {
            if !seen.contains(&p.category.as_str()) {
                seen.push(&p.category);
            }
        }
        seen
    }

    /// Apply the filter state and return the visible subset, catalog order
    /// preserved.  An empty result is valid; the caller renders a placeholder.
    pub fn filter(&self, state: &FilterState) -> Vec<&Product> {
        self.products.iter().filter(|p| state.matches(p)).collect()
    }
}

/// The current filter/search predicate.  Both predicates combine with AND
/// semantics; unset (or blank) predicates pass everything through.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Category filter, compared by equality.
    pub category: Option<String>,
    /// Search term, matched case-insensitively as a substring of the
    /// product's name, brand, category, or description.
    pub search: Option<String>,
}

impl FilterState {
    pub fn matches(&self, p: &Product) -> bool {
        if let Some(cat) = self.category.as_deref().filter(|c| !c.trim().is_empty()) {
            if p.category != cat {
                return false;
            }
        }
        if let Some(term) = self.search.as_deref().filter(|t| !t.trim().is_empty()) {
            let needle = term.to_lowercase();
            let hit = p.name.to_lowercase().contains(&needle)
                || p.brand.to_lowercase().contains(&needle)
                || p.category.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        true
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u32, name: &str, category: &str) -> Product {
        Product {
            id,
            name: name.into(),
            brand: "TestBrand".into(),
            category: category.into(),
            description: format!("{name} description"),
            image: format!("img/{id}.png"),
        }
    }

    fn two_item_catalog() -> Catalog {
        Catalog {
            products: vec![product(1, "Cleanser", "skincare"), product(2, "Lipstick", "makeup")],
        }
    }

    #[test]
    fn bundled_catalog_is_non_empty() {
        let cat = Catalog::bundled();
        assert!(!cat.products().is_empty(), "bundled catalog must contain at least one product");
    }

    #[test]
    fn bundled_catalog_ids_are_unique() {
        let cat = Catalog::bundled();
        let mut ids: Vec<u32> = cat.products().iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), cat.products().len());
    }

    #[test]
    fn empty_filter_returns_full_catalog_in_order() {
        let cat = two_item_catalog();
        let visible = cat.filter(&FilterState::default());
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].id, 1);
        assert_eq!(visible[1].id, 2);
    }

    #[test]
    fn category_filter_selects_by_equality() {
        let cat = two_item_catalog();
        let state = FilterState { category: Some("skincare".into()), search: None };
        let visible = cat.filter(&state);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1);
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let cat = two_item_catalog();
        let state = FilterState { category: None, search: Some("lip".into()) };
        let visible = cat.filter(&state);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 2);
    }

    #[test]
    fn search_matches_description_field() {
        let cat = two_item_catalog();
        let state = FilterState { category: None, search: Some("CLEANSER DESC".into()) };
        let visible = cat.filter(&state);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1);
    }

    #[test]
    fn category_and_search_combine_with_and_semantics() {
        let cat = two_item_catalog();
        let state = FilterState { category: Some("makeup".into()), search: Some("cleanser".into()) };
        assert!(cat.filter(&state).is_empty());
    }

    #[test]
    fn no_match_returns_empty_not_error() {
        let cat = two_item_catalog();
        let state = FilterState { category: None, search: Some("zzz-no-such".into()) };
        assert!(cat.filter(&state).is_empty());
    }

    #[test]
    fn blank_search_term_passes_everything() {
        let cat = two_item_catalog();
        let state = FilterState { category: None, search: Some("   ".into()) };
        assert_eq!(cat.filter(&state).len(), 2);
    }

    #[test]
    fn get_finds_by_id() {
        let cat = two_item_catalog();
        assert_eq!(cat.get(2).unwrap().name, "Lipstick");
        assert!(cat.get(99).is_none());
    }

    #[test]
    fn categories_are_distinct_in_catalog_order() {
        let cat = Catalog {
            products: vec![
                product(1, "A", "skincare"),
                product(2, "B", "makeup"),
                product(3, "C", "skincare"),
            ],
        };
        assert_eq!(cat.categories(), vec!["skincare", "makeup"]);
    }

    #[test]
    fn load_rejects_malformed_document() {
        use std::io::Write;
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "{{ not json").unwrap();
        assert!(Catalog::load(f.path()).is_err());
    }

    #[test]
    fn load_reads_products_array() {
        use std::io::Write;
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            f,
            r#"{{"products": [{{"id": 7, "name": "N", "brand": "B", "category": "c", "description": "d", "image": "i"}}]}}"#
        )
        .unwrap();
        let cat = Catalog::load(f.path()).unwrap();
        assert_eq!(cat.products().len(), 1);
        assert_eq!(cat.get(7).unwrap().brand, "B");
    }
}
