// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! The user's product selection, persisted through a [`KvStore`].
//!
//! Invariants: ids are unique; insertion order is preserved; every mutating
//! operation writes the full set back to the store before returning.
//! Rendering the change (marking cards, refreshing tags) is the caller's job.

use tracing::warn;

use crate::catalog::Product;
use crate::store::{KvStore, SELECTION_KEY};

/// An ordered, id-unique set of selected products bound to its backing store.
pub struct SelectionSet<S: KvStore> {
    store: S,
    products: Vec<Product>,
}

impl<S: KvStore> SelectionSet<S> {
    /// Rehydrate the selection from the store.
    ///
    /// Fails soft: a missing entry starts empty, and a malformed blob is
    /// logged and discarded rather than surfaced — corrupt persisted state
    /// must never take the whole surface down.
    pub fn open(store: S) -> Self {
        let products = match store.get(SELECTION_KEY) {
            Ok(Some(text)) => match serde_json::from_str::<Vec<Product>>(&text) {
                Ok(list) => dedup_by_id(list),
                Err(e) => {
                    warn!(error = %e, "discarding corrupt persisted selection");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "could not read persisted selection");
                Vec::new()
            }
        };
        Self { store, products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn ids(&self) -> Vec<u32> {
        self.products.iter().map(|p| p.id).collect()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.products.iter().any(|p| p.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Add the product if absent, remove it if present.  Presence is tested
    /// by id equality.  Returns `true` when the product was added.
    pub fn toggle(&mut self, product: &Product) -> anyhow::Result<bool> {
        let added = match self.products.iter().position(|p| p.id == product.id) {
            Some(i) => {
                self.products.remove(i);
                false
            }
            None => {
                self.products.push(product.clone());
                true
            }
        };
        self.persist()?;
        Ok(added)
    }

    /// Remove a product by id.  Returns `true` when something was removed.
    pub fn remove(&mut self, id: u32) -> anyhow::Result<bool> {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        let removed = self.products.len() != before;
        self.persist()?;
        Ok(removed)
    }

    /// Drop every selected product.
    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.products.clear();
        self.persist()
    }

    /// Write the full set to the store as one JSON-encoded sequence.
    fn persist(&mut self) -> anyhow::Result<()> {
        let blob = serde_json::to_string(&self.products)?;
        self.store.set(SELECTION_KEY, &blob)
    }
}

/// Keep the first occurrence of each id.  Persisted blobs are written
/// id-unique, but the file is user-editable.
fn dedup_by_id(list: Vec<Product>) -> Vec<Product> {
    let mut out: Vec<Product> = Vec::with_capacity(list.len());
    for p in list {
        if !out.iter().any(|q| q.id == p.id) {
            out.push(p);
        }
    }
    out
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
