//! In-memory product repository.
//!
//! Used by tests and embedders that do not need durable storage. Mirrors the
//! SQLite adapter: ascending id order, ids never reused after delete.

use crate::model::product::{Product, ProductId};
use crate::repo::product_repo::{ProductRepository, RepoError, RepoResult};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct MemoryState {
    /// `None` once `ProductId::MAX` has been handed out or saved explicitly.
    next_id: Option<ProductId>,
    rows: BTreeMap<ProductId, Product>,
}

/// Mutex-guarded map keyed by product id.
#[derive(Debug)]
pub struct InMemoryProductRepository {
    state: Mutex<MemoryState>,
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                next_id: Some(1),
                rows: BTreeMap::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // Every mutation is a single map operation, so a poisoned guard still
        // holds consistent data.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProductRepository for InMemoryProductRepository {
    fn find_all(&self) -> RepoResult<Vec<Product>> {
        Ok(self.lock().rows.values().cloned().collect())
    }

    fn find_by_id(&self, id: ProductId) -> RepoResult<Option<Product>> {
        Ok(self.lock().rows.get(&id).cloned())
    }

    fn save(&self, product: &Product) -> RepoResult<Product> {
        let mut state = self.lock();
        let id = match product.id {
            Some(id) => {
                if let Some(next) = state.next_id {
                    if id >= next {
                        state.next_id = id.checked_add(1);
                    }
                }
                id
            }
            None => {
                let id = state.next_id.ok_or(RepoError::IdSpaceExhausted)?;
                state.next_id = id.checked_add(1);
                id
            }
        };

        let stored = Product {
            id: Some(id),
            ..product.clone()
        };
        state.rows.insert(id, stored.clone());
        Ok(stored)
    }

    fn exists_by_id(&self, id: ProductId) -> RepoResult<bool> {
        Ok(self.lock().rows.contains_key(&id))
    }

    fn delete_by_id(&self, id: ProductId) -> RepoResult<()> {
        self.lock().rows.remove(&id);
        Ok(())
    }

    fn find_by_name_containing_ignore_case(&self, name_part: &str) -> RepoResult<Vec<Product>> {
        let needle = name_part.to_lowercase();
        Ok(self
            .lock()
            .rows
            .values()
            .filter(|product| product.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}
