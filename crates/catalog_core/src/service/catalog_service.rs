//! Catalog use-case service.
//!
//! # Responsibility
//! - Provide the product CRUD and search entry points for outer layers.
//! - Turn absence into explicit `ProductNotFound` errors.
//!
//! # Invariants
//! - The service stays storage-agnostic; it only talks to `ProductRepository`.
//! - Create never honors a caller-supplied id.
//! - Update is a full replacement whose id always equals the target id.

use crate::model::product::{Product, ProductId};
use crate::repo::product_repo::{ProductRepository, RepoError};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CatalogResult<T> = Result<T, CatalogServiceError>;

/// Service error for catalog use-cases.
#[derive(Debug)]
pub enum CatalogServiceError {
    /// Target product does not exist.
    ProductNotFound(ProductId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for CatalogServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProductNotFound(id) => write!(f, "Product not found with id: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ProductNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for CatalogServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service over a product repository.
pub struct CatalogService<R: ProductRepository> {
    repo: R,
}

impl<R: ProductRepository> CatalogService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns every stored product.
    pub fn get_all_products(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.repo.find_all()?)
    }

    /// Loads one product.
    ///
    /// Absence is reported as `ProductNotFound`, never as an empty value.
    pub fn get_product_by_id(&self, id: ProductId) -> CatalogResult<Product> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| not_found("get", id))
    }

    /// Stores a new product and returns it with its generated id.
    ///
    /// Payload validation is the caller's job; see `Product::validate`.
    pub fn create_product(&self, product: Product) -> CatalogResult<Product> {
        let unsaved = Product {
            id: None,
            ..product
        };
        let created = self.repo.save(&unsaved)?;
        debug!(
            "event=product_create module=service status=ok product_id={}",
            created.id.unwrap_or_default()
        );
        Ok(created)
    }

    /// Replaces the product at `id` with `product`.
    ///
    /// # Contract
    /// - Fails with `ProductNotFound` when `id` does not exist.
    /// - Any id carried by `product` is overwritten with `id`.
    /// - Fields absent from `product` are cleared, not merged.
    pub fn update_product(&self, id: ProductId, product: Product) -> CatalogResult<Product> {
        if self.repo.find_by_id(id)?.is_none() {
            return Err(not_found("update", id));
        }

        let replacement = Product {
            id: Some(id),
            ..product
        };
        let updated = self.repo.save(&replacement)?;
        debug!("event=product_update module=service status=ok product_id={id}");
        Ok(updated)
    }

    /// Permanently deletes the product at `id`.
    pub fn delete_product(&self, id: ProductId) -> CatalogResult<()> {
        if !self.repo.exists_by_id(id)? {
            return Err(not_found("delete", id));
        }

        self.repo.delete_by_id(id)?;
        debug!("event=product_delete module=service status=ok product_id={id}");
        Ok(())
    }

    /// Case-insensitive substring search on product names.
    pub fn search_products(&self, name_part: &str) -> CatalogResult<Vec<Product>> {
        let hits = self.repo.find_by_name_containing_ignore_case(name_part)?;
        debug!(
            "event=product_search module=service status=ok query_len={} hits={}",
            name_part.chars().count(),
            hits.len()
        );
        Ok(hits)
    }
}

fn not_found(operation: &'static str, id: ProductId) -> CatalogServiceError {
    warn!("event=product_{operation} module=service status=not_found product_id={id}");
    CatalogServiceError::ProductNotFound(id)
}
