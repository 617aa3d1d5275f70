//! Core domain logic for the product catalog.
//! This crate owns the product model, its persistence port and the API key gate;
//! HTTP concerns live in `catalog_server`.

pub mod auth;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use auth::api_key::{
    ApiKeyGate, ApiKeyGateError, GateDecision, RejectReason, API_KEY_HEADER,
    DEFAULT_PROTECTED_PREFIX, UNAUTHORIZED_BODY,
};
pub use logging::{default_log_level, flush_logs, init_logging};
pub use model::product::{Product, ProductId, ProductValidationError};
pub use repo::memory_repo::InMemoryProductRepository;
pub use repo::product_repo::{ProductRepository, RepoError, RepoResult, SqliteProductRepository};
pub use service::catalog_service::{CatalogResult, CatalogService, CatalogServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
