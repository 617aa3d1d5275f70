//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the product persistence port consumed by the catalog service.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories do not validate payloads; that happens at the request boundary.
//! - Storage failures are returned unchanged, never retried.

pub mod memory_repo;
pub mod product_repo;
