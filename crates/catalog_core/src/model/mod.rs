//! Catalog domain model.
//!
//! # Responsibility
//! - Define canonical data structures shared by storage, service and HTTP layers.
//!
//! # Invariants
//! - Every persisted product is identified by a storage-assigned `ProductId`.
//! - Deletion is permanent; there are no tombstones.

pub mod product;
