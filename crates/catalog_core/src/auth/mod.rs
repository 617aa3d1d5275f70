//! Request-level authentication gates.
//!
//! # Responsibility
//! - Decide whether an inbound request may reach catalog handlers.
//! - Stay independent of any HTTP framework; adapters translate decisions.
//!
//! # Invariants
//! - Gate configuration is immutable after construction.

pub mod api_key;
