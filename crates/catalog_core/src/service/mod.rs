//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep HTTP and other outer layers decoupled from storage details.

pub mod catalog_service;
