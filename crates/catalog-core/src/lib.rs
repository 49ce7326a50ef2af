//! # Catalog Core
//!
//! The domain layer of the catalog service.
//! This crate contains pure business logic with zero infrastructure
//! dependencies: entities, the product-code codec, the port traits and the
//! cache-coherent catalog services.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
