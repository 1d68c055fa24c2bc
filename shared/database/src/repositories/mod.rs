//! Repository module for database CRUD operations
//!
//! Provides typed repository implementations for the supplier store and the
//! read-only parts collaborator.

pub mod part;
pub mod supplier;

pub use part::PartRepository;
pub use supplier::SupplierRepository;
