//! # Vendora Domain Models
//!
//! Core domain types for the Vendora supplier directory, together with the
//! pure logic that operates on them: field validation, the list filter
//! engine, the derived category/tag directories, and stats aggregation.
//!
//! ## Key Models
//!
//! - **Supplier**: a directory record with contact cards, category, status,
//!   tags, payment terms, and a soft-delete marker
//! - **SupplierDraft / SupplierPatch**: validated create input and partial
//!   update input; the patch merges onto an existing record and the merged
//!   result is re-validated in full
//! - **DirectoryEntry**: a derived category or tag with its usage count
//! - **Part**: the read-only external parts collaborator
//! - **SupplierStats**: aggregate counts/sums over a supplier sequence
//!
//! Validation evaluates every rule and reports all failures at once, so
//! callers can surface per-field messages in a single round trip.

pub mod directory;
pub mod filter;
pub mod part;
pub mod stats;
pub mod supplier;


pub use directory::{
    category_directory, check_category_add, check_category_delete, check_category_rename,
    check_tag_add, check_tag_delete, check_tag_rename, is_default_category, remove_tag_from_list,
    rename_tag_in_list, tag_directory, DirectoryEntry, DirectoryRejection, DEFAULT_CATEGORIES,
    UNCATEGORIZED,
};
pub use filter::{apply as apply_filter, ListQuery, PartsLookup, SortField, SortOrder};
pub use part::Part;
pub use stats::{compute as compute_stats, SupplierStats};
pub use supplier::{
    is_valid_email, normalize_tags, ContactCard, PaymentTerms, Supplier, SupplierDraft,
    SupplierPatch, SupplierStatus, EMAIL_PATTERN,
};
