//! Derived category and tag directories.
//!
//! Neither directory is stored on its own: both are projections over the
//! live supplier collection, which makes a dangling reference impossible by
//! construction. A fixed set of default categories is always listed, even at
//! zero usage, and can never be renamed or deleted; the `Uncategorized`
//! sentinel that absorbs deleted categories is reserved the same way.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::supplier::{normalize_tags, Supplier};

/// System-provided categories. Always present in the directory and never
/// editable through the directory operations.
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Parts",
    "Supplies - General",
    "Equipment Mfg.",
    "Equipment Dealer",
    "Financing",
    "Software / IT",
    "Utilities",
];

/// Sentinel category assigned to suppliers whose category was deleted.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One directory value with its usage count across live suppliers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub usage_count: usize,
    pub is_default: bool,
}

/// Rejection returned by the directory guard checks. Surfaced verbatim to
/// the caller; a rejected operation leaves every record untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryRejection {
    #[error("name must not be empty")]
    EmptyName,
    #[error("'{0}' already exists")]
    Duplicate(String),
    #[error("'{0}' is a default category and cannot be changed")]
    DefaultImmutable(String),
    #[error("'{0}' is a reserved name")]
    Reserved(String),
    #[error("'{0}' is not in the directory")]
    Unknown(String),
}

pub fn is_default_category(name: &str) -> bool {
    DEFAULT_CATEGORIES.contains(&name)
}

fn is_sentinel(name: &str) -> bool {
    name.eq_ignore_ascii_case(UNCATEGORIZED)
}

/// Distinct categories in use by live suppliers, with the defaults always
/// included, sorted by name.
pub fn category_directory(suppliers: &[Supplier]) -> Vec<DirectoryEntry> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for supplier in suppliers.iter().filter(|s| !s.is_deleted()) {
        *counts.entry(supplier.category.clone()).or_insert(0) += 1;
    }
    for default in DEFAULT_CATEGORIES {
        counts.entry(default.to_string()).or_insert(0);
    }
    counts
        .into_iter()
        .map(|(name, usage_count)| DirectoryEntry {
            is_default: is_default_category(&name),
            name,
            usage_count,
        })
        .collect()
}

/// Distinct tags in use by live suppliers, sorted by name.
pub fn tag_directory(suppliers: &[Supplier]) -> Vec<DirectoryEntry> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for supplier in suppliers.iter().filter(|s| !s.is_deleted()) {
        for tag in &supplier.tags {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|(name, usage_count)| DirectoryEntry {
            name,
            usage_count,
            is_default: false,
        })
        .collect()
}

fn duplicates_existing(name: &str, entries: &[DirectoryEntry], excluding: Option<&str>) -> bool {
    entries.iter().any(|entry| {
        entry.name.eq_ignore_ascii_case(name) && excluding != Some(entry.name.as_str())
    })
}

pub fn check_category_add(
    name: &str,
    entries: &[DirectoryEntry],
) -> Result<(), DirectoryRejection> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DirectoryRejection::EmptyName);
    }
    if is_sentinel(name) {
        return Err(DirectoryRejection::Reserved(name.to_string()));
    }
    if duplicates_existing(name, entries, None) {
        return Err(DirectoryRejection::Duplicate(name.to_string()));
    }
    Ok(())
}

pub fn check_category_rename(
    old: &str,
    new: &str,
    entries: &[DirectoryEntry],
) -> Result<(), DirectoryRejection> {
    if is_default_category(old) {
        return Err(DirectoryRejection::DefaultImmutable(old.to_string()));
    }
    if is_sentinel(old) {
        return Err(DirectoryRejection::Reserved(old.to_string()));
    }
    if !entries.iter().any(|entry| entry.name == old) {
        return Err(DirectoryRejection::Unknown(old.to_string()));
    }
    let new = new.trim();
    if new.is_empty() {
        return Err(DirectoryRejection::EmptyName);
    }
    if is_sentinel(new) {
        return Err(DirectoryRejection::Reserved(new.to_string()));
    }
    if duplicates_existing(new, entries, Some(old)) {
        return Err(DirectoryRejection::Duplicate(new.to_string()));
    }
    Ok(())
}

pub fn check_category_delete(
    name: &str,
    entries: &[DirectoryEntry],
) -> Result<(), DirectoryRejection> {
    if is_default_category(name) {
        return Err(DirectoryRejection::DefaultImmutable(name.to_string()));
    }
    if is_sentinel(name) {
        return Err(DirectoryRejection::Reserved(name.to_string()));
    }
    if !entries.iter().any(|entry| entry.name == name) {
        return Err(DirectoryRejection::Unknown(name.to_string()));
    }
    Ok(())
}

pub fn check_tag_add(name: &str, entries: &[DirectoryEntry]) -> Result<(), DirectoryRejection> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DirectoryRejection::EmptyName);
    }
    if duplicates_existing(name, entries, None) {
        return Err(DirectoryRejection::Duplicate(name.to_string()));
    }
    Ok(())
}

pub fn check_tag_rename(
    old: &str,
    new: &str,
    entries: &[DirectoryEntry],
) -> Result<(), DirectoryRejection> {
    if !entries.iter().any(|entry| entry.name == old) {
        return Err(DirectoryRejection::Unknown(old.to_string()));
    }
    let new = new.trim();
    if new.is_empty() {
        return Err(DirectoryRejection::EmptyName);
    }
    if duplicates_existing(new, entries, Some(old)) {
        return Err(DirectoryRejection::Duplicate(new.to_string()));
    }
    Ok(())
}

pub fn check_tag_delete(name: &str, entries: &[DirectoryEntry]) -> Result<(), DirectoryRejection> {
    if !entries.iter().any(|entry| entry.name == name) {
        return Err(DirectoryRejection::Unknown(name.to_string()));
    }
    Ok(())
}

/// Rewrites one tag in a tag list, re-normalizing so that a rename onto an
/// already-present tag collapses to a single entry.
pub fn rename_tag_in_list(tags: &[String], old: &str, new: &str) -> Vec<String> {
    normalize_tags(
        tags.iter()
            .map(|tag| {
                if tag == old {
                    new.trim().to_string()
                } else {
                    tag.clone()
                }
            })
            .collect(),
    )
}

/// Drops one tag from a tag list, keeping the order of the rest.
pub fn remove_tag_from_list(tags: &[String], name: &str) -> Vec<String> {
    tags.iter().filter(|tag| *tag != name).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::supplier::{ContactCard, PaymentTerms, Supplier, SupplierStatus};
    use chrono::Utc;
    use uuid::Uuid;

    fn supplier(name: &str, category: &str, tags: &[&str]) -> Supplier {
        let now = Utc::now();
        Supplier {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: None,
            zip: None,
            country: String::new(),
            category: category.to_string(),
            status: SupplierStatus::Active,
            rating: 0.0,
            total_orders: 0,
            total_value: 0.0,
            last_order: None,
            website: None,
            tax_id: None,
            payment_terms: PaymentTerms::Net30,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            primary_contact: ContactCard {
                name: "Contact".to_string(),
                email: None,
                phone: None,
            },
            secondary_contact: None,
            technical_contact: None,
            parts_contact: None,
            billing_contact: None,
            join_date: now.date_naive(),
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn defaults_are_listed_even_when_unused() {
        let directory = category_directory(&[]);
        assert_eq!(directory.len(), DEFAULT_CATEGORIES.len());
        assert!(directory.iter().all(|e| e.is_default && e.usage_count == 0));
    }

    #[test]
    fn usage_counts_cover_live_suppliers_only() {
        let mut deleted = supplier("gone", "Machining", &[]);
        deleted.deleted_at = Some(Utc::now());
        let suppliers = vec![
            supplier("a", "Machining", &[]),
            supplier("b", "Machining", &[]),
            supplier("c", "Parts", &[]),
            deleted,
        ];

        let directory = category_directory(&suppliers);
        let machining = directory
            .iter()
            .find(|e| e.name == "Machining")
            .expect("present");
        assert_eq!(machining.usage_count, 2);
        assert!(!machining.is_default);

        let parts = directory.iter().find(|e| e.name == "Parts").expect("present");
        assert_eq!(parts.usage_count, 1);
        assert!(parts.is_default);
    }

    #[test]
    fn tag_directory_flattens_and_counts() {
        let suppliers = vec![
            supplier("a", "Parts", &["oem", "preferred"]),
            supplier("b", "Parts", &["oem"]),
        ];
        let directory = tag_directory(&suppliers);
        assert_eq!(
            directory,
            vec![
                DirectoryEntry {
                    name: "oem".to_string(),
                    usage_count: 2,
                    is_default: false
                },
                DirectoryEntry {
                    name: "preferred".to_string(),
                    usage_count: 1,
                    is_default: false
                },
            ]
        );
    }

    #[test]
    fn add_rejects_case_insensitive_duplicates_and_reserved_names() {
        let entries = category_directory(&[supplier("a", "Machining", &[])]);
        assert_eq!(
            check_category_add("machining", &entries),
            Err(DirectoryRejection::Duplicate("machining".to_string()))
        );
        assert_eq!(
            check_category_add("  ", &entries),
            Err(DirectoryRejection::EmptyName)
        );
        assert_eq!(
            check_category_add("uncategorized", &entries),
            Err(DirectoryRejection::Reserved("uncategorized".to_string()))
        );
        assert!(check_category_add("Logistics", &entries).is_ok());
    }

    #[test]
    fn default_categories_are_immutable() {
        let entries = category_directory(&[supplier("a", "Parts", &[])]);
        assert_eq!(
            check_category_rename("Parts", "Components", &entries),
            Err(DirectoryRejection::DefaultImmutable("Parts".to_string()))
        );
        assert_eq!(
            check_category_delete("Parts", &entries),
            Err(DirectoryRejection::DefaultImmutable("Parts".to_string()))
        );
    }

    #[test]
    fn rename_guards_unknown_and_duplicate_targets() {
        let entries = category_directory(&[
            supplier("a", "Machining", &[]),
            supplier("b", "Logistics", &[]),
        ]);
        assert_eq!(
            check_category_rename("Forging", "Casting", &entries),
            Err(DirectoryRejection::Unknown("Forging".to_string()))
        );
        assert_eq!(
            check_category_rename("Machining", "logistics", &entries),
            Err(DirectoryRejection::Duplicate("logistics".to_string()))
        );
        // Case-only rename of the same entry is allowed.
        assert!(check_category_rename("Machining", "MACHINING", &entries).is_ok());
        assert!(check_category_rename("Machining", "CNC", &entries).is_ok());
    }

    #[test]
    fn tag_rename_onto_existing_tag_collapses_duplicates() {
        let tags = vec!["oem".to_string(), "legacy".to_string(), "oem".to_string()];
        assert_eq!(
            rename_tag_in_list(&tags, "legacy", "oem"),
            vec!["oem".to_string()]
        );
        assert_eq!(
            remove_tag_from_list(&tags, "oem"),
            vec!["legacy".to_string()]
        );
    }
}
