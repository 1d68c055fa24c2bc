//! Aggregate statistics over a supplier sequence.
//!
//! Works on whatever slice it is given (the full live store or a filtered
//! subset) and keeps no state of its own.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::supplier::{Supplier, SupplierStatus};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupplierStats {
    pub total_suppliers: usize,
    pub active_suppliers: usize,
    pub total_value: f64,
    pub avg_rating: f64,
    pub unique_categories: usize,
    pub unique_tags: usize,
}

pub fn compute(suppliers: &[Supplier]) -> SupplierStats {
    let total_suppliers = suppliers.len();
    let active_suppliers = suppliers
        .iter()
        .filter(|s| s.status == SupplierStatus::Active)
        .count();
    let total_value = suppliers.iter().map(|s| s.total_value).sum();

    let avg_rating = if total_suppliers == 0 {
        0.0
    } else {
        let sum: f64 = suppliers.iter().map(|s| s.rating).sum();
        (sum / total_suppliers as f64 * 10.0).round() / 10.0
    };

    let categories: HashSet<&str> = suppliers.iter().map(|s| s.category.as_str()).collect();
    let tags: HashSet<&str> = suppliers
        .iter()
        .flat_map(|s| s.tags.iter().map(String::as_str))
        .collect();

    SupplierStats {
        total_suppliers,
        active_suppliers,
        total_value,
        avg_rating,
        unique_categories: categories.len(),
        unique_tags: tags.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::supplier::{ContactCard, PaymentTerms};
    use chrono::Utc;
    use uuid::Uuid;

    fn supplier(status: SupplierStatus, rating: f64, total_value: f64) -> Supplier {
        let now = Utc::now();
        Supplier {
            id: Uuid::new_v4(),
            name: "Supplier".to_string(),
            email: "s@example.com".to_string(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: None,
            zip: None,
            country: String::new(),
            category: "Parts".to_string(),
            status,
            rating,
            total_orders: 0,
            total_value,
            last_order: None,
            website: None,
            tax_id: None,
            payment_terms: PaymentTerms::Net30,
            tags: Vec::new(),
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
    fn empty_collection_reports_zeroes() {
        let stats = compute(&[]);
        assert_eq!(stats.total_suppliers, 0);
        assert_eq!(stats.active_suppliers, 0);
        assert_eq!(stats.total_value, 0.0);
        assert_eq!(stats.avg_rating, 0.0);
        assert_eq!(stats.unique_categories, 0);
        assert_eq!(stats.unique_tags, 0);
    }

    #[test]
    fn counts_sums_and_rounded_average() {
        let mut tagged = supplier(SupplierStatus::Active, 4.5, 1_000.0);
        tagged.tags = vec!["oem".to_string(), "preferred".to_string()];
        let mut other = supplier(SupplierStatus::Pending, 3.8, 250.5);
        other.category = "Utilities".to_string();
        other.tags = vec!["oem".to_string()];

        let stats = compute(&[tagged, other, supplier(SupplierStatus::Inactive, 2.0, 0.0)]);
        assert_eq!(stats.total_suppliers, 3);
        assert_eq!(stats.active_suppliers, 1);
        assert_eq!(stats.total_value, 1_250.5);
        // (4.5 + 3.8 + 2.0) / 3 = 3.4333... rounds to 3.4
        assert_eq!(stats.avg_rating, 3.4);
        assert_eq!(stats.unique_categories, 2);
        assert_eq!(stats.unique_tags, 2);
    }

    #[test]
    fn active_never_exceeds_total() {
        let stats = compute(&[
            supplier(SupplierStatus::Active, 5.0, 1.0),
            supplier(SupplierStatus::Active, 5.0, 1.0),
        ]);
        assert!(stats.active_suppliers <= stats.total_suppliers);
    }
}
