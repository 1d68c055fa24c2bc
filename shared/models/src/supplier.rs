//! Supplier domain model for the Vendora directory.
//!
//! Defines the supplier record, its contact cards, the enumerated status and
//! payment-terms values, and the draft/patch types that carry validated input
//! into the record store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Lifecycle status of a supplier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SupplierStatus {
    Active,
    Inactive,
    Pending,
}

impl SupplierStatus {
    pub const ALL: [SupplierStatus; 3] = [
        SupplierStatus::Active,
        SupplierStatus::Inactive,
        SupplierStatus::Pending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SupplierStatus::Active => "active",
            SupplierStatus::Inactive => "inactive",
            SupplierStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for SupplierStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupplierStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
            .copied()
            .ok_or_else(|| format!("unknown supplier status '{value}'"))
    }
}

/// Agreed payment terms for a supplier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentTerms {
    #[serde(rename = "Net 15")]
    Net15,
    #[serde(rename = "Net 30")]
    Net30,
    #[serde(rename = "Net 45")]
    Net45,
    #[serde(rename = "Net 60")]
    Net60,
    #[serde(rename = "COD")]
    Cod,
}

impl PaymentTerms {
    pub const ALL: [PaymentTerms; 5] = [
        PaymentTerms::Net15,
        PaymentTerms::Net30,
        PaymentTerms::Net45,
        PaymentTerms::Net60,
        PaymentTerms::Cod,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentTerms::Net15 => "Net 15",
            PaymentTerms::Net30 => "Net 30",
            PaymentTerms::Net45 => "Net 45",
            PaymentTerms::Net60 => "Net 60",
            PaymentTerms::Cod => "COD",
        }
    }
}

impl fmt::Display for PaymentTerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentTerms {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|terms| terms.as_str().eq_ignore_ascii_case(value.trim()))
            .copied()
            .ok_or_else(|| format!("unknown payment terms '{value}'"))
    }
}

/// A named contact with optional email and phone.
///
/// The primary contact is required on every supplier; the secondary,
/// technical, parts, and billing cards are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
pub struct ContactCard {
    #[validate(custom = "validate_non_blank")]
    pub name: String,
    #[validate(custom = "validate_email_format")]
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A supplier record as held by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: String,
    pub category: String,
    pub status: SupplierStatus,
    pub rating: f64,
    pub total_orders: i64,
    pub total_value: f64,
    pub last_order: Option<NaiveDate>,
    pub website: Option<String>,
    pub tax_id: Option<String>,
    pub payment_terms: PaymentTerms,
    pub tags: Vec<String>,
    pub primary_contact: ContactCard,
    pub secondary_contact: Option<ContactCard>,
    pub technical_contact: Option<ContactCard>,
    pub parts_contact: Option<ContactCard>,
    pub billing_contact: Option<ContactCard>,
    pub join_date: NaiveDate,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Supplier {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Name of the primary contact, the searchable "contact person".
    pub fn contact_person(&self) -> &str {
        &self.primary_contact.name
    }
}

/// Validated input for creating a supplier, or the merged result of an
/// update. Enumerated fields arrive as strings so that every rule can be
/// evaluated and reported per field in one pass.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SupplierDraft {
    #[serde(default)]
    #[validate(custom = "validate_non_blank")]
    pub name: String,
    #[serde(default)]
    #[validate(custom = "validate_required_email")]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    #[validate(custom = "validate_non_blank")]
    pub category: String,
    #[serde(default)]
    #[validate(custom = "validate_status")]
    pub status: String,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: f64,
    #[serde(default)]
    #[validate(range(min = 0, message = "Total orders cannot be negative"))]
    pub total_orders: i64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Total value cannot be negative"))]
    pub total_value: f64,
    #[serde(default)]
    pub last_order: Option<NaiveDate>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    #[validate(custom = "validate_payment_terms")]
    pub payment_terms: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    #[validate]
    pub primary_contact: ContactCard,
    #[serde(default)]
    #[validate]
    pub secondary_contact: Option<ContactCard>,
    #[serde(default)]
    #[validate]
    pub technical_contact: Option<ContactCard>,
    #[serde(default)]
    #[validate]
    pub parts_contact: Option<ContactCard>,
    #[serde(default)]
    #[validate]
    pub billing_contact: Option<ContactCard>,
}

impl SupplierDraft {
    /// Builds a fresh record from a validated draft. The join date is fixed
    /// to the creation instant and the last order starts empty.
    pub fn into_record(self, id: Uuid, now: DateTime<Utc>) -> Supplier {
        let status = self.status.parse().unwrap_or(SupplierStatus::Active);
        let payment_terms = self.payment_terms.parse().unwrap_or(PaymentTerms::Net30);
        Supplier {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone,
            address: self.address,
            city: self.city,
            state: self.state,
            zip: self.zip,
            country: self.country,
            category: self.category.trim().to_string(),
            status,
            rating: self.rating,
            total_orders: self.total_orders,
            total_value: self.total_value,
            last_order: None,
            website: self.website,
            tax_id: self.tax_id,
            payment_terms,
            tags: normalize_tags(self.tags),
            primary_contact: self.primary_contact,
            secondary_contact: self.secondary_contact,
            technical_contact: self.technical_contact,
            parts_contact: self.parts_contact,
            billing_contact: self.billing_contact,
            join_date: now.date_naive(),
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builds the updated record from a validated merged draft, preserving
    /// the immutable fields of the existing one.
    pub fn apply_to(self, existing: &Supplier, now: DateTime<Utc>) -> Supplier {
        let status = self.status.parse().unwrap_or(existing.status);
        let payment_terms = self.payment_terms.parse().unwrap_or(existing.payment_terms);
        Supplier {
            id: existing.id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone,
            address: self.address,
            city: self.city,
            state: self.state,
            zip: self.zip,
            country: self.country,
            category: self.category.trim().to_string(),
            status,
            rating: self.rating,
            total_orders: self.total_orders,
            total_value: self.total_value,
            last_order: self.last_order,
            website: self.website,
            tax_id: self.tax_id,
            payment_terms,
            tags: normalize_tags(self.tags),
            primary_contact: self.primary_contact,
            secondary_contact: self.secondary_contact,
            technical_contact: self.technical_contact,
            parts_contact: self.parts_contact,
            billing_contact: self.billing_contact,
            join_date: existing.join_date,
            deleted_at: existing.deleted_at,
            created_at: existing.created_at,
            updated_at: now,
        }
    }
}

/// Partial update payload. Absent fields keep their current value; the
/// merged result is re-validated as a whole before it is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplierPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub rating: Option<f64>,
    pub total_orders: Option<i64>,
    pub total_value: Option<f64>,
    pub last_order: Option<NaiveDate>,
    pub website: Option<String>,
    pub tax_id: Option<String>,
    pub payment_terms: Option<String>,
    pub tags: Option<Vec<String>>,
    pub primary_contact: Option<ContactCard>,
    pub secondary_contact: Option<ContactCard>,
    pub technical_contact: Option<ContactCard>,
    pub parts_contact: Option<ContactCard>,
    pub billing_contact: Option<ContactCard>,
}

impl SupplierPatch {
    /// Merges the provided fields onto an existing record, producing the
    /// draft that the validation layer re-checks in full.
    pub fn merged_into(&self, existing: &Supplier) -> SupplierDraft {
        SupplierDraft {
            name: self.name.clone().unwrap_or_else(|| existing.name.clone()),
            email: self.email.clone().unwrap_or_else(|| existing.email.clone()),
            phone: self.phone.clone().unwrap_or_else(|| existing.phone.clone()),
            address: self
                .address
                .clone()
                .unwrap_or_else(|| existing.address.clone()),
            city: self.city.clone().unwrap_or_else(|| existing.city.clone()),
            state: self.state.clone().or_else(|| existing.state.clone()),
            zip: self.zip.clone().or_else(|| existing.zip.clone()),
            country: self
                .country
                .clone()
                .unwrap_or_else(|| existing.country.clone()),
            category: self
                .category
                .clone()
                .unwrap_or_else(|| existing.category.clone()),
            status: self
                .status
                .clone()
                .unwrap_or_else(|| existing.status.as_str().to_string()),
            rating: self.rating.unwrap_or(existing.rating),
            total_orders: self.total_orders.unwrap_or(existing.total_orders),
            total_value: self.total_value.unwrap_or(existing.total_value),
            last_order: self.last_order.or(existing.last_order),
            website: self.website.clone().or_else(|| existing.website.clone()),
            tax_id: self.tax_id.clone().or_else(|| existing.tax_id.clone()),
            payment_terms: self
                .payment_terms
                .clone()
                .unwrap_or_else(|| existing.payment_terms.as_str().to_string()),
            tags: self.tags.clone().unwrap_or_else(|| existing.tags.clone()),
            primary_contact: self
                .primary_contact
                .clone()
                .unwrap_or_else(|| existing.primary_contact.clone()),
            secondary_contact: self
                .secondary_contact
                .clone()
                .or_else(|| existing.secondary_contact.clone()),
            technical_contact: self
                .technical_contact
                .clone()
                .or_else(|| existing.technical_contact.clone()),
            parts_contact: self
                .parts_contact
                .clone()
                .or_else(|| existing.parts_contact.clone()),
            billing_contact: self
                .billing_contact
                .clone()
                .or_else(|| existing.billing_contact.clone()),
        }
    }
}

/// Trims tag entries, drops empty ones, and removes duplicates while
/// preserving first-occurrence order.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            continue;
        }
        if normalized.iter().any(|existing| existing == trimmed) {
            continue;
        }
        normalized.push(trimmed.to_string());
    }
    normalized
}

/// Email pattern shared by supplier and contact emails.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

pub fn is_valid_email(value: &str) -> bool {
    let email_regex = Regex::new(EMAIL_PATTERN).unwrap();
    email_regex.is_match(value)
}

// Custom validation functions

fn validate_non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("must not be empty".into());
        return Err(error);
    }
    Ok(())
}

fn validate_required_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("must not be empty".into());
        return Err(error);
    }
    validate_email_format(value)
}

fn validate_email_format(value: &str) -> Result<(), ValidationError> {
    if !is_valid_email(value.trim()) {
        let mut error = ValidationError::new("email");
        error.message = Some("must be a valid email address".into());
        return Err(error);
    }
    Ok(())
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    if value.parse::<SupplierStatus>().is_err() {
        let mut error = ValidationError::new("status");
        error.message = Some("must be one of: active, inactive, pending".into());
        return Err(error);
    }
    Ok(())
}

fn validate_payment_terms(value: &str) -> Result<(), ValidationError> {
    if value.parse::<PaymentTerms>().is_err() {
        let mut error = ValidationError::new("payment_terms");
        error.message = Some("must be one of: Net 15, Net 30, Net 45, Net 60, COD".into());
        return Err(error);
    }
    Ok(())
}
