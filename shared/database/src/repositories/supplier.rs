//! Supplier Repository
//!
//! CRUD and cascade operations for supplier records.
//! Uses runtime SQL queries (unchecked) to avoid requiring DATABASE_URL at
//! compile time. Soft-deleted rows stay in the table and are excluded from
//! everything except direct id lookups.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use vendora_models::{
    remove_tag_from_list, rename_tag_in_list, ContactCard, PaymentTerms, Supplier, SupplierStatus,
};

const SUPPLIER_COLUMNS: &str = r#"
    id, name, email, phone, address, city, state, zip, country,
    category, status, rating, total_orders, total_value, last_order,
    website, tax_id, payment_terms, tags,
    primary_contact, secondary_contact, technical_contact,
    parts_contact, billing_contact,
    join_date, deleted_at, created_at, updated_at
"#;

pub struct SupplierRepository {
    pool: PgPool,
}

impl SupplierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a supplier by id, including soft-deleted records (audit path).
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Supplier>> {
        let row: Option<SupplierRow> = sqlx::query_as(&format!(
            "SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch supplier by ID")?;

        Ok(row.map(|r| r.into()))
    }

    /// All live suppliers, ordered by name with an id tie-break.
    pub async fn find_live(&self) -> Result<Vec<Supplier>> {
        let rows: Vec<SupplierRow> = sqlx::query_as(&format!(
            "SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE deleted_at IS NULL ORDER BY name, id"
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch suppliers")?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    pub async fn insert(&self, supplier: &Supplier) -> Result<()> {
        let binds = SupplierBinds::try_from(supplier)?;
        sqlx::query(
            r#"
            INSERT INTO suppliers
                (id, name, email, phone, address, city, state, zip, country,
                 category, status, rating, total_orders, total_value, last_order,
                 website, tax_id, payment_terms, tags,
                 primary_contact, secondary_contact, technical_contact,
                 parts_contact, billing_contact,
                 join_date, deleted_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9,
                    $10, $11, $12, $13, $14, $15,
                    $16, $17, $18, $19,
                    $20, $21, $22, $23, $24,
                    $25, $26, $27, $28)
            "#,
        )
        .bind(supplier.id)
        .bind(&supplier.name)
        .bind(&supplier.email)
        .bind(&supplier.phone)
        .bind(&supplier.address)
        .bind(&supplier.city)
        .bind(&supplier.state)
        .bind(&supplier.zip)
        .bind(&supplier.country)
        .bind(&supplier.category)
        .bind(supplier.status.as_str())
        .bind(supplier.rating)
        .bind(supplier.total_orders)
        .bind(supplier.total_value)
        .bind(supplier.last_order)
        .bind(&supplier.website)
        .bind(&supplier.tax_id)
        .bind(supplier.payment_terms.as_str())
        .bind(&binds.tags)
        .bind(&binds.primary_contact)
        .bind(&binds.secondary_contact)
        .bind(&binds.technical_contact)
        .bind(&binds.parts_contact)
        .bind(&binds.billing_contact)
        .bind(supplier.join_date)
        .bind(supplier.deleted_at)
        .bind(supplier.created_at)
        .bind(supplier.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert supplier")?;

        Ok(())
    }

    /// Persist an updated record. Returns false when the id is unknown or
    /// already soft-deleted.
    pub async fn update(&self, supplier: &Supplier) -> Result<bool> {
        let binds = SupplierBinds::try_from(supplier)?;
        let result = sqlx::query(
            r#"
            UPDATE suppliers SET
                name = $2, email = $3, phone = $4, address = $5, city = $6,
                state = $7, zip = $8, country = $9, category = $10,
                status = $11, rating = $12, total_orders = $13,
                total_value = $14, last_order = $15, website = $16,
                tax_id = $17, payment_terms = $18, tags = $19,
                primary_contact = $20, secondary_contact = $21,
                technical_contact = $22, parts_contact = $23,
                billing_contact = $24, updated_at = $25
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(supplier.id)
        .bind(&supplier.name)
        .bind(&supplier.email)
        .bind(&supplier.phone)
        .bind(&supplier.address)
        .bind(&supplier.city)
        .bind(&supplier.state)
        .bind(&supplier.zip)
        .bind(&supplier.country)
        .bind(&supplier.category)
        .bind(supplier.status.as_str())
        .bind(supplier.rating)
        .bind(supplier.total_orders)
        .bind(supplier.total_value)
        .bind(supplier.last_order)
        .bind(&supplier.website)
        .bind(&supplier.tax_id)
        .bind(supplier.payment_terms.as_str())
        .bind(&binds.tags)
        .bind(&binds.primary_contact)
        .bind(&binds.secondary_contact)
        .bind(&binds.technical_contact)
        .bind(&binds.parts_contact)
        .bind(&binds.billing_contact)
        .bind(supplier.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to update supplier")?;

        Ok(result.rows_affected() > 0)
    }

    /// Soft delete. Returns false when the id is unknown or already deleted.
    pub async fn soft_delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE suppliers SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to soft-delete supplier")?;

        Ok(result.rows_affected() > 0)
    }

    /// Case-insensitive email uniqueness check among live suppliers,
    /// optionally excluding the record being updated.
    pub async fn email_in_use(&self, email: &str, exclude: Option<Uuid>) -> Result<bool> {
        let (in_use,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM suppliers
                WHERE LOWER(email) = LOWER($1)
                  AND deleted_at IS NULL
                  AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .context("Failed to check email uniqueness")?;

        Ok(in_use)
    }

    /// Rewrites a category on every record holding it, in one transaction.
    pub async fn rename_category(&self, old: &str, new: &str) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "UPDATE suppliers SET category = $2, updated_at = NOW() WHERE category = $1",
        )
        .bind(old)
        .bind(new)
        .execute(&mut *tx)
        .await
        .context("Failed to rename category")?;
        tx.commit().await?;

        Ok(result.rows_affected())
    }

    /// Replaces a deleted category with the sentinel on every holder.
    pub async fn reassign_category(&self, name: &str, replacement: &str) -> Result<u64> {
        self.rename_category(name, replacement).await
    }

    /// Rewrites a tag across every tag list containing it. The rows are
    /// locked for the duration of the pass so no reader observes a
    /// half-renamed tag.
    pub async fn rename_tag(&self, old: &str, new: &str) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let rows: Vec<(Uuid, serde_json::Value)> =
            sqlx::query_as("SELECT id, tags FROM suppliers WHERE tags ? $1 FOR UPDATE")
                .bind(old)
                .fetch_all(&mut *tx)
                .await
                .context("Failed to collect tag holders")?;

        let mut affected = 0;
        for (id, tags) in rows {
            let tags: Vec<String> = serde_json::from_value(tags).unwrap_or_default();
            let rewritten = rename_tag_in_list(&tags, old, new);
            sqlx::query("UPDATE suppliers SET tags = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(serde_json::to_value(&rewritten)?)
                .execute(&mut *tx)
                .await
                .context("Failed to rewrite tags")?;
            affected += 1;
        }
        tx.commit().await?;

        Ok(affected)
    }

    /// Removes a tag from every tag list containing it.
    pub async fn remove_tag(&self, name: &str) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let rows: Vec<(Uuid, serde_json::Value)> =
            sqlx::query_as("SELECT id, tags FROM suppliers WHERE tags ? $1 FOR UPDATE")
                .bind(name)
                .fetch_all(&mut *tx)
                .await
                .context("Failed to collect tag holders")?;

        let mut affected = 0;
        for (id, tags) in rows {
            let tags: Vec<String> = serde_json::from_value(tags).unwrap_or_default();
            let rewritten = remove_tag_from_list(&tags, name);
            sqlx::query("UPDATE suppliers SET tags = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(serde_json::to_value(&rewritten)?)
                .execute(&mut *tx)
                .await
                .context("Failed to rewrite tags")?;
            affected += 1;
        }
        tx.commit().await?;

        Ok(affected)
    }
}

/// JSONB payloads computed once per write.
struct SupplierBinds {
    tags: serde_json::Value,
    primary_contact: serde_json::Value,
    secondary_contact: Option<serde_json::Value>,
    technical_contact: Option<serde_json::Value>,
    parts_contact: Option<serde_json::Value>,
    billing_contact: Option<serde_json::Value>,
}

impl TryFrom<&Supplier> for SupplierBinds {
    type Error = anyhow::Error;

    fn try_from(supplier: &Supplier) -> Result<Self> {
        fn optional(card: &Option<ContactCard>) -> Result<Option<serde_json::Value>> {
            Ok(card.as_ref().map(serde_json::to_value).transpose()?)
        }

        Ok(Self {
            tags: serde_json::to_value(&supplier.tags)?,
            primary_contact: serde_json::to_value(&supplier.primary_contact)?,
            secondary_contact: optional(&supplier.secondary_contact)?,
            technical_contact: optional(&supplier.technical_contact)?,
            parts_contact: optional(&supplier.parts_contact)?,
            billing_contact: optional(&supplier.billing_contact)?,
        })
    }
}

/// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct SupplierRow {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    address: String,
    city: String,
    state: Option<String>,
    zip: Option<String>,
    country: String,
    category: String,
    status: String,
    rating: f64,
    total_orders: i64,
    total_value: f64,
    last_order: Option<NaiveDate>,
    website: Option<String>,
    tax_id: Option<String>,
    payment_terms: String,
    tags: serde_json::Value,
    primary_contact: serde_json::Value,
    secondary_contact: Option<serde_json::Value>,
    technical_contact: Option<serde_json::Value>,
    parts_contact: Option<serde_json::Value>,
    billing_contact: Option<serde_json::Value>,
    join_date: NaiveDate,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        fn optional_card(value: Option<serde_json::Value>) -> Option<ContactCard> {
            value.and_then(|v| serde_json::from_value(v).ok())
        }

        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            city: row.city,
            state: row.state,
            zip: row.zip,
            country: row.country,
            category: row.category,
            status: row.status.parse().unwrap_or(SupplierStatus::Active),
            rating: row.rating,
            total_orders: row.total_orders,
            total_value: row.total_value,
            last_order: row.last_order,
            website: row.website,
            tax_id: row.tax_id,
            payment_terms: row.payment_terms.parse().unwrap_or(PaymentTerms::Net30),
            tags: serde_json::from_value(row.tags).unwrap_or_default(),
            primary_contact: serde_json::from_value(row.primary_contact).unwrap_or_default(),
            secondary_contact: optional_card(row.secondary_contact),
            technical_contact: optional_card(row.technical_contact),
            parts_contact: optional_card(row.parts_contact),
            billing_contact: optional_card(row.billing_contact),
            join_date: row.join_date,
            deleted_at: row.deleted_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
