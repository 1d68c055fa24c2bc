//! Supplier directory business logic.
//!
//! Sits between the HTTP handlers and the repositories: runs validation,
//! enforces email uniqueness, derives the category/tag directories, and
//! drives the cascade rewrites. Every operation is a synchronous
//! request/response unit of work; the cascades are the only multi-record
//! mutations and each runs inside a single repository transaction.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use vendora_database::{PartRepository, PostgresPool, SupplierRepository};
use vendora_models::{
    apply_filter, category_directory, check_category_add, check_category_delete,
    check_category_rename, check_tag_add, check_tag_delete, check_tag_rename, compute_stats,
    tag_directory, DirectoryEntry, ListQuery, Supplier, SupplierDraft, SupplierPatch,
    SupplierStats, UNCATEGORIZED,
};
use vendora_utils::{validate_model, VendoraError, VendoraResult};

#[derive(Clone)]
pub struct SupplierService {
    pool: PostgresPool,
}

impl SupplierService {
    pub fn new(pool: PostgresPool) -> Self {
        Self { pool }
    }

    fn suppliers(&self) -> SupplierRepository {
        SupplierRepository::new(self.pool.clone())
    }

    fn parts(&self) -> PartRepository {
        PartRepository::new(self.pool.clone())
    }

    pub async fn create(&self, draft: SupplierDraft) -> VendoraResult<Supplier> {
        validate_model(&draft)?;

        let email = draft.email.trim().to_string();
        if self.suppliers().email_in_use(&email, None).await.map_err(db)? {
            return Err(VendoraError::conflict(
                "email",
                format!("'{email}' is already in use"),
            ));
        }

        let record = draft.into_record(Uuid::new_v4(), Utc::now());
        self.suppliers().insert(&record).await.map_err(db)?;
        info!(supplier_id = %record.id, "supplier created");
        Ok(record)
    }

    /// Direct id lookup; soft-deleted records stay reachable here for audit.
    pub async fn get(&self, id: Uuid) -> VendoraResult<Supplier> {
        self.suppliers()
            .find_by_id(id)
            .await
            .map_err(db)?
            .ok_or_else(|| VendoraError::not_found(format!("supplier {id}")))
    }

    pub async fn update(&self, id: Uuid, patch: SupplierPatch) -> VendoraResult<Supplier> {
        let existing = self
            .suppliers()
            .find_by_id(id)
            .await
            .map_err(db)?
            .filter(|supplier| !supplier.is_deleted())
            .ok_or_else(|| VendoraError::not_found(format!("supplier {id}")))?;

        let merged = patch.merged_into(&existing);
        validate_model(&merged)?;

        let email = merged.email.trim().to_string();
        if self
            .suppliers()
            .email_in_use(&email, Some(id))
            .await
            .map_err(db)?
        {
            return Err(VendoraError::conflict(
                "email",
                format!("'{email}' is already in use"),
            ));
        }

        let updated = merged.apply_to(&existing, Utc::now());
        if !self.suppliers().update(&updated).await.map_err(db)? {
            return Err(VendoraError::not_found(format!("supplier {id}")));
        }
        info!(supplier_id = %id, "supplier updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> VendoraResult<()> {
        if !self.suppliers().soft_delete(id).await.map_err(db)? {
            return Err(VendoraError::not_found(format!("supplier {id}")));
        }
        info!(supplier_id = %id, "supplier soft-deleted");
        Ok(())
    }

    /// Filtered listing plus full-store stats, the original index payload.
    pub async fn list(&self, query: ListQuery) -> VendoraResult<(Vec<Supplier>, SupplierStats)> {
        let live = self.suppliers().find_live().await.map_err(db)?;
        let stats = compute_stats(&live);

        // Parts are only needed when a part term is present.
        let parts = if query
            .part
            .as_deref()
            .map(str::trim)
            .is_some_and(|term| !term.is_empty())
        {
            self.parts().find_all().await.map_err(db)?
        } else {
            Vec::new()
        };

        let filtered = apply_filter(live, &query, parts.as_slice());
        Ok((filtered, stats))
    }

    pub async fn stats(&self) -> VendoraResult<SupplierStats> {
        let live = self.suppliers().find_live().await.map_err(db)?;
        Ok(compute_stats(&live))
    }

    pub async fn categories(&self) -> VendoraResult<Vec<DirectoryEntry>> {
        let live = self.suppliers().find_live().await.map_err(db)?;
        Ok(category_directory(&live))
    }

    /// Validates a new category name. The directory is derived, so there is
    /// nothing to persist until the first supplier is assigned the name.
    pub async fn add_category(&self, name: &str) -> VendoraResult<DirectoryEntry> {
        let entries = self.categories().await?;
        check_category_add(name, &entries)?;
        Ok(DirectoryEntry {
            name: name.trim().to_string(),
            usage_count: 0,
            is_default: false,
        })
    }

    pub async fn rename_category(&self, old: &str, new: &str) -> VendoraResult<u64> {
        let entries = self.categories().await?;
        check_category_rename(old, new, &entries)?;
        let updated = self
            .suppliers()
            .rename_category(old, new.trim())
            .await
            .map_err(db)?;
        info!(old, new, updated, "category renamed");
        Ok(updated)
    }

    pub async fn delete_category(&self, name: &str) -> VendoraResult<u64> {
        let entries = self.categories().await?;
        check_category_delete(name, &entries)?;
        let updated = self
            .suppliers()
            .reassign_category(name, UNCATEGORIZED)
            .await
            .map_err(db)?;
        info!(name, updated, "category deleted, holders reassigned");
        Ok(updated)
    }

    pub async fn tags(&self) -> VendoraResult<Vec<DirectoryEntry>> {
        let live = self.suppliers().find_live().await.map_err(db)?;
        Ok(tag_directory(&live))
    }

    pub async fn add_tag(&self, name: &str) -> VendoraResult<DirectoryEntry> {
        let entries = self.tags().await?;
        check_tag_add(name, &entries)?;
        Ok(DirectoryEntry {
            name: name.trim().to_string(),
            usage_count: 0,
            is_default: false,
        })
    }

    pub async fn rename_tag(&self, old: &str, new: &str) -> VendoraResult<u64> {
        let entries = self.tags().await?;
        check_tag_rename(old, new, &entries)?;
        let updated = self
            .suppliers()
            .rename_tag(old, new.trim())
            .await
            .map_err(db)?;
        info!(old, new, updated, "tag renamed");
        Ok(updated)
    }

    pub async fn delete_tag(&self, name: &str) -> VendoraResult<u64> {
        let entries = self.tags().await?;
        check_tag_delete(name, &entries)?;
        let updated = self.suppliers().remove_tag(name).await.map_err(db)?;
        info!(name, updated, "tag removed from all suppliers");
        Ok(updated)
    }
}

fn db(error: anyhow::Error) -> VendoraError {
    VendoraError::database(error.to_string())
}
