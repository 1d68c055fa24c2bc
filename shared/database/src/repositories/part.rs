//! Parts Repository
//!
//! Read-only access to the external parts collection. The filter engine
//! consumes the loaded list through its `PartsLookup` trait.

use anyhow::{Context, Result};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use vendora_models::Part;

pub struct PartRepository {
    pool: PgPool,
}

impl PartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Part>> {
        let rows: Vec<PartRow> =
            sqlx::query_as("SELECT id, name, supplier_ids FROM parts ORDER BY name, id")
                .fetch_all(&self.pool)
                .await
                .context("Failed to fetch parts")?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

#[derive(Debug, FromRow)]
struct PartRow {
    id: Uuid,
    name: String,
    supplier_ids: serde_json::Value,
}

impl From<PartRow> for Part {
    fn from(row: PartRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            supplier_ids: serde_json::from_value(row.supplier_ids).unwrap_or_default(),
        }
    }
}
