use anyhow::Result;
use sqlx::PgPool;

pub async fn run_postgres_migrations(pool: &PgPool) -> Result<()> {
    tracing::info!("Running PostgreSQL migrations");

    // Suppliers table. Tags and contact cards are stored as JSONB; the
    // partial unique index enforces email uniqueness among live records
    // only, so a soft-deleted supplier does not block address reuse.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS suppliers (
            id UUID PRIMARY KEY,
            name VARCHAR NOT NULL,
            email VARCHAR NOT NULL,
            phone VARCHAR NOT NULL DEFAULT '',
            address TEXT NOT NULL DEFAULT '',
            city VARCHAR NOT NULL DEFAULT '',
            state VARCHAR,
            zip VARCHAR,
            country VARCHAR NOT NULL DEFAULT '',
            category VARCHAR NOT NULL,
            status VARCHAR NOT NULL DEFAULT 'active',
            rating DOUBLE PRECISION NOT NULL DEFAULT 0,
            total_orders BIGINT NOT NULL DEFAULT 0,
            total_value DOUBLE PRECISION NOT NULL DEFAULT 0,
            last_order DATE,
            website VARCHAR,
            tax_id VARCHAR,
            payment_terms VARCHAR NOT NULL DEFAULT 'Net 30',
            tags JSONB NOT NULL DEFAULT '[]',
            primary_contact JSONB NOT NULL,
            secondary_contact JSONB,
            technical_contact JSONB,
            parts_contact JSONB,
            billing_contact JSONB,
            join_date DATE NOT NULL,
            deleted_at TIMESTAMPTZ,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Read-only parts collaborator.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS parts (
            id UUID PRIMARY KEY,
            name VARCHAR NOT NULL,
            supplier_ids JSONB NOT NULL DEFAULT '[]'
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_suppliers_email_live
        ON suppliers (LOWER(email)) WHERE deleted_at IS NULL
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_suppliers_status_category ON suppliers(status, category)",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_suppliers_name ON suppliers(name)")
        .execute(pool)
        .await?;

    tracing::info!("PostgreSQL migrations completed successfully");
    Ok(())
}
