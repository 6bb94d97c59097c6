use anyhow::{Context, Result};
use async_trait::async_trait;
use connhub_core::{Connector, ConnectorPatch, ConnectorStore};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::info;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS connectors (
    id TEXT PRIMARY KEY,
    enabled BOOLEAN NOT NULL DEFAULT FALSE,
    config JSONB NOT NULL DEFAULT '{}'::jsonb,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    seq BIGSERIAL NOT NULL
)";

pub struct PgConnectorStore {
    pool: PgPool,
}

impl PgConnectorStore {
    /// Create a new PostgreSQL connector store
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;

        Ok(Self { pool })
    }

    /// Create the `connectors` table if it does not exist
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .context("Failed to create connectors table")?;

        info!("Connector table ready");
        Ok(())
    }
}

fn from_row(r: PgRow) -> Connector {
    Connector {
        id: r.get("id"),
        enabled: r.get("enabled"),
        config: r.get("config"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl ConnectorStore for PgConnectorStore {
    async fn find_all(&self) -> Result<Vec<Connector>> {
        let rows = sqlx::query(
            "SELECT id, enabled, config, created_at
             FROM connectors
             ORDER BY created_at, seq",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list connectors")?;

        Ok(rows.into_iter().map(from_row).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Connector>> {
        let row = sqlx::query(
            "SELECT id, enabled, config, created_at
             FROM connectors
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get connector")?;

        Ok(row.map(from_row))
    }

    async fn insert_one(&self, connector: Connector) -> Result<Connector> {
        let row = sqlx::query(
            "INSERT INTO connectors (id, enabled, config, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id, enabled, config, created_at",
        )
        .bind(&connector.id)
        .bind(connector.enabled)
        .bind(&connector.config)
        .bind(connector.created_at)
        .fetch_one(&self.pool)
        .await
        .with_context(|| format!("Failed to insert connector '{}'", connector.id))?;

        Ok(from_row(row))
    }

    async fn update_one(&self, id: &str, patch: &ConnectorPatch) -> Result<Option<Connector>> {
        let row = sqlx::query(
            "UPDATE connectors
             SET enabled = COALESCE($2, enabled), config = COALESCE($3, config)
             WHERE id = $1
             RETURNING id, enabled, config, created_at",
        )
        .bind(id)
        .bind(patch.enabled)
        .bind(&patch.config)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Failed to update connector '{}'", id))?;

        Ok(row.map(from_row))
    }
}
