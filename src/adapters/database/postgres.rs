//! PostgreSQL catalog store
//!
//! Implements [`ProductStore`] on top of a deadpool-managed tokio-postgres
//! pool. Every persistence write is an independent single-row update; no
//! multi-product transaction spans a group or a batch.

use crate::adapters::database::traits::ProductStore;
use crate::config::DatabaseConfig;
use crate::domain::{ImageSlot, PicsyncError, ProductImages, Result, StoreError};
use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::types::ToSql;
use tokio_postgres::{NoTls, Row};

/// PostgreSQL-backed product store
pub struct PostgresProductStore {
    pool: Pool,
}

impl PostgresProductStore {
    /// Create a new store with a connection pool
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be built.
    pub fn new(config: &DatabaseConfig) -> Result<Self> {
        let mut pg_config = tokio_postgres::Config::new();
        pg_config
            .host(&config.host)
            .port(config.port)
            .user(&config.user)
            .password(config.password.expose_secret().as_ref())
            .dbname(&config.dbname);

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );

        let timeout = Duration::from_secs(config.connection_timeout_seconds);
        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .wait_timeout(Some(timeout))
            .create_timeout(Some(timeout))
            .recycle_timeout(Some(timeout))
            .build()
            .map_err(|e| {
                PicsyncError::Configuration(format!("Failed to create connection pool: {e}"))
            })?;

        Ok(Self { pool })
    }

    /// Test the connection to the catalog database
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.client().await?;

        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| StoreError::ConnectionFailed(format!("Connection test failed: {e}")))?;

        tracing::info!("Catalog database connection test successful");
        Ok(())
    }

    /// Apply the schema migration if the product table does not exist yet
    pub async fn ensure_schema(&self) -> Result<()> {
        let client = self.client().await?;

        let migration_sql = include_str!("../../../migrations/001_initial_schema.sql");

        client
            .batch_execute(migration_sql)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("Failed to execute migration: {e}")))?;

        tracing::info!("Catalog schema initialized");
        Ok(())
    }

    async fn client(&self) -> Result<deadpool_postgres::Object> {
        self.pool.get().await.map_err(|e| {
            StoreError::ConnectionFailed(format!("Failed to get connection from pool: {e}")).into()
        })
    }
}

/// Build the single-statement update that writes the staged remote URLs and
/// stamps the export flag
///
/// Returns the SQL text; parameters are the staged URLs in order, followed by
/// the product id.
fn build_update_sql(staged: &[(ImageSlot, String)]) -> String {
    let mut assignments: Vec<String> = staged
        .iter()
        .enumerate()
        .map(|(i, (slot, _))| format!("{} = ${}", slot.remote_field(), i + 1))
        .collect();
    assignments.push("flag_export = TRUE".to_string());
    assignments.push("exported_at = NOW()".to_string());

    format!(
        "UPDATE tbl_product_woo SET {} WHERE product_id = ${}",
        assignments.join(", "),
        staged.len() + 1
    )
}

fn row_to_product(row: &Row) -> ProductImages {
    ProductImages {
        product_id: row.get("product_id"),
        product_name: row.get("product_name"),
        image_main: row.get("image_main"),
        image1: row.get("image1"),
        image2: row.get("image2"),
        image3: row.get("image3"),
        image4: row.get("image4"),
        image5: row.get("image5"),
        srv_image_main: row.get("srv_image_main"),
        srv_image1: row.get("srv_image1"),
        srv_image2: row.get("srv_image2"),
        srv_image3: row.get("srv_image3"),
        srv_image4: row.get("srv_image4"),
        srv_image5: row.get("srv_image5"),
        flag_export: row.get("flag_export"),
        exported_at: row.get("exported_at"),
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    async fn get_images(&self, product_id: i64) -> Result<ProductImages> {
        let client = self.client().await?;

        let row = client
            .query_opt(
                "SELECT product_id, product_name, \
                        image_main, image1, image2, image3, image4, image5, \
                        srv_image_main, srv_image1, srv_image2, srv_image3, \
                        srv_image4, srv_image5, flag_export, exported_at \
                 FROM tbl_product_woo WHERE product_id = $1",
                &[&product_id],
            )
            .await
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        match row {
            Some(row) => Ok(row_to_product(&row)),
            None => Err(StoreError::ProductNotFound(product_id).into()),
        }
    }

    async fn update_remote_images_and_mark_exported(
        &self,
        product_id: i64,
        staged: &[(ImageSlot, String)],
    ) -> Result<()> {
        if staged.is_empty() {
            return Ok(());
        }

        let client = self.client().await?;
        let sql = build_update_sql(staged);

        let mut params: Vec<&(dyn ToSql + Sync)> = staged
            .iter()
            .map(|(_, url)| url as &(dyn ToSql + Sync))
            .collect();
        params.push(&product_id);

        let updated = client
            .execute(&sql, &params)
            .await
            .map_err(|e| StoreError::UpdateFailed(e.to_string()))?;

        if updated == 0 {
            return Err(StoreError::ProductNotFound(product_id).into());
        }

        tracing::debug!(
            product_id,
            slots = staged.len(),
            "Persisted remote URLs and marked product exported"
        );
        Ok(())
    }

    async fn list_not_exported(&self, limit: i64) -> Result<Vec<i64>> {
        let client = self.client().await?;

        let rows = client
            .query(
                "SELECT product_id FROM tbl_product_woo \
                 WHERE flag_export = FALSE \
                 ORDER BY image_main DESC NULLS LAST \
                 LIMIT $1",
                &[&limit],
            )
            .await
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        Ok(rows.iter().map(|row| row.get("product_id")).collect())
    }
}
