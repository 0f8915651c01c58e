//! PostgreSQL implementation of the counter store.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::{CounterError, CounterStore};

/// Counter rows in the `settings` table.
///
/// The increment is a single upsert, so row creation and concurrent
/// increments are serialized by the database.
pub struct PgCounterStore {
    pool: Arc<PgPool>,
}

impl PgCounterStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CounterStore for PgCounterStore {
    async fn atomic_increment(&self, key: &str) -> Result<i64, CounterError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO settings (id, count)
            VALUES ($1, 1)
            ON CONFLICT (id) DO UPDATE SET count = settings.count + 1
            RETURNING count
            "#,
        )
        .bind(key)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn get_counter(&self, key: &str) -> Result<Option<i64>, CounterError> {
        let count: Option<i64> = sqlx::query_scalar("SELECT count FROM settings WHERE id = $1")
            .bind(key)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn set_counter(&self, key: &str, value: i64) -> Result<(), CounterError> {
        sqlx::query(
            r#"
            INSERT INTO settings (id, count)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET count = EXCLUDED.count
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
