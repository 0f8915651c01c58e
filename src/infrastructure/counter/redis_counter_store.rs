//! Redis-backed counter store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::info;

use crate::domain::repositories::{CounterError, CounterStore};

/// Counters kept as Redis integers under a namespaced key.
///
/// `INCR` creates a missing key at 0 before incrementing, which gives the
/// first caller 1.
pub struct RedisCounterStore {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisCounterStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CounterError::Unavailable`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> Result<Self, CounterError> {
        info!("Connecting to Redis counter store");

        let client = Client::open(redis_url).map_err(|e| {
            CounterError::Unavailable(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CounterError::Unavailable(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CounterError::Unavailable(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis counter store");

        Ok(Self {
            client: manager,
            key_prefix: "counter:".to_string(),
        })
    }

    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn atomic_increment(&self, key: &str) -> Result<i64, CounterError> {
        let mut conn = self.client.clone();
        let count: i64 = conn.incr(self.build_key(key), 1).await?;
        Ok(count)
    }

    async fn get_counter(&self, key: &str) -> Result<Option<i64>, CounterError> {
        let mut conn = self.client.clone();
        let count: Option<i64> = conn.get(self.build_key(key)).await?;
        Ok(count)
    }

    async fn set_counter(&self, key: &str, value: i64) -> Result<(), CounterError> {
        let mut conn = self.client.clone();
        conn.set::<_, _, ()>(self.build_key(key), value).await?;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
