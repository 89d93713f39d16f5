use std::time::Duration;

use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;
use tracing::debug;

use super::backend::CacheBackend;
use super::error::{CacheError, CacheResult};

#[derive(Clone)]
/// Redis cache client. Expiry is delegated to `SET ... EX`.
pub struct RedisCache {
    connection: MultiplexedConnection,
    url: String,
}

impl RedisCache {
    /// Opens a multiplexed connection and verifies it with `PING`.
    pub async fn connect(url: &str, timeout: Duration) -> CacheResult<Self> {
        let client = redis::Client::open(url).map_err(|e| CacheError::ConnectionFailed {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let mut connection = tokio::time::timeout(timeout, client.get_multiplexed_async_connection())
            .await
            .map_err(|_| CacheError::Timeout {
                operation: "connect",
            })?
            .map_err(|e| CacheError::ConnectionFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let pong: String = tokio::time::timeout(timeout, redis::cmd("PING").query_async(&mut connection))
            .await
            .map_err(|_| CacheError::Timeout {
                operation: "connect",
            })?
            .map_err(|e| CacheError::ConnectionFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        debug!(reply = %pong, "Redis ping");

        Ok(Self {
            connection,
            url: url.to_string(),
        })
    }

    /// Returns the configured URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CacheBackend for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.connection.clone();
        let value: Option<String> =
            conn.get(key)
                .await
                .map_err(|e| CacheError::OperationFailed {
                    operation: "get",
                    message: e.to_string(),
                })?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let mut conn = self.connection.clone();
        let seconds = ttl.as_secs().max(1);
        let _: () = conn
            .set_ex(key, value, seconds)
            .await
            .map_err(|e| CacheError::OperationFailed {
                operation: "set",
                message: e.to_string(),
            })?;
        Ok(())
    }
}
