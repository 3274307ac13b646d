//! Read-only views of on-chain pool state.

mod http;
mod memory;

pub use http::HttpLedger;
pub use memory::{InMemoryLedger, PoolEntry};

use crate::error::DataError;
use async_trait::async_trait;
use poolchart_domain::{Side, TokenAmount};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Lookups the chart pipeline needs from the ledger.
#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// Pool holding exactly `(token_a, token_b)` in that order, if any.
    async fn pool_address(&self, token_a: &str, token_b: &str)
    -> Result<Option<String>, DataError>;

    /// Current reserves of a pool, slot 0 then slot 1.
    async fn reserves(&self, pool_address: &str) -> Result<[TokenAmount; 2], DataError>;

    /// Whether one side of the pool is the native asset.
    async fn is_native_pool(&self, pool_address: &str) -> Result<bool, DataError>;

    /// Slot of the native asset. Only meaningful for native pools.
    async fn native_token_index(&self, pool_address: &str) -> Result<Side, DataError>;

    /// Slot of the stable asset, when the ledger records it.
    async fn stable_side(&self, _pool_address: &str) -> Result<Option<Side>, DataError> {
        Ok(None)
    }

    /// Decimal places of an issued token, if known.
    async fn token_decimals(&self, token_address: &str) -> Result<Option<u32>, DataError>;
}

/// Ledger backend selection, as read from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerConfig {
    InMemory {
        #[serde(default)]
        pools: Vec<PoolEntry>,
    },
    Http {
        endpoint: String,
    },
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::InMemory { pools: Vec::new() }
    }
}

impl LedgerConfig {
    /// Builds the configured reader.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn build(&self) -> Result<Arc<dyn LedgerReader>, DataError> {
        Ok(match self {
            Self::InMemory { pools } => Arc::new(InMemoryLedger::with_pools(pools.clone())),
            Self::Http { endpoint } => Arc::new(HttpLedger::new(endpoint.clone())?),
        })
    }
}
