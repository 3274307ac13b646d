//! Pool activity feeds.
//!
//! Both variants return events for one pool, ascending by timestamp, over
//! the window a [`Timeframe`] describes.

mod indexed;
mod synthetic;

pub use indexed::IndexedEvents;
pub use synthetic::SyntheticEvents;

use crate::error::DataError;
use poolchart_domain::{BlockchainEvent, Timeframe};
use serde::{Deserialize, Serialize};

/// Event source selection, as read from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventSourceConfig {
    /// Deterministic generator.
    Synthetic { seed: u64 },
    /// HTTP ledger indexer.
    LedgerIndexed { endpoint: String },
}

impl Default for EventSourceConfig {
    fn default() -> Self {
        Self::Synthetic { seed: 0 }
    }
}

/// Where pool events come from.
#[derive(Debug, Clone)]
pub enum EventSource {
    Synthetic(SyntheticEvents),
    LedgerIndexed(IndexedEvents),
}

impl EventSource {
    /// Builds the configured source.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_config(config: &EventSourceConfig) -> Result<Self, DataError> {
        Ok(match config {
            EventSourceConfig::Synthetic { seed } => {
                Self::Synthetic(SyntheticEvents::new(*seed))
            }
            EventSourceConfig::LedgerIndexed { endpoint } => {
                Self::LedgerIndexed(IndexedEvents::new(endpoint.clone())?)
            }
        })
    }

    /// Events for `pool_address` over the window ending now.
    ///
    /// # Errors
    /// Returns an error if the indexer cannot be reached or its payload is malformed.
    pub async fn events(
        &self,
        pool_address: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<BlockchainEvent>, DataError> {
        match self {
            Self::Synthetic(source) => Ok(source.events(pool_address, timeframe)),
            Self::LedgerIndexed(source) => {
                source.events(pool_address, timeframe, now_ms()).await
            }
        }
    }
}

pub(crate) fn now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}
