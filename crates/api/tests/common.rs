#![allow(dead_code)]

use async_trait::async_trait;
use poolchart_api::ChartService;
use poolchart_data::{
    DataError, EventSource, InMemoryLedger, LedgerReader, PoolEntry, PoolLocator, SyntheticEvents,
};
use poolchart_domain::{Side, TokenAmount};
use poolchart_history::densify::DensifyConfig;
use std::sync::Arc;

/// Midnight UTC, so every window starts on a bucket boundary.
pub const END_MS: u64 = 1_699_920_000_000;

pub fn native_pool(reserve: u64) -> PoolEntry {
    PoolEntry {
        address: "CPOOL".to_string(),
        token_a: "CXLM".to_string(),
        token_b: "CTOKEN".to_string(),
        reserves: [TokenAmount::from(reserve), TokenAmount::from(reserve)],
        native_side: Some(Side::A),
        stable_side: None,
        token_decimals: None,
    }
}

pub fn ledger(reserve: u64) -> Arc<dyn LedgerReader> {
    let mut ledger = InMemoryLedger::with_pools([native_pool(reserve)]);
    ledger.set_decimals("CTOKEN", 7);
    Arc::new(ledger)
}

pub fn service(ledger: Arc<dyn LedgerReader>, events: EventSource) -> ChartService {
    ChartService::new(
        PoolLocator::new(ledger, vec!["CXLM".to_string(), "CUSDC".to_string()]),
        events,
        DensifyConfig::default(),
        7,
    )
}

pub fn synthetic() -> EventSource {
    EventSource::Synthetic(SyntheticEvents::new(42).anchored_at(END_MS))
}

/// Ledger whose every call fails.
pub struct BrokenLedger;

#[async_trait]
impl LedgerReader for BrokenLedger {
    async fn pool_address(&self, _: &str, _: &str) -> Result<Option<String>, DataError> {
        Err(DataError::Decode("ledger offline".to_string()))
    }

    async fn reserves(&self, pool: &str) -> Result<[TokenAmount; 2], DataError> {
        Err(DataError::PoolNotFound(pool.to_string()))
    }

    async fn is_native_pool(&self, _: &str) -> Result<bool, DataError> {
        Err(DataError::Decode("ledger offline".to_string()))
    }

    async fn native_token_index(&self, _: &str) -> Result<Side, DataError> {
        Err(DataError::Decode("ledger offline".to_string()))
    }

    async fn token_decimals(&self, _: &str) -> Result<Option<u32>, DataError> {
        Err(DataError::Decode("ledger offline".to_string()))
    }
}
