use super::LedgerReader;
use crate::error::DataError;
use async_trait::async_trait;
use poolchart_domain::{Side, TokenAmount};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// A pool registered with [`InMemoryLedger`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolEntry {
    pub address: String,
    pub token_a: String,
    pub token_b: String,
    pub reserves: [TokenAmount; 2],
    /// Slot of the native asset for native pools.
    #[serde(default)]
    pub native_side: Option<Side>,
    #[serde(default)]
    pub stable_side: Option<Side>,
    /// Decimals of the non-quote token.
    #[serde(default)]
    pub token_decimals: Option<u32>,
}

impl PoolEntry {
    /// The non-quote token, opposite the native or stable side. `None` for
    /// stable pools without a tagged side, whose quote slot is only decided
    /// from reserves at pricing time.
    pub fn priced_token(&self) -> Option<&str> {
        let quote = self.native_side.or(self.stable_side)?;
        Some(match quote.other() {
            Side::A => &self.token_a,
            Side::B => &self.token_b,
        })
    }
}

/// Fixed ledger contents, for tests and offline runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    pools: HashMap<String, PoolEntry>,
    decimals: HashMap<String, u32>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pools(pools: impl IntoIterator<Item = PoolEntry>) -> Self {
        let mut ledger = Self::new();
        for pool in pools {
            ledger.insert_pool(pool);
        }
        ledger
    }

    pub fn insert_pool(&mut self, pool: PoolEntry) {
        if let Some(decimals) = pool.token_decimals {
            match pool.priced_token() {
                Some(token) => {
                    self.decimals.insert(token.to_string(), decimals);
                }
                None => warn!(
                    pool = %pool.address,
                    "Ignoring token_decimals on a pool with no native or stable side"
                ),
            }
        }
        self.pools.insert(pool.address.clone(), pool);
    }

    pub fn set_decimals(&mut self, token: impl Into<String>, decimals: u32) {
        self.decimals.insert(token.into(), decimals);
    }

    fn pool(&self, pool_address: &str) -> Result<&PoolEntry, DataError> {
        self.pools
            .get(pool_address)
            .ok_or_else(|| DataError::PoolNotFound(pool_address.to_string()))
    }
}

#[async_trait]
impl LedgerReader for InMemoryLedger {
    async fn pool_address(
        &self,
        token_a: &str,
        token_b: &str,
    ) -> Result<Option<String>, DataError> {
        Ok(self
            .pools
            .values()
            .find(|p| p.token_a == token_a && p.token_b == token_b)
            .map(|p| p.address.clone()))
    }

    async fn reserves(&self, pool_address: &str) -> Result<[TokenAmount; 2], DataError> {
        Ok(self.pool(pool_address)?.reserves)
    }

    async fn is_native_pool(&self, pool_address: &str) -> Result<bool, DataError> {
        Ok(self.pool(pool_address)?.native_side.is_some())
    }

    async fn native_token_index(&self, pool_address: &str) -> Result<Side, DataError> {
        self.pool(pool_address)?
            .native_side
            .ok_or_else(|| DataError::Decode(format!("pool {pool_address} is not native")))
    }

    async fn stable_side(&self, pool_address: &str) -> Result<Option<Side>, DataError> {
        Ok(self.pool(pool_address)?.stable_side)
    }

    async fn token_decimals(&self, token_address: &str) -> Result<Option<u32>, DataError> {
        Ok(self.decimals.get(token_address).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> PoolEntry {
        PoolEntry {
            address: "CPOOL".to_string(),
            token_a: "CTOKEN".to_string(),
            token_b: "CXLM".to_string(),
            reserves: [TokenAmount::from(10u64), TokenAmount::from(20u64)],
            native_side: Some(Side::B),
            stable_side: None,
            token_decimals: Some(9),
        }
    }

    #[tokio::test]
    async fn test_lookup_is_order_sensitive() {
        let ledger = InMemoryLedger::with_pools([entry()]);
        assert_eq!(
            ledger.pool_address("CTOKEN", "CXLM").await.unwrap(),
            Some("CPOOL".to_string())
        );
        assert_eq!(ledger.pool_address("CXLM", "CTOKEN").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_pool_fields() {
        let ledger = InMemoryLedger::with_pools([entry()]);
        assert!(ledger.is_native_pool("CPOOL").await.unwrap());
        assert_eq!(ledger.native_token_index("CPOOL").await.unwrap(), Side::B);
        assert_eq!(ledger.token_decimals("CTOKEN").await.unwrap(), Some(9));
        assert_eq!(ledger.token_decimals("CXLM").await.unwrap(), None);
        assert_eq!(
            ledger.reserves("CPOOL").await.unwrap(),
            [TokenAmount::from(10u64), TokenAmount::from(20u64)]
        );
    }

    #[tokio::test]
    async fn test_decimals_follow_the_priced_token() {
        let quote_first = PoolEntry {
            address: "CPOOL2".to_string(),
            token_a: "CXLM".to_string(),
            token_b: "COTHER".to_string(),
            native_side: Some(Side::A),
            ..entry()
        };
        let stable = PoolEntry {
            address: "CPOOL3".to_string(),
            token_a: "CUSDC".to_string(),
            token_b: "CSTABLETOKEN".to_string(),
            native_side: None,
            stable_side: Some(Side::A),
            token_decimals: Some(18),
            ..entry()
        };
        let ledger = InMemoryLedger::with_pools([quote_first.clone(), stable]);

        assert_eq!(quote_first.priced_token(), Some("COTHER"));
        assert_eq!(ledger.token_decimals("COTHER").await.unwrap(), Some(9));
        assert_eq!(ledger.token_decimals("CSTABLETOKEN").await.unwrap(), Some(18));
        assert_eq!(ledger.token_decimals("CXLM").await.unwrap(), None);
        assert_eq!(ledger.token_decimals("CUSDC").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_untagged_pool_decimals_are_not_guessed() {
        let untagged = PoolEntry {
            native_side: None,
            stable_side: None,
            ..entry()
        };
        assert_eq!(untagged.priced_token(), None);

        let ledger = InMemoryLedger::with_pools([untagged]);
        assert_eq!(ledger.token_decimals("CTOKEN").await.unwrap(), None);
        assert_eq!(ledger.token_decimals("CXLM").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unknown_pool_errors() {
        let ledger = InMemoryLedger::new();
        assert!(matches!(
            ledger.reserves("CNOPE").await,
            Err(DataError::PoolNotFound(addr)) if addr == "CNOPE"
        ));
    }
}
