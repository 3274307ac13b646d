//! Finds the pool pricing a token against one of the configured quote assets.

use crate::error::DataError;
use crate::ledger::LedgerReader;
use poolchart_domain::{PoolData, PoolKind};
use std::sync::Arc;
use tracing::debug;

/// Resolves a token to the pool that prices it.
#[derive(Clone)]
pub struct PoolLocator {
    ledger: Arc<dyn LedgerReader>,
    quote_assets: Vec<String>,
}

impl PoolLocator {
    /// `quote_assets` are tried in order.
    pub fn new(ledger: Arc<dyn LedgerReader>, quote_assets: Vec<String>) -> Self {
        Self {
            ledger,
            quote_assets,
        }
    }

    pub fn ledger(&self) -> &Arc<dyn LedgerReader> {
        &self.ledger
    }

    /// Finds the pool for `token`, trying `(token, quote)` then
    /// `(quote, token)` for each quote asset. `Ok(None)` when nothing matches.
    ///
    /// # Errors
    /// Returns an error if a ledger lookup fails.
    pub async fn locate(&self, token: &str) -> Result<Option<PoolData>, DataError> {
        for quote in self.quote_assets.iter().filter(|q| q.as_str() != token) {
            for (token_a, token_b) in [(token, quote.as_str()), (quote.as_str(), token)] {
                if let Some(address) = self.ledger.pool_address(token_a, token_b).await? {
                    debug!(token, pool = %address, token_a, token_b, "Pool located");
                    return self.load(&address, token_a, token_b).await.map(Some);
                }
            }
        }
        debug!(token, "No pool found for token");
        Ok(None)
    }

    /// Reads the current state of a known pool.
    ///
    /// # Errors
    /// Returns an error if a ledger lookup fails.
    pub async fn load(
        &self,
        pool_address: &str,
        token_a: &str,
        token_b: &str,
    ) -> Result<PoolData, DataError> {
        let reserves = self.ledger.reserves(pool_address).await?;
        let kind = if self.ledger.is_native_pool(pool_address).await? {
            PoolKind::Native {
                native_side: self.ledger.native_token_index(pool_address).await?,
            }
        } else {
            PoolKind::Stable {
                stable_side: self.ledger.stable_side(pool_address).await?,
            }
        };
        Ok(PoolData::new(pool_address, reserves, token_a, token_b, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{InMemoryLedger, PoolEntry};
    use poolchart_domain::{Side, TokenAmount};

    fn entry(address: &str, a: &str, b: &str, native_side: Option<Side>) -> PoolEntry {
        PoolEntry {
            address: address.to_string(),
            token_a: a.to_string(),
            token_b: b.to_string(),
            reserves: [TokenAmount::from(1_000u64), TokenAmount::from(2_000u64)],
            native_side,
            stable_side: None,
            token_decimals: None,
        }
    }

    fn locator(pools: Vec<PoolEntry>) -> PoolLocator {
        PoolLocator::new(
            Arc::new(InMemoryLedger::with_pools(pools)),
            vec!["CXLM".to_string(), "CUSDC".to_string()],
        )
    }

    #[tokio::test]
    async fn test_reversed_ordering_is_found() {
        let locator = locator(vec![entry("CPOOL", "CXLM", "CTOKEN", Some(Side::A))]);
        let pool = locator.locate("CTOKEN").await.unwrap().unwrap();

        assert_eq!(pool.pool_address, "CPOOL");
        assert_eq!(pool.token_a, "CXLM");
        assert_eq!(pool.token_b, "CTOKEN");
        assert_eq!(pool.kind, PoolKind::Native { native_side: Side::A });
        assert_eq!(pool.native_token_index(), Some(Side::A));
    }

    #[tokio::test]
    async fn test_falls_through_to_second_quote_asset() {
        let locator = locator(vec![entry("CSTABLE", "CTOKEN", "CUSDC", None)]);
        let pool = locator.locate("CTOKEN").await.unwrap().unwrap();

        assert_eq!(pool.pool_address, "CSTABLE");
        assert_eq!(pool.kind, PoolKind::Stable { stable_side: None });
        assert!(!pool.is_native_pool());
    }

    #[tokio::test]
    async fn test_missing_pool_is_none() {
        let locator = locator(vec![entry("CPOOL", "COTHER", "CXLM", Some(Side::B))]);
        assert!(locator.locate("CTOKEN").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_quote_asset_itself_is_skipped() {
        let locator = locator(vec![entry("CPOOL", "CXLM", "CUSDC", Some(Side::A))]);
        // CXLM is only paired against CUSDC, which is tried as the second quote.
        let pool = locator.locate("CXLM").await.unwrap().unwrap();
        assert_eq!(pool.pool_address, "CPOOL");
    }
}
