use crate::enums::{EventType, Side};
use crate::token::TokenAmount;
use serde::{Deserialize, Serialize};

/// One state-changing interaction with a pool.
///
/// For liquidity events `amount_in` is the slot-0 leg and `amount_out` the
/// slot-1 leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockchainEvent {
    /// Unix milliseconds.
    pub timestamp: u64,
    pub event_type: EventType,
    pub amount_in: TokenAmount,
    pub amount_out: TokenAmount,
    pub price_impact: f64,
    pub volume: f64,
    /// Asset sold into the pool, when the feed reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
}

impl BlockchainEvent {
    fn new(
        timestamp: u64,
        event_type: EventType,
        amount_in: impl Into<TokenAmount>,
        amount_out: impl Into<TokenAmount>,
    ) -> Self {
        Self {
            timestamp,
            event_type,
            amount_in: amount_in.into(),
            amount_out: amount_out.into(),
            price_impact: 0.0,
            volume: 0.0,
            sold: None,
            tx_hash: None,
            block_number: None,
        }
    }

    pub fn swap(
        timestamp: u64,
        amount_in: impl Into<TokenAmount>,
        amount_out: impl Into<TokenAmount>,
    ) -> Self {
        Self::new(timestamp, EventType::Swap, amount_in, amount_out)
    }

    pub fn add_liquidity(
        timestamp: u64,
        amount_a: impl Into<TokenAmount>,
        amount_b: impl Into<TokenAmount>,
    ) -> Self {
        Self::new(timestamp, EventType::AddLiquidity, amount_a, amount_b)
    }

    pub fn remove_liquidity(
        timestamp: u64,
        amount_a: impl Into<TokenAmount>,
        amount_b: impl Into<TokenAmount>,
    ) -> Self {
        Self::new(timestamp, EventType::RemoveLiquidity, amount_a, amount_b)
    }

    #[must_use]
    pub fn with_sold(mut self, side: Side) -> Self {
        self.sold = Some(side);
        self
    }

    #[must_use]
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    #[must_use]
    pub fn with_price_impact(mut self, price_impact: f64) -> Self {
        self.price_impact = price_impact;
        self
    }

    #[must_use]
    pub fn with_tx(mut self, tx_hash: impl Into<String>, block_number: u64) -> Self {
        self.tx_hash = Some(tx_hash.into());
        self.block_number = Some(block_number);
        self
    }
}
