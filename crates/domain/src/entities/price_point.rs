use crate::token::TokenAmount;
use serde::{Deserialize, Serialize};

/// Reconstructed pool state at the instant of one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPricePoint {
    pub timestamp: u64,
    pub price: f64,
    pub volume: f64,
    pub reserves: [TokenAmount; 2],
}
