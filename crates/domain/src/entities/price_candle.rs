use crate::enums::Provenance;
use serde::{Deserialize, Serialize};

/// OHLCV summary of one time bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket start, unix milliseconds.
    pub timestamp: u64,

    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,

    pub volume: f64,
    #[serde(default)]
    pub provenance: Provenance,
}

impl Candle {
    /// `low <= open, close <= high`.
    pub fn is_well_formed(&self) -> bool {
        self.low <= self.open
            && self.low <= self.close
            && self.open <= self.high
            && self.close <= self.high
    }

    pub fn is_interpolated(&self) -> bool {
        self.provenance == Provenance::Interpolated
    }
}
