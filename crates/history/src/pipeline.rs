use crate::aggregate::aggregate;
use crate::densify::{DensifyConfig, densify_with_rng};
use crate::price::price_points;
use crate::reconstruct::{ReconstructionError, reconstruct};
use poolchart_domain::{BlockchainEvent, Candle, HistoricalPricePoint, PoolData};
use rand::Rng;

/// Candles for one pool plus what went into them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedChart {
    pub candles: Vec<Candle>,
    /// Reconstructed price history, ascending.
    pub points: Vec<HistoricalPricePoint>,
    /// Set when the event stream contradicted the pool's reserves and the
    /// older part of the history was dropped.
    pub truncation: Option<ReconstructionError>,
}

impl RenderedChart {
    pub fn is_densified(&self) -> bool {
        self.candles.iter().any(Candle::is_interpolated)
    }
}

/// Runs reconstruction, pricing, aggregation and densification in order.
///
/// `events` must be ascending by timestamp and belong to `pool`, whose
/// reserves are taken as the state after the last event.
pub fn render_chart<R: Rng + ?Sized>(
    pool: &PoolData,
    events: &[BlockchainEvent],
    token_decimals: u32,
    interval_ms: u64,
    densify: &DensifyConfig,
    rng: &mut R,
) -> RenderedChart {
    let history = reconstruct(pool.reserves, events);
    let points = price_points(pool, &history.snapshots, token_decimals);
    let candles = densify_with_rng(aggregate(&points, interval_ms), &points, densify, rng);

    RenderedChart {
        candles,
        points,
        truncation: history.truncation,
    }
}
