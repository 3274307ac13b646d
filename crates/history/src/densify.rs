//! Synthetic filler for charts with too few real candles.
//!
//! When aggregation leaves a chart sparse, a uniform grid is laid over the
//! reconstructed history and a candle is interpolated at every grid point.
//! A small random perturbation keeps the filler from drawing as a flat line.
//! Every candle produced here is tagged [`Provenance::Interpolated`].

use poolchart_domain::{Candle, HistoricalPricePoint, Provenance};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Densification thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensifyConfig {
    /// Below this many real candles the chart is densified.
    pub min_candles: usize,
    /// Number of grid points laid over the history.
    pub target_count: usize,
    /// Maximum relative perturbation, e.g. `0.01` for ±1%.
    pub jitter_pct: f64,
}

impl Default for DensifyConfig {
    fn default() -> Self {
        Self {
            min_candles: 20,
            target_count: 50,
            jitter_pct: 0.01,
        }
    }
}

impl DensifyConfig {
    /// Whether `candle_count` real candles over `history` need filler.
    pub fn should_densify(&self, candle_count: usize, history: &[HistoricalPricePoint]) -> bool {
        candle_count < self.min_candles && !history.is_empty()
    }
}

/// Densifies with the thread-local RNG.
pub fn densify(
    candles: Vec<Candle>,
    history: &[HistoricalPricePoint],
    config: &DensifyConfig,
) -> Vec<Candle> {
    densify_with_rng(candles, history, config, &mut rand::rng())
}

/// Replaces a sparse candle list with up to `target_count` interpolated
/// candles spanning `history`.
///
/// `history` must be ascending by timestamp. Candles are returned unchanged
/// when there are enough of them, when the history is empty, or when no grid
/// point could be bracketed by two valid prices.
pub fn densify_with_rng<R: Rng + ?Sized>(
    candles: Vec<Candle>,
    history: &[HistoricalPricePoint],
    config: &DensifyConfig,
    rng: &mut R,
) -> Vec<Candle> {
    if !config.should_densify(candles.len(), history) || config.target_count == 0 {
        return candles;
    }

    let valid: Vec<&HistoricalPricePoint> = history
        .iter()
        .filter(|p| p.price.is_finite() && p.price > 0.0)
        .collect();
    if valid.is_empty() {
        return candles;
    }

    let (first, last) = match (history.first(), history.last()) {
        (Some(first), Some(last)) => (first.timestamp, last.timestamp),
        _ => return candles,
    };
    let span = last.saturating_sub(first) as f64;
    let step = if config.target_count > 1 {
        span / (config.target_count - 1) as f64
    } else {
        0.0
    };
    let jitter_pct = config.jitter_pct.abs();

    let synthetic: Vec<Candle> = (0..config.target_count)
        .filter_map(|i| {
            let target = first + (i as f64 * step).round() as u64;
            let (price, volume) = interpolate(&valid, target)?;

            let jitter = if jitter_pct > 0.0 {
                price * rng.random_range(-jitter_pct..=jitter_pct)
            } else {
                0.0
            };
            let close = price + jitter;
            if close <= 0.0 {
                return None;
            }

            Some(Candle {
                timestamp: target,
                open: price,
                high: close + jitter.abs(),
                low: close - jitter.abs(),
                close,
                volume,
                provenance: Provenance::Interpolated,
            })
        })
        .collect();

    if synthetic.is_empty() {
        candles
    } else {
        synthetic
    }
}

/// Linear interpolation of price and volume at `target` between the latest
/// point at or before it and the earliest point at or after it.
fn interpolate(points: &[&HistoricalPricePoint], target: u64) -> Option<(f64, f64)> {
    let upper = points.partition_point(|p| p.timestamp <= target);
    let before = points.get(upper.checked_sub(1)?)?;
    let after = points.get(points.partition_point(|p| p.timestamp < target))?;

    if after.timestamp == before.timestamp {
        return Some((before.price, before.volume));
    }

    let fraction =
        (target - before.timestamp) as f64 / (after.timestamp - before.timestamp) as f64;
    Some((
        before.price + (after.price - before.price) * fraction,
        before.volume + (after.volume - before.volume) * fraction,
    ))
}
