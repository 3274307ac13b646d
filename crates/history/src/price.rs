use crate::reconstruct::ReserveSnapshot;
use poolchart_domain::{HistoricalPricePoint, PoolData, PoolKind, Side, TokenAmount};

/// Decimal places of the network's native asset.
pub const NATIVE_DECIMALS: u32 = 7;
/// Decimal places assumed for the stable side of a non-native pool.
pub const STABLE_DECIMALS: u32 = 6;

/// Picks the stable side by reserve digit count: fewer digits is stable,
/// ties go to slot 1.
fn stable_side_by_digits(reserves: &[TokenAmount; 2]) -> Side {
    if reserves[0].digit_count() < reserves[1].digit_count() {
        Side::A
    } else {
        Side::B
    }
}

/// Price of the pool's token in units of its quote asset.
///
/// The quote side is the native asset for native pools and the stable asset
/// otherwise. Returns `0.0` when either reserve is empty.
pub fn price(pool: &PoolData, token_decimals: u32) -> f64 {
    let [r0, r1] = pool.reserves;
    if r0.is_zero() || r1.is_zero() {
        return 0.0;
    }

    let (quote_side, quote_decimals) = match pool.kind {
        PoolKind::Native { native_side } => (native_side, NATIVE_DECIMALS),
        PoolKind::Stable { stable_side } => (
            stable_side.unwrap_or_else(|| stable_side_by_digits(&pool.reserves)),
            STABLE_DECIMALS,
        ),
    };

    let quote = pool.reserves[quote_side.index()].normalized(quote_decimals);
    let base = pool.reserves[quote_side.other().index()].normalized(token_decimals);
    if base <= 0.0 {
        return 0.0;
    }
    quote / base
}

/// Prices every reconstructed snapshot against the pool's classification.
pub fn price_points(
    pool: &PoolData,
    snapshots: &[ReserveSnapshot],
    token_decimals: u32,
) -> Vec<HistoricalPricePoint> {
    snapshots
        .iter()
        .map(|s| HistoricalPricePoint {
            timestamp: s.timestamp,
            price: price(&pool.with_reserves(s.reserves), token_decimals),
            volume: s.volume,
            reserves: s.reserves,
        })
        .collect()
}
