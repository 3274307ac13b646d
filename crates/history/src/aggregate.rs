use poolchart_domain::{Candle, HistoricalPricePoint, Provenance};
use std::collections::BTreeMap;

/// Start of the bucket containing `timestamp`.
pub fn bucket_start(timestamp: u64, interval_ms: u64) -> u64 {
    (timestamp / interval_ms) * interval_ms
}

fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

/// Buckets price points into fixed-width OHLCV candles.
///
/// Points keep their input order inside a bucket, so `open` is the first
/// valid price and `close` the last. Volume counts every point in the
/// bucket, including ones whose price was discarded. Buckets with no
/// positive price produce no candle. A zero interval yields no candles.
pub fn aggregate(points: &[HistoricalPricePoint], interval_ms: u64) -> Vec<Candle> {
    if interval_ms == 0 {
        return Vec::new();
    }

    let mut buckets: BTreeMap<u64, Vec<&HistoricalPricePoint>> = BTreeMap::new();
    for point in points {
        buckets
            .entry(bucket_start(point.timestamp, interval_ms))
            .or_default()
            .push(point);
    }

    buckets
        .into_iter()
        .filter_map(|(timestamp, bucket)| {
            let volume: f64 = bucket.iter().map(|p| p.volume).sum();
            let mut prices = bucket
                .iter()
                .map(|p| p.price)
                .filter(|&price| is_valid_price(price));

            let open = prices.next()?;
            let (high, low, close) = prices.fold((open, open, open), |(high, low, _), price| {
                (high.max(price), low.min(price), price)
            });

            Some(Candle {
                timestamp,
                open,
                high,
                low,
                close,
                volume,
                provenance: Provenance::Real,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use poolchart_domain::TokenAmount;

    fn point(timestamp: u64, price: f64, volume: f64) -> HistoricalPricePoint {
        HistoricalPricePoint {
            timestamp,
            price,
            volume,
            reserves: [TokenAmount::zero(), TokenAmount::zero()],
        }
    }

    #[test]
    fn test_ohlcv_within_bucket() {
        let points = vec![
            point(1_000, 2.0, 1.0),
            point(1_500, 3.0, 1.0),
            point(1_800, 1.0, 1.0),
            point(1_900, 1.5, 2.0),
        ];
        let candles = aggregate(&points, 1_000);

        assert_eq!(candles.len(), 1);
        let c = &candles[0];
        assert_eq!(c.timestamp, 1_000);
        assert_eq!(c.open, 2.0);
        assert_eq!(c.high, 3.0);
        assert_eq!(c.low, 1.0);
        assert_eq!(c.close, 1.5);
        assert_eq!(c.volume, 5.0);
        assert_eq!(c.provenance, Provenance::Real);
    }

    #[test]
    fn test_one_point_per_bucket_is_flat() {
        let points: Vec<_> = (0..10)
            .map(|i| point(i * 60_000 + 7, 1.0 + i as f64, 1.0))
            .collect();
        let candles = aggregate(&points, 60_000);

        assert_eq!(candles.len(), 10);
        for c in &candles {
            assert_eq!(c.open, c.close);
            assert_eq!(c.open, c.high);
            assert_eq!(c.open, c.low);
        }
    }

    #[test]
    fn test_zero_price_points_excluded_but_volume_kept() {
        let points = vec![
            point(0, 0.0, 4.0),
            point(10, 2.0, 1.0),
            point(20, f64::NAN, 1.0),
            // bucket with only invalid prices is dropped
            point(100, 0.0, 9.0),
        ];
        let candles = aggregate(&points, 100);

        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].open, 2.0);
        assert_eq!(candles[0].close, 2.0);
        assert_eq!(candles[0].volume, 6.0);
    }

    #[test]
    fn test_output_sorted_and_aligned() {
        let points = vec![
            point(950, 1.0, 0.0),
            point(120, 2.0, 0.0),
            point(530, 3.0, 0.0),
            point(125, 4.0, 0.0),
        ];
        let candles = aggregate(&points, 100);

        let stamps: Vec<u64> = candles.iter().map(|c| c.timestamp).collect();
        assert_eq!(stamps, vec![100, 500, 900]);
        for c in &candles {
            assert_eq!(c.timestamp % 100, 0);
            assert!(c.is_well_formed());
        }
        // input order inside a bucket decides open/close
        assert_eq!(candles[0].open, 2.0);
        assert_eq!(candles[0].close, 4.0);
    }

    #[test]
    fn test_zero_interval() {
        assert!(aggregate(&[point(1, 1.0, 1.0)], 0).is_empty());
    }
}
