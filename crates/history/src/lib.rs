//! Price-history reconstruction and candle aggregation.
//!
//! The stages run in order, each a pure function of its inputs:
//! - [`reconstruct`](reconstruct::reconstruct) walks events backwards from
//!   the current reserves
//! - [`price`](price::price) turns a reserve pair into a scalar price
//! - [`aggregate`](aggregate::aggregate) buckets price points into OHLCV candles
//! - [`densify`](densify::densify) fills in sparse charts with interpolated candles

/// Prelude module for convenient imports.
pub mod prelude;

/// Fixed-interval OHLCV bucketing.
pub mod aggregate;
/// Interpolated filler for sparse charts.
pub mod densify;
/// End-to-end chart rendering.
pub mod pipeline;
/// Reserve-pair pricing.
pub mod price;
/// Backward reserve walk.
pub mod reconstruct;
