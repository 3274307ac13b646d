pub mod event;
pub mod pool;
pub mod price_candle;
pub mod price_point;

// Re-export for easier access
pub use event::BlockchainEvent;
pub use pool::PoolData;
pub use price_candle::Candle;
pub use price_point::HistoricalPricePoint;
