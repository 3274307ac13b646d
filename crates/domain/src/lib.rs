//! Domain types for pool price-history reconstruction.
//!
//! Everything in this crate is a value object: pools, ledger events,
//! reconstructed price points and OHLCV candles. No type holds a reference
//! to another's mutable state.

pub mod entities;
pub mod enums;
pub mod error;
pub mod timeframe;
pub mod token;

pub use entities::{BlockchainEvent, Candle, HistoricalPricePoint, PoolData};
pub use enums::{EventType, PoolKind, Provenance, Side};
pub use error::DomainError;
pub use timeframe::Timeframe;
pub use token::TokenAmount;
