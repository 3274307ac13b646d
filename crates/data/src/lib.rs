//! External collaborators of the chart pipeline.
//!
//! - Event sources: a deterministic synthetic generator and a ledger-indexer client
//! - Ledger readers: pool lookup, reserves and token metadata
//! - Pool location across quote assets and both asset orderings
//! - Candle persistence in PostgreSQL

/// Error types.
pub mod error;
/// Ledger lookups.
pub mod ledger;
/// Pool discovery.
pub mod locator;
/// Repository implementations for database persistence.
pub mod repositories;
/// Event sources.
pub mod sources;

pub use error::DataError;
pub use ledger::{HttpLedger, InMemoryLedger, LedgerConfig, LedgerReader, PoolEntry};
pub use locator::PoolLocator;
pub use sources::{EventSource, EventSourceConfig, IndexedEvents, SyntheticEvents};
