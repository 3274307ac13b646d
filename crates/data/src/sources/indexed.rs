use crate::error::DataError;
use poolchart_domain::{BlockchainEvent, EventType, Side, Timeframe, TokenAmount};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Event as served by the ledger indexer.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireEvent {
    timestamp: u64,
    #[serde(rename = "type")]
    event_type: EventType,
    amount_in: TokenAmount,
    amount_out: TokenAmount,
    #[serde(default)]
    price_impact: f64,
    #[serde(default)]
    volume: f64,
    #[serde(default)]
    sold: Option<Side>,
    #[serde(default)]
    tx_hash: Option<String>,
    #[serde(default)]
    block_number: Option<u64>,
}

impl From<WireEvent> for BlockchainEvent {
    fn from(wire: WireEvent) -> Self {
        Self {
            timestamp: wire.timestamp,
            event_type: wire.event_type,
            amount_in: wire.amount_in,
            amount_out: wire.amount_out,
            price_impact: wire.price_impact,
            volume: wire.volume,
            sold: wire.sold,
            tx_hash: wire.tx_hash,
            block_number: wire.block_number,
        }
    }
}

/// Client for a ledger indexer exposing decoded pool events.
///
/// Queries `GET {endpoint}/pools/{pool}/events?from={ms}&to={ms}`.
#[derive(Debug, Clone)]
pub struct IndexedEvents {
    endpoint: String,
    client: Client,
}

impl IndexedEvents {
    /// Creates a client with a 10 second request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, DataError> {
        Self::with_timeout(endpoint, Duration::from_secs(10))
    }

    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, DataError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Events for `pool_address` in the window ending at `end_ms`, ascending.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable payload.
    pub async fn events(
        &self,
        pool_address: &str,
        timeframe: Timeframe,
        end_ms: u64,
    ) -> Result<Vec<BlockchainEvent>, DataError> {
        let url = format!("{}/pools/{}/events", self.endpoint, pool_address);
        let from = end_ms.saturating_sub(timeframe.window_ms());

        debug!(url = %url, from, to = end_ms, "Fetching indexed pool events");

        let response = self
            .client
            .get(&url)
            .query(&[("from", from), ("to", end_ms)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DataError::Status {
                status: response.status().as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let wire: Vec<WireEvent> =
            serde_json::from_str(&body).map_err(|e| DataError::Decode(e.to_string()))?;

        let mut events: Vec<BlockchainEvent> = wire.into_iter().map(Into::into).collect();
        events.sort_by_key(|e| e.timestamp);
        Ok(events)
    }
}
