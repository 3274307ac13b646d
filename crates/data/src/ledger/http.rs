use super::LedgerReader;
use crate::error::DataError;
use async_trait::async_trait;
use poolchart_domain::{DomainError, Side, TokenAmount};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct PairResponse {
    pool_address: String,
}

#[derive(Debug, Deserialize)]
struct ReservesResponse {
    reserves: [TokenAmount; 2],
}

#[derive(Debug, Deserialize)]
struct KindResponse {
    is_native: bool,
    #[serde(default)]
    native_index: Option<u8>,
    #[serde(default)]
    stable_side: Option<Side>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    decimals: u32,
}

/// Ledger reader backed by a JSON gateway in front of the network's RPC.
///
/// Routes:
/// - `GET /pairs/{a}/{b}` → `{ "pool_address": ... }`, 404 when absent
/// - `GET /pools/{p}/reserves` → `{ "reserves": ["r0", "r1"] }`
/// - `GET /pools/{p}/kind` → `{ "is_native": bool, "native_index": 0|1, "stable_side": "a"|"b" }`
/// - `GET /tokens/{t}` → `{ "decimals": n }`, 404 when unknown
#[derive(Debug, Clone)]
pub struct HttpLedger {
    endpoint: String,
    client: Client,
}

impl HttpLedger {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, DataError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// GETs `path`, mapping 404 to `None`.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, DataError> {
        let url = format!("{}{}", self.endpoint, path);
        debug!(url = %url, "Ledger gateway request");

        let response = self.client.get(&url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let body = response.text().await?;
                serde_json::from_str(&body)
                    .map(Some)
                    .map_err(|e| DataError::Decode(e.to_string()))
            }
            status => Err(DataError::Status {
                status: status.as_u16(),
                url,
            }),
        }
    }

    async fn kind(&self, pool_address: &str) -> Result<KindResponse, DataError> {
        self.get_json(&format!("/pools/{pool_address}/kind"))
            .await?
            .ok_or_else(|| DataError::PoolNotFound(pool_address.to_string()))
    }
}

#[async_trait]
impl LedgerReader for HttpLedger {
    async fn pool_address(
        &self,
        token_a: &str,
        token_b: &str,
    ) -> Result<Option<String>, DataError> {
        let pair: Option<PairResponse> =
            self.get_json(&format!("/pairs/{token_a}/{token_b}")).await?;
        Ok(pair.map(|p| p.pool_address))
    }

    async fn reserves(&self, pool_address: &str) -> Result<[TokenAmount; 2], DataError> {
        let response: ReservesResponse = self
            .get_json(&format!("/pools/{pool_address}/reserves"))
            .await?
            .ok_or_else(|| DataError::PoolNotFound(pool_address.to_string()))?;
        Ok(response.reserves)
    }

    async fn is_native_pool(&self, pool_address: &str) -> Result<bool, DataError> {
        Ok(self.kind(pool_address).await?.is_native)
    }

    async fn native_token_index(&self, pool_address: &str) -> Result<Side, DataError> {
        let index = self
            .kind(pool_address)
            .await?
            .native_index
            .ok_or_else(|| {
                DataError::Decode(format!("pool {pool_address} has no native index"))
            })?;
        Side::from_index(index).ok_or(DataError::Domain(DomainError::InvalidSide(index)))
    }

    async fn stable_side(&self, pool_address: &str) -> Result<Option<Side>, DataError> {
        Ok(self.kind(pool_address).await?.stable_side)
    }

    async fn token_decimals(&self, token_address: &str) -> Result<Option<u32>, DataError> {
        let token: Option<TokenResponse> =
            self.get_json(&format!("/tokens/{token_address}")).await?;
        Ok(token.map(|t| t.decimals))
    }
}
