//! Request handlers.

use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use poolchart_domain::{Candle, PoolData, Timeframe};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct CandleQuery {
    pub timeframe: Option<String>,
}

/// `GET /health`
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// `GET /tokens/{token}/pool`, `null` when the token has no pool.
pub async fn get_pool(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Json<Option<PoolData>> {
    Json(state.charts.find_pool(&token).await)
}

/// `GET /tokens/{token}/candles?timeframe=1d`
pub async fn get_candles(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(query): Query<CandleQuery>,
) -> Result<Json<Vec<Candle>>, ApiError> {
    let timeframe = match query.timeframe.as_deref() {
        Some(tf) => tf
            .parse::<Timeframe>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => Timeframe::default(),
    };
    Ok(Json(state.charts.candles(&token, timeframe).await))
}
