//! Chart service: the boundary between the pure history stages and the
//! external collaborators.
//!
//! Every collaborator failure stops here. Callers get `None` or an empty
//! candle list and the failure is logged, since charts are a
//! non-critical view.

use crate::config::ChartConfig;
use poolchart_data::{DataError, EventSource, PoolLocator};
use poolchart_domain::{Candle, PoolData, Timeframe};
use poolchart_history::densify::DensifyConfig;
use poolchart_history::pipeline::{RenderedChart, render_chart};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Chart for one pool, with the pool state it was rendered from.
#[derive(Debug, Clone)]
pub struct PoolChart {
    pub pool: PoolData,
    pub token_decimals: u32,
    pub chart: RenderedChart,
}

/// Stateless chart pipeline. Cheap to clone and safe to share across
/// concurrent requests.
#[derive(Clone)]
pub struct ChartService {
    locator: PoolLocator,
    events: Arc<EventSource>,
    densify: DensifyConfig,
    default_token_decimals: u32,
}

impl ChartService {
    pub fn new(
        locator: PoolLocator,
        events: EventSource,
        densify: DensifyConfig,
        default_token_decimals: u32,
    ) -> Self {
        Self {
            locator,
            events: Arc::new(events),
            densify,
            default_token_decimals,
        }
    }

    /// Builds the service and its collaborators from configuration.
    ///
    /// # Errors
    /// Returns an error if an HTTP collaborator cannot be created.
    pub fn from_config(config: &ChartConfig) -> Result<Self, DataError> {
        let ledger = config.ledger.build()?;
        let events = EventSource::from_config(&config.event_source)?;
        Ok(Self::new(
            PoolLocator::new(ledger, config.quote_assets.clone()),
            events,
            config.densify.clone(),
            config.default_token_decimals,
        ))
    }

    /// Current pool state for `token`, or `None` when there is no pool or
    /// the lookup failed.
    pub async fn find_pool(&self, token: &str) -> Option<PoolData> {
        match self.locator.locate(token).await {
            Ok(pool) => pool,
            Err(e) => {
                warn!(token, error = %e, "Pool lookup failed");
                None
            }
        }
    }

    /// Candles for `token` over `timeframe`. Empty when there is no pool or
    /// any collaborator failed.
    pub async fn candles(&self, token: &str, timeframe: Timeframe) -> Vec<Candle> {
        match self.try_chart(token, timeframe).await {
            Ok(Some(chart)) => chart.chart.candles,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(token, timeframe = %timeframe, error = %e, "Chart pipeline failed");
                Vec::new()
            }
        }
    }

    /// Full chart for `token`, propagating collaborator errors.
    ///
    /// # Errors
    /// Returns an error if a ledger lookup or the event fetch fails.
    pub async fn try_chart(
        &self,
        token: &str,
        timeframe: Timeframe,
    ) -> Result<Option<PoolChart>, DataError> {
        let Some(pool) = self.locator.locate(token).await? else {
            return Ok(None);
        };
        let token_decimals = self
            .locator
            .ledger()
            .token_decimals(token)
            .await?
            .unwrap_or(self.default_token_decimals);

        self.chart_for_pool(pool, token_decimals, timeframe)
            .await
            .map(Some)
    }

    /// Chart for an already located pool.
    ///
    /// # Errors
    /// Returns an error if the event fetch fails.
    pub async fn chart_for_pool(
        &self,
        pool: PoolData,
        token_decimals: u32,
        timeframe: Timeframe,
    ) -> Result<PoolChart, DataError> {
        let events = self.events.events(&pool.pool_address, timeframe).await?;
        debug!(
            pool = %pool.pool_address,
            timeframe = %timeframe,
            events = events.len(),
            "Fetched pool events"
        );

        let chart = render_chart(
            &pool,
            &events,
            token_decimals,
            timeframe.bucket_width_ms(),
            &self.densify,
            &mut rand::rng(),
        );

        info!(
            pool = %pool.pool_address,
            timeframe = %timeframe,
            points = chart.points.len(),
            candles = chart.candles.len(),
            densified = chart.is_densified(),
            truncated = chart.truncation.is_some(),
            "Chart rendered"
        );

        Ok(PoolChart {
            pool,
            token_decimals,
            chart,
        })
    }
}
