//! Candle repository for rendered chart data.

use poolchart_domain::{Candle, Provenance, Timeframe};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;
use uuid::Uuid;

/// Database record for one stored candle.
#[derive(Debug, Clone)]
pub struct CandleRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// Pool the candle belongs to.
    pub pool_address: String,
    /// Timeframe the chart was rendered for.
    pub timeframe: String,
    /// Bucket start in unix milliseconds.
    pub timestamp: i64,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
    pub volume: f64,
    /// `real` or `interpolated`.
    pub provenance: String,
    /// Record creation timestamp.
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl CandleRecord {
    /// Creates a CandleRecord from a database row.
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            pool_address: row.try_get("pool_address")?,
            timeframe: row.try_get("timeframe")?,
            timestamp: row.try_get("timestamp")?,
            open_price: row.try_get("open_price")?,
            high_price: row.try_get("high_price")?,
            low_price: row.try_get("low_price")?,
            close_price: row.try_get("close_price")?,
            volume: row.try_get("volume")?,
            provenance: row.try_get("provenance")?,
            created_at: row.try_get("created_at")?,
        })
    }

    /// Record for `candle` as rendered for `pool_address` over `timeframe`.
    pub fn from_candle(pool_address: &str, timeframe: Timeframe, candle: &Candle) -> Self {
        Self {
            id: Uuid::new_v4(),
            pool_address: pool_address.to_string(),
            timeframe: timeframe.as_str().to_string(),
            timestamp: i64::try_from(candle.timestamp).unwrap_or(i64::MAX),
            open_price: candle.open,
            high_price: candle.high,
            low_price: candle.low,
            close_price: candle.close,
            volume: candle.volume,
            provenance: provenance_str(candle.provenance).to_string(),
            created_at: chrono::Utc::now(),
        }
    }

    /// Converts back into a domain candle.
    pub fn to_candle(&self) -> Candle {
        Candle {
            timestamp: u64::try_from(self.timestamp).unwrap_or_default(),
            open: self.open_price,
            high: self.high_price,
            low: self.low_price,
            close: self.close_price,
            volume: self.volume,
            provenance: provenance_from_str(&self.provenance),
        }
    }
}

fn provenance_str(provenance: Provenance) -> &'static str {
    match provenance {
        Provenance::Real => "real",
        Provenance::Interpolated => "interpolated",
    }
}

fn provenance_from_str(s: &str) -> Provenance {
    match s {
        "interpolated" => Provenance::Interpolated,
        _ => Provenance::Real,
    }
}

/// Repository for candle CRUD operations.
#[derive(Clone)]
pub struct CandleRepository {
    pool: Arc<PgPool>,
}

impl CandleRepository {
    /// Creates a new CandleRepository.
    #[must_use]
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Upserts a rendered chart in one transaction. Returns rows written.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn save_all(
        &self,
        pool_address: &str,
        timeframe: Timeframe,
        candles: &[Candle],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let mut written = 0;
        for candle in candles {
            let record = CandleRecord::from_candle(pool_address, timeframe, candle);
            let result = sqlx::query(
                r#"
                INSERT INTO pool_candles (id, pool_address, timeframe, timestamp, open_price,
                                          high_price, low_price, close_price, volume, provenance)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                ON CONFLICT (pool_address, timeframe, timestamp) DO UPDATE SET
                    open_price = EXCLUDED.open_price,
                    high_price = EXCLUDED.high_price,
                    low_price = EXCLUDED.low_price,
                    close_price = EXCLUDED.close_price,
                    volume = EXCLUDED.volume,
                    provenance = EXCLUDED.provenance
                "#,
            )
            .bind(record.id)
            .bind(&record.pool_address)
            .bind(&record.timeframe)
            .bind(record.timestamp)
            .bind(record.open_price)
            .bind(record.high_price)
            .bind(record.low_price)
            .bind(record.close_price)
            .bind(record.volume)
            .bind(&record.provenance)
            .execute(&mut *tx)
            .await?;
            written += result.rows_affected();
        }
        tx.commit().await?;
        Ok(written)
    }

    /// Finds candles for a pool and timeframe within a time range.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn find_by_pool_and_range(
        &self,
        pool_address: &str,
        timeframe: Timeframe,
        start_timestamp: i64,
        end_timestamp: i64,
    ) -> Result<Vec<CandleRecord>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM pool_candles
            WHERE pool_address = $1 AND timeframe = $2 AND timestamp >= $3 AND timestamp <= $4
            ORDER BY timestamp ASC
            "#,
        )
        .bind(pool_address)
        .bind(timeframe.as_str())
        .bind(start_timestamp)
        .bind(end_timestamp)
        .fetch_all(self.pool.as_ref())
        .await?;
        rows.iter().map(CandleRecord::from_row).collect()
    }

    /// Finds the most recent candle for a pool and timeframe.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn find_latest(
        &self,
        pool_address: &str,
        timeframe: Timeframe,
    ) -> Result<Option<CandleRecord>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT * FROM pool_candles
            WHERE pool_address = $1 AND timeframe = $2
            ORDER BY timestamp DESC
            LIMIT 1
            "#,
        )
        .bind(pool_address)
        .bind(timeframe.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;
        row.as_ref().map(CandleRecord::from_row).transpose()
    }

    /// Deletes every stored candle for a pool.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn delete_by_pool(&self, pool_address: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pool_candles WHERE pool_address = $1")
            .bind(pool_address)
            .execute(self.pool.as_ref())
            .await?;
        Ok(result.rows_affected())
    }
}
