//! Chart timeframes and the parameters derived from them.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MINUTE_MS: u64 = 60_000;
const HOUR_MS: u64 = 60 * MINUTE_MS;
const DAY_MS: u64 = 24 * HOUR_MS;

/// Chart window requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[default]
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1m")]
    OneMonth,
}

impl Timeframe {
    pub const ALL: [Timeframe; 5] = [
        Timeframe::OneHour,
        Timeframe::FourHours,
        Timeframe::OneDay,
        Timeframe::OneWeek,
        Timeframe::OneMonth,
    ];

    /// Length of the history window, in milliseconds.
    pub fn window_ms(self) -> u64 {
        match self {
            Timeframe::OneHour => HOUR_MS,
            Timeframe::FourHours => 4 * HOUR_MS,
            Timeframe::OneDay => DAY_MS,
            Timeframe::OneWeek => 7 * DAY_MS,
            Timeframe::OneMonth => 30 * DAY_MS,
        }
    }

    /// Number of events a generated history holds.
    pub fn event_count(self) -> usize {
        match self {
            Timeframe::OneHour => 120,
            Timeframe::FourHours => 240,
            Timeframe::OneDay => 288,
            Timeframe::OneWeek => 336,
            Timeframe::OneMonth => 300,
        }
    }

    /// Gap between consecutive generated events, in milliseconds.
    pub fn spacing_ms(self) -> u64 {
        match self {
            Timeframe::OneHour => 30_000,
            Timeframe::FourHours => MINUTE_MS,
            Timeframe::OneDay => 5 * MINUTE_MS,
            Timeframe::OneWeek => 30 * MINUTE_MS,
            Timeframe::OneMonth => 144 * MINUTE_MS,
        }
    }

    /// Candle bucket width, in milliseconds.
    pub fn bucket_width_ms(self) -> u64 {
        match self {
            Timeframe::OneHour => 2 * MINUTE_MS,
            Timeframe::FourHours => 5 * MINUTE_MS,
            Timeframe::OneDay => 15 * MINUTE_MS,
            Timeframe::OneWeek => 2 * HOUR_MS,
            Timeframe::OneMonth => 6 * HOUR_MS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::OneHour => "1h",
            Timeframe::FourHours => "4h",
            Timeframe::OneDay => "1d",
            Timeframe::OneWeek => "1w",
            Timeframe::OneMonth => "1m",
        }
    }
}

impl FromStr for Timeframe {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL
            .into_iter()
            .find(|tf| tf.as_str() == s)
            .ok_or_else(|| DomainError::UnknownTimeframe(s.to_string()))
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
