use crate::error::DomainError;
use primitive_types::U256;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Highest scale `Decimal` can represent.
const MAX_DECIMAL_SCALE: u32 = 28;

/// Raw integer token balance as held on-chain.
///
/// Serialized as a base-10 string so that values above `u64` survive JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAmount(pub U256);

impl TokenAmount {
    pub fn new(amount: impl Into<U256>) -> Self {
        Self(amount.into())
    }

    pub fn zero() -> Self {
        Self(U256::zero())
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Number of base-10 digits in the raw value. Zero has one digit.
    pub fn digit_count(&self) -> usize {
        self.0.to_string().len()
    }

    /// Converts the raw integer into a real-valued amount, `raw / 10^decimals`.
    ///
    /// The division is exact through `Decimal` whenever the raw value and
    /// scale fit; larger balances fall back to plain `f64` arithmetic.
    pub fn normalized(&self, decimals: u32) -> f64 {
        if decimals <= MAX_DECIMAL_SCALE && self.0 <= U256::from(i128::MAX as u128) {
            let raw = self.0.as_u128() as i128;
            if let Ok(d) = Decimal::try_from_i128_with_scale(raw, decimals) {
                if let Some(value) = d.to_f64() {
                    return value;
                }
            }
        }
        let raw = self.0.to_string().parse::<f64>().unwrap_or(f64::MAX);
        raw / 10f64.powi(decimals as i32)
    }
}

impl From<u64> for TokenAmount {
    fn from(v: u64) -> Self {
        Self(U256::from(v))
    }
}

impl From<u128> for TokenAmount {
    fn from(v: u128) -> Self {
        Self(U256::from(v))
    }
}

impl FromStr for TokenAmount {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        U256::from_dec_str(s.trim())
            .map(Self)
            .map_err(|_| DomainError::InvalidAmount(s.to_string()))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
