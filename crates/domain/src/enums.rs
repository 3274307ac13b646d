use serde::{Deserialize, Serialize};

/// One of the two reserve slots of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Slot 0.
    A,
    /// Slot 1.
    B,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Side::A),
            1 => Some(Side::B),
            _ => None,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Swap,
    AddLiquidity,
    RemoveLiquidity,
}

/// How a pool's two reserves map to quote and base assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PoolKind {
    /// One side is the network's native asset (XLM, 7 decimals).
    Native { native_side: Side },
    /// One side is a stable asset (6 decimals). `None` leaves the choice to
    /// the reserve digit-count heuristic.
    Stable { stable_side: Option<Side> },
}

/// Whether a candle was aggregated from reconstructed events or synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    #[default]
    Real,
    Interpolated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_index_roundtrip() {
        assert_eq!(Side::from_index(0), Some(Side::A));
        assert_eq!(Side::from_index(1), Some(Side::B));
        assert_eq!(Side::from_index(2), None);
        assert_eq!(Side::A.other().index(), 1);
    }

    #[test]
    fn test_pool_kind_json_shape() {
        let kind = PoolKind::Native { native_side: Side::B };
        let json = serde_json::to_value(kind).unwrap();
        assert_eq!(json["kind"], "native");
        assert_eq!(json["native_side"], "b");
    }
}
