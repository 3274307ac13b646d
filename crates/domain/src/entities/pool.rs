use crate::enums::{PoolKind, Side};
use crate::token::TokenAmount;
use serde::{Deserialize, Serialize};

/// Current on-chain state of a two-asset pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolData {
    pub pool_address: String,
    pub reserves: [TokenAmount; 2],
    pub token_a: String,
    pub token_b: String,
    pub kind: PoolKind,
}

impl PoolData {
    pub fn new(
        pool_address: impl Into<String>,
        reserves: [TokenAmount; 2],
        token_a: impl Into<String>,
        token_b: impl Into<String>,
        kind: PoolKind,
    ) -> Self {
        Self {
            pool_address: pool_address.into(),
            reserves,
            token_a: token_a.into(),
            token_b: token_b.into(),
            kind,
        }
    }

    pub fn is_native_pool(&self) -> bool {
        matches!(self.kind, PoolKind::Native { .. })
    }

    /// Slot holding the native-asset reserve, for native pools.
    pub fn native_token_index(&self) -> Option<Side> {
        match self.kind {
            PoolKind::Native { native_side } => Some(native_side),
            PoolKind::Stable { .. } => None,
        }
    }

    /// Same pool, viewed at a different reserve state.
    #[must_use]
    pub fn with_reserves(&self, reserves: [TokenAmount; 2]) -> Self {
        Self {
            reserves,
            ..self.clone()
        }
    }
}
