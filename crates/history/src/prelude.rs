//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use poolchart_history::prelude::*;
//! ```

pub use crate::aggregate::{aggregate, bucket_start};
pub use crate::densify::{DensifyConfig, densify, densify_with_rng};
pub use crate::pipeline::{RenderedChart, render_chart};
pub use crate::price::{NATIVE_DECIMALS, STABLE_DECIMALS, price, price_points};
pub use crate::reconstruct::{
    ReconstructionError, ReserveHistory, ReserveSnapshot, reconstruct, reverse_event,
    swap_sold_side,
};
