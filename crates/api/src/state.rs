//! Application state shared by handlers.

use crate::services::ChartService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub charts: Arc<ChartService>,
}

impl AppState {
    pub fn new(charts: ChartService) -> Self {
        Self {
            charts: Arc::new(charts),
        }
    }
}
