pub mod error;
pub mod handlers;
pub mod router;

use std::sync::Arc;

use crate::services::AggregateService;

pub use error::{ApiError, ApiResult};
pub use router::create_router;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<AggregateService>,
}

impl AppState {
    pub fn new(aggregator: AggregateService) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }
}
