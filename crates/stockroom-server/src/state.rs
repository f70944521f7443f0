use std::sync::Arc;

use stockroom_service::InventoryService;

/// Shared handler state. Cloned per request by axum.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<InventoryService>,
}

impl AppState {
    pub fn new(service: Arc<InventoryService>) -> Self {
        Self { service }
    }
}
