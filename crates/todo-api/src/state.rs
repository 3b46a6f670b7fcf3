//! Shared application state.

use std::sync::Arc;

use serde_json::Value;
use todo_config::TodoConfig;
use todo_db::service::TaskService;
use todo_schema::SchemaRegistry;

/// State cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: TaskService,
    pub config: Arc<TodoConfig>,
    pub schemas: Arc<SchemaRegistry>,
    /// Rendered once; served verbatim by `/openapi.json`.
    pub openapi: Arc<Value>,
}

impl AppState {
    #[must_use]
    pub fn new(service: TaskService, config: TodoConfig) -> Self {
        let openapi = todo_schema::openapi::document(
            &config.general.app_name,
            &config.general.app_version,
        );
        Self {
            service,
            config: Arc::new(config),
            schemas: Arc::new(SchemaRegistry::new()),
            openapi: Arc::new(openapi),
        }
    }
}
