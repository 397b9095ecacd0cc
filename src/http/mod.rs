pub mod error;
mod handlers;

use crate::core::loader::JsonFileSource;
use crate::core::{ConfigProvider, DatasetSource};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn DatasetSource>,
    pub schema: Option<Arc<[String]>>,
    pub strict_filters: bool,
}

impl AppState {
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self {
            source,
            schema: None,
            strict_filters: false,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(Arc::new(JsonFileSource::new(config.data_path())))
            .with_schema(config.schema_fields().map(<[String]>::to_vec))
            .with_strict_filters(config.strict_filters())
    }

    pub fn with_schema(mut self, fields: Option<Vec<String>>) -> Self {
        self.schema = fields.map(Arc::from);
        self
    }

    pub fn with_strict_filters(mut self, strict: bool) -> Self {
        self.strict_filters = strict;
        self
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/load_data", get(handlers::load_data))
        .route("/filter", post(handlers::filter_data))
        .route("/download_csv", post(handlers::download_csv))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}
