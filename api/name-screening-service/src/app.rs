use crate::config::environment::AppConfig;
use crate::module::name_screening::route::register_routes;
use crate::service::screening_store_service::ScreeningStore;
use axum::Router;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<ScreeningStore>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = ScreeningStore::new(&config.data_root, &config.watchlist_path);
        Self {
            config,
            store: Arc::new(store),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    register_routes(state)
}
