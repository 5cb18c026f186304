pub mod handlers;

pub use handlers::*;

use crate::service::ComparatorService;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;

/// 构建路由
pub fn create_router(service: Arc<ComparatorService>) -> Router {
    let api_routes = Router::new()
        .route("/api/mutuelles", get(list_insurers))
        .route("/api/calcul", get(calculation))
        .route("/api/simulation", get(simulation))
        .route("/api/optimisation", get(optimization))
        .route("/api/comparaison", get(comparison))
        .route("/api/devis", get(quote))
        .with_state(service);

    Router::new()
        .route("/health", get(health_check))
        .merge(api_routes)
        .layer(ServiceBuilder::new())
}
