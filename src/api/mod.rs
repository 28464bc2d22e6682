//! HTTP handlers for the Shelfmark catalog

pub mod copies;
pub mod health;
pub mod openapi;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{models::copy::COPY_LIST_PATH, views, AppState};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // Catalog routes (HTML views and form submissions)
    let catalog = Router::new()
        .route("/copies", get(copies::list_copies))
        .route(
            "/copies/create",
            get(copies::create_copy_form).post(copies::create_copy),
        )
        .route("/copies/:id", get(copies::copy_detail))
        .route(
            "/copies/:id/delete",
            get(copies::delete_copy_form).post(copies::delete_copy),
        )
        .route(
            "/copies/:id/update",
            get(copies::update_copy_form).post(copies::update_copy),
        );

    let app = Router::new()
        .route("/", get(|| async { views::redirect(COPY_LIST_PATH) }))
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/catalog", catalog)
        .with_state(state);

    app.merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
}
