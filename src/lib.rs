//! Procurement API Library
//!
//! Back-office purchasing workflow: purchase requisitions, the purchase
//! orders raised against them, and the company/project/user reference data
//! behind both. Every business route sits behind bearer-token
//! authentication; only `/login` and the health/status probes stay open.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod metrics;
pub mod openapi;
pub mod services;

use std::sync::Arc;

use axum::{extract::State, response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::auth::AuthRouterExt;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<db::DbPool>,
    pub config: config::AppConfig,
    pub event_sender: Option<Arc<events::EventSender>>,
    pub services: handlers::AppServices,
}

/// Business API routes.
///
/// Each resource router is gated by the bearer-token middleware; `/status`
/// and `/health` stay open so probes work without credentials. The login
/// route is merged separately in `main` because it carries its own state.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Status and health endpoints
        .route("/status", get(api_status))
        .route("/health", get(health_check))
        // Purchasing workflow (auth)
        .nest(
            "/purchase_order/",
            handlers::purchase_orders::purchase_order_routes().with_auth(),
        )
        .nest(
            "/pr",
            handlers::purchase_requisitions::purchase_requisition_routes().with_auth(),
        )
        // Reference data (auth)
        .nest("/company/", handlers::companies::company_routes().with_auth())
        .nest("/project/", handlers::projects::project_routes().with_auth())
        .nest("/user/", handlers::users::user_routes().with_auth())
}

async fn api_status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "procure-api",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let db_status = match state.db.ping().await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    Json(json!({
        "status": db_status,
        "checks": {
            "database": db_status,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub mod prelude {
    pub use crate::db::*;
    pub use crate::errors::*;
    pub use crate::events::*;
    pub use crate::metrics::*;
    pub use crate::openapi::*;
    pub use crate::services::*;
}
