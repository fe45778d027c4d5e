//! HTTP API Layer
//!
//! This crate provides the REST API through which the registration UI
//! prices a registration and downloads its invoice.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for pricing and invoices
//! - **Catalog**: Event lookups, cached behind a bounded TTL cache
//! - **Middleware**: Request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::from_config(config)?;
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod catalog;
pub mod middleware;
pub mod handlers;
pub mod dto;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::{Clock, CoreError, SystemClock, Timezone};
use domain_invoicing::{InvoiceRenderer, PdfBackend, StandardInvoiceRenderer};
use domain_pricing::{PricingEngine, PricingSchedule};

use crate::catalog::{CachedEventCatalog, EventCatalog, FileEventCatalog};
use crate::config::ApiConfig;
use crate::handlers::{health, invoices, pricing};
use crate::middleware::request_log_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: PricingEngine,
    pub renderer: Arc<dyn InvoiceRenderer>,
    pub catalog: Arc<dyn EventCatalog>,
    pub clock: Arc<dyn Clock>,
    pub timezone: Timezone,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the production components described by `config`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the timezone is unknown or the
    /// pricing table cannot be loaded
    pub fn from_config(config: ApiConfig) -> Result<Self, CoreError> {
        let timezone = config.timezone()?;

        let schedule = match &config.pricing_table_path {
            Some(path) => {
                PricingSchedule::load(path).map_err(|e| CoreError::configuration(e.to_string()))?
            }
            None => PricingSchedule::standard(),
        };
        let engine = PricingEngine::new(Arc::new(schedule)).with_policy(config.selection_policy());

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let renderer = StandardInvoiceRenderer::new(PdfBackend::new(), clock.clone())
            .with_timezone(timezone)
            .with_branding(config.branding());

        let catalog = CachedEventCatalog::new(
            FileEventCatalog::new(&config.events_path),
            config.event_cache_ttl(),
            config.event_cache_capacity,
        );

        Ok(Self {
            engine,
            renderer: Arc::new(renderer),
            catalog: Arc::new(catalog),
            clock,
            timezone,
            config,
        })
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Shared engine, renderer, catalog and configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new().route("/health", get(health::health_check));

    // Pricing routes
    let pricing_routes = Router::new()
        .route("/schedule", get(pricing::get_schedule))
        .route("/quote", post(pricing::quote));

    // Invoice routes
    let invoice_routes = Router::new()
        .route("/", post(invoices::create_invoice))
        .route("/notification", post(invoices::preview_notification));

    let api_routes = Router::new()
        .nest("/pricing", pricing_routes)
        .nest("/invoices", invoice_routes)
        .layer(axum_middleware::from_fn(request_log_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
