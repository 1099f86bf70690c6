//! HTTP API Layer
//!
//! This crate provides the REST API of the proposal desk using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each desk surface
//! - **Middleware**: Authentication, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! Handlers hold no domain rules: they parse, call the domain services with
//! the caller's bearer, and map errors. Everything upstream-shaped lives
//! behind the ports in [`Ports`].
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, Ports};
//!
//! let app = create_router(Ports::from_gateway(gateway), config);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_operation::OperationPort;
use domain_proposal::{LookupPort, ProposalDirectory};
use domain_review::ReportStore;
use infra_gateway::ProposalApiGateway;

use crate::config::ApiConfig;
use crate::handlers::{health, lookups, operations, proposals, reports};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub ports: Ports,
}

/// The upstream ports, behind trait objects so tests can swap in mocks.
#[derive(Clone)]
pub struct Ports {
    pub proposals: Arc<dyn ProposalDirectory>,
    pub lookups: Arc<dyn LookupPort>,
    pub reports: Arc<dyn ReportStore>,
    pub operations: Arc<dyn OperationPort>,
}

impl Ports {
    /// Wires every port to the one HTTP gateway.
    pub fn from_gateway(gateway: ProposalApiGateway) -> Self {
        let gateway = Arc::new(gateway);
        Self {
            proposals: gateway.clone(),
            lookups: gateway.clone(),
            reports: gateway.clone(),
            operations: gateway,
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `ports` - Upstream ports
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(ports: Ports, config: ApiConfig) -> Router {
    let state = AppState { config, ports };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check));

    // Proposal routes
    let proposal_routes = Router::new()
        .route(
            "/",
            get(proposals::list_proposals).post(proposals::create_proposal),
        )
        .route("/canceled", get(proposals::list_canceled))
        .route("/:uid", get(proposals::get_proposal))
        .route("/:uid/fillout", get(proposals::fillout_view))
        .route("/:uid/health", post(proposals::submit_health))
        .route(
            "/:uid/interactions",
            get(proposals::list_interactions).post(proposals::add_interaction),
        )
        .route(
            "/:uid/reports/:report_type",
            get(reports::panel).post(reports::upload_document),
        )
        .route("/:uid/reports/:report_type/review", post(reports::review))
        .route(
            "/:uid/reports/:report_type/conclude",
            post(reports::conclude),
        )
        .route(
            "/:uid/reports/:report_type/:document_uid/content",
            get(reports::archive_content),
        )
        .route(
            "/:uid/documents/:document_uid",
            delete(reports::delete_document),
        );

    // Operation routes
    let operation_routes = Router::new()
        .route(
            "/:number",
            get(operations::edit_page).put(operations::submit),
        )
        .route("/participants/:uid/contact", put(operations::update_contact));

    // Lookup routes
    let lookup_routes = Router::new()
        .route("/lmi-options", get(lookups::lmi_options))
        .route("/proposal-situations", get(lookups::proposal_situations))
        .route("/proposal-types", get(lookups::proposal_types))
        .route("/property-types", get(lookups::property_types))
        .route("/products", get(lookups::products));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/proposals", proposal_routes)
        .nest("/operations", operation_routes)
        .nest("/lookups", lookup_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
