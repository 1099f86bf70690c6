//! Upstream Proposal API Gateway
//!
//! This crate implements every port the domain crates define against the
//! upstream proposal REST API. One adapter struct holds one shared
//! `reqwest::Client`; each port method issues exactly one authenticated call
//! and normalizes the upstream's `{ success, message, data }` envelope into
//! `core_kernel::PortError`.
//!
//! # Error Mapping
//!
//! - HTTP 401/403 → `PortError::Unauthorized` (the session is dead)
//! - HTTP 404 → `PortError::NotFound`
//! - HTTP 429 → `PortError::RateLimited`
//! - HTTP 5xx → `PortError::ServiceUnavailable`
//! - connect/timeout/body failures → `PortError::Connection` / `Timeout`
//! - 2xx with `success: false` → `PortError::Validation` carrying the
//!   upstream message verbatim
//!
//! No call is retried; a failure is terminal for that action.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_gateway::{GatewayConfig, ProposalApiGateway};
//!
//! let config = GatewayConfig::new("https://proposal-api.example.com.br");
//! let gateway = ProposalApiGateway::new(config)?;
//! let page = gateway.list(&token, &ProposalQuery::default()).await?;
//! ```

pub mod client;
pub mod config;

mod dto;
mod lookups;
mod operations;
mod proposals;
mod reports;

pub use client::ProposalApiGateway;
pub use config::GatewayConfig;
