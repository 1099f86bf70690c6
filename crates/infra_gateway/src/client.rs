//! The shared upstream HTTP client
//!
//! All port implementations live in sibling modules; this one owns the
//! request plumbing they share: URL building, bearer auth, the response
//! envelope and the status-to-`PortError` mapping.

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::GatewayConfig;

/// Service name used in `ServiceUnavailable` errors.
const UPSTREAM_SERVICE: &str = "proposal-api";

/// Adapter identifier reported by health checks.
const ADAPTER_ID: &str = "proposal-api-gateway";

/// Wait hint used when the upstream rate-limits without a `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Adapter over the upstream proposal REST API.
///
/// Holds one `reqwest::Client` for connection pooling; the client itself is
/// cheap to clone and shared across every port this struct implements. The
/// caller's bearer token travels with each call, the adapter holds no
/// credentials of its own.
#[derive(Debug, Clone)]
pub struct ProposalApiGateway {
    config: GatewayConfig,
    http: reqwest::Client,
}

/// The `{ success, message, data }` wrapper most upstream endpoints use.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

/// Unwraps an envelope whose `data` is required.
pub(crate) fn require<T>(
    envelope: Envelope<T>,
    entity: &'static str,
    path: &str,
) -> Result<T, PortError> {
    if !envelope.success {
        return Err(PortError::validation(envelope.message));
    }
    envelope
        .data
        .ok_or_else(|| PortError::not_found(entity, path))
}

/// Unwraps an envelope whose `data` may legitimately be absent.
pub(crate) fn optional<T>(envelope: Envelope<T>) -> Result<Option<T>, PortError> {
    if !envelope.success {
        return Err(PortError::validation(envelope.message));
    }
    Ok(envelope.data)
}

/// Unwraps an envelope whose `data` carries nothing the desk uses.
pub(crate) fn accept(envelope: Envelope<serde_json::Value>) -> Result<(), PortError> {
    if !envelope.success {
        return Err(PortError::validation(envelope.message));
    }
    Ok(())
}

impl ProposalApiGateway {
    /// Builds the adapter and its shared HTTP client.
    pub fn new(config: GatewayConfig) -> Result<Self, PortError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| PortError::internal(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { config, http })
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.config.base_url, path)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, PortError> {
        let mut request = self.http.get(self.url(path)).bearer_auth(token);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = self.dispatch(request, path).await?;
        self.read_json(response, path).await
    }

    pub(crate) async fn post<B, T>(
        &self,
        token: &str,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, PortError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.http.post(self.url(path)).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = self.dispatch(request, path).await?;
        self.read_json(response, path).await
    }

    pub(crate) async fn put<B, T>(&self, token: &str, path: &str, body: &B) -> Result<T, PortError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.put(self.url(path)).bearer_auth(token).json(body);
        let response = self.dispatch(request, path).await?;
        self.read_json(response, path).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
    ) -> Result<T, PortError> {
        let request = self.http.delete(self.url(path)).bearer_auth(token);
        let response = self.dispatch(request, path).await?;
        self.read_json(response, path).await
    }

    /// Sends the request and maps non-2xx statuses. The body of a failed
    /// response is not read; the status alone decides the error.
    async fn dispatch(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<reqwest::Response, PortError> {
        tracing::debug!(path, "calling upstream");
        let response = request
            .send()
            .await
            .map_err(|err| self.transport_error(path, err))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok());
        tracing::warn!(path, status = status.as_u16(), "upstream call failed");
        Err(status_error(status, path, retry_after))
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        path: &str,
    ) -> Result<T, PortError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|err| self.transport_error(path, err))?;
        serde_json::from_slice(&bytes).map_err(|err| {
            tracing::warn!(path, error = %err, "upstream payload did not parse");
            PortError::transformation(format!("unexpected payload from {path}: {err}"))
        })
    }

    fn transport_error(&self, path: &str, err: reqwest::Error) -> PortError {
        if err.is_timeout() {
            return PortError::Timeout {
                operation: path.to_string(),
                duration_ms: self.config.timeout.as_millis() as u64,
            };
        }
        tracing::warn!(path, error = %err, "upstream transport failure");
        PortError::Connection {
            message: format!("request to {path} failed: {err}"),
            source: Some(Box::new(err)),
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn status_error(status: StatusCode, path: &str, retry_after: Option<u64>) -> PortError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            PortError::unauthorized(format!("upstream refused the bearer token on {path}"))
        }
        StatusCode::NOT_FOUND => PortError::not_found("Resource", path),
        StatusCode::TOO_MANY_REQUESTS => PortError::RateLimited {
            retry_after_secs: retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS),
        },
        status if status.is_server_error() => PortError::ServiceUnavailable {
            service: UPSTREAM_SERVICE.to_string(),
        },
        status => PortError::internal(format!("unexpected upstream status {status} on {path}")),
    }
}

impl DomainPort for ProposalApiGateway {}

#[async_trait]
impl HealthCheckable for ProposalApiGateway {
    /// Reachability probe. Any HTTP answer counts as healthy, including 401:
    /// auth is per-call, the probe carries no token.
    async fn health_check(&self) -> HealthCheckResult {
        let started = Instant::now();
        let outcome = self.http.get(self.url("v1/Product/all")).send().await;
        let (status, message) = match outcome {
            Ok(_) => (AdapterHealth::Healthy, Some("upstream reachable".to_string())),
            Err(err) => (AdapterHealth::Unhealthy, Some(err.to_string())),
        };
        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            status,
            latency_ms: started.elapsed().as_millis() as u64,
            message,
            checked_at: Utc::now(),
        }
    }
}
