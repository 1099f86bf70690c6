//! API error types and HTTP response mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use core_kernel::PortError;
use domain_operation::OperationError;
use domain_proposal::validation::{FieldError, ValidationResult};
use domain_proposal::ProposalError;
use domain_review::archive::{ArchiveError, MSG_ARCHIVE_CORRUPT, MSG_ARCHIVE_NOT_FOUND};
use domain_review::ReviewError;

/// Shown whenever the bearer token is missing, invalid, or refused upstream.
pub const MSG_SESSION_EXPIRED: &str = "Sessão expirada. Faça login novamente.";

/// Shown for transport-level failures reaching the proposal service.
pub const MSG_CONNECTION: &str =
    "Não foi possível conectar com o servidor. Verifique sua conexão e tente novamente.";

/// Substring of the upstream refusal that gets the expanded explanation.
pub const NOT_UPDATABLE_MARKER: &str = "não pode ser atualizada";

pub const NOT_UPDATABLE_TITLE: &str = "Proposta Não Pode Ser Atualizada";

const NOT_UPDATABLE_CHECKLIST: [&str; 4] = [
    "A proposta não pode ser atualizada no momento. Verifique se:",
    "Todos os documentos obrigatórios foram carregados",
    "A proposta não está em um status que permite esta operação",
    "Você tem permissão para realizar esta ação",
];

/// Everything a handler can fail with, mapped onto HTTP statuses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("session expired")]
    SessionExpired,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed")]
    Validation(ValidationResult),

    /// Business-rule refusal, carried verbatim from the proposal service.
    #[error("rejected: {0}")]
    Rejection(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("upstream unreachable")]
    Unreachable,

    #[error("upstream timeout")]
    UpstreamTimeout,

    #[error("internal error: {0}")]
    Internal(String),
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'static str>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorDetails {
    Fields(Vec<FieldError>),
    Notes(Vec<&'static str>),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::SessionExpired => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Rejection(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unreachable => StatusCode::BAD_GATEWAY,
            ApiError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(self) -> ErrorResponse {
        let mut response = ErrorResponse {
            error: "internal_error",
            title: None,
            message: String::new(),
            details: None,
            redirect: None,
        };
        match self {
            ApiError::SessionExpired => {
                response.error = "session_expired";
                response.message = MSG_SESSION_EXPIRED.to_string();
                response.redirect = Some("/logout");
            }
            ApiError::Forbidden(message) => {
                response.error = "forbidden";
                response.message = message;
            }
            ApiError::NotFound(message) => {
                response.error = "not_found";
                response.message = message;
            }
            ApiError::Validation(result) => {
                response.error = "validation_error";
                response.message = "dados inválidos".to_string();
                response.details = Some(ErrorDetails::Fields(result.errors));
            }
            ApiError::Rejection(message) => {
                if message.contains(NOT_UPDATABLE_MARKER) {
                    response.error = "proposal_not_updatable";
                    response.title = Some(NOT_UPDATABLE_TITLE);
                    response.details = Some(ErrorDetails::Notes(NOT_UPDATABLE_CHECKLIST.to_vec()));
                } else {
                    response.error = "business_rule";
                }
                response.message = message;
            }
            ApiError::Conflict(message) => {
                response.error = "conflict";
                response.message = message;
            }
            ApiError::Unreachable => {
                response.error = "upstream_unreachable";
                response.message = MSG_CONNECTION.to_string();
            }
            ApiError::UpstreamTimeout => {
                response.error = "upstream_timeout";
                response.message = MSG_CONNECTION.to_string();
            }
            ApiError::Internal(_) => {
                response.message = "Erro interno do servidor.".to_string();
            }
        }
        response
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Unreachable | ApiError::UpstreamTimeout => {
                tracing::warn!(error = %self, "upstream transport failure");
            }
            ApiError::Internal(message) => {
                tracing::error!(%message, "internal error");
            }
            _ => {}
        }
        let status = self.status();
        (status, Json(self.body())).into_response()
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::Unauthorized { .. } => ApiError::SessionExpired,
            PortError::Validation { message, .. } => ApiError::Rejection(message),
            PortError::Conflict { message } => ApiError::Conflict(message),
            PortError::Timeout { .. } => ApiError::UpstreamTimeout,
            PortError::Connection { .. }
            | PortError::ServiceUnavailable { .. }
            | PortError::RateLimited { .. } => ApiError::Unreachable,
            not_found @ PortError::NotFound { .. } => ApiError::NotFound(not_found.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ProposalError> for ApiError {
    fn from(err: ProposalError) -> Self {
        match err {
            ProposalError::Validation(result) => ApiError::Validation(result),
            ProposalError::NotFound(message) => ApiError::NotFound(message),
            ProposalError::Port(port) => port.into(),
        }
    }
}

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::Forbidden(message) => ApiError::Forbidden(message.to_string()),
            ReviewError::NoDocuments => {
                ApiError::Rejection(ReviewError::NoDocuments.to_string())
            }
            ReviewError::Validation(result) => ApiError::Validation(result),
            ReviewError::Archive(ArchiveError::NotFound) => {
                ApiError::NotFound(MSG_ARCHIVE_NOT_FOUND.to_string())
            }
            ReviewError::Archive(ArchiveError::Corrupt) => {
                ApiError::Rejection(MSG_ARCHIVE_CORRUPT.to_string())
            }
            ReviewError::Port(port) => port.into(),
        }
    }
}

impl From<OperationError> for ApiError {
    fn from(err: OperationError) -> Self {
        match err {
            OperationError::Locked(reason) => ApiError::Conflict(reason.to_string()),
            OperationError::Validation(result) => ApiError::Validation(result),
            OperationError::Port(port) => port.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_expired_carries_logout_redirect() {
        let err = ApiError::SessionExpired;
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        let body = err.body();
        assert_eq!(body.error, "session_expired");
        assert_eq!(body.message, MSG_SESSION_EXPIRED);
        assert_eq!(body.redirect, Some("/logout"));
    }

    #[test]
    fn test_not_updatable_refusal_gets_the_expanded_explanation() {
        let refusal = "A proposta não pode ser atualizada para a situação solicitada";
        let err = ApiError::Rejection(refusal.to_string());
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = err.body();
        assert_eq!(body.error, "proposal_not_updatable");
        assert_eq!(body.title, Some(NOT_UPDATABLE_TITLE));
        assert_eq!(body.message, refusal);
        match body.details {
            Some(ErrorDetails::Notes(notes)) => {
                assert_eq!(notes.len(), 4);
                assert!(notes[0].starts_with("A proposta não pode ser atualizada no momento"));
            }
            other => panic!("expected checklist notes, got {other:?}"),
        }
    }

    #[test]
    fn test_other_business_refusals_stay_verbatim() {
        let err = ApiError::Rejection("Produto indisponível para contratação.".to_string());
        let body = err.body();
        assert_eq!(body.error, "business_rule");
        assert_eq!(body.message, "Produto indisponível para contratação.");
        assert!(body.details.is_none());
        assert!(body.title.is_none());
    }

    #[test]
    fn test_validation_errors_list_the_offending_fields() {
        let result = ValidationResult::fail("document", "Por favor forneça um CPF válido");
        let err = ApiError::Validation(result);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        let body = err.body();
        assert_eq!(body.error, "validation_error");
        match body.details {
            Some(ErrorDetails::Fields(fields)) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "document");
            }
            other => panic!("expected field details, got {other:?}"),
        }
    }

    #[test]
    fn test_port_errors_map_onto_the_right_statuses() {
        let cases: Vec<(PortError, StatusCode)> = vec![
            (
                PortError::unauthorized("token rejected"),
                StatusCode::UNAUTHORIZED,
            ),
            (
                PortError::not_found("Proposal", "PRP-123"),
                StatusCode::NOT_FOUND,
            ),
            (
                PortError::validation("A proposta não pode ser atualizada"),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                PortError::Timeout {
                    operation: "get_proposal".to_string(),
                    duration_ms: 30_000,
                },
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                PortError::ServiceUnavailable {
                    service: "proposal-api".to_string(),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (
                PortError::RateLimited {
                    retry_after_secs: 60,
                },
                StatusCode::BAD_GATEWAY,
            ),
        ];
        for (port_err, expected) in cases {
            let api_err: ApiError = port_err.into();
            assert_eq!(api_err.status(), expected);
        }
    }

    #[test]
    fn test_review_forbidden_maps_to_403_with_the_domain_message() {
        let err: ApiError = ReviewError::Forbidden(domain_review::review::MSG_FORBIDDEN).into();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        let body = err.body();
        assert_eq!(body.message, domain_review::review::MSG_FORBIDDEN);
    }

    #[test]
    fn test_operation_lock_maps_to_conflict() {
        let err: ApiError = OperationError::Locked("proposta já assinada").into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }
}
