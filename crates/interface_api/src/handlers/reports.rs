//! Report panel handlers
//!
//! The `{type}` path segment selects the coverage track (`mip` / `dfi`,
//! case-insensitive). Unknown tracks 404.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};

use core_kernel::{CoreError, DocumentId, ProposalId};
use domain_proposal::{CoverageTrack, StatusChangeRequest};
use domain_review::{DocumentUpload, ReportPanel, ReviewService};

use crate::auth::AuthContext;
use crate::dto::reports::{ConcludeBody, PanelQuery, ReviewBody};
use crate::error::ApiError;
use crate::AppState;

fn parse_track(value: &str) -> Result<CoverageTrack, ApiError> {
    value.parse().map_err(|err| match err {
        CoreError::Validation(message) => ApiError::NotFound(message),
        other => ApiError::Internal(other.to_string()),
    })
}

/// Gets the report panel: documents plus the caller's capabilities
pub async fn panel(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path((uid, report_type)): Path<(ProposalId, String)>,
    Query(query): Query<PanelQuery>,
) -> Result<Json<ReportPanel>, ApiError> {
    let track = parse_track(&report_type)?;
    let proposal = state.ports.proposals.get(&ctx.bearer, uid).await?;
    let panel = ReviewService::panel(
        state.ports.reports.as_ref(),
        &ctx.bearer,
        &proposal,
        &ctx.roles,
        track,
        query.require_upload,
    )
    .await?;
    Ok(Json(panel))
}

/// Uploads a document to the panel
pub async fn upload_document(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path((uid, report_type)): Path<(ProposalId, String)>,
    Json(upload): Json<DocumentUpload>,
) -> Result<StatusCode, ApiError> {
    let track = parse_track(&report_type)?;
    let proposal = state.ports.proposals.get(&ctx.bearer, uid).await?;
    ReviewService::upload(
        state.ports.reports.as_ref(),
        &ctx.bearer,
        &proposal,
        &ctx.roles,
        track,
        &upload,
    )
    .await?;
    tracing::info!(proposal = %uid, track = %track, "document uploaded");
    Ok(StatusCode::CREATED)
}

/// Serves the decoded archive bytes
pub async fn archive_content(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path((_uid, report_type, document)): Path<(ProposalId, String, DocumentId)>,
) -> Result<impl IntoResponse, ApiError> {
    parse_track(&report_type)?;
    let archive =
        ReviewService::view_archive(state.ports.reports.as_ref(), &ctx.bearer, document).await?;
    Ok((
        [(header::CONTENT_TYPE, archive.content_type)],
        archive.bytes,
    ))
}

/// Approves or rejects the track under review
pub async fn review(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path((uid, report_type)): Path<(ProposalId, String)>,
    Json(body): Json<ReviewBody>,
) -> Result<Json<StatusChangeRequest>, ApiError> {
    let track = parse_track(&report_type)?;
    let proposal = state.ports.proposals.get(&ctx.bearer, uid).await?;
    let request = ReviewService::decide(
        state.ports.proposals.as_ref(),
        &ctx.bearer,
        &proposal,
        &ctx.roles,
        track,
        body.decision,
        &body.justification,
    )
    .await?;
    tracing::info!(proposal = %uid, track = %track, status = request.status_id, "review decision recorded");
    Ok(Json(request))
}

/// Concludes the upload round, sending the track to analysis
pub async fn conclude(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path((uid, report_type)): Path<(ProposalId, String)>,
    Json(body): Json<ConcludeBody>,
) -> Result<Json<StatusChangeRequest>, ApiError> {
    let track = parse_track(&report_type)?;
    let proposal = state.ports.proposals.get(&ctx.bearer, uid).await?;
    let request = ReviewService::conclude(
        state.ports.proposals.as_ref(),
        state.ports.reports.as_ref(),
        &ctx.bearer,
        &proposal,
        &ctx.roles,
        track,
        &body.justification,
    )
    .await?;
    Ok(Json(request))
}

/// Deletes a DFI document
pub async fn delete_document(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path((uid, document)): Path<(ProposalId, DocumentId)>,
) -> Result<StatusCode, ApiError> {
    let proposal = state.ports.proposals.get(&ctx.bearer, uid).await?;
    ReviewService::delete_document(
        state.ports.reports.as_ref(),
        &ctx.bearer,
        &proposal,
        &ctx.roles,
        document,
    )
    .await?;
    tracing::info!(proposal = %uid, document = %document, "document deleted");
    Ok(StatusCode::NO_CONTENT)
}
