//! Proposal handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use core_kernel::ProposalId;
use domain_proposal::interaction::{can_add_interaction, present_history};
use domain_proposal::validation::{ProposalValidator, ValidationResult, MSG_REQUIRED};
use domain_proposal::{
    CoverageTrack, FilloutService, FilloutView, HealthFormSubmission, HealthSubmissionOutcome,
    Page, Proposal, ProposalStatus, ProposalSummary, StatusChangeRequest,
};

use crate::auth::AuthContext;
use crate::dto::proposals::{
    AddInteractionBody, CreateProposalBody, CreateProposalResponse, InteractionsResponse,
    ListProposalsQuery,
};
use crate::error::ApiError;
use crate::AppState;

pub const MSG_INTERACTION_NOT_ALLOWED: &str =
    "Só é possível adicionar interação enquanto a proposta aguarda complemento.";

/// Lists proposals
pub async fn list_proposals(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Query(query): Query<ListProposalsQuery>,
) -> Result<Json<Page<ProposalSummary>>, ApiError> {
    check_search_document(&query)?;
    let page = state
        .ports
        .proposals
        .list(&ctx.bearer, &query.to_query())
        .await?;
    Ok(Json(page))
}

/// Lists canceled proposals
pub async fn list_canceled(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Query(query): Query<ListProposalsQuery>,
) -> Result<Json<Page<ProposalSummary>>, ApiError> {
    check_search_document(&query)?;
    let page = state
        .ports
        .proposals
        .list_canceled(&ctx.bearer, &query.to_canceled_query())
        .await?;
    Ok(Json(page))
}

fn check_search_document(query: &ListProposalsQuery) -> Result<(), ApiError> {
    if let Some(document) = query.document.as_deref() {
        let result = ProposalValidator::validate_search_document(document);
        if !result.is_valid {
            return Err(ApiError::Validation(result));
        }
    }
    Ok(())
}

/// Creates a proposal
pub async fn create_proposal(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(body): Json<CreateProposalBody>,
) -> Result<(StatusCode, Json<CreateProposalResponse>), ApiError> {
    let validation = ProposalValidator::validate_draft(&body.draft());
    if !validation.is_valid {
        return Err(ApiError::Validation(validation));
    }

    // A draft that validated has every required field.
    let request = body.into_request().ok_or_else(|| {
        ApiError::Internal("validated draft is missing required fields".to_string())
    })?;
    let uid = state.ports.proposals.create(&ctx.bearer, &request).await?;
    tracing::info!(proposal = %uid, "proposal created");
    Ok((StatusCode::CREATED, Json(CreateProposalResponse { uid })))
}

/// Gets a proposal by UID
pub async fn get_proposal(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(uid): Path<ProposalId>,
) -> Result<Json<Proposal>, ApiError> {
    let proposal = state.ports.proposals.get(&ctx.bearer, uid).await?;
    Ok(Json(proposal))
}

/// Gets the fill-out view: current step plus the prefilled health form
pub async fn fillout_view(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(uid): Path<ProposalId>,
) -> Result<Json<FilloutView>, ApiError> {
    let view = FilloutService::load(state.ports.proposals.as_ref(), &ctx.bearer, uid).await?;
    Ok(Json(view))
}

/// Submits the health questionnaire and requests the signature
pub async fn submit_health(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(uid): Path<ProposalId>,
    Json(submission): Json<HealthFormSubmission>,
) -> Result<Json<HealthSubmissionOutcome>, ApiError> {
    let outcome = FilloutService::submit_health(
        state.ports.proposals.as_ref(),
        &ctx.bearer,
        uid,
        submission,
    )
    .await?;
    Ok(Json(outcome))
}

/// Lists the proposal's interaction history
pub async fn list_interactions(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(uid): Path<ProposalId>,
) -> Result<Json<InteractionsResponse>, ApiError> {
    let proposal = state.ports.proposals.get(&ctx.bearer, uid).await?;
    Ok(Json(interactions_of(&proposal)))
}

/// Adds a complement note to the history
///
/// Notes ride on the status-change endpoint: the proposal is re-set to
/// awaiting-complement with the note text as the description.
pub async fn add_interaction(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(uid): Path<ProposalId>,
    Json(body): Json<AddInteractionBody>,
) -> Result<Json<InteractionsResponse>, ApiError> {
    let description = body.description.trim().to_string();
    if description.is_empty() {
        return Err(ApiError::Validation(ValidationResult::fail(
            "description",
            MSG_REQUIRED,
        )));
    }

    let proposal = state.ports.proposals.get(&ctx.bearer, uid).await?;
    if !can_add_interaction(proposal.status_code()) {
        return Err(ApiError::Conflict(MSG_INTERACTION_NOT_ALLOWED.to_string()));
    }

    let request = StatusChangeRequest::new(
        ProposalStatus::AwaitingComplement,
        description,
        CoverageTrack::Mip,
    );
    state
        .ports
        .proposals
        .change_status(&ctx.bearer, uid, &request)
        .await?;

    let proposal = state.ports.proposals.get(&ctx.bearer, uid).await?;
    Ok(Json(interactions_of(&proposal)))
}

fn interactions_of(proposal: &Proposal) -> InteractionsResponse {
    InteractionsResponse {
        items: present_history(&proposal.history),
        can_add: can_add_interaction(proposal.status_code()),
    }
}
