//! Operation edit handlers
//!
//! Contract editing is a sales-desk surface; every route here requires a
//! sales role. Review roles work the proposals, not the contract.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;

use core_kernel::{OperationNumber, ProposalId};
use domain_operation::{ContactUpdate, OperationEditPage, OperationService};
use domain_review::review::MSG_FORBIDDEN;
use domain_review::role::{has_any, Role};

use crate::auth::AuthContext;
use crate::dto::operations::{SaveResponse, SubmitOperationBody};
use crate::error::ApiError;
use crate::AppState;

const OPERATION_EDIT_ROLES: &[Role] = &[Role::Vendedor, Role::VendedorSup];

fn require_sales(ctx: &AuthContext) -> Result<(), ApiError> {
    if !has_any(&ctx.roles, OPERATION_EDIT_ROLES) {
        return Err(ApiError::Forbidden(MSG_FORBIDDEN.to_string()));
    }
    Ok(())
}

/// Gets the operation edit page: participants, lock state, prefilled draft
pub async fn edit_page(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(number): Path<OperationNumber>,
) -> Result<Json<OperationEditPage>, ApiError> {
    require_sales(&ctx)?;
    let page =
        OperationService::edit_page(state.ports.operations.as_ref(), &ctx.bearer, &number).await?;
    Ok(Json(page))
}

/// Saves the shared fields, two-step
///
/// Unconfirmed submissions answer with the change summary; confirmed ones
/// apply it to every participant.
pub async fn submit(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(number): Path<OperationNumber>,
    Json(body): Json<SubmitOperationBody>,
) -> Result<Json<SaveResponse>, ApiError> {
    require_sales(&ctx)?;
    let outcome = OperationService::submit(
        state.ports.operations.as_ref(),
        &ctx.bearer,
        &number,
        &body.draft,
        body.confirmed,
        Utc::now().date_naive(),
    )
    .await?;
    Ok(Json(outcome.into()))
}

/// Saves one participant's contact fields
pub async fn update_contact(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(uid): Path<ProposalId>,
    Json(update): Json<ContactUpdate>,
) -> Result<StatusCode, ApiError> {
    require_sales(&ctx)?;
    OperationService::update_contact(state.ports.operations.as_ref(), &ctx.bearer, uid, &update)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
