//! Reference-data handlers

use axum::extract::State;
use axum::{Extension, Json};

use domain_proposal::{DomainGroup, LookupRef, ProductRef};

use crate::auth::AuthContext;
use crate::error::ApiError;
use crate::AppState;

async fn group(
    state: &AppState,
    ctx: &AuthContext,
    group: DomainGroup,
) -> Result<Json<Vec<LookupRef>>, ApiError> {
    let values = state.ports.lookups.domain_group(&ctx.bearer, group).await?;
    Ok(Json(values))
}

/// Lists the LMI ranges
pub async fn lmi_options(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Vec<LookupRef>>, ApiError> {
    group(&state, &ctx, DomainGroup::LmiValues).await
}

/// Lists the proposal situations
pub async fn proposal_situations(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Vec<LookupRef>>, ApiError> {
    group(&state, &ctx, DomainGroup::ProposalSituations).await
}

/// Lists the proposal types
pub async fn proposal_types(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Vec<LookupRef>>, ApiError> {
    group(&state, &ctx, DomainGroup::ProposalTypes).await
}

/// Lists the property types
pub async fn property_types(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Vec<LookupRef>>, ApiError> {
    group(&state, &ctx, DomainGroup::PropertyTypes).await
}

/// Lists the products open for contracting
pub async fn products(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Vec<ProductRef>>, ApiError> {
    let products = state.ports.lookups.products(&ctx.bearer).await?;
    Ok(Json(products))
}
