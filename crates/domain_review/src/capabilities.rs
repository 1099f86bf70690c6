//! Capability resolution for the report panels
//!
//! One function decides every role-gated affordance for both panels, so the
//! MIP and DFI screens cannot drift apart. Inputs are the caller's roles and
//! the proposal's observed state; outputs are plain booleans the interface
//! serves as-is.
//!
//! Document-count rules are not capabilities: concluding with zero documents
//! is refused at action time with its own message.

use serde::Serialize;

use domain_proposal::status::{CoverageTrack, ProposalStatus};

use crate::role::{has_any, Role};

/// What the caller may do on one report panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub can_upload: bool,
    pub can_approve: bool,
    pub can_reject: bool,
    pub can_delete: bool,
    pub can_conclude: bool,
}

impl Capabilities {
    /// Resolves the panel capabilities.
    ///
    /// `require_upload` is the caller's request for the upload affordance;
    /// without it the upload path stays hidden regardless of roles.
    /// `has_been_signed` is whether status 21 appears in the history; the
    /// DFI upload path only opens after signature.
    pub fn resolve(
        roles: &[Role],
        status: ProposalStatus,
        dfi_status: Option<ProposalStatus>,
        track: CoverageTrack,
        has_been_signed: bool,
        require_upload: bool,
    ) -> Self {
        let review_open = match track {
            CoverageTrack::Mip => status == ProposalStatus::AwaitingMedicalAnalysis,
            CoverageTrack::Dfi => dfi_status == Some(ProposalStatus::AwaitingDfiAnalysis),
        };
        let can_review = review_open && has_any(roles, Self::review_roles(track));

        let upload_open = match track {
            CoverageTrack::Mip => true,
            CoverageTrack::Dfi => has_been_signed,
        };
        let upload_path =
            require_upload && upload_open && has_any(roles, Self::upload_roles(track));

        Self {
            can_upload: upload_path,
            can_approve: can_review,
            can_reject: can_review,
            can_delete: track == CoverageTrack::Dfi && can_review,
            can_conclude: upload_path,
        }
    }

    fn review_roles(track: CoverageTrack) -> &'static [Role] {
        match track {
            CoverageTrack::Mip => &[Role::SubscritorMed, Role::Admin],
            CoverageTrack::Dfi => &[Role::Subscritor, Role::Admin],
        }
    }

    fn upload_roles(track: CoverageTrack) -> &'static [Role] {
        match track {
            CoverageTrack::Mip => &[Role::Vendedor, Role::Admin],
            CoverageTrack::Dfi => &[Role::Vendedor, Role::VendedorSup, Role::Admin],
        }
    }
}
