//! Report panel orchestration
//!
//! Every mutation re-resolves capabilities server-side before calling the
//! upstream; the interface's buttons are presentation, not enforcement.

use core_kernel::DocumentId;
use domain_proposal::interaction::history_contains;
use domain_proposal::ports::{ProposalDirectory, StatusChangeRequest};
use domain_proposal::proposal::Proposal;
use domain_proposal::status::{CoverageTrack, ProposalStatus};

use crate::archive::{decode_archive, DecodedArchive};
use crate::capabilities::Capabilities;
use crate::document::ReportDocument;
use crate::error::ReviewError;
use crate::ports::ReportStore;
use crate::review::{conclude_prompt, conclude_request, decision_request, ReviewDecision, MSG_FORBIDDEN};
use crate::role::Role;
use crate::upload::DocumentUpload;

/// One report panel as served to the interface.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPanel {
    pub track: CoverageTrack,
    pub documents: Vec<ReportDocument>,
    pub capabilities: Capabilities,
    pub confirm_prompt: &'static str,
}

/// Orchestrates the MIP and DFI report panels.
pub struct ReviewService;

impl ReviewService {
    fn capabilities_for(
        proposal: &Proposal,
        roles: &[Role],
        track: CoverageTrack,
        require_upload: bool,
    ) -> Capabilities {
        Capabilities::resolve(
            roles,
            proposal.status_code(),
            proposal.dfi_status_code(),
            track,
            history_contains(&proposal.history, ProposalStatus::Signed),
            require_upload,
        )
    }

    /// Loads one panel: its documents plus what the caller may do there.
    pub async fn panel(
        store: &dyn ReportStore,
        token: &str,
        proposal: &Proposal,
        roles: &[Role],
        track: CoverageTrack,
        require_upload: bool,
    ) -> Result<ReportPanel, ReviewError> {
        let documents = store.documents(token, proposal.uid, track).await?;
        Ok(ReportPanel {
            track,
            documents,
            capabilities: Self::capabilities_for(proposal, roles, track, require_upload),
            confirm_prompt: conclude_prompt(track),
        })
    }

    /// Validates and stores an upload on the given panel.
    pub async fn upload(
        store: &dyn ReportStore,
        token: &str,
        proposal: &Proposal,
        roles: &[Role],
        track: CoverageTrack,
        upload: &DocumentUpload,
    ) -> Result<(), ReviewError> {
        let validation = upload.validate();
        if !validation.is_valid {
            return Err(ReviewError::Validation(validation));
        }
        if !Self::capabilities_for(proposal, roles, track, true).can_upload {
            return Err(ReviewError::Forbidden(MSG_FORBIDDEN));
        }
        store.upload(token, proposal.uid, track, upload).await?;
        Ok(())
    }

    /// Issues an approve/reject verdict on the panel's track.
    pub async fn decide(
        directory: &dyn ProposalDirectory,
        token: &str,
        proposal: &Proposal,
        roles: &[Role],
        track: CoverageTrack,
        decision: ReviewDecision,
        justification: &str,
    ) -> Result<StatusChangeRequest, ReviewError> {
        let capabilities = Self::capabilities_for(proposal, roles, track, true);
        let allowed = match decision {
            ReviewDecision::Approve => capabilities.can_approve,
            ReviewDecision::Reject => capabilities.can_reject,
        };
        if !allowed {
            return Err(ReviewError::Forbidden(MSG_FORBIDDEN));
        }

        let request = decision_request(track, decision, justification);
        directory.change_status(token, proposal.uid, &request).await?;
        Ok(request)
    }

    /// Concludes the panel's upload round, sending the track to analysis.
    /// Requires at least one uploaded document.
    pub async fn conclude(
        directory: &dyn ProposalDirectory,
        store: &dyn ReportStore,
        token: &str,
        proposal: &Proposal,
        roles: &[Role],
        track: CoverageTrack,
        justification: &str,
    ) -> Result<StatusChangeRequest, ReviewError> {
        if !Self::capabilities_for(proposal, roles, track, true).can_conclude {
            return Err(ReviewError::Forbidden(MSG_FORBIDDEN));
        }

        let documents = store.documents(token, proposal.uid, track).await?;
        if documents.is_empty() {
            return Err(ReviewError::NoDocuments);
        }

        let request = conclude_request(track, justification);
        directory.change_status(token, proposal.uid, &request).await?;
        Ok(request)
    }

    /// Deletes a DFI document. Destructive; gated like the DFI review.
    pub async fn delete_document(
        store: &dyn ReportStore,
        token: &str,
        proposal: &Proposal,
        roles: &[Role],
        document: DocumentId,
    ) -> Result<(), ReviewError> {
        if !Self::capabilities_for(proposal, roles, CoverageTrack::Dfi, true).can_delete {
            return Err(ReviewError::Forbidden(MSG_FORBIDDEN));
        }
        store.delete_archive(token, document).await?;
        Ok(())
    }

    /// Fetches and decodes a document's content for viewing.
    pub async fn view_archive(
        store: &dyn ReportStore,
        token: &str,
        document: DocumentId,
    ) -> Result<DecodedArchive, ReviewError> {
        let content = store.archive_content(token, document).await?;
        Ok(decode_archive(content.as_deref())?)
    }
}
