//! Review decisions and upload conclusions
//!
//! Each action is a status-change request with an exact description; the
//! upstream stores these verbatim in the interaction history, so the texts
//! here are contractual.

use serde::Deserialize;

use domain_proposal::ports::StatusChangeRequest;
use domain_proposal::status::{CoverageTrack, ProposalStatus};

/// Confirmation prompt shown before concluding an upload.
pub fn conclude_prompt(track: CoverageTrack) -> &'static str {
    match track {
        CoverageTrack::Mip => "Confirma o envio de laudos e complementos médicos?",
        CoverageTrack::Dfi => "Confirma o envio de laudos DFI?",
    }
}

/// Refusal when concluding with nothing uploaded.
pub const MSG_NO_DOCUMENTS: &str =
    "É necessário ter pelo menos um documento carregado para concluir o envio.";

/// Refusal when the caller's roles do not open the attempted action.
pub const MSG_FORBIDDEN: &str = "Você não tem permissão para realizar esta ação.";

/// An analyst's verdict on a report panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approve,
    Reject,
}

/// Builds the status change a review decision issues.
///
/// The justification, when present, is appended as ` - {text}`.
pub fn decision_request(
    track: CoverageTrack,
    decision: ReviewDecision,
    justification: &str,
) -> StatusChangeRequest {
    let (status, verdict) = match (track, decision) {
        (CoverageTrack::Mip, ReviewDecision::Approve) => {
            (ProposalStatus::MedicalApproved, "APROVADA")
        }
        (CoverageTrack::Mip, ReviewDecision::Reject) => {
            (ProposalStatus::MedicalRejected, "NEGADA")
        }
        (CoverageTrack::Dfi, ReviewDecision::Approve) => (ProposalStatus::DfiApproved, "APROVADA"),
        (CoverageTrack::Dfi, ReviewDecision::Reject) => (ProposalStatus::DfiRejected, "NEGADA"),
    };

    let mut description = format!("Análise de {track} concluída: {verdict}");
    let justification = justification.trim();
    if !justification.is_empty() {
        description.push_str(" - ");
        description.push_str(justification);
    }

    StatusChangeRequest::new(status, description, track)
}

/// Builds the status change that concludes an upload round.
///
/// MIP sends the proposal to medical analysis with a fixed description. DFI
/// opens its own analysis; an optional note rides after `: `.
pub fn conclude_request(track: CoverageTrack, justification: &str) -> StatusChangeRequest {
    match track {
        CoverageTrack::Mip => StatusChangeRequest::new(
            ProposalStatus::AwaitingMedicalAnalysis,
            "Aguardando análise DPS",
            track,
        ),
        CoverageTrack::Dfi => {
            let mut description = "Aguardando análise DFI".to_string();
            let justification = justification.trim();
            if !justification.is_empty() {
                description.push_str(": ");
                description.push_str(justification);
            }
            StatusChangeRequest::new(ProposalStatus::AwaitingDfiAnalysis, description, track)
        }
    }
}
