//! DPS fill-out flow
//!
//! The step a proponent sees is derived from the proposal's current status
//! every time it is loaded; nothing tracks the step independently. Health
//! submission persists the answers, then requests the signature. The
//! signature outcome is advisory: the flow lands on `finished` either way.

use chrono::Utc;
use core_kernel::ProposalId;
use serde::Serialize;

use crate::error::ProposalError;
use crate::health::{HealthFormSubmission, PrefilledHealthForm};
use crate::ports::ProposalDirectory;
use crate::status::ProposalStatus;

/// Current step of the fill-out flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilloutStep {
    Health,
    Attachments,
    Finished,
}

impl FilloutStep {
    /// Derives the step from the proposal's status.
    pub fn for_status(status: ProposalStatus) -> Self {
        match status {
            ProposalStatus::AwaitingFillout => Self::Health,
            ProposalStatus::AwaitingComplement => Self::Attachments,
            _ => Self::Finished,
        }
    }
}

/// Where the finished step sends the user.
pub fn detail_link(proposal_id: ProposalId) -> String {
    format!("/dps/details/{}", proposal_id.as_uuid())
}

/// Advisory result of the signature request issued after the health answers
/// are stored.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignOutcome {
    pub signed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// What the fill-out screen receives when it loads a proposal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilloutView {
    pub step: FilloutStep,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<PrefilledHealthForm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_link: Option<String>,
}

/// Result of submitting the health form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSubmissionOutcome {
    pub step: FilloutStep,
    pub detail_link: String,
    pub sign: SignOutcome,
}

/// Orchestrates the fill-out flow against the proposal directory.
pub struct FilloutService;

impl FilloutService {
    /// Loads the fill-out view for a proposal: derives the step and, on the
    /// health step, prefills the questionnaire from stored answers.
    pub async fn load(
        port: &dyn ProposalDirectory,
        token: &str,
        proposal_id: ProposalId,
    ) -> Result<FilloutView, ProposalError> {
        let proposal = port.get(token, proposal_id).await?;
        let step = FilloutStep::for_status(proposal.status_code());

        let view = match step {
            FilloutStep::Health => {
                let answers = port.health_answers(token, proposal_id).await?;
                FilloutView {
                    step,
                    health: Some(PrefilledHealthForm::from_answers(&answers)),
                    detail_link: None,
                }
            }
            FilloutStep::Attachments => FilloutView {
                step,
                health: None,
                detail_link: None,
            },
            FilloutStep::Finished => FilloutView {
                step,
                health: None,
                detail_link: Some(detail_link(proposal_id)),
            },
        };
        Ok(view)
    }

    /// Persists the health answers, requests the signature and advances to
    /// `finished`.
    ///
    /// A signature failure does not block the flow; it is reported in the
    /// outcome. An expired session does abort, like every other operation.
    pub async fn submit_health(
        port: &dyn ProposalDirectory,
        token: &str,
        proposal_id: ProposalId,
        submission: HealthFormSubmission,
    ) -> Result<HealthSubmissionOutcome, ProposalError> {
        let validation = submission.validate();
        if !validation.is_valid {
            return Err(ProposalError::Validation(validation));
        }

        let answers = submission.into_wire(Utc::now());
        port.submit_health_answers(token, proposal_id, &answers)
            .await?;

        let sign = match port.sign(token, proposal_id).await {
            Ok(()) => SignOutcome {
                signed: true,
                message: None,
            },
            Err(err) if err.is_unauthorized() => return Err(err.into()),
            Err(err) => {
                tracing::warn!(proposal = %proposal_id, error = %err, "signature request failed");
                SignOutcome {
                    signed: false,
                    message: Some(err.to_string()),
                }
            }
        };

        Ok(HealthSubmissionOutcome {
            step: FilloutStep::Finished,
            detail_link: detail_link(proposal_id),
            sign,
        })
    }
}
