//! Shared-field edit lock
//!
//! Contract-level fields may only change while the whole operation is still
//! being filled out. One signed DPS freezes the financing terms for every
//! participant, so the lock is all-or-nothing.

use domain_proposal::interaction::history_contains;
use domain_proposal::proposal::Proposal;
use domain_proposal::status::ProposalStatus;
use serde::Serialize;

/// Toast shown when a save is attempted against a locked operation.
pub const MSG_LOCK_SIGNED: &str =
    "Não é possível editar a operação: existe participante com DPS assinada.";
pub const MSG_LOCK_NOT_FILLOUT: &str =
    "Não é possível editar a operação: existe participante fora do preenchimento.";

/// Banner shown on the edit page while the fields are disabled.
pub const BANNER_SIGNED: &str =
    "Existe participante com DPS assinada (status 21). Edição bloqueada.";
pub const BANNER_NOT_FILLOUT: &str =
    "Existe participante fora do preenchimento. Edição bloqueada.";

/// Verdict on whether the operation's shared fields may be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditLock {
    pub editable: bool,
    /// Short refusal text, set only when locked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    /// Edit-page banner text, set only when locked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<&'static str>,
}

impl EditLock {
    pub fn editable() -> Self {
        Self {
            editable: true,
            reason: None,
            banner: None,
        }
    }

    fn locked(reason: &'static str, banner: &'static str) -> Self {
        Self {
            editable: false,
            reason: Some(reason),
            banner: Some(banner),
        }
    }

    /// Editable iff every participant is still at fill-out (10) and none has
    /// ever reached the signed state (21). A signature anywhere in the
    /// history counts even if the status has since moved on.
    pub fn for_participants(participants: &[Proposal]) -> Self {
        let signed = participants.iter().any(|p| {
            p.status_code() == ProposalStatus::Signed
                || history_contains(&p.history, ProposalStatus::Signed)
        });
        if signed {
            return Self::locked(MSG_LOCK_SIGNED, BANNER_SIGNED);
        }

        let all_in_fillout = participants
            .iter()
            .all(|p| p.status_code() == ProposalStatus::AwaitingFillout);
        if !all_in_fillout {
            return Self::locked(MSG_LOCK_NOT_FILLOUT, BANNER_NOT_FILLOUT);
        }

        Self::editable()
    }
}
