//! Proposal interaction history
//!
//! History entries arrive from the upstream in one canonical shape and are
//! shaped here for display: sequence number, status label, actor and the
//! `HH:MM - DD/MM/YYYY` timestamp in América/São Paulo time.

use chrono::{DateTime, Utc};
use core_kernel::format_history_timestamp;
use serde::{Deserialize, Serialize};

use crate::status::ProposalStatus;

/// Label shown for the automatic signature event, which has no human actor.
pub const SYSTEM_ACTOR_LABEL: &str = "SISTEM";

/// A history entry as returned by the upstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub status_id: i32,
    pub description: String,
    pub created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<InteractionActor>,
}

/// Who performed the interaction, when the upstream recorded it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InteractionActor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Interaction {
    pub fn status(&self) -> ProposalStatus {
        ProposalStatus::from_code(self.status_id)
    }
}

/// A history entry shaped for display.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InteractionView {
    pub sequence: usize,
    pub status_id: i32,
    pub status_label: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    pub timestamp: String,
}

/// Shapes the history for the interactions panel.
///
/// Entries with a blank description are skipped, matching the panel's
/// rendering. Sequence numbers restart from 1 after the skip.
pub fn present_history(history: &[Interaction]) -> Vec<InteractionView> {
    history
        .iter()
        .filter(|entry| !entry.description.trim().is_empty())
        .enumerate()
        .map(|(index, entry)| {
            let status = entry.status();
            let actor = if status.is_system_event() {
                Some(SYSTEM_ACTOR_LABEL.to_string())
            } else {
                entry.actor.as_ref().map(|a| a.name.clone())
            };
            InteractionView {
                sequence: index + 1,
                status_id: entry.status_id,
                status_label: status
                    .label()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Situação {}", entry.status_id)),
                description: entry.description.clone(),
                actor,
                timestamp: format_history_timestamp(entry.created),
            }
        })
        .collect()
}

/// A complement note may only be added while the proposal awaits complement.
pub fn can_add_interaction(status: ProposalStatus) -> bool {
    status == ProposalStatus::AwaitingComplement
}

/// Whether the proposal has ever passed through the given status.
pub fn history_contains(history: &[Interaction], status: ProposalStatus) -> bool {
    history.iter().any(|entry| entry.status() == status)
}
