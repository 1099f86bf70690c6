//! Operation edit DTOs

use serde::{Deserialize, Serialize};

use domain_operation::{FieldChange, OperationEditDraft, SaveOutcome, MSG_SAVE_SUCCESS};

/// Body of `PUT /operations/{operationNumber}`.
#[derive(Debug, Deserialize)]
pub struct SubmitOperationBody {
    /// `false` asks for the change summary; `true` persists.
    #[serde(default)]
    pub confirmed: bool,
    #[serde(flatten)]
    pub draft: OperationEditDraft,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub outcome: &'static str,
    pub changes: Vec<FieldChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl From<SaveOutcome> for SaveResponse {
    fn from(outcome: SaveOutcome) -> Self {
        match outcome {
            SaveOutcome::NeedsConfirmation(changes) => Self {
                outcome: "confirmationRequired",
                changes,
                message: None,
            },
            SaveOutcome::Saved(changes) => Self {
                outcome: "saved",
                changes,
                message: Some(MSG_SAVE_SUCCESS),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_outcome_carries_the_success_message() {
        let response: SaveResponse = SaveOutcome::Saved(vec![]).into();
        assert_eq!(response.outcome, "saved");
        assert_eq!(response.message, Some(MSG_SAVE_SUCCESS));
    }

    #[test]
    fn test_confirmation_outcome_lists_the_changes() {
        let changes = vec![FieldChange {
            field: "deadlineMonths",
            from: "240".to_string(),
            to: "360".to_string(),
        }];
        let response: SaveResponse = SaveOutcome::NeedsConfirmation(changes).into();
        assert_eq!(response.outcome, "confirmationRequired");
        assert_eq!(response.changes.len(), 1);
        assert!(response.message.is_none());
    }
}
