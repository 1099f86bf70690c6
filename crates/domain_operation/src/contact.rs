//! Per-participant contact edits
//!
//! Contact data is the one thing still editable after the operation locks.
//! Each row saves independently and never refetches the whole operation.

use domain_proposal::validation::{
    ProposalValidator, ValidationResult, MSG_INVALID_EMAIL, MSG_REQUIRED,
};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

/// Contact fields of one participant, as edited inline on the operation page.
///
/// Rides to the upstream unchanged, so the field names follow its contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_name: Option<String>,
    pub profession: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl ContactUpdate {
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if self.profession.trim().is_empty() {
            result.add_error("profession", MSG_REQUIRED);
        }

        if self.email.trim().is_empty() {
            result.add_error("email", MSG_REQUIRED);
        } else if !self.email.validate_email() {
            result.add_error("email", MSG_INVALID_EMAIL);
        }

        result.merge(ProposalValidator::validate_phone(&self.phone));

        result
    }
}
