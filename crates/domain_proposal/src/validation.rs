//! Client-side validation for proposal input
//!
//! Every rule here runs before any upstream call; failures surface as
//! field-level messages with the pt-BR texts the desk displays.

use chrono::NaiveDate;
use core_kernel::{Cpf, Money};
use rust_decimal_macros::dec;
use serde::Serialize;
use uuid::Uuid;
use validator::ValidateEmail;

/// Message texts shared across forms.
pub const MSG_REQUIRED: &str = "Campo obrigatório.";
pub const MSG_INVALID_CPF: &str = "Por favor forneça um CPF válido";
pub const MSG_CAPITAL_CAP: &str = "Capital máximo R$ 10.000.000,00";
pub const MSG_DFI_BELOW_MIP: &str = "Capital DFI deve ser maior ou igual ao capital MIP.";
pub const MSG_INVALID_EMAIL: &str = "E-mail inválido.";
pub const MSG_INVALID_PHONE: &str = "Telefone inválido.";
pub const MSG_INVALID_BIRTH_DATE: &str = "Data de nascimento inválida.";

/// Upper bound for both MIP and DFI capital.
pub fn capital_cap() -> Money {
    Money::brl(dec!(10_000_000))
}

/// Result of validating a form-shaped input.
///
/// `errors` block submission; `warnings` are surfaced but do not.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
    pub warnings: Vec<String>,
}

/// A single rejected field with its display message.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn fail(field: &str, message: impl Into<String>) -> Self {
        let mut result = Self::ok();
        result.add_error(field, message);
        result
    }

    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.is_valid = false;
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.is_valid = self.is_valid && other.is_valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Rewrites every error's field name; used when a shared check reports
    /// under a caller-specific field.
    pub fn relabel(mut self, field: &str) -> Self {
        for error in &mut self.errors {
            error.field = field.to_string();
        }
        self
    }

    /// Message for the given field, when it was rejected.
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

/// Proposal creation input, after mask stripping, before any wire call.
#[derive(Debug, Clone)]
pub struct ProposalDraft {
    pub document: String,
    pub name: String,
    pub social_name: Option<String>,
    pub email: String,
    pub birth_date: Option<NaiveDate>,
    pub product_uid: Option<Uuid>,
    pub lmi_range_id: Option<i32>,
    pub capital_mip: Option<Money>,
    pub capital_dfi: Option<Money>,
}

/// Validates proposal input against the desk's local rules.
pub struct ProposalValidator;

impl ProposalValidator {
    /// Validates a full creation draft. No upstream call happens when this
    /// returns errors.
    pub fn validate_draft(draft: &ProposalDraft) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if draft.document.trim().is_empty() {
            result.add_error("document", MSG_REQUIRED);
        } else if Cpf::parse(&draft.document).is_err() {
            result.add_error("document", MSG_INVALID_CPF);
        }

        if draft.name.trim().is_empty() {
            result.add_error("name", MSG_REQUIRED);
        }

        if draft.email.trim().is_empty() {
            result.add_error("email", MSG_REQUIRED);
        } else if !draft.email.validate_email() {
            result.add_error("email", MSG_INVALID_EMAIL);
        }

        match draft.birth_date {
            None => result.add_error("birthDate", MSG_REQUIRED),
            Some(birth) => {
                if birth > chrono::Utc::now().date_naive() {
                    result.add_error("birthDate", MSG_INVALID_BIRTH_DATE);
                }
            }
        }

        if draft.product_uid.is_none() {
            result.add_error("productId", MSG_REQUIRED);
        }
        if draft.lmi_range_id.is_none() {
            result.add_error("lmiRangeId", MSG_REQUIRED);
        }

        match (draft.capital_mip, draft.capital_dfi) {
            (None, _) => result.add_error("capitalMip", MSG_REQUIRED),
            (_, None) => result.add_error("capitalDfi", MSG_REQUIRED),
            (Some(mip), Some(dfi)) => result.merge(Self::validate_capitals(mip, dfi)),
        }

        result
    }

    /// Capital cap and DFI >= MIP, shared by fill-out and operation edit.
    pub fn validate_capitals(mip: Money, dfi: Money) -> ValidationResult {
        let mut result = ValidationResult::ok();
        let cap = capital_cap();

        if !mip.is_positive() {
            result.add_error("capitalMip", MSG_REQUIRED);
        } else if mip.amount() > cap.amount() {
            result.add_error("capitalMip", MSG_CAPITAL_CAP);
        }

        if !dfi.is_positive() {
            result.add_error("capitalDfi", MSG_REQUIRED);
        } else if dfi.amount() > cap.amount() {
            result.add_error("capitalDfi", MSG_CAPITAL_CAP);
        } else if dfi.amount() < mip.amount() {
            result.add_error("capitalDfi", MSG_DFI_BELOW_MIP);
        }

        result
    }

    /// Search-by-document filter. An empty document means "no filter" and
    /// is accepted as-is.
    pub fn validate_search_document(document: &str) -> ValidationResult {
        let digits: String = document.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return ValidationResult::ok();
        }
        if Cpf::parse(&digits).is_err() {
            return ValidationResult::fail("cpf", MSG_INVALID_CPF);
        }
        ValidationResult::ok()
    }

    /// Contact phone: 10 or 11 digits after mask stripping.
    pub fn validate_phone(phone: &str) -> ValidationResult {
        let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return ValidationResult::fail("phone", MSG_REQUIRED);
        }
        if !(10..=11).contains(&digits.len()) {
            return ValidationResult::fail("phone", MSG_INVALID_PHONE);
        }
        ValidationResult::ok()
    }
}
