//! Operation edit drafts
//!
//! Form state for the shared-field edit page. The draft is prefilled from the
//! principal participant, validated locally, and only then turned into the
//! upstream update payload. Validation failures never reach the wire.

use chrono::NaiveDate;
use core_kernel::{age_at_term_end, Money};
use domain_proposal::validation::{ProposalValidator, ValidationResult, MSG_REQUIRED};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::operation::Operation;
use crate::ports::{UpdateOperationRequest, OPERATION_TYPE_ID};

pub const MSG_PRODUCT_REQUIRED: &str = "Produto é obrigatório.";
pub const MSG_INVALID_DEADLINE: &str = "Prazo inválido.";
pub const MSG_INVALID_PROPERTY_TYPE: &str = "Tipo de imóvel inválido.";
pub const MSG_INVALID_OPERATION_VALUE: &str = "Valor da operação inválido.";
pub const MSG_INVALID_PARTICIPANTS: &str = "Número de participantes inválido (1 a 200).";
pub const MSG_MAX_AGE_EXCEEDED: &str = "Idade máxima ao final do prazo excedida.";

/// Outcome texts for the save action.
pub const MSG_SAVE_SUCCESS: &str = "Operação atualizada com sucesso.";
pub const MSG_SAVE_TRANSPORT: &str = "Não foi possível salvar. Tente novamente.";
pub const MSG_SAVE_BUSINESS: &str = "Erro ao salvar a operação.";

/// Oldest an insured may be when the coverage term ends.
pub const MAX_AGE_AT_TERM_END: i32 = 80;

/// Placeholder for fields the operation never had a value for.
const FIELD_EMPTY: &str = "não informado";

/// Shared-field form state for the operation edit page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationEditDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_channel_uid: Option<Uuid>,
    #[serde(default)]
    pub total_participants_expected: Option<u32>,
    #[serde(default)]
    pub product_uid: Option<Uuid>,
    #[serde(default)]
    pub deadline_months: Option<u32>,
    #[serde(default)]
    pub property_type_id: Option<i32>,
    #[serde(default)]
    pub operation_value: Option<Money>,
    #[serde(default)]
    pub capital_mip: Option<Money>,
    #[serde(default)]
    pub capital_dfi: Option<Money>,
}

/// One line of the pre-save confirmation summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    pub field: &'static str,
    pub from: String,
    pub to: String,
}

impl OperationEditDraft {
    /// Prefill from the operation as it currently stands. Shared fields are
    /// read off the principal participant.
    pub fn from_operation(operation: &Operation) -> Self {
        let principal = operation.principal();
        Self {
            sales_channel_uid: operation.sales_channel_uid,
            total_participants_expected: operation.total_participants_expected,
            product_uid: principal.map(|p| p.product.uid),
            deadline_months: principal.and_then(|p| p.deadline_months),
            property_type_id: principal.and_then(|p| p.property_type_id),
            operation_value: principal.and_then(|p| p.operation_value),
            capital_mip: principal.and_then(|p| p.capital_mip),
            capital_dfi: principal.and_then(|p| p.capital_dfi),
        }
    }

    /// Validates the draft against the operation and, when clean, produces
    /// the upstream payload. The error side carries every rejected field.
    pub fn validate(
        &self,
        operation: &Operation,
        today: NaiveDate,
    ) -> Result<UpdateOperationRequest, ValidationResult> {
        let mut result = ValidationResult::ok();

        if self.product_uid.is_none() {
            result.add_error("productId", MSG_PRODUCT_REQUIRED);
        }

        match self.deadline_months {
            None | Some(0) => result.add_error("deadlineMonths", MSG_INVALID_DEADLINE),
            Some(months) => {
                // Age is checked per participant: the term the contract sets
                // must not outlive any insured's coverage window.
                let over_age = operation.participants.iter().any(|p| {
                    p.customer
                        .birthdate
                        .map(|birth| age_at_term_end(birth, today, months) > MAX_AGE_AT_TERM_END)
                        .unwrap_or(false)
                });
                if over_age {
                    result.add_error("deadlineMonths", MSG_MAX_AGE_EXCEEDED);
                }
            }
        }

        match self.property_type_id {
            Some(id) if id > 0 => {}
            _ => result.add_error("propertyTypeId", MSG_INVALID_PROPERTY_TYPE),
        }

        match self.operation_value {
            Some(value) if value.is_positive() => {}
            _ => result.add_error("operationValue", MSG_INVALID_OPERATION_VALUE),
        }

        match self.total_participants_expected {
            Some(total) if (1..=200).contains(&total) => {}
            _ => result.add_error("totalParticipantsExpected", MSG_INVALID_PARTICIPANTS),
        }

        match (self.capital_mip, self.capital_dfi) {
            (None, _) => result.add_error("capitalMip", MSG_REQUIRED),
            (_, None) => result.add_error("capitalDfi", MSG_REQUIRED),
            (Some(mip), Some(dfi)) => {
                result.merge(ProposalValidator::validate_capitals(mip, dfi))
            }
        }

        let (
            Some(product),
            Some(months),
            Some(property),
            Some(value),
            Some(mip),
            Some(dfi),
            Some(total),
        ) = (
            self.product_uid,
            self.deadline_months,
            self.property_type_id,
            self.operation_value,
            self.capital_mip,
            self.capital_dfi,
            self.total_participants_expected,
        )
        else {
            return Err(result);
        };
        if !result.is_valid {
            return Err(result);
        }

        Ok(UpdateOperationRequest {
            sales_channel_uid: self.sales_channel_uid,
            total_participants_expected: total,
            product_id: product,
            type_id: OPERATION_TYPE_ID,
            deadline_id: None,
            deadline_months: months,
            property_type_id: property,
            operation_value: value.amount(),
            capital_mip: mip.amount(),
            capital_dfi: dfi.amount(),
        })
    }

    /// Which shared fields this draft would change, for the confirmation
    /// step. Fields left blank in the draft are not listed.
    pub fn changed_fields(&self, operation: &Operation) -> Vec<FieldChange> {
        let current = Self::from_operation(operation);
        let mut changes = Vec::new();

        push_change(&mut changes, "productId", current.product_uid, self.product_uid);
        push_change(
            &mut changes,
            "deadlineMonths",
            current.deadline_months,
            self.deadline_months,
        );
        push_change(
            &mut changes,
            "propertyTypeId",
            current.property_type_id,
            self.property_type_id,
        );
        push_money_change(
            &mut changes,
            "operationValue",
            current.operation_value,
            self.operation_value,
        );
        push_money_change(&mut changes, "capitalMip", current.capital_mip, self.capital_mip);
        push_money_change(&mut changes, "capitalDfi", current.capital_dfi, self.capital_dfi);
        push_change(
            &mut changes,
            "totalParticipantsExpected",
            current.total_participants_expected,
            self.total_participants_expected,
        );
        push_change(
            &mut changes,
            "salesChannelUid",
            current.sales_channel_uid,
            self.sales_channel_uid,
        );

        changes
    }
}

fn push_change<T: PartialEq + std::fmt::Display>(
    changes: &mut Vec<FieldChange>,
    field: &'static str,
    current: Option<T>,
    new: Option<T>,
) {
    let Some(new) = new else { return };
    if current.as_ref() == Some(&new) {
        return;
    }
    changes.push(FieldChange {
        field,
        from: current.map_or_else(|| FIELD_EMPTY.to_string(), |v| v.to_string()),
        to: new.to_string(),
    });
}

fn push_money_change(
    changes: &mut Vec<FieldChange>,
    field: &'static str,
    current: Option<Money>,
    new: Option<Money>,
) {
    let Some(new) = new else { return };
    if current.map(|c| c.amount()) == Some(new.amount()) {
        return;
    }
    changes.push(FieldChange {
        field,
        from: current.map_or_else(|| FIELD_EMPTY.to_string(), |v| v.display_pt_br()),
        to: new.display_pt_br(),
    });
}
