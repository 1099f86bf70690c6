//! Operation aggregate
//!
//! An operation groups every participant proposal written against one credit
//! contract. Financing and property fields (product, term, property type,
//! capitals, operation value) are shared: they live on each participant but
//! must only ever be changed for all of them at once, through the contract
//! number.

use core_kernel::{OperationNumber, ProposalId};
use domain_proposal::proposal::{ParticipantKind, Proposal};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::lock::EditLock;

/// A credit operation with its participant proposals.
///
/// Served by the participants endpoint; the upstream keys operations by the
/// human contract number, not by UUID.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub contract_number: OperationNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_channel_uid: Option<Uuid>,
    /// How many participants the contract expects, not how many exist yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_participants_expected: Option<u32>,
    pub participants: Vec<Proposal>,
}

impl Operation {
    /// The proposal that anchors the shared fields.
    ///
    /// Upstream marks exactly one participant as principal; data created
    /// before that flag existed may carry none, in which case the first
    /// participant stands in.
    pub fn principal(&self) -> Option<&Proposal> {
        self.participants
            .iter()
            .find(|p| p.participant_type == Some(ParticipantKind::Principal))
            .or_else(|| self.participants.first())
    }

    /// Whether shared fields may currently be edited, with the display
    /// texts for the locked case.
    pub fn edit_lock(&self) -> EditLock {
        EditLock::for_participants(&self.participants)
    }

    pub fn participant(&self, uid: &ProposalId) -> Option<&Proposal> {
        self.participants.iter().find(|p| &p.uid == uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_kernel::Money;
    use domain_proposal::proposal::{Customer, LookupRef, ProductRef, StatusRef};
    use domain_proposal::status::ProposalStatus;
    use rust_decimal_macros::dec;

    fn participant(kind: Option<ParticipantKind>) -> Proposal {
        Proposal {
            uid: ProposalId::new(),
            code: "P-0001".to_string(),
            customer: Customer {
                uid: None,
                document: "52998224725".to_string(),
                name: "Ana Prado".to_string(),
                social_name: None,
                email: "ana@exemplo.com.br".to_string(),
                birthdate: None,
            },
            product: ProductRef {
                uid: Uuid::new_v4(),
                name: "Prestamista Habitacional".to_string(),
            },
            kind: LookupRef {
                id: 2,
                description: "Operação".to_string(),
            },
            lmi: LookupRef {
                id: 3,
                description: "Faixa 3".to_string(),
            },
            status: StatusRef::from(ProposalStatus::AwaitingFillout),
            dfi_status: None,
            capital_mip: Some(Money::brl(dec!(250_000))),
            capital_dfi: Some(Money::brl(dec!(400_000))),
            operation_value: Some(Money::brl(dec!(380_000))),
            deadline_months: Some(240),
            property_type_id: Some(1),
            address: None,
            participant_type: kind,
            contract_number: Some(OperationNumber::new("CT-2026-0088")),
            created: Utc::now(),
            history: Vec::new(),
        }
    }

    #[test]
    fn test_principal_prefers_the_flagged_participant() {
        let operation = Operation {
            contract_number: OperationNumber::new("CT-2026-0088"),
            sales_channel_uid: None,
            total_participants_expected: Some(2),
            participants: vec![
                participant(Some(ParticipantKind::CoParticipant)),
                participant(Some(ParticipantKind::Principal)),
            ],
        };

        let principal = operation.principal().unwrap();
        assert_eq!(principal.participant_type, Some(ParticipantKind::Principal));
    }

    #[test]
    fn test_principal_falls_back_to_the_first_participant() {
        let operation = Operation {
            contract_number: OperationNumber::new("CT-2026-0088"),
            sales_channel_uid: None,
            total_participants_expected: None,
            participants: vec![participant(None), participant(None)],
        };

        let first_uid = operation.participants[0].uid;
        assert_eq!(operation.principal().unwrap().uid, first_uid);
    }
}
