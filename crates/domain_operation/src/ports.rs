//! Operation port
//!
//! Upstream-facing contract for reading and mutating operations. The update
//! payload mirrors the upstream's own field names, including the legacy
//! `deadlineId` slot it still requires.

use async_trait::async_trait;
use core_kernel::{DomainPort, HealthCheckable, OperationNumber, PortError, ProposalId};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::contact::ContactUpdate;
use crate::operation::Operation;

/// `TipoProposta` code for operation-linked proposals. The update payload
/// always carries it.
pub const OPERATION_TYPE_ID: i32 = 2;

/// Shared-field update as the upstream expects it.
///
/// `deadline_id` is always serialized, as `null`: the term rides
/// `deadlineMonths` but the upstream rejects payloads missing the old slot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOperationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_channel_uid: Option<Uuid>,
    pub total_participants_expected: u32,
    pub product_id: Uuid,
    pub type_id: i32,
    pub deadline_id: Option<i32>,
    pub deadline_months: u32,
    pub property_type_id: i32,
    pub operation_value: Decimal,
    #[serde(rename = "capitalMIP")]
    pub capital_mip: Decimal,
    #[serde(rename = "capitalDFI")]
    pub capital_dfi: Decimal,
}

/// Port for the upstream operation endpoints.
#[async_trait]
pub trait OperationPort: DomainPort + HealthCheckable {
    /// The operation with every participant proposal, including history.
    async fn operation(
        &self,
        token: &str,
        number: &OperationNumber,
    ) -> Result<Operation, PortError>;

    /// Applies the shared fields to every participant at once.
    async fn update_operation(
        &self,
        token: &str,
        number: &OperationNumber,
        request: &UpdateOperationRequest,
    ) -> Result<(), PortError>;

    /// Contact fields of a single participant; never touches shared fields.
    async fn update_contact(
        &self,
        token: &str,
        proposal: ProposalId,
        update: &ContactUpdate,
    ) -> Result<(), PortError>;
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use chrono::Utc;
    use core_kernel::{AdapterHealth, HealthCheckResult, Money};
    use tokio::sync::RwLock;

    /// In-memory operation registry.
    ///
    /// Enforces the edit lock the way the upstream does, so services cannot
    /// pass a locked save through by skipping their own check.
    #[derive(Debug, Default)]
    pub struct MockOperationPort {
        operations: Arc<RwLock<HashMap<OperationNumber, Operation>>>,
    }

    impl MockOperationPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn with_operation(operation: Operation) -> Self {
            let port = Self::new();
            port.insert(operation).await;
            port
        }

        pub async fn insert(&self, operation: Operation) {
            self.operations
                .write()
                .await
                .insert(operation.contract_number.clone(), operation);
        }

        pub async fn stored(&self, number: &OperationNumber) -> Option<Operation> {
            self.operations.read().await.get(number).cloned()
        }
    }

    impl DomainPort for MockOperationPort {}

    #[async_trait]
    impl HealthCheckable for MockOperationPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-operation-port".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl OperationPort for MockOperationPort {
        async fn operation(
            &self,
            _token: &str,
            number: &OperationNumber,
        ) -> Result<Operation, PortError> {
            self.operations
                .read()
                .await
                .get(number)
                .cloned()
                .ok_or_else(|| PortError::not_found("Operation", number.to_string()))
        }

        async fn update_operation(
            &self,
            _token: &str,
            number: &OperationNumber,
            request: &UpdateOperationRequest,
        ) -> Result<(), PortError> {
            let mut operations = self.operations.write().await;
            let operation = operations
                .get_mut(number)
                .ok_or_else(|| PortError::not_found("Operation", number.to_string()))?;

            let lock = operation.edit_lock();
            if let Some(reason) = lock.reason {
                return Err(PortError::validation(reason));
            }

            operation.sales_channel_uid = request.sales_channel_uid.or(operation.sales_channel_uid);
            operation.total_participants_expected = Some(request.total_participants_expected);
            for participant in &mut operation.participants {
                participant.product.uid = request.product_id;
                participant.deadline_months = Some(request.deadline_months);
                participant.property_type_id = Some(request.property_type_id);
                participant.operation_value = Some(Money::brl(request.operation_value));
                participant.capital_mip = Some(Money::brl(request.capital_mip));
                participant.capital_dfi = Some(Money::brl(request.capital_dfi));
            }
            Ok(())
        }

        async fn update_contact(
            &self,
            _token: &str,
            proposal: ProposalId,
            update: &ContactUpdate,
        ) -> Result<(), PortError> {
            let mut operations = self.operations.write().await;
            let participant = operations
                .values_mut()
                .flat_map(|o| o.participants.iter_mut())
                .find(|p| p.uid == proposal)
                .ok_or_else(|| PortError::not_found("Proposal", proposal.to_string()))?;

            participant.customer.social_name = update.social_name.clone();
            participant.customer.email = update.email.clone();
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::lock::MSG_LOCK_SIGNED;
        use domain_proposal::proposal::{Customer, LookupRef, ProductRef, StatusRef};
        use domain_proposal::status::ProposalStatus;
        use rust_decimal_macros::dec;

        fn operation_at(status: ProposalStatus) -> Operation {
            let proposal = domain_proposal::proposal::Proposal {
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
                    id: OPERATION_TYPE_ID,
                    description: "Operação".to_string(),
                },
                lmi: LookupRef {
                    id: 3,
                    description: "Faixa 3".to_string(),
                },
                status: StatusRef::from(status),
                dfi_status: None,
                capital_mip: Some(Money::brl(dec!(250_000))),
                capital_dfi: Some(Money::brl(dec!(400_000))),
                operation_value: Some(Money::brl(dec!(380_000))),
                deadline_months: Some(240),
                property_type_id: Some(1),
                address: None,
                participant_type: None,
                contract_number: Some(OperationNumber::new("CT-2026-0001")),
                created: Utc::now(),
                history: Vec::new(),
            };
            Operation {
                contract_number: OperationNumber::new("CT-2026-0001"),
                sales_channel_uid: None,
                total_participants_expected: Some(1),
                participants: vec![proposal],
            }
        }

        fn request(operation: &Operation) -> UpdateOperationRequest {
            UpdateOperationRequest {
                sales_channel_uid: None,
                total_participants_expected: 2,
                product_id: operation.participants[0].product.uid,
                type_id: OPERATION_TYPE_ID,
                deadline_id: None,
                deadline_months: 300,
                property_type_id: 1,
                operation_value: dec!(380_000),
                capital_mip: dec!(250_000),
                capital_dfi: dec!(400_000),
            }
        }

        #[tokio::test]
        async fn test_update_applies_shared_fields_to_every_participant() {
            let operation = operation_at(ProposalStatus::AwaitingFillout);
            let number = operation.contract_number.clone();
            let port = MockOperationPort::with_operation(operation).await;

            let stored = port.stored(&number).await.unwrap();
            port.update_operation("token", &number, &request(&stored))
                .await
                .unwrap();

            let after = port.stored(&number).await.unwrap();
            assert_eq!(after.participants[0].deadline_months, Some(300));
            assert_eq!(after.total_participants_expected, Some(2));
        }

        #[tokio::test]
        async fn test_update_against_a_signed_participant_is_refused() {
            let operation = operation_at(ProposalStatus::Signed);
            let number = operation.contract_number.clone();
            let port = MockOperationPort::with_operation(operation).await;

            let stored = port.stored(&number).await.unwrap();
            let err = port
                .update_operation("token", &number, &request(&stored))
                .await
                .unwrap_err();
            assert!(err.to_string().contains(MSG_LOCK_SIGNED));
        }
    }
}
