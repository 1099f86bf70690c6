//! `OperationPort` over the upstream operation endpoints
//!
//! The participants listing is thin: it names the proposals but carries no
//! status. Assembling an `Operation` therefore takes one listing call plus
//! one detail call per participant; the lock rule needs every status and
//! every history, so there is no cheaper read.

use async_trait::async_trait;
use core_kernel::{OperationNumber, PortError, ProposalId};
use domain_operation::operation::Operation;
use domain_operation::ports::{OperationPort, UpdateOperationRequest};
use domain_operation::ContactUpdate;

use crate::client::{accept, optional, require, Envelope, ProposalApiGateway};
use crate::dto::{ParticipantDto, ProposalDto};

#[async_trait]
impl OperationPort for ProposalApiGateway {
    async fn operation(
        &self,
        token: &str,
        number: &OperationNumber,
    ) -> Result<Operation, PortError> {
        let path = format!("v1/Proposal/operation/{}/participants", number.as_str());
        let envelope: Envelope<Vec<ParticipantDto>> = self.get(token, &path, &[]).await?;
        let rows = optional(envelope)?.unwrap_or_default();
        if rows.is_empty() {
            return Err(PortError::not_found("Operation", number));
        }

        let total_participants_expected = rows
            .iter()
            .find_map(|row| row.total_participants)
            .or(Some(rows.len() as u32));

        let mut participants = Vec::with_capacity(rows.len());
        for row in rows {
            let detail_path = format!("v1/Proposal/{}", row.uid.as_uuid());
            let envelope: Envelope<ProposalDto> = self.get(token, &detail_path, &[]).await?;
            let mut proposal = require(envelope, "Proposal", &detail_path)?.into_domain();
            row.merge_into(&mut proposal);
            participants.push(proposal);
        }

        Ok(Operation {
            contract_number: number.clone(),
            sales_channel_uid: None,
            total_participants_expected,
            participants,
        })
    }

    async fn update_operation(
        &self,
        token: &str,
        number: &OperationNumber,
        request: &UpdateOperationRequest,
    ) -> Result<(), PortError> {
        let path = format!("v1/Proposal/operation/{}", number.as_str());
        let envelope: Envelope<serde_json::Value> = self.put(token, &path, request).await?;
        accept(envelope)?;
        tracing::info!(contract = %number, "operation shared fields updated upstream");
        Ok(())
    }

    async fn update_contact(
        &self,
        token: &str,
        proposal: ProposalId,
        update: &ContactUpdate,
    ) -> Result<(), PortError> {
        let path = format!("v1/Proposal/{}/contact", proposal.as_uuid());
        let envelope: Envelope<serde_json::Value> = self.put(token, &path, update).await?;
        accept(envelope)
    }
}
