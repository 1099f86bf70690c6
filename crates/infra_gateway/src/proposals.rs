//! `ProposalDirectory` over the upstream proposal endpoints

use async_trait::async_trait;
use core_kernel::{PortError, ProposalId};
use domain_proposal::health::HealthAnswer;
use domain_proposal::ports::{
    CanceledQuery, CreateProposalRequest, Page, ProposalDirectory, ProposalQuery,
    StatusChangeRequest,
};
use domain_proposal::proposal::{Proposal, ProposalSummary};

use crate::client::{accept, optional, require, Envelope, ProposalApiGateway};
use crate::dto::{CreatedDto, ProposalDto, ProposalSummaryDto};

fn map_page(page: Page<ProposalSummaryDto>) -> Page<ProposalSummary> {
    Page {
        total_items: page.total_items,
        page: page.page,
        size: page.size,
        items: page
            .items
            .into_iter()
            .map(ProposalSummaryDto::into_domain)
            .collect(),
    }
}

#[async_trait]
impl ProposalDirectory for ProposalApiGateway {
    async fn list(
        &self,
        token: &str,
        query: &ProposalQuery,
    ) -> Result<Page<ProposalSummary>, PortError> {
        let mut params = vec![
            ("page", query.page.to_string()),
            ("size", query.size.to_string()),
        ];
        if let Some(document) = &query.document {
            params.push(("document", document.clone()));
        }
        if let Some(lmi) = query.lmi_range {
            params.push(("lmiRange", lmi.to_string()));
        }
        if let Some(product) = query.product_uid {
            params.push(("productUid", product.to_string()));
        }
        // The listings answer with the bare page, not the envelope.
        let page: Page<ProposalSummaryDto> = self.get(token, "v1/Proposal/all", &params).await?;
        Ok(map_page(page))
    }

    async fn list_canceled(
        &self,
        token: &str,
        query: &CanceledQuery,
    ) -> Result<Page<ProposalSummary>, PortError> {
        let mut params = vec![
            ("page", query.page.to_string()),
            ("size", query.size.to_string()),
        ];
        if let Some(document) = &query.document {
            params.push(("document", document.clone()));
        }
        let page: Page<ProposalSummaryDto> =
            self.get(token, "v1/Proposal/canceled", &params).await?;
        Ok(map_page(page))
    }

    async fn create(
        &self,
        token: &str,
        request: &CreateProposalRequest,
    ) -> Result<ProposalId, PortError> {
        let envelope: Envelope<CreatedDto> = self.post(token, "v1/Proposal", Some(request)).await?;
        let created = require(envelope, "Proposal", "v1/Proposal")?;
        let uid = created.uid();
        tracing::info!(proposal = %uid, "proposal created upstream");
        Ok(uid)
    }

    async fn get(&self, token: &str, id: ProposalId) -> Result<Proposal, PortError> {
        let path = format!("v1/Proposal/{}", id.as_uuid());
        let envelope: Envelope<ProposalDto> = self.get(token, &path, &[]).await?;
        Ok(require(envelope, "Proposal", &path)?.into_domain())
    }

    async fn sign(&self, token: &str, id: ProposalId) -> Result<(), PortError> {
        let path = format!("v1/Proposal/{}/sign", id.as_uuid());
        let envelope: Envelope<serde_json::Value> = self.post(token, &path, None::<&()>).await?;
        accept(envelope)
    }

    async fn change_status(
        &self,
        token: &str,
        id: ProposalId,
        request: &StatusChangeRequest,
    ) -> Result<(), PortError> {
        let path = format!("v1/Proposal/{}/status", id.as_uuid());
        let envelope: Envelope<serde_json::Value> = self.put(token, &path, request).await?;
        accept(envelope)
    }

    async fn health_answers(
        &self,
        token: &str,
        id: ProposalId,
    ) -> Result<Vec<HealthAnswer>, PortError> {
        let path = format!("v1/Proposal/{}/questions", id.as_uuid());
        let envelope: Envelope<Vec<HealthAnswer>> = self.get(token, &path, &[]).await?;
        // Nothing answered yet arrives as absent data, not as an error.
        Ok(optional(envelope)?.unwrap_or_default())
    }

    async fn submit_health_answers(
        &self,
        token: &str,
        id: ProposalId,
        answers: &[HealthAnswer],
    ) -> Result<(), PortError> {
        let path = format!("v1/Proposal/{}/questions", id.as_uuid());
        let envelope: Envelope<serde_json::Value> = self.post(token, &path, Some(answers)).await?;
        accept(envelope)
    }
}
