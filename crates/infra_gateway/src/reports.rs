//! `ReportStore` over the upstream document endpoints

use async_trait::async_trait;
use core_kernel::{DocumentId, PortError, ProposalId};
use domain_proposal::status::CoverageTrack;
use domain_review::document::ReportDocument;
use domain_review::ports::ReportStore;
use domain_review::upload::DocumentUpload;

use crate::client::{accept, optional, Envelope, ProposalApiGateway};
use crate::dto::{DocumentDto, UploadDocumentBody};

#[async_trait]
impl ReportStore for ProposalApiGateway {
    async fn documents(
        &self,
        token: &str,
        id: ProposalId,
        track: CoverageTrack,
    ) -> Result<Vec<ReportDocument>, PortError> {
        let path = format!("v1/Proposal/{}/document/all", id.as_uuid());
        let params = [("documentType", track.code().to_string())];
        let envelope: Envelope<Vec<DocumentDto>> = self.get(token, &path, &params).await?;
        Ok(optional(envelope)?
            .unwrap_or_default()
            .into_iter()
            .map(DocumentDto::into_domain)
            .collect())
    }

    async fn upload(
        &self,
        token: &str,
        id: ProposalId,
        track: CoverageTrack,
        upload: &DocumentUpload,
    ) -> Result<(), PortError> {
        let path = format!("v1/Proposal/{}/document", id.as_uuid());
        let body = UploadDocumentBody {
            document_name: &upload.document_name,
            description: upload.description(track),
            string_base64: &upload.content,
        };
        let envelope: Envelope<serde_json::Value> = self.post(token, &path, Some(&body)).await?;
        accept(envelope)
    }

    async fn archive_content(
        &self,
        token: &str,
        document: DocumentId,
    ) -> Result<Option<String>, PortError> {
        let path = format!("v1/Proposal/document/{}", document.as_uuid());
        let envelope: Envelope<String> = self.get(token, &path, &[]).await?;
        // Blank payloads stay as-is; deciding what "missing" means is the
        // review domain's call.
        optional(envelope)
    }

    async fn delete_archive(&self, token: &str, document: DocumentId) -> Result<(), PortError> {
        let path = format!("v1/Proposal/document/{}", document.as_uuid());
        let envelope: Envelope<serde_json::Value> = self.delete(token, &path).await?;
        accept(envelope)
    }
}
