//! Report document port

use async_trait::async_trait;
use core_kernel::{DocumentId, DomainPort, HealthCheckable, PortError, ProposalId};

use domain_proposal::status::CoverageTrack;

use crate::document::ReportDocument;
use crate::upload::DocumentUpload;

/// Port for the upstream document collection.
///
/// `archive_content` returns the raw base64 payload (or nothing); decoding
/// and its failure shapes are local, see [`crate::archive`].
#[async_trait]
pub trait ReportStore: DomainPort + HealthCheckable {
    async fn documents(
        &self,
        token: &str,
        id: ProposalId,
        track: CoverageTrack,
    ) -> Result<Vec<ReportDocument>, PortError>;

    async fn upload(
        &self,
        token: &str,
        id: ProposalId,
        track: CoverageTrack,
        upload: &DocumentUpload,
    ) -> Result<(), PortError>;

    async fn archive_content(
        &self,
        token: &str,
        document: DocumentId,
    ) -> Result<Option<String>, PortError>;

    async fn delete_archive(&self, token: &str, document: DocumentId)
        -> Result<(), PortError>;
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use chrono::Utc;
    use core_kernel::{AdapterHealth, HealthCheckResult};
    use tokio::sync::RwLock;

    use crate::document::CreatedByUser;

    /// In-memory document collection.
    #[derive(Debug, Default)]
    pub struct MockReportStore {
        documents: Arc<RwLock<HashMap<(ProposalId, CoverageTrack), Vec<ReportDocument>>>>,
        contents: Arc<RwLock<HashMap<DocumentId, String>>>,
    }

    impl MockReportStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates one panel's documents for testing.
        pub async fn with_documents(
            id: ProposalId,
            track: CoverageTrack,
            documents: Vec<ReportDocument>,
        ) -> Self {
            let store = Self::new();
            store.documents.write().await.insert((id, track), documents);
            store
        }

        pub async fn set_content(&self, document: DocumentId, content: impl Into<String>) {
            self.contents.write().await.insert(document, content.into());
        }

        pub async fn document_count(&self, id: ProposalId, track: CoverageTrack) -> usize {
            self.documents
                .read()
                .await
                .get(&(id, track))
                .map_or(0, Vec::len)
        }
    }

    impl DomainPort for MockReportStore {}

    #[async_trait]
    impl HealthCheckable for MockReportStore {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-report-store".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ReportStore for MockReportStore {
        async fn documents(
            &self,
            _token: &str,
            id: ProposalId,
            track: CoverageTrack,
        ) -> Result<Vec<ReportDocument>, PortError> {
            Ok(self
                .documents
                .read()
                .await
                .get(&(id, track))
                .cloned()
                .unwrap_or_default())
        }

        async fn upload(
            &self,
            _token: &str,
            id: ProposalId,
            track: CoverageTrack,
            upload: &DocumentUpload,
        ) -> Result<(), PortError> {
            let document = ReportDocument {
                uid: DocumentId::new(),
                document_name: upload.document_name.clone(),
                document_url: format!("https://storage.local/{}", upload.document_name),
                description: upload.description(track),
                created_by_user: Some(CreatedByUser {
                    name: Some("Mock Uploader".to_string()),
                    email: None,
                }),
                created: Utc::now(),
                updated: None,
            };
            self.contents
                .write()
                .await
                .insert(document.uid, upload.content.clone());
            self.documents
                .write()
                .await
                .entry((id, track))
                .or_default()
                .push(document);
            Ok(())
        }

        async fn archive_content(
            &self,
            _token: &str,
            document: DocumentId,
        ) -> Result<Option<String>, PortError> {
            Ok(self.contents.read().await.get(&document).cloned())
        }

        async fn delete_archive(
            &self,
            _token: &str,
            document: DocumentId,
        ) -> Result<(), PortError> {
            let mut documents = self.documents.write().await;
            let held = documents
                .values_mut()
                .any(|list| {
                    let before = list.len();
                    list.retain(|d| d.uid != document);
                    list.len() != before
                });
            if !held {
                return Err(PortError::not_found("Document", document.to_string()));
            }
            self.contents.write().await.remove(&document);
            Ok(())
        }
    }

}
