//! Proposal ports
//!
//! The upstream policy system is reached exclusively through these traits.
//! Every call carries the caller's bearer token; the desk holds no
//! credentials of its own.

use async_trait::async_trait;
use chrono::NaiveDate;
use core_kernel::{DomainPort, HealthCheckable, PortError, ProposalId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::health::HealthAnswer;
use crate::proposal::{LookupRef, ProductRef, Proposal, ProposalSummary};
use crate::status::{CoverageTrack, ProposalStatus};

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total_items: u64,
    pub page: u32,
    pub size: u32,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn empty(page: u32, size: u32) -> Self {
        Self {
            total_items: 0,
            page,
            size,
            items: Vec::new(),
        }
    }
}

/// Filters for the main proposal listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalQuery {
    pub page: u32,
    pub size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lmi_range: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_uid: Option<Uuid>,
}

impl Default for ProposalQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: 10,
            document: None,
            lmi_range: None,
            product_uid: None,
        }
    }
}

/// Filters for the canceled-proposals listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanceledQuery {
    pub page: u32,
    pub size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
}

impl Default for CanceledQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: 10,
            document: None,
        }
    }
}

/// Creation payload, already validated by `ProposalValidator`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProposalRequest {
    #[validate(length(min = 11))]
    pub document: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_name: Option<String>,
    #[validate(email)]
    pub email: String,
    pub birth_date: NaiveDate,
    pub product_id: Uuid,
    pub type_id: i32,
    pub lmi_range_id: i32,
    #[serde(rename = "capitalMIP")]
    pub capital_mip: Decimal,
    #[serde(rename = "capitalDFI")]
    pub capital_dfi: Decimal,
}

/// A status transition request, scoped to one coverage track.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeRequest {
    pub status_id: i32,
    pub description: String,
    #[serde(rename = "type")]
    pub track: CoverageTrack,
}

impl StatusChangeRequest {
    pub fn new(status: ProposalStatus, description: impl Into<String>, track: CoverageTrack) -> Self {
        Self {
            status_id: status.code(),
            description: description.into(),
            track,
        }
    }

    pub fn status(&self) -> ProposalStatus {
        ProposalStatus::from_code(self.status_id)
    }
}

/// The upstream domain groups the desk reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainGroup {
    LmiValues,
    ProposalSituations,
    ProposalTypes,
    PropertyTypes,
}

impl DomainGroup {
    /// The upstream's group name, used verbatim in the request path.
    pub fn group_name(self) -> &'static str {
        match self {
            Self::LmiValues => "ValoresLMI",
            Self::ProposalSituations => "SituacaoProposta",
            Self::ProposalTypes => "TipoProposta",
            Self::PropertyTypes => "TipoImovel",
        }
    }
}

/// Port for proposal lifecycle operations.
#[async_trait]
pub trait ProposalDirectory: DomainPort + HealthCheckable {
    async fn list(&self, token: &str, query: &ProposalQuery)
        -> Result<Page<ProposalSummary>, PortError>;

    async fn list_canceled(
        &self,
        token: &str,
        query: &CanceledQuery,
    ) -> Result<Page<ProposalSummary>, PortError>;

    async fn create(
        &self,
        token: &str,
        request: &CreateProposalRequest,
    ) -> Result<ProposalId, PortError>;

    async fn get(&self, token: &str, id: ProposalId) -> Result<Proposal, PortError>;

    async fn sign(&self, token: &str, id: ProposalId) -> Result<(), PortError>;

    async fn change_status(
        &self,
        token: &str,
        id: ProposalId,
        request: &StatusChangeRequest,
    ) -> Result<(), PortError>;

    async fn health_answers(
        &self,
        token: &str,
        id: ProposalId,
    ) -> Result<Vec<HealthAnswer>, PortError>;

    async fn submit_health_answers(
        &self,
        token: &str,
        id: ProposalId,
        answers: &[HealthAnswer],
    ) -> Result<(), PortError>;
}

/// Port for the reference-data lookups the screens need.
#[async_trait]
pub trait LookupPort: DomainPort + HealthCheckable {
    async fn domain_group(
        &self,
        token: &str,
        group: DomainGroup,
    ) -> Result<Vec<LookupRef>, PortError>;

    async fn products(&self, token: &str) -> Result<Vec<ProductRef>, PortError>;
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use chrono::Utc;
    use core_kernel::{AdapterHealth, HealthCheckResult};
    use tokio::sync::RwLock;

    use crate::interaction::Interaction;
    use crate::proposal::StatusRef;

    /// How subsequent sign calls should fail.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum SignFailure {
        Connection,
        Unauthorized,
    }

    /// In-memory stand-in for the upstream policy system.
    ///
    /// Status changes are checked against the transitions the desk issues,
    /// rejecting others the way the upstream does, with its pt-BR message.
    #[derive(Debug, Default)]
    pub struct MockProposalDirectory {
        proposals: Arc<RwLock<HashMap<ProposalId, Proposal>>>,
        canceled: Arc<RwLock<Vec<ProposalSummary>>>,
        health: Arc<RwLock<HashMap<ProposalId, Vec<HealthAnswer>>>>,
        sign_failure: Arc<RwLock<Option<SignFailure>>>,
        session_expired: Arc<RwLock<bool>>,
    }

    impl MockProposalDirectory {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with proposals for testing.
        pub async fn with_proposals(proposals: Vec<Proposal>) -> Self {
            let port = Self::new();
            for proposal in proposals {
                port.proposals.write().await.insert(proposal.uid, proposal);
            }
            port
        }

        pub async fn insert(&self, proposal: Proposal) {
            self.proposals.write().await.insert(proposal.uid, proposal);
        }

        pub async fn push_canceled(&self, summary: ProposalSummary) {
            self.canceled.write().await.push(summary);
        }

        /// Makes subsequent sign calls fail in the given way.
        pub async fn fail_signs_with(&self, failure: Option<SignFailure>) {
            *self.sign_failure.write().await = failure;
        }

        /// Makes every call fail with an unauthorized error, the way the
        /// upstream behaves once the bearer token expires.
        pub async fn expire_session(&self, expired: bool) {
            *self.session_expired.write().await = expired;
        }

        pub async fn stored(&self, id: ProposalId) -> Option<Proposal> {
            self.proposals.read().await.get(&id).cloned()
        }

        async fn guard_session(&self) -> Result<(), PortError> {
            if *self.session_expired.read().await {
                return Err(PortError::unauthorized("token expired"));
            }
            Ok(())
        }

        fn summarize(proposal: &Proposal) -> ProposalSummary {
            ProposalSummary {
                uid: proposal.uid,
                code: proposal.code.clone(),
                customer: proposal.customer.clone(),
                product: proposal.product.clone(),
                kind: proposal.kind.clone(),
                status: proposal.status.clone(),
                lmi: proposal.lmi.clone(),
                created_at: proposal.created,
            }
        }

        fn paginate<T: Clone>(items: Vec<T>, page: u32, size: u32) -> Page<T> {
            let total_items = items.len() as u64;
            let start = ((page.max(1) - 1) * size) as usize;
            let items = items
                .into_iter()
                .skip(start)
                .take(size as usize)
                .collect();
            Page {
                total_items,
                page,
                size,
                items,
            }
        }
    }

    impl DomainPort for MockProposalDirectory {}

    #[async_trait]
    impl HealthCheckable for MockProposalDirectory {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-proposal-directory".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ProposalDirectory for MockProposalDirectory {
        async fn list(
            &self,
            _token: &str,
            query: &ProposalQuery,
        ) -> Result<Page<ProposalSummary>, PortError> {
            self.guard_session().await?;
            let store = self.proposals.read().await;
            let mut matches: Vec<ProposalSummary> = store
                .values()
                .filter(|p| {
                    query
                        .document
                        .as_deref()
                        .map_or(true, |d| p.customer.document.contains(d))
                })
                .filter(|p| query.lmi_range.map_or(true, |lmi| p.lmi.id == lmi))
                .filter(|p| {
                    query
                        .product_uid
                        .map_or(true, |uid| p.product.uid == uid)
                })
                .map(Self::summarize)
                .collect();
            matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(Self::paginate(matches, query.page, query.size))
        }

        async fn list_canceled(
            &self,
            _token: &str,
            query: &CanceledQuery,
        ) -> Result<Page<ProposalSummary>, PortError> {
            self.guard_session().await?;
            let canceled = self.canceled.read().await;
            let matches: Vec<ProposalSummary> = canceled
                .iter()
                .filter(|p| {
                    query
                        .document
                        .as_deref()
                        .map_or(true, |d| p.customer.document.contains(d))
                })
                .cloned()
                .collect();
            Ok(Self::paginate(matches, query.page, query.size))
        }

        async fn create(
            &self,
            _token: &str,
            request: &CreateProposalRequest,
        ) -> Result<ProposalId, PortError> {
            self.guard_session().await?;
            let id = ProposalId::new();
            let now = Utc::now();
            let status = ProposalStatus::AwaitingFillout;
            let proposal = Proposal {
                uid: id,
                code: format!("P-{}", &id.as_uuid().simple().to_string()[..8]),
                customer: crate::proposal::Customer {
                    uid: Some(Uuid::new_v4()),
                    document: request.document.clone(),
                    name: request.name.clone(),
                    social_name: request.social_name.clone(),
                    email: request.email.clone(),
                    birthdate: Some(request.birth_date),
                },
                product: ProductRef {
                    uid: request.product_id,
                    name: "Produto de Teste".to_string(),
                },
                kind: LookupRef {
                    id: request.type_id,
                    description: String::new(),
                },
                lmi: LookupRef {
                    id: request.lmi_range_id,
                    description: String::new(),
                },
                status: StatusRef::from(status),
                dfi_status: None,
                capital_mip: Some(core_kernel::Money::brl(request.capital_mip)),
                capital_dfi: Some(core_kernel::Money::brl(request.capital_dfi)),
                operation_value: None,
                deadline_months: None,
                property_type_id: None,
                address: None,
                participant_type: None,
                contract_number: None,
                created: now,
                history: vec![Interaction {
                    status_id: status.code(),
                    description: "Proposta criada".to_string(),
                    created: now,
                    actor: None,
                }],
            };
            self.proposals.write().await.insert(id, proposal);
            Ok(id)
        }

        async fn get(&self, _token: &str, id: ProposalId) -> Result<Proposal, PortError> {
            self.guard_session().await?;
            self.proposals
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Proposal", id.to_string()))
        }

        async fn sign(&self, _token: &str, id: ProposalId) -> Result<(), PortError> {
            self.guard_session().await?;
            match *self.sign_failure.read().await {
                Some(SignFailure::Connection) => {
                    return Err(PortError::connection("connection reset by upstream"))
                }
                Some(SignFailure::Unauthorized) => {
                    return Err(PortError::unauthorized("token expired"))
                }
                None => {}
            }
            let mut store = self.proposals.write().await;
            let proposal = store
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("Proposal", id.to_string()))?;
            if proposal.status.status() != ProposalStatus::AwaitingFillout {
                return Err(PortError::validation(
                    "A proposta não pode ser atualizada para a situação solicitada",
                ));
            }
            let signed = ProposalStatus::Signed;
            proposal.status = StatusRef::from(signed);
            proposal.history.push(Interaction {
                status_id: signed.code(),
                description: "Proposta assinada".to_string(),
                created: Utc::now(),
                actor: None,
            });
            Ok(())
        }

        async fn change_status(
            &self,
            _token: &str,
            id: ProposalId,
            request: &StatusChangeRequest,
        ) -> Result<(), PortError> {
            self.guard_session().await?;
            let mut store = self.proposals.write().await;
            let proposal = store
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("Proposal", id.to_string()))?;
            let target = request.status();

            match request.track {
                CoverageTrack::Mip => {
                    if !proposal.status.status().can_transition_to(target) {
                        return Err(PortError::validation(
                            "A proposta não pode ser atualizada para a situação solicitada",
                        ));
                    }
                    proposal.status = StatusRef::from(target);
                }
                // The DFI track keeps its own status: it starts when the
                // reports are concluded and only then accepts a verdict.
                CoverageTrack::Dfi => {
                    let current = proposal.dfi_status.as_ref().map(StatusRef::status);
                    let allowed = match current {
                        None => target == ProposalStatus::AwaitingDfiAnalysis,
                        Some(current) => current.can_transition_to(target),
                    };
                    if !allowed {
                        return Err(PortError::validation(
                            "A proposta não pode ser atualizada para a situação solicitada",
                        ));
                    }
                    proposal.dfi_status = Some(StatusRef::from(target));
                }
            }

            proposal.history.push(Interaction {
                status_id: target.code(),
                description: request.description.clone(),
                created: Utc::now(),
                actor: None,
            });
            Ok(())
        }

        async fn health_answers(
            &self,
            _token: &str,
            id: ProposalId,
        ) -> Result<Vec<HealthAnswer>, PortError> {
            self.guard_session().await?;
            Ok(self
                .health
                .read()
                .await
                .get(&id)
                .cloned()
                .unwrap_or_default())
        }

        async fn submit_health_answers(
            &self,
            _token: &str,
            id: ProposalId,
            answers: &[HealthAnswer],
        ) -> Result<(), PortError> {
            self.guard_session().await?;
            if !self.proposals.read().await.contains_key(&id) {
                return Err(PortError::not_found("Proposal", id.to_string()));
            }
            self.health.write().await.insert(id, answers.to_vec());
            Ok(())
        }
    }

    /// In-memory lookup source with fixed reference data.
    #[derive(Debug, Default)]
    pub struct MockLookupPort {
        groups: Arc<RwLock<HashMap<&'static str, Vec<LookupRef>>>>,
        products: Arc<RwLock<Vec<ProductRef>>>,
    }

    impl MockLookupPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn set_group(&self, group: DomainGroup, entries: Vec<LookupRef>) {
            self.groups.write().await.insert(group.group_name(), entries);
        }

        pub async fn set_products(&self, products: Vec<ProductRef>) {
            *self.products.write().await = products;
        }
    }

    impl DomainPort for MockLookupPort {}

    #[async_trait]
    impl HealthCheckable for MockLookupPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-lookup-port".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl LookupPort for MockLookupPort {
        async fn domain_group(
            &self,
            _token: &str,
            group: DomainGroup,
        ) -> Result<Vec<LookupRef>, PortError> {
            Ok(self
                .groups
                .read()
                .await
                .get(group.group_name())
                .cloned()
                .unwrap_or_default())
        }

        async fn products(&self, _token: &str) -> Result<Vec<ProductRef>, PortError> {
            Ok(self.products.read().await.clone())
        }
    }

}
