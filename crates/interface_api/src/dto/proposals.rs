//! Proposal DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{Money, ProposalId};
use domain_proposal::validation::ProposalDraft;
use domain_proposal::{CanceledQuery, CreateProposalRequest, InteractionView, ProposalQuery};

fn default_page() -> u32 {
    1
}

fn default_size() -> u32 {
    10
}

fn default_type_id() -> i32 {
    2
}

/// Query string accepted by the proposal listings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProposalsQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default)]
    pub lmi_range: Option<i32>,
    #[serde(default)]
    pub product_uid: Option<Uuid>,
}

impl ListProposalsQuery {
    pub fn to_query(&self) -> ProposalQuery {
        ProposalQuery {
            page: self.page,
            size: self.size,
            document: normalized_document(self.document.as_deref()),
            lmi_range: self.lmi_range,
            product_uid: self.product_uid,
        }
    }

    pub fn to_canceled_query(&self) -> CanceledQuery {
        CanceledQuery {
            page: self.page,
            size: self.size,
            document: normalized_document(self.document.as_deref()),
        }
    }
}

/// The search box accepts masked CPFs; the upstream filter wants digits.
fn normalized_document(document: Option<&str>) -> Option<String> {
    let digits: String = document?
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    (!digits.is_empty()).then_some(digits)
}

/// Body of `POST /proposals`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProposalBody {
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub social_name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub product_id: Option<Uuid>,
    #[serde(default = "default_type_id")]
    pub type_id: i32,
    #[serde(default)]
    pub lmi_range_id: Option<i32>,
    #[serde(default)]
    pub capital_mip: Option<Decimal>,
    #[serde(default)]
    pub capital_dfi: Option<Decimal>,
}

impl CreateProposalBody {
    /// The shape the local validator checks.
    pub fn draft(&self) -> ProposalDraft {
        ProposalDraft {
            document: self.document.clone(),
            name: self.name.clone(),
            social_name: self.social_name.clone(),
            email: self.email.clone(),
            birth_date: self.birth_date,
            product_uid: self.product_id,
            lmi_range_id: self.lmi_range_id,
            capital_mip: self.capital_mip.map(Money::brl),
            capital_dfi: self.capital_dfi.map(Money::brl),
        }
    }

    /// The upstream payload. `None` when a required piece is missing, which
    /// `validate_draft` already reports field by field.
    pub fn into_request(self) -> Option<CreateProposalRequest> {
        let document: String = self
            .document
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        Some(CreateProposalRequest {
            document,
            name: self.name,
            social_name: self.social_name,
            email: self.email,
            birth_date: self.birth_date?,
            product_id: self.product_id?,
            type_id: self.type_id,
            lmi_range_id: self.lmi_range_id?,
            capital_mip: self.capital_mip?,
            capital_dfi: self.capital_dfi?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CreateProposalResponse {
    pub uid: ProposalId,
}

/// Body of `POST /proposals/{uid}/interactions`.
#[derive(Debug, Deserialize)]
pub struct AddInteractionBody {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionsResponse {
    pub items: Vec<InteractionView>,
    pub can_add: bool,
}
