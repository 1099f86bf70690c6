//! Proposal aggregate views
//!
//! These are read models of the upstream policy system, normalized into one
//! canonical shape. The upstream is authoritative for all of them; the desk
//! never persists proposals locally.

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{Money, OperationNumber, ProposalId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interaction::Interaction;
use crate::status::ProposalStatus;

/// An id/description pair from one of the upstream domain groups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LookupRef {
    pub id: i32,
    pub description: String,
}

/// A product as listed by the upstream catalogue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub uid: Uuid,
    pub name: String,
}

/// Status code plus the upstream's display description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusRef {
    pub id: i32,
    pub description: String,
}

impl StatusRef {
    pub fn status(&self) -> ProposalStatus {
        ProposalStatus::from_code(self.id)
    }
}

impl From<ProposalStatus> for StatusRef {
    fn from(status: ProposalStatus) -> Self {
        Self {
            id: status.code(),
            description: status.label().unwrap_or("").to_string(),
        }
    }
}

/// The proponent as the upstream records them.
///
/// `document` stays a plain string: historical records may carry documents
/// the current CPF validation would refuse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<Uuid>,
    pub document: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_name: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<NaiveDate>,
}

/// Property address attached to the operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

/// Whether a participant anchors the operation or joins it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticipantKind {
    #[serde(rename = "P")]
    Principal,
    #[serde(rename = "C")]
    CoParticipant,
}

/// Full proposal view, as served by the detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub uid: ProposalId,
    pub code: String,
    pub customer: Customer,
    pub product: ProductRef,
    #[serde(rename = "type")]
    pub kind: LookupRef,
    pub lmi: LookupRef,
    pub status: StatusRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dfi_status: Option<StatusRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital_mip: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital_dfi: Option<Money>,
    /// Financed amount of the underlying credit operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_value: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_months: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_type: Option<ParticipantKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_number: Option<OperationNumber>,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub history: Vec<Interaction>,
}

impl Proposal {
    pub fn status_code(&self) -> ProposalStatus {
        self.status.status()
    }

    pub fn dfi_status_code(&self) -> Option<ProposalStatus> {
        self.dfi_status.as_ref().map(StatusRef::status)
    }
}

/// One row of the proposal listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProposalSummary {
    pub uid: ProposalId,
    pub code: String,
    pub customer: Customer,
    pub product: ProductRef,
    #[serde(rename = "type")]
    pub kind: LookupRef,
    pub status: StatusRef,
    pub lmi: LookupRef,
    pub created_at: DateTime<Utc>,
}
