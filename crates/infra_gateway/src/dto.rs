//! Upstream wire shapes
//!
//! The upstream is inconsistent about reference pairs: listing rows key them
//! as `{ code, description }`, the detail endpoint and the domain lookups as
//! `{ id, description }`. Both normalize into the one canonical shape the
//! domain crates use. Fields the desk never reads are not declared; serde
//! skips them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::temporal::parse_birth_date;
use core_kernel::{DocumentId, Money, OperationNumber, ProposalId};
use domain_proposal::interaction::{Interaction, InteractionActor};
use domain_proposal::proposal::{
    Address, Customer, LookupRef, ParticipantKind, ProductRef, Proposal, ProposalSummary,
    StatusRef,
};
use domain_review::document::{CreatedByUser, ReportDocument};

/// Reference pair as the detail endpoint and the lookups serve it.
#[derive(Debug, Deserialize)]
pub(crate) struct RefDto {
    pub id: i32,
    #[serde(default)]
    pub description: String,
}

impl RefDto {
    pub fn into_lookup(self) -> LookupRef {
        LookupRef {
            id: self.id,
            description: self.description,
        }
    }

    pub fn into_status(self) -> StatusRef {
        StatusRef {
            id: self.id,
            description: self.description,
        }
    }
}

/// Reference pair as the listing rows serve it.
#[derive(Debug, Deserialize)]
pub(crate) struct CodeRefDto {
    pub code: i32,
    #[serde(default)]
    pub description: String,
}

impl CodeRefDto {
    pub fn into_lookup(self) -> LookupRef {
        LookupRef {
            id: self.code,
            description: self.description,
        }
    }

    pub fn into_status(self) -> StatusRef {
        StatusRef {
            id: self.code,
            description: self.description,
        }
    }
}

/// The proponent as the upstream serves them. Listing rows omit the email
/// and birthdate; the birthdate arrives as a date or a full timestamp.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CustomerDto {
    #[serde(default)]
    pub uid: Option<Uuid>,
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub social_name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub birthdate: Option<String>,
}

impl CustomerDto {
    pub fn into_domain(self) -> Customer {
        Customer {
            uid: self.uid,
            document: self.document,
            name: self.name,
            social_name: self.social_name,
            email: self.email,
            birthdate: self
                .birthdate
                .as_deref()
                .and_then(|raw| parse_birth_date(raw).ok()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductDto {
    pub uid: Uuid,
    #[serde(default)]
    pub name: String,
}

impl ProductDto {
    pub fn into_domain(self) -> ProductRef {
        ProductRef {
            uid: self.uid,
            name: self.name,
        }
    }
}

/// One row of `v1/Proposal/all` / `v1/Proposal/canceled`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProposalSummaryDto {
    pub uid: ProposalId,
    #[serde(default)]
    pub code: String,
    pub customer: CustomerDto,
    pub product: ProductDto,
    #[serde(rename = "type")]
    pub kind: CodeRefDto,
    pub status: CodeRefDto,
    pub lmi: CodeRefDto,
    pub created_at: DateTime<Utc>,
}

impl ProposalSummaryDto {
    pub fn into_domain(self) -> ProposalSummary {
        ProposalSummary {
            uid: self.uid,
            code: self.code,
            customer: self.customer.into_domain(),
            product: self.product.into_domain(),
            kind: self.kind.into_lookup(),
            status: self.status.into_status(),
            lmi: self.lmi.into_lookup(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ActorDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A history entry. Descriptions arrive null on migrated records.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InteractionDto {
    pub status_id: i32,
    #[serde(default)]
    pub description: Option<String>,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub actor: Option<ActorDto>,
}

impl InteractionDto {
    pub fn into_domain(self) -> Interaction {
        Interaction {
            status_id: self.status_id,
            description: self.description.unwrap_or_default(),
            created: self.created,
            actor: self.actor.and_then(|actor| {
                actor.name.map(|name| InteractionActor {
                    name,
                    email: actor.email,
                })
            }),
        }
    }
}

/// The full proposal as `v1/Proposal/{uid}` serves it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProposalDto {
    pub uid: ProposalId,
    #[serde(default)]
    pub code: String,
    pub customer: CustomerDto,
    pub product: ProductDto,
    #[serde(rename = "type")]
    pub kind: RefDto,
    pub lmi: RefDto,
    pub status: RefDto,
    #[serde(default)]
    pub dfi_status: Option<RefDto>,
    #[serde(default, rename = "capitalMIP")]
    pub capital_mip: Option<Decimal>,
    #[serde(default, rename = "capitalDFI")]
    pub capital_dfi: Option<Decimal>,
    #[serde(default)]
    pub operation_value: Option<Decimal>,
    #[serde(default)]
    pub deadline_months: Option<u32>,
    #[serde(default)]
    pub property_type_id: Option<i32>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub participant_type: Option<ParticipantKind>,
    #[serde(default)]
    pub contract_number: Option<String>,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub history: Vec<InteractionDto>,
}

impl ProposalDto {
    pub fn into_domain(self) -> Proposal {
        Proposal {
            uid: self.uid,
            code: self.code,
            customer: self.customer.into_domain(),
            product: self.product.into_domain(),
            kind: self.kind.into_lookup(),
            lmi: self.lmi.into_lookup(),
            status: self.status.into_status(),
            dfi_status: self.dfi_status.map(RefDto::into_status),
            capital_mip: self.capital_mip.map(Money::brl),
            capital_dfi: self.capital_dfi.map(Money::brl),
            operation_value: self.operation_value.map(Money::brl),
            deadline_months: self.deadline_months,
            property_type_id: self.property_type_id,
            address: self.address,
            participant_type: self.participant_type,
            contract_number: self.contract_number.map(OperationNumber::new),
            created: self.created,
            history: self
                .history
                .into_iter()
                .map(InteractionDto::into_domain)
                .collect(),
        }
    }
}

/// One row of `v1/Proposal/operation/{number}/participants`.
///
/// The rows are thin: no status, a partial customer. The detail endpoint is
/// authoritative; rows only fill what the detail leaves blank and are the
/// sole carrier of `participantType` and `totalParticipants`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ParticipantDto {
    pub uid: ProposalId,
    #[serde(default)]
    pub participant_type: Option<ParticipantKind>,
    #[serde(default, rename = "capitalMIP")]
    pub capital_mip: Option<Decimal>,
    #[serde(default, rename = "capitalDFI")]
    pub capital_dfi: Option<Decimal>,
    #[serde(default)]
    pub operation_value: Option<Decimal>,
    #[serde(default)]
    pub deadline_months: Option<u32>,
    #[serde(default)]
    pub property_type_id: Option<i32>,
    #[serde(default)]
    pub total_participants: Option<u32>,
    #[serde(default)]
    pub contract_number: Option<String>,
}

impl ParticipantDto {
    /// Fills gaps in the fetched detail without overwriting it.
    pub fn merge_into(self, proposal: &mut Proposal) {
        if proposal.participant_type.is_none() {
            proposal.participant_type = self.participant_type;
        }
        if proposal.capital_mip.is_none() {
            proposal.capital_mip = self.capital_mip.map(Money::brl);
        }
        if proposal.capital_dfi.is_none() {
            proposal.capital_dfi = self.capital_dfi.map(Money::brl);
        }
        if proposal.operation_value.is_none() {
            proposal.operation_value = self.operation_value.map(Money::brl);
        }
        if proposal.deadline_months.is_none() {
            proposal.deadline_months = self.deadline_months;
        }
        if proposal.property_type_id.is_none() {
            proposal.property_type_id = self.property_type_id;
        }
        if proposal.contract_number.is_none() {
            proposal.contract_number = self.contract_number.map(OperationNumber::new);
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatedByUserDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DocumentDto {
    pub uid: DocumentId,
    #[serde(default)]
    pub document_name: String,
    #[serde(default)]
    pub document_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_by_user: Option<CreatedByUserDto>,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
}

impl DocumentDto {
    pub fn into_domain(self) -> ReportDocument {
        ReportDocument {
            uid: self.uid,
            document_name: self.document_name,
            document_url: self.document_url,
            description: self.description,
            created_by_user: self.created_by_user.map(|user| CreatedByUser {
                name: user.name,
                email: user.email,
            }),
            created: self.created,
            updated: self.updated,
        }
    }
}

/// Body of `POST v1/Proposal/{uid}/document`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadDocumentBody<'a> {
    pub document_name: &'a str,
    pub description: String,
    pub string_base64: &'a str,
}

/// `data` of a successful create: the new proposal's uid, bare or keyed.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CreatedDto {
    Keyed { uid: ProposalId },
    Bare(ProposalId),
}

impl CreatedDto {
    pub fn uid(self) -> ProposalId {
        match self {
            Self::Keyed { uid } => uid,
            Self::Bare(uid) => uid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_proposal::status::ProposalStatus;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_detail_normalizes_refs_money_and_history() {
        let detail: ProposalDto = serde_json::from_value(json!({
            "uid": "5f0f8a3e-1d3a-4a3f-9f6e-7b2c9d4e8a10",
            "code": "P-2026-000123",
            "customer": {
                "uid": "0a6a1c3b-9d2e-4f10-8c5a-1b2c3d4e5f60",
                "document": "52998224725",
                "name": "Maria da Silva",
                "email": "maria@exemplo.com.br",
                "birthdate": "1985-03-12T00:00:00"
            },
            "product": { "uid": "7c1d2e3f-4a5b-6c7d-8e9f-0a1b2c3d4e5f", "name": "Prestamista" },
            "type": { "id": 2, "description": "Operação" },
            "lmi": { "id": 3, "description": "Até R$ 500.000,00" },
            "status": { "id": 21, "description": "DPS assinada" },
            "dfiStatus": { "id": 29, "description": "Aguardando análise DFI" },
            "capitalMIP": 250000,
            "capitalDFI": 400000,
            "operationValue": 380000,
            "deadlineMonths": 240,
            "propertyTypeId": 1,
            "participantType": "P",
            "contractNumber": "  CT-2026-0042 ",
            "created": "2026-07-01T12:00:00Z",
            "history": [
                { "statusId": 10, "description": "Proposta criada", "created": "2026-07-01T12:00:00Z" },
                { "statusId": 21, "description": null, "created": "2026-07-02T09:00:00Z",
                  "actor": { "name": "João Vendedor" } }
            ]
        }))
        .unwrap();

        let proposal = detail.into_domain();
        assert_eq!(proposal.status.status(), ProposalStatus::Signed);
        assert_eq!(
            proposal.dfi_status_code(),
            Some(ProposalStatus::AwaitingDfiAnalysis)
        );
        assert_eq!(proposal.capital_mip, Some(Money::brl(dec!(250_000))));
        assert_eq!(proposal.operation_value, Some(Money::brl(dec!(380_000))));
        assert_eq!(proposal.participant_type, Some(ParticipantKind::Principal));
        assert_eq!(
            proposal.contract_number.as_ref().map(OperationNumber::as_str),
            Some("CT-2026-0042")
        );
        assert_eq!(
            proposal.customer.birthdate,
            chrono::NaiveDate::from_ymd_opt(1985, 3, 12)
        );
        assert_eq!(proposal.history.len(), 2);
        assert_eq!(proposal.history[1].description, "");
        assert_eq!(
            proposal.history[1].actor.as_ref().map(|a| a.name.as_str()),
            Some("João Vendedor")
        );
    }

    #[test]
    fn test_listing_rows_key_refs_by_code() {
        let row: ProposalSummaryDto = serde_json::from_value(json!({
            "uid": "5f0f8a3e-1d3a-4a3f-9f6e-7b2c9d4e8a10",
            "code": "P-2026-000123",
            "customer": { "document": "52998224725", "name": "Maria da Silva" },
            "product": { "uid": "7c1d2e3f-4a5b-6c7d-8e9f-0a1b2c3d4e5f", "name": "Prestamista" },
            "type": { "code": 2, "description": "Operação" },
            "status": { "code": 10, "description": "Aguardando preenchimento" },
            "lmi": { "code": 3, "description": "Até R$ 500.000,00" },
            "createdAt": "2026-07-01T12:00:00Z"
        }))
        .unwrap();

        let summary = row.into_domain();
        assert_eq!(summary.status.id, 10);
        assert_eq!(summary.status.status(), ProposalStatus::AwaitingFillout);
        assert_eq!(summary.lmi.id, 3);
        assert_eq!(summary.customer.email, "");
        assert_eq!(summary.customer.birthdate, None);
    }

    #[test]
    fn test_unparseable_birthdate_reads_as_absent() {
        let customer: CustomerDto = serde_json::from_value(json!({
            "document": "52998224725",
            "name": "Maria da Silva",
            "birthdate": "12/03/1985"
        }))
        .unwrap();
        assert_eq!(customer.into_domain().birthdate, None);
    }

    #[test]
    fn test_participant_row_fills_gaps_without_overwriting() {
        let row: ParticipantDto = serde_json::from_value(json!({
            "uid": "5f0f8a3e-1d3a-4a3f-9f6e-7b2c9d4e8a10",
            "participantType": "C",
            "capitalMIP": 100000,
            "operationValue": 380000,
            "totalParticipants": 2,
            "contractNumber": "CT-2026-0042"
        }))
        .unwrap();

        let detail: ProposalDto = serde_json::from_value(json!({
            "uid": "5f0f8a3e-1d3a-4a3f-9f6e-7b2c9d4e8a10",
            "code": "P-1",
            "customer": { "document": "52998224725", "name": "Ana", "email": "ana@x.br" },
            "product": { "uid": "7c1d2e3f-4a5b-6c7d-8e9f-0a1b2c3d4e5f", "name": "P" },
            "type": { "id": 2, "description": "" },
            "lmi": { "id": 3, "description": "" },
            "status": { "id": 10, "description": "" },
            "capitalMIP": 250000,
            "created": "2026-07-01T12:00:00Z"
        }))
        .unwrap();
        let mut proposal = detail.into_domain();

        row.merge_into(&mut proposal);
        // The detail's capital wins; the row supplies what the detail lacks.
        assert_eq!(proposal.capital_mip, Some(Money::brl(dec!(250_000))));
        assert_eq!(proposal.operation_value, Some(Money::brl(dec!(380_000))));
        assert_eq!(
            proposal.participant_type,
            Some(ParticipantKind::CoParticipant)
        );
        assert_eq!(
            proposal.contract_number.as_ref().map(OperationNumber::as_str),
            Some("CT-2026-0042")
        );
    }

    #[test]
    fn test_document_row_tolerates_missing_uploader() {
        let dto: DocumentDto = serde_json::from_value(json!({
            "uid": "b9c7a3f0-5f2e-4d7a-9b1c-2e8f4a6d0c3b",
            "documentName": "laudo.pdf",
            "documentUrl": "https://storage.example/laudo.pdf",
            "description": "MIP: laudo",
            "created": "2026-07-02T14:00:00Z"
        }))
        .unwrap();
        let document = dto.into_domain();
        assert_eq!(document.document_name, "laudo.pdf");
        assert_eq!(document.created_by_user, None);
    }

    #[test]
    fn test_created_data_accepts_both_shapes() {
        let keyed: CreatedDto =
            serde_json::from_value(json!({ "uid": "5f0f8a3e-1d3a-4a3f-9f6e-7b2c9d4e8a10" }))
                .unwrap();
        let bare: CreatedDto =
            serde_json::from_value(json!("5f0f8a3e-1d3a-4a3f-9f6e-7b2c9d4e8a10")).unwrap();
        assert_eq!(keyed.uid(), bare.uid());
    }

    #[test]
    fn test_upload_body_uses_the_upstream_field_names() {
        let body = UploadDocumentBody {
            document_name: "laudo.pdf",
            description: "DFI: vistoria".to_string(),
            string_base64: "JVBERi0xLjc=",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["documentName"], "laudo.pdf");
        assert_eq!(json["description"], "DFI: vistoria");
        assert_eq!(json["stringBase64"], "JVBERi0xLjc=");
    }
}
