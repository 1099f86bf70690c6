//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the fields they care about; everything else comes from
//! the fixtures.

use chrono::NaiveDate;
use core_kernel::{Money, OperationNumber, ProposalId};

use domain_operation::Operation;
use domain_proposal::{
    Customer, Interaction, InteractionActor, ParticipantKind, Proposal, ProposalStatus, StatusRef,
};
use uuid::Uuid;

use crate::fixtures::{CpfFixtures, LookupFixtures, MoneyFixtures, TemporalFixtures};

/// Builder for proposal read models
pub struct ProposalBuilder {
    uid: ProposalId,
    code: String,
    status: ProposalStatus,
    dfi_status: Option<ProposalStatus>,
    document: String,
    name: String,
    email: String,
    birthdate: Option<NaiveDate>,
    capital_mip: Option<Money>,
    capital_dfi: Option<Money>,
    operation_value: Option<Money>,
    deadline_months: Option<u32>,
    property_type_id: Option<i32>,
    participant_type: Option<ParticipantKind>,
    contract_number: Option<OperationNumber>,
    history: Vec<Interaction>,
}

impl Default for ProposalBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProposalBuilder {
    /// Creates a new builder: a principal proposal awaiting fill-out, with
    /// the default capitals and a single creation entry in its history.
    pub fn new() -> Self {
        Self {
            uid: ProposalId::new(),
            code: "P-0A1B2C3D".to_string(),
            status: ProposalStatus::AwaitingFillout,
            dfi_status: None,
            document: CpfFixtures::principal().to_string(),
            name: "Ana Beatriz Souza".to_string(),
            email: "ana.souza@example.com.br".to_string(),
            birthdate: Some(TemporalFixtures::birthdate()),
            capital_mip: Some(MoneyFixtures::capital_mip()),
            capital_dfi: Some(MoneyFixtures::capital_dfi()),
            operation_value: Some(MoneyFixtures::operation_value()),
            deadline_months: Some(240),
            property_type_id: Some(1),
            participant_type: Some(ParticipantKind::Principal),
            contract_number: Some(OperationNumber::new("0230456789")),
            history: vec![Interaction {
                status_id: ProposalStatus::AwaitingFillout.code(),
                description: "Proposta criada".to_string(),
                created: TemporalFixtures::created(),
                actor: None,
            }],
        }
    }

    /// Sets the proposal UID
    pub fn with_uid(mut self, uid: ProposalId) -> Self {
        self.uid = uid;
        self
    }

    /// Sets the MIP-lane status
    pub fn with_status(mut self, status: ProposalStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the DFI-lane status
    pub fn with_dfi_status(mut self, status: ProposalStatus) -> Self {
        self.dfi_status = Some(status);
        self
    }

    /// Sets the proponent document
    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = document.into();
        self
    }

    /// Sets the proponent name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the proponent birth date
    pub fn with_birthdate(mut self, birthdate: NaiveDate) -> Self {
        self.birthdate = Some(birthdate);
        self
    }

    /// Sets the MIP capital
    pub fn with_capital_mip(mut self, capital: Money) -> Self {
        self.capital_mip = Some(capital);
        self
    }

    /// Sets the DFI capital
    pub fn with_capital_dfi(mut self, capital: Money) -> Self {
        self.capital_dfi = Some(capital);
        self
    }

    /// Sets the financed amount
    pub fn with_operation_value(mut self, value: Money) -> Self {
        self.operation_value = Some(value);
        self
    }

    /// Sets the deadline in months
    pub fn with_deadline_months(mut self, months: u32) -> Self {
        self.deadline_months = Some(months);
        self
    }

    /// Sets the property type
    pub fn with_property_type(mut self, id: i32) -> Self {
        self.property_type_id = Some(id);
        self
    }

    /// Marks the proposal as a co-participant of the given contract
    pub fn as_co_participant(mut self, contract: &str) -> Self {
        self.participant_type = Some(ParticipantKind::CoParticipant);
        self.contract_number = Some(OperationNumber::new(contract));
        self.document = CpfFixtures::co_participant().to_string();
        self.name = "Carlos Eduardo Lima".to_string();
        self.email = "carlos.lima@example.com.br".to_string();
        self
    }

    /// Sets the contract number
    pub fn with_contract_number(mut self, contract: &str) -> Self {
        self.contract_number = Some(OperationNumber::new(contract));
        self
    }

    /// Replaces the history
    pub fn with_history(mut self, history: Vec<Interaction>) -> Self {
        self.history = history;
        self
    }

    /// Appends a history entry
    pub fn with_history_entry(
        mut self,
        status: ProposalStatus,
        description: impl Into<String>,
        actor: Option<&str>,
    ) -> Self {
        self.history.push(Interaction {
            status_id: status.code(),
            description: description.into(),
            created: TemporalFixtures::created(),
            actor: actor.map(|name| InteractionActor {
                name: name.to_string(),
                email: None,
            }),
        });
        self
    }

    /// Builds the proposal
    pub fn build(self) -> Proposal {
        Proposal {
            uid: self.uid,
            code: self.code,
            customer: Customer {
                uid: Some(Uuid::new_v4()),
                document: self.document,
                name: self.name,
                social_name: None,
                email: self.email,
                birthdate: self.birthdate,
            },
            product: LookupFixtures::product(),
            kind: LookupFixtures::kind(),
            lmi: LookupFixtures::lmi(),
            status: StatusRef::from(self.status),
            dfi_status: self.dfi_status.map(StatusRef::from),
            capital_mip: self.capital_mip,
            capital_dfi: self.capital_dfi,
            operation_value: self.operation_value,
            deadline_months: self.deadline_months,
            property_type_id: self.property_type_id,
            address: None,
            participant_type: self.participant_type,
            contract_number: self.contract_number,
            created: TemporalFixtures::created(),
            history: self.history,
        }
    }
}

/// Builder for operations (contracts with their participant proposals)
pub struct OperationBuilder {
    contract_number: OperationNumber,
    sales_channel_uid: Option<Uuid>,
    total_participants_expected: Option<u32>,
    participants: Vec<Proposal>,
}

impl Default for OperationBuilder {
    fn default() -> Self {
        Self::new("0230456789")
    }
}

impl OperationBuilder {
    pub fn new(contract: &str) -> Self {
        Self {
            contract_number: OperationNumber::new(contract),
            sales_channel_uid: None,
            total_participants_expected: Some(2),
            participants: Vec::new(),
        }
    }

    /// Sets the expected participant count
    pub fn with_expected(mut self, total: u32) -> Self {
        self.total_participants_expected = Some(total);
        self
    }

    /// Adds a participant, stamping it with this operation's contract number
    pub fn with_participant(mut self, proposal: Proposal) -> Self {
        let mut proposal = proposal;
        proposal.contract_number = Some(self.contract_number.clone());
        self.participants.push(proposal);
        self
    }

    /// Builds the operation. When no participant was added, a default
    /// principal awaiting fill-out is supplied.
    pub fn build(mut self) -> Operation {
        if self.participants.is_empty() {
            self = self.with_participant(ProposalBuilder::new().build());
        }
        Operation {
            contract_number: self.contract_number,
            sales_channel_uid: self.sales_channel_uid,
            total_participants_expected: self.total_participants_expected,
            participants: self.participants,
        }
    }
}
