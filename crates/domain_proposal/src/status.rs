//! Proposal lifecycle statuses
//!
//! Status codes mirror the upstream `SituacaoProposta` domain group. Only the
//! codes the desk acts on get a named variant; every other code is carried as
//! `Other` so listings never lose information.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lifecycle status of a proposal as tracked by the upstream policy system.
///
/// The numeric codes are the upstream's contract and must not be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProposalStatus {
    /// 4 - DPS signed, waiting for the medical (MIP) underwriting verdict
    AwaitingMedicalAnalysis,
    /// 5 - underwriting requested complementary documents
    AwaitingComplement,
    /// 6 - MIP report approved
    MedicalApproved,
    /// 10 - waiting for the proponent to fill out the DPS
    AwaitingFillout,
    /// 21 - DPS signed
    Signed,
    /// 29 - DFI report uploaded, waiting for the property verdict
    AwaitingDfiAnalysis,
    /// 35 - DFI report approved
    DfiApproved,
    /// 36 - DFI report rejected
    DfiRejected,
    /// 37 - MIP report rejected
    MedicalRejected,
    /// Any upstream code the desk does not act on
    Other(i32),
}

impl ProposalStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            4 => Self::AwaitingMedicalAnalysis,
            5 => Self::AwaitingComplement,
            6 => Self::MedicalApproved,
            10 => Self::AwaitingFillout,
            21 => Self::Signed,
            29 => Self::AwaitingDfiAnalysis,
            35 => Self::DfiApproved,
            36 => Self::DfiRejected,
            37 => Self::MedicalRejected,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::AwaitingMedicalAnalysis => 4,
            Self::AwaitingComplement => 5,
            Self::MedicalApproved => 6,
            Self::AwaitingFillout => 10,
            Self::Signed => 21,
            Self::AwaitingDfiAnalysis => 29,
            Self::DfiApproved => 35,
            Self::DfiRejected => 36,
            Self::MedicalRejected => 37,
            Self::Other(code) => code,
        }
    }

    /// Local pt-BR label for the codes the desk knows. Unknown codes fall
    /// back to the label carried by the `SituacaoProposta` lookup.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::AwaitingMedicalAnalysis => Some("Aguardando análise DPS"),
            Self::AwaitingComplement => Some("Aguardando complemento"),
            Self::MedicalApproved => Some("MIP aprovada"),
            Self::AwaitingFillout => Some("Aguardando preenchimento"),
            Self::Signed => Some("DPS assinada"),
            Self::AwaitingDfiAnalysis => Some("Aguardando análise DFI"),
            Self::DfiApproved => Some("DFI aprovada"),
            Self::DfiRejected => Some("DFI negada"),
            Self::MedicalRejected => Some("MIP negada"),
            Self::Other(_) => None,
        }
    }

    /// Transitions this desk itself issues against the upstream.
    ///
    /// The upstream remains authoritative and may allow more; this set is
    /// what the review, conclude, sign and complement actions produce.
    pub fn can_transition_to(self, target: ProposalStatus) -> bool {
        use ProposalStatus::*;
        matches!(
            (self, target),
            (AwaitingFillout, Signed)
                | (Signed, AwaitingMedicalAnalysis)
                | (Signed, AwaitingDfiAnalysis)
                | (AwaitingComplement, AwaitingMedicalAnalysis)
                | (AwaitingComplement, AwaitingComplement)
                | (AwaitingMedicalAnalysis, MedicalApproved)
                | (AwaitingMedicalAnalysis, MedicalRejected)
                | (AwaitingMedicalAnalysis, AwaitingComplement)
                | (MedicalApproved, AwaitingDfiAnalysis)
                | (AwaitingDfiAnalysis, DfiApproved)
                | (AwaitingDfiAnalysis, DfiRejected)
        )
    }

    /// The automatic signature event carries no human actor in the history.
    pub fn is_system_event(self) -> bool {
        matches!(self, Self::Signed)
    }
}

impl Serialize for ProposalStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

impl<'de> Deserialize<'de> for ProposalStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i32::deserialize(deserializer)?;
        Ok(ProposalStatus::from_code(code))
    }
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.label() {
            Some(label) => write!(f, "{} ({})", label, self.code()),
            None => write!(f, "situação {}", self.code()),
        }
    }
}

/// Coverage track a report or status change belongs to.
///
/// Rides the wire as the literal `MIP` / `DFI` strings, both as the document
/// type filter and as the `type` field of status changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CoverageTrack {
    Mip,
    Dfi,
}

impl CoverageTrack {
    pub fn code(self) -> &'static str {
        match self {
            Self::Mip => "MIP",
            Self::Dfi => "DFI",
        }
    }
}

impl std::fmt::Display for CoverageTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for CoverageTrack {
    type Err = core_kernel::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MIP" => Ok(Self::Mip),
            "DFI" => Ok(Self::Dfi),
            other => Err(core_kernel::CoreError::validation(format!(
                "tipo de laudo desconhecido: {other}"
            ))),
        }
    }
}
