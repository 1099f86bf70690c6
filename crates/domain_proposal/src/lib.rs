//! Proposal Domain
//!
//! This crate models housing-credit life insurance proposals as the desk
//! works with them: lifecycle statuses, the DPS fill-out flow with its
//! health declaration, and the interaction history shown to analysts.
//!
//! # Lifecycle Model
//!
//! A proposal advances along two coverage tracks that share one history:
//!
//! - **MIP** (death and disability): the proposal's main status. From
//!   fill-out (10) it is signed (21), sent for medical analysis (4),
//!   possibly returned for complement (5), and finally approved (6) or
//!   rejected (37).
//! - **DFI** (physical damage to the property): a parallel status carried
//!   separately. It starts when DFI reports are concluded (29) and ends
//!   approved (35) or rejected (36).
//!
//! Every transition is appended to the proposal's interaction history, so
//! the timeline screen replays both tracks in order.
//!
//! # Examples
//!
//! ```rust
//! use domain_proposal::status::ProposalStatus;
//!
//! let status = ProposalStatus::AwaitingFillout;
//! assert!(status.can_transition_to(ProposalStatus::Signed));
//! assert_eq!(status.label(), Some("Aguardando preenchimento"));
//!
//! // Medical analysis can go either way, or ask for more documents.
//! let under_review = ProposalStatus::AwaitingMedicalAnalysis;
//! assert!(under_review.can_transition_to(ProposalStatus::MedicalApproved));
//! assert!(under_review.can_transition_to(ProposalStatus::MedicalRejected));
//! assert!(under_review.can_transition_to(ProposalStatus::AwaitingComplement));
//! ```

pub mod error;
pub mod fillout;
pub mod health;
pub mod interaction;
pub mod ports;
pub mod proposal;
pub mod status;
pub mod validation;

pub use error::ProposalError;
pub use fillout::{FilloutService, FilloutStep, FilloutView, HealthSubmissionOutcome, SignOutcome};
pub use health::{
    ConditionAnswer, HealthAnswer, HealthFormSubmission, HealthQuestion, PrefilledHealthForm,
    HEALTH_QUESTIONNAIRE,
};
pub use interaction::{Interaction, InteractionActor, InteractionView};
pub use ports::{
    CanceledQuery, CreateProposalRequest, DomainGroup, LookupPort, Page, ProposalDirectory,
    ProposalQuery, StatusChangeRequest,
};
pub use proposal::{
    Address, Customer, LookupRef, ParticipantKind, ProductRef, Proposal, ProposalSummary,
    StatusRef,
};
pub use status::{CoverageTrack, ProposalStatus};
pub use validation::{FieldError, ProposalDraft, ProposalValidator, ValidationResult};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{MockLookupPort, MockProposalDirectory, SignFailure};
