//! Report Review Domain
//!
//! This crate models the MIP and DFI report panels: who may act on them,
//! the exact status transitions their actions issue, document uploads, and
//! archive viewing.
//!
//! # Capability Model
//!
//! Every role-gated affordance is resolved by [`Capabilities::resolve`] from
//! the caller's roles and the proposal's observed state. The interface serves
//! the resolved booleans as-is and the service re-resolves them before any
//! mutation, so both panels enforce exactly one rule set.
//!
//! # Examples
//!
//! ```rust
//! use domain_review::{Capabilities, Role};
//! use domain_proposal::status::{CoverageTrack, ProposalStatus};
//!
//! // A medical underwriter on a proposal under medical analysis.
//! let caps = Capabilities::resolve(
//!     &[Role::SubscritorMed],
//!     ProposalStatus::AwaitingMedicalAnalysis,
//!     None,
//!     CoverageTrack::Mip,
//!     true,
//!     false,
//! );
//! assert!(caps.can_approve && caps.can_reject);
//! assert!(!caps.can_upload);
//! ```

pub mod archive;
pub mod capabilities;
pub mod document;
pub mod error;
pub mod ports;
pub mod review;
pub mod role;
pub mod service;
pub mod upload;

pub use archive::{decode_archive, ArchiveError, DecodedArchive};
pub use capabilities::Capabilities;
pub use document::{CreatedByUser, ReportDocument};
pub use error::ReviewError;
pub use ports::ReportStore;
pub use review::{
    conclude_prompt, conclude_request, decision_request, ReviewDecision, MSG_FORBIDDEN,
    MSG_NO_DOCUMENTS,
};
pub use role::Role;
pub use service::{ReportPanel, ReviewService};
pub use upload::DocumentUpload;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockReportStore;
