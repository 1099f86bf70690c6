//! Credit Operation Domain
//!
//! This crate models multi-participant credit operations: the aggregate of
//! participant proposals under one contract number, the all-or-nothing lock
//! on their shared financing fields, the two-step shared-field edit, and the
//! per-participant contact edit that stays open after the lock engages.
//!
//! # Lock Model
//!
//! Financing terms (product, term, property type, capitals, operation value)
//! exist once per contract but are stored on every participant. They may only
//! change while every participant is still filling out the DPS: one signature
//! anywhere in the operation freezes them for good. [`EditLock`] is the
//! single source of that verdict; the mock port re-checks it the way the
//! upstream does.
//!
//! # Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use core_kernel::OperationNumber;
//! use domain_operation::{Operation, OperationEditDraft, MSG_PRODUCT_REQUIRED};
//!
//! let operation = Operation {
//!     contract_number: OperationNumber::new("CT-2026-0001"),
//!     sales_channel_uid: None,
//!     total_participants_expected: None,
//!     participants: Vec::new(),
//! };
//!
//! // A blank draft fails the local rules before any wire call.
//! let today = NaiveDate::from_ymd_opt(2026, 8, 21).unwrap();
//! let result = OperationEditDraft::default()
//!     .validate(&operation, today)
//!     .unwrap_err();
//! assert_eq!(result.error_for("productId"), Some(MSG_PRODUCT_REQUIRED));
//! ```

pub mod contact;
pub mod edit;
pub mod error;
pub mod lock;
pub mod operation;
pub mod ports;
pub mod service;

pub use contact::ContactUpdate;
pub use edit::{
    FieldChange, OperationEditDraft, MAX_AGE_AT_TERM_END, MSG_INVALID_DEADLINE,
    MSG_INVALID_OPERATION_VALUE, MSG_INVALID_PARTICIPANTS, MSG_INVALID_PROPERTY_TYPE,
    MSG_MAX_AGE_EXCEEDED, MSG_PRODUCT_REQUIRED, MSG_SAVE_BUSINESS, MSG_SAVE_SUCCESS,
    MSG_SAVE_TRANSPORT,
};
pub use error::OperationError;
pub use lock::{EditLock, BANNER_NOT_FILLOUT, BANNER_SIGNED, MSG_LOCK_NOT_FILLOUT, MSG_LOCK_SIGNED};
pub use operation::Operation;
pub use ports::{OperationPort, UpdateOperationRequest, OPERATION_TYPE_ID};
pub use service::{OperationEditPage, OperationService, SaveOutcome};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockOperationPort;
