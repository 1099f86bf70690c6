//! Operation edit orchestration
//!
//! The lock is checked server-side before validation and again by the
//! upstream, so a stale edit page can never push changes into a signed
//! operation.

use chrono::NaiveDate;
use core_kernel::{OperationNumber, ProposalId};
use serde::Serialize;

use crate::contact::ContactUpdate;
use crate::edit::{FieldChange, OperationEditDraft};
use crate::error::OperationError;
use crate::lock::EditLock;
use crate::operation::Operation;
use crate::ports::OperationPort;

/// The edit page as served to the interface: current participants, lock
/// verdict and the prefilled form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationEditPage {
    pub operation: Operation,
    pub lock: EditLock,
    pub draft: OperationEditDraft,
}

/// What a submission produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Not confirmed yet: here is what would change.
    NeedsConfirmation(Vec<FieldChange>),
    /// Confirmed and applied upstream.
    Saved(Vec<FieldChange>),
}

/// Orchestrates contract-level edits and participant contact edits.
pub struct OperationService;

impl OperationService {
    /// Loads the edit page for one contract.
    pub async fn edit_page(
        port: &dyn OperationPort,
        token: &str,
        number: &OperationNumber,
    ) -> Result<OperationEditPage, OperationError> {
        let operation = port.operation(token, number).await?;
        let lock = operation.edit_lock();
        let draft = OperationEditDraft::from_operation(&operation);
        Ok(OperationEditPage {
            operation,
            lock,
            draft,
        })
    }

    /// Two-step save. An unconfirmed submission only reports which shared
    /// fields would change; a confirmed one applies them upstream.
    ///
    /// Both steps validate, so the confirmation summary is only ever shown
    /// for a draft that could actually be saved.
    pub async fn submit(
        port: &dyn OperationPort,
        token: &str,
        number: &OperationNumber,
        draft: &OperationEditDraft,
        confirmed: bool,
        today: NaiveDate,
    ) -> Result<SaveOutcome, OperationError> {
        let operation = port.operation(token, number).await?;

        let lock = operation.edit_lock();
        if let Some(reason) = lock.reason {
            return Err(OperationError::Locked(reason));
        }

        let request = draft
            .validate(&operation, today)
            .map_err(OperationError::Validation)?;
        let changes = draft.changed_fields(&operation);

        if !confirmed {
            return Ok(SaveOutcome::NeedsConfirmation(changes));
        }

        port.update_operation(token, number, &request).await?;
        tracing::info!(
            contract = %number,
            changed_fields = changes.len(),
            "operation shared fields updated"
        );
        Ok(SaveOutcome::Saved(changes))
    }

    /// Saves one participant's contact fields. Contact data stays editable
    /// after the shared-field lock engages.
    pub async fn update_contact(
        port: &dyn OperationPort,
        token: &str,
        proposal: ProposalId,
        update: &ContactUpdate,
    ) -> Result<(), OperationError> {
        let validation = update.validate();
        if !validation.is_valid {
            return Err(OperationError::Validation(validation));
        }
        port.update_contact(token, proposal, update).await?;
        Ok(())
    }
}
