//! Operation domain errors

use thiserror::Error;

use core_kernel::PortError;
use domain_proposal::validation::ValidationResult;

/// Errors produced by operation edit and contact edit flows.
#[derive(Debug, Error)]
pub enum OperationError {
    /// A participant already signed or left fill-out; shared fields are
    /// frozen. Carries the refusal text to display.
    #[error("{0}")]
    Locked(&'static str),

    /// Input failed the desk's local rules; no upstream call was made.
    #[error("dados inválidos")]
    Validation(ValidationResult),

    #[error(transparent)]
    Port(#[from] PortError),
}
