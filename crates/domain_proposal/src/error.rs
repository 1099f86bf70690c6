//! Proposal domain errors

use thiserror::Error;

use crate::validation::ValidationResult;

/// Errors produced by proposal operations.
#[derive(Debug, Error)]
pub enum ProposalError {
    /// Input failed the desk's local rules; no upstream call was made.
    #[error("dados inválidos")]
    Validation(ValidationResult),

    #[error("proposta não encontrada: {0}")]
    NotFound(String),

    #[error(transparent)]
    Port(#[from] core_kernel::PortError),
}

impl ProposalError {
    pub fn validation(result: ValidationResult) -> Self {
        Self::Validation(result)
    }
}
