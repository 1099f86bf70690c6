//! Review domain errors

use thiserror::Error;

use core_kernel::PortError;
use domain_proposal::validation::ValidationResult;

use crate::archive::ArchiveError;

/// Errors produced by report-panel operations.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// The caller's roles do not open this action.
    #[error("{0}")]
    Forbidden(&'static str),

    /// Conclusion attempted with nothing uploaded.
    #[error("É necessário ter pelo menos um documento carregado para concluir o envio.")]
    NoDocuments,

    /// Input failed the desk's local rules; no upstream call was made.
    #[error("dados inválidos")]
    Validation(ValidationResult),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Port(#[from] PortError),
}
