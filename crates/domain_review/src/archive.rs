//! Archive content decoding
//!
//! Viewing a document fetches its base64 content and decodes it locally.
//! The three local failure shapes are distinct because each gets its own
//! user-facing message; transport failures are `PortError`s and keep their
//! generic presentation.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Dialog title when the archive is missing.
pub const TITLE_ARCHIVE_NOT_FOUND: &str = "Arquivo não encontrado";

/// Message when the archive is missing or not yet processed upstream.
pub const MSG_ARCHIVE_NOT_FOUND: &str =
    "O arquivo não foi encontrado ou ainda não foi processado.";

/// Message when the payload does not decode.
pub const MSG_ARCHIVE_CORRUPT: &str =
    "Erro ao processar o arquivo PDF. O arquivo pode estar corrompido.";

/// Message when the upstream call itself failed.
pub const MSG_ARCHIVE_TRANSPORT: &str =
    "Não foi possível carregar o arquivo. Tente novamente mais tarde.";

/// Fallback when the upstream refused the fetch without a message.
pub const MSG_ARCHIVE_FAILED: &str = "Erro ao carregar o arquivo.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArchiveError {
    #[error("O arquivo não foi encontrado ou ainda não foi processado.")]
    NotFound,
    #[error("Erro ao processar o arquivo PDF. O arquivo pode estar corrompido.")]
    Corrupt,
}

/// A decoded archive ready to serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedArchive {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Decodes the fetched content. Absent, blank or empty payloads are
/// `NotFound`; payloads that are not valid base64 are `Corrupt`.
pub fn decode_archive(content: Option<&str>) -> Result<DecodedArchive, ArchiveError> {
    let content = content
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(ArchiveError::NotFound)?;

    let bytes = STANDARD.decode(content).map_err(|_| ArchiveError::Corrupt)?;
    if bytes.is_empty() {
        return Err(ArchiveError::NotFound);
    }

    Ok(DecodedArchive {
        bytes,
        content_type: "application/pdf",
    })
}
