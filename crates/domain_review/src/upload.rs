//! Document uploads
//!
//! Files travel base64-encoded in JSON, never as multipart. The free-text
//! message is rendered into the stored description prefixed with the track,
//! which is how the panels later tell their documents apart in mixed lists.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

use domain_proposal::status::CoverageTrack;
use domain_proposal::validation::{ValidationResult, MSG_REQUIRED};

/// A file upload as submitted by the panel.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpload {
    pub document_name: String,
    #[serde(default)]
    pub message: String,
    /// Base64-encoded file content.
    pub content: String,
}

impl DocumentUpload {
    /// Name and content are required; the content must be decodable base64.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::ok();
        if self.document_name.trim().is_empty() {
            result.add_error("documentName", MSG_REQUIRED);
        }
        if self.content.trim().is_empty() {
            result.add_error("content", MSG_REQUIRED);
        } else if STANDARD.decode(self.content.trim()).is_err() {
            result.add_error("content", "Arquivo inválido.");
        }
        result
    }

    /// The stored description: `MIP: {message}` / `DFI: {message}`.
    pub fn description(&self, track: CoverageTrack) -> String {
        format!("{}: {}", track, self.message.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload() -> DocumentUpload {
        DocumentUpload {
            document_name: "laudo.pdf".to_string(),
            message: "laudo cardiológico".to_string(),
            content: STANDARD.encode(b"%PDF-1.7 ..."),
        }
    }

    #[test]
    fn test_valid_upload_passes() {
        assert!(upload().validate().is_valid);
    }

    #[test]
    fn test_name_and_content_are_required() {
        let mut bad = upload();
        bad.document_name = " ".to_string();
        bad.content = String::new();
        let result = bad.validate();
        assert_eq!(result.error_for("documentName"), Some(MSG_REQUIRED));
        assert_eq!(result.error_for("content"), Some(MSG_REQUIRED));
    }

    #[test]
    fn test_garbage_content_is_refused() {
        let mut bad = upload();
        bad.content = "isto não é base64 %%".to_string();
        let result = bad.validate();
        assert_eq!(result.error_for("content"), Some("Arquivo inválido."));
    }

    #[test]
    fn test_description_carries_the_track_prefix() {
        assert_eq!(
            upload().description(CoverageTrack::Mip),
            "MIP: laudo cardiológico"
        );
        assert_eq!(
            upload().description(CoverageTrack::Dfi),
            "DFI: laudo cardiológico"
        );
    }
}
