//! Report panel DTOs

use serde::Deserialize;

use domain_review::review::ReviewDecision;

/// Query string of `GET /proposals/{uid}/reports/{type}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelQuery {
    /// DFI panels opened from the pending-upload screen pass `true`; it
    /// turns on the upload/conclude capabilities for sales roles.
    #[serde(default)]
    pub require_upload: bool,
}

/// Body of `POST .../reports/{type}/review`.
#[derive(Debug, Deserialize)]
pub struct ReviewBody {
    pub decision: ReviewDecision,
    #[serde(default)]
    pub justification: String,
}

/// Body of `POST .../reports/{type}/conclude`.
#[derive(Debug, Deserialize)]
pub struct ConcludeBody {
    #[serde(default)]
    pub justification: String,
}
