//! Report documents
//!
//! Documents live upstream; the desk only lists, uploads, views and deletes
//! them. Each is tied to a proposal and a coverage track by the listing call.

use chrono::{DateTime, Utc};
use core_kernel::DocumentId;
use serde::{Deserialize, Serialize};

/// Who uploaded the document, when the upstream recorded it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatedByUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A report document as listed upstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    pub uid: DocumentId,
    pub document_name: String,
    pub document_url: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_user: Option<CreatedByUser>,
    pub created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}
