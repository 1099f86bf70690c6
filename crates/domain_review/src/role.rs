//! Desk roles
//!
//! Roles arrive in the session token as lowercase strings. Unknown role
//! strings are dropped on parse; they grant nothing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "vendedor")]
    Vendedor,
    #[serde(rename = "vendedor-sup")]
    VendedorSup,
    #[serde(rename = "subscritor")]
    Subscritor,
    #[serde(rename = "subscritor-med")]
    SubscritorMed,
    #[serde(rename = "subscritor-sup")]
    SubscritorSup,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "vendedor" => Some(Self::Vendedor),
            "vendedor-sup" => Some(Self::VendedorSup),
            "subscritor" => Some(Self::Subscritor),
            "subscritor-med" => Some(Self::SubscritorMed),
            "subscritor-sup" => Some(Self::SubscritorSup),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Parses a token's role list, dropping anything unrecognized.
    pub fn parse_all<S: AsRef<str>>(values: &[S]) -> Vec<Self> {
        values.iter().filter_map(|v| Self::parse(v.as_ref())).collect()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vendedor => "vendedor",
            Self::VendedorSup => "vendedor-sup",
            Self::Subscritor => "subscritor",
            Self::SubscritorMed => "subscritor-med",
            Self::SubscritorSup => "subscritor-sup",
            Self::Admin => "admin",
        }
    }
}

/// True when any held role is among the allowed ones.
pub fn has_any(held: &[Role], allowed: &[Role]) -> bool {
    held.iter().any(|role| allowed.contains(role))
}
