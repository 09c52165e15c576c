//! # Business Profile
//!
//! The issuing business's identity, handed read-only to renderers together
//! with a document snapshot. Injected at call time - never a process-wide
//! singleton - so tests and multi-profile hosts can render under any
//! profile they like.

use serde::{Deserialize, Serialize};

/// The business issuing invoices and estimates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub name: String,
    pub address: String,
    pub license_number: String,
    /// Raw image bytes for the letterhead logo, if one was uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<Vec<u8>>,
}

impl BusinessProfile {
    pub fn new(name: impl Into<String>) -> Self {
        BusinessProfile {
            name: name.into(),
            ..Default::default()
        }
    }
}
