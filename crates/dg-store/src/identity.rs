//! Identity records — the reusable sender persona stamped onto generated
//! documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A reusable sender persona. Records are immutable once created;
/// "selecting" one never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub institution: String,
    pub role: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Creation timestamp; round-trips through storage as an ISO-8601
    /// string.
    pub created_at: DateTime<Utc>,
}

/// Form fields for creating an identity. The id and timestamp are
/// assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityDraft {
    pub name: String,
    pub institution: String,
    pub role: String,
    pub contact: String,
    pub logo_url: Option<String>,
    pub signature: Option<String>,
}

impl IdentityDraft {
    /// Whether the required fields (name, institution, role) are filled.
    /// Validation happens in the caller before submitting to the store.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.institution.trim().is_empty()
            && !self.role.trim().is_empty()
    }
}

impl Identity {
    pub(crate) fn from_draft(draft: IdentityDraft) -> Self {
        // Millisecond timestamp plus a session counter, so two identities
        // created within the same millisecond still get distinct ids.
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let created_at = Utc::now();
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self {
            id: format!("{}-{n}", created_at.timestamp_millis()),
            name: draft.name,
            institution: draft.institution,
            role: draft.role,
            contact: draft.contact,
            logo_url: draft.logo_url,
            signature: draft.signature,
            created_at,
        }
    }
}
