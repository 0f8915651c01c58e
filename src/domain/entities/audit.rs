//! Audit trail entries written alongside link mutations.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Delete => "delete",
        }
    }
}

/// Who did what to which link, and when.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub link_id: String,
    pub actor: String,
    pub action: AuditAction,
    pub timestamp: DateTime<Utc>,
}

impl AuditEvent {
    pub fn new(link_id: impl Into<String>, actor: impl Into<String>, action: AuditAction) -> Self {
        Self {
            link_id: link_id.into(),
            actor: actor.into(),
            action,
            timestamp: Utc::now(),
        }
    }
}
