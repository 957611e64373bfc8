use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::document::Document;

/// Everything the audit trail can record about a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    CreateDraft,
    InlineUpdate,
    TemplateUpgrade,
    SendForSignature,
    SignatureSigned,
    SignatureDeclined,
    SignatureExpired,
    SignatureWebhookUnknown,
    Backfill,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::CreateDraft => "create_draft",
            AuditAction::InlineUpdate => "inline_update",
            AuditAction::TemplateUpgrade => "template_upgrade",
            AuditAction::SendForSignature => "send_for_signature",
            AuditAction::SignatureSigned => "signature_signed",
            AuditAction::SignatureDeclined => "signature_declined",
            AuditAction::SignatureExpired => "signature_expired",
            AuditAction::SignatureWebhookUnknown => "signature_webhook_unknown",
            AuditAction::Backfill => "backfill",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create_draft" => Ok(AuditAction::CreateDraft),
            "inline_update" => Ok(AuditAction::InlineUpdate),
            "template_upgrade" => Ok(AuditAction::TemplateUpgrade),
            "send_for_signature" => Ok(AuditAction::SendForSignature),
            "signature_signed" => Ok(AuditAction::SignatureSigned),
            "signature_declined" => Ok(AuditAction::SignatureDeclined),
            "signature_expired" => Ok(AuditAction::SignatureExpired),
            "signature_webhook_unknown" => Ok(AuditAction::SignatureWebhookUnknown),
            "backfill" => Ok(AuditAction::Backfill),
            _ => Err(format!("unknown audit action: {s}")),
        }
    }
}

/// Top-level keys that differ between two document snapshots, sorted.
///
/// Only the root of the tree is compared; a change anywhere under `fees`
/// reports `fees`. Keys present on one side only are always included.
pub fn changed_keys(before: &Document, after: &Document) -> Vec<String> {
    let before = before.root();
    let after = after.root();
    let mut keys: Vec<String> = Vec::new();

    for (key, value) in before {
        if after.get(key) != Some(value) {
            keys.push(key.clone());
        }
    }
    for key in after.keys() {
        if !before.contains_key(key) {
            keys.push(key.clone());
        }
    }

    keys.sort();
    keys
}
