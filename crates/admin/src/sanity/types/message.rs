//! Contact message documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use loomwood_core::MessageId;

use crate::components::list_store::Keyed;

/// `_type` discriminator for message documents.
pub const DOC_TYPE: &str = "message";

/// A contact message left by a storefront visitor.
///
/// Messages are created by the storefront; the admin can only pin and
/// delete them. Display order is pinned-first, then newest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDoc {
    #[serde(rename = "_id")]
    pub id: MessageId,
    #[serde(rename = "_createdAt")]
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub pinned: bool,
}

impl Keyed for MessageDoc {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

/// Patch payload for a message: only the pinned flag may change.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MessagePatch {
    pub pinned: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_wire_document() {
        let doc: MessageDoc = serde_json::from_str(
            r#"{
                "_id": "message-7f3a",
                "_type": "message",
                "_createdAt": "2026-03-14T09:26:53Z",
                "name": "Ada Fernsby",
                "email": "ada@example.com",
                "message": "Is the walnut armchair back in stock?"
            }"#,
        )
        .unwrap();

        assert_eq!(doc.id.as_str(), "message-7f3a");
        assert_eq!(doc.name, "Ada Fernsby");
        // pinned defaults to false when the field is absent
        assert!(!doc.pinned);
    }

    #[test]
    fn test_patch_serializes_only_pinned() {
        let patch = MessagePatch { pinned: true };
        let json = serde_json::to_value(patch).unwrap();
        assert_eq!(json, serde_json::json!({"pinned": true}));
    }
}
