//! Storefront user account documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use loomwood_core::{UserId, UserRole};

use crate::components::list_store::Keyed;

use super::common::PostalAddress;

/// `_type` discriminator for user documents.
pub const DOC_TYPE: &str = "user";

/// A storefront user account.
///
/// The password is stored in plaintext on the document, exactly as the
/// storefront writes it. It is never logged and the users screen masks it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDoc {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(rename = "_createdAt")]
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub address: Option<PostalAddress>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub role: UserRole,
}

impl Keyed for UserDoc {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

/// Create payload for a user document.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    #[serde(rename = "_type")]
    pub doc_type: &'static str,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<PostalAddress>,
    pub verified: bool,
    pub role: UserRole,
}

/// Patch payload for a user: names only the fields allowed to change.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<PostalAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_wire_document() {
        let doc: UserDoc = serde_json::from_str(
            r#"{
                "_id": "user-91c2",
                "_type": "user",
                "_createdAt": "2026-01-02T18:04:11Z",
                "name": "Marta Oduya",
                "email": "marta@example.com",
                "phone": "+1 503 555 0144",
                "password": "hunter2",
                "address": {"street": "44 Birch Ln", "city": "Salem", "zip": "97301"},
                "verified": true,
                "role": "admin"
            }"#,
        )
        .unwrap();

        assert_eq!(doc.role, UserRole::Admin);
        assert!(doc.verified);
        assert_eq!(doc.address.unwrap().city, "Salem");
    }

    #[test]
    fn test_new_user_carries_type_discriminator() {
        let new_user = NewUser {
            doc_type: DOC_TYPE,
            name: "Jo".to_string(),
            email: "jo@example.com".to_string(),
            phone: None,
            password: "pass".to_string(),
            address: None,
            verified: false,
            role: UserRole::User,
        };
        let json = serde_json::to_value(&new_user).unwrap();
        assert_eq!(json["_type"], "user");
        assert_eq!(json["role"], "user");
        // Absent optionals are omitted, not null
        assert!(json.get("phone").is_none());
    }

    #[test]
    fn test_patch_names_only_changed_fields() {
        let patch = UserPatch {
            verified: Some(true),
            ..UserPatch::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"verified": true}));
    }
}
