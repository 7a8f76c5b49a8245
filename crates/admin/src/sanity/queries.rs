//! GROQ query text used by the admin screens.
//!
//! Each screen fetches its full list in one query; single-document reads go
//! through [`DOCUMENT_BY_ID`]. Ordering beyond what the query specifies
//! (e.g. the pinned-first message partition) happens at render time.

use serde_json::Value;

/// All contact messages, newest first.
pub const ALL_MESSAGES: &str = r#"*[_type == "message"] | order(_createdAt desc)"#;

/// All storefront user accounts, newest first.
pub const ALL_USERS: &str = r#"*[_type == "user"] | order(_createdAt desc)"#;

/// All orders, newest first.
pub const ALL_ORDERS: &str = r#"*[_type == "order"] | order(_createdAt desc)"#;

/// All catalog products, newest first.
pub const ALL_PRODUCTS: &str = r#"*[_type == "product"] | order(_createdAt desc)"#;

/// A single document of any type by id.
pub const DOCUMENT_BY_ID: &str = "*[_id == $id][0]";

/// Number of documents of a given type.
pub const COUNT_BY_TYPE: &str = "count(*[_type == $type])";

/// All documents of a given type, unordered (used by the export CLI).
pub const ALL_BY_TYPE: &str = "*[_type == $type]";

/// Build the parameter list for an id-keyed query.
#[must_use]
pub fn id_param(id: &str) -> [(&'static str, Value); 1] {
    [("id", Value::String(id.to_string()))]
}
