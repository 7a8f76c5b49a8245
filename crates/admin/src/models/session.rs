//! Session-stored types.

use serde::{Deserialize, Serialize};

/// Keys used to store values in the session.
pub mod session_keys {
    /// The signed-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}

/// The signed-in admin, as stored in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Email the admin signed in with.
    pub email: String,
}
