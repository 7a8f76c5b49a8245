//! Status and category enums for Loomwood documents.
//!
//! Serde representations match the wire values stored in the hosted content
//! backend (lowercase statuses and roles, capitalized category names).

use core::fmt;

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// The only exposed transition is pending → completed; there is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
}

impl OrderStatus {
    /// Human-readable label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payment status as recorded on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

impl PaymentStatus {
    /// Human-readable label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Role assigned to a storefront user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    /// Parse a role from a form parameter value.
    #[must_use]
    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Human-readable label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Admin => "Admin",
        }
    }

    /// Wire value as stored on the user document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Product category in the Loomwood catalog.
///
/// Stored capitalized on the product document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProductCategory {
    #[default]
    Chair,
    Sofa,
}

impl ProductCategory {
    /// All known categories, in display order.
    pub const ALL: [Self; 2] = [Self::Chair, Self::Sofa];

    /// Parse a category from a form parameter value.
    #[must_use]
    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "Chair" => Some(Self::Chair),
            "Sofa" => Some(Self::Sofa),
            _ => None,
        }
    }

    /// Wire value as stored on the product document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chair => "Chair",
            Self::Sofa => "Sofa",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Completed).unwrap(),
            "\"completed\""
        );
        let back: OrderStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(back, OrderStatus::Completed);
    }

    #[test]
    fn test_user_role_from_param() {
        assert_eq!(UserRole::from_param("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_param("user"), Some(UserRole::User));
        assert_eq!(UserRole::from_param("superuser"), None);
    }

    #[test]
    fn test_category_wire_values() {
        // Categories are stored capitalized, unlike statuses
        assert_eq!(
            serde_json::to_string(&ProductCategory::Chair).unwrap(),
            "\"Chair\""
        );
        let back: ProductCategory = serde_json::from_str("\"Sofa\"").unwrap();
        assert_eq!(back, ProductCategory::Sofa);
    }

    #[test]
    fn test_category_from_param_rejects_lowercase() {
        assert_eq!(ProductCategory::from_param("chair"), None);
        assert_eq!(ProductCategory::from_param("Chair"), Some(ProductCategory::Chair));
    }

    #[test]
    fn test_labels() {
        assert_eq!(OrderStatus::Pending.label(), "Pending");
        assert_eq!(PaymentStatus::Paid.label(), "Paid");
        assert_eq!(UserRole::Admin.label(), "Admin");
        assert_eq!(ProductCategory::Sofa.to_string(), "Sofa");
    }
}
