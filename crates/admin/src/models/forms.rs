//! Form buffers for the inline editors.
//!
//! Each form is a bag of raw strings exactly as submitted; validation
//! happens before any network call, and a failed validation leaves the
//! buffer in the editor so nothing the admin typed is lost. Validated
//! forms convert into the explicit create/patch payloads in
//! [`crate::sanity::types`].

use rust_decimal::Decimal;

use loomwood_core::{Email, ProductCategory, UserRole};

use crate::sanity::types::{
    ImageRef, NewProduct, NewUser, PostalAddress, ProductDoc, ProductPatch, UserDoc, UserPatch,
    product, user,
};

// =============================================================================
// Product form
// =============================================================================

/// Transient buffer for the product add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub description: String,
    pub discount: String,
    pub stock: String,
    pub category: String,
    pub featured: bool,
}

/// A product form that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedProduct {
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub discount: i64,
    pub stock: i64,
    pub category: ProductCategory,
    pub featured: bool,
}

impl ProductForm {
    /// Prefill the buffer from an existing document.
    #[must_use]
    pub fn from_doc(doc: &ProductDoc) -> Self {
        Self {
            name: doc.name.clone(),
            price: doc.price.to_string(),
            description: doc.description.clone(),
            discount: doc.discount.to_string(),
            stock: doc.stock.to_string(),
            category: doc.category.as_str().to_string(),
            featured: doc.featured,
        }
    }

    /// Validate the submitted fields.
    ///
    /// # Errors
    ///
    /// Returns the message for the first failing field. No network call is
    /// made for an invalid form.
    pub fn validate(&self) -> Result<ValidatedProduct, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Name is required.".to_string());
        }

        let price_raw = self.price.trim();
        if price_raw.is_empty() {
            return Err("Price is required.".to_string());
        }
        let price: Decimal = price_raw
            .parse()
            .map_err(|_| "Price must be a number.".to_string())?;
        if price < Decimal::ZERO {
            return Err("Price cannot be negative.".to_string());
        }

        let stock_raw = self.stock.trim();
        if stock_raw.is_empty() {
            return Err("Stock is required.".to_string());
        }
        let stock: i64 = stock_raw
            .parse()
            .map_err(|_| "Stock must be a whole number.".to_string())?;
        if stock < 0 {
            return Err("Stock cannot be negative.".to_string());
        }

        let discount = if self.discount.trim().is_empty() {
            0
        } else {
            self.discount
                .trim()
                .parse::<i64>()
                .map_err(|_| "Discount must be a whole number.".to_string())?
        };
        if !(0..=100).contains(&discount) {
            return Err("Discount must be between 0 and 100.".to_string());
        }

        let category = ProductCategory::from_param(self.category.trim())
            .ok_or_else(|| "Choose a category.".to_string())?;

        Ok(ValidatedProduct {
            name: name.to_string(),
            price,
            description: self.description.trim().to_string(),
            discount,
            stock,
            category,
            featured: self.featured,
        })
    }
}

impl ValidatedProduct {
    /// Build the create payload.
    #[must_use]
    pub fn into_new(self, image: Option<ImageRef>) -> NewProduct {
        NewProduct {
            doc_type: product::DOC_TYPE,
            name: self.name,
            image,
            price: self.price,
            description: self.description,
            discount: self.discount,
            featured: self.featured,
            stock: self.stock,
            category: self.category,
        }
    }

    /// Build the patch payload.
    ///
    /// `image` is included only when a new image was uploaded; the existing
    /// image is otherwise left untouched.
    #[must_use]
    pub fn into_patch(self, image: Option<ImageRef>) -> ProductPatch {
        ProductPatch {
            name: Some(self.name),
            image,
            price: Some(self.price),
            description: Some(self.description),
            discount: Some(self.discount),
            featured: Some(self.featured),
            stock: Some(self.stock),
            category: Some(self.category),
        }
    }
}

// =============================================================================
// User form
// =============================================================================

/// Transient buffer for the user add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub role: String,
}

/// A user form that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedUser {
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    /// `None` on update when the password field was left blank.
    pub password: Option<String>,
    pub address: Option<PostalAddress>,
    pub verified: bool,
    pub role: UserRole,
}

impl UserForm {
    /// Prefill the buffer from an existing document. The password field
    /// starts blank; leaving it blank on submit keeps the stored one.
    #[must_use]
    pub fn from_doc(doc: &UserDoc) -> Self {
        let address = doc.address.clone().unwrap_or_default();
        Self {
            name: doc.name.clone(),
            email: doc.email.clone(),
            phone: doc.phone.clone().unwrap_or_default(),
            password: String::new(),
            street: address.street,
            city: address.city,
            zip: address.zip,
            verified: doc.verified,
            role: doc.role.as_str().to_string(),
        }
    }

    /// Validate for create: all required fields including the password.
    ///
    /// # Errors
    ///
    /// Returns the message for the first failing field.
    pub fn validate_new(&self) -> Result<ValidatedUser, String> {
        let validated = self.validate_common()?;
        if validated.password.is_none() {
            return Err("Password is required.".to_string());
        }
        Ok(validated)
    }

    /// Validate for update: a blank password means "keep the current one".
    ///
    /// # Errors
    ///
    /// Returns the message for the first failing field.
    pub fn validate_update(&self) -> Result<ValidatedUser, String> {
        self.validate_common()
    }

    fn validate_common(&self) -> Result<ValidatedUser, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Name is required.".to_string());
        }

        let email = Email::parse(self.email.trim())
            .map_err(|_| "Enter a valid email address.".to_string())?;

        let role = UserRole::from_param(self.role.trim())
            .ok_or_else(|| "Choose a role.".to_string())?;

        let phone = non_empty(&self.phone);
        let password = non_empty(&self.password);

        let address = if self.street.trim().is_empty()
            && self.city.trim().is_empty()
            && self.zip.trim().is_empty()
        {
            None
        } else {
            Some(PostalAddress {
                street: self.street.trim().to_string(),
                city: self.city.trim().to_string(),
                zip: self.zip.trim().to_string(),
            })
        };

        Ok(ValidatedUser {
            name: name.to_string(),
            email,
            phone,
            password,
            address,
            verified: self.verified,
            role,
        })
    }
}

impl ValidatedUser {
    /// Build the create payload. [`UserForm::validate_new`] guarantees the
    /// password is present.
    #[must_use]
    pub fn into_new(self) -> NewUser {
        NewUser {
            doc_type: user::DOC_TYPE,
            name: self.name,
            email: self.email.into_inner(),
            phone: self.phone,
            password: self.password.unwrap_or_default(),
            address: self.address,
            verified: self.verified,
            role: self.role,
        }
    }

    /// Build the patch payload. A blank password is omitted so the stored
    /// one is left untouched.
    #[must_use]
    pub fn into_patch(self) -> UserPatch {
        UserPatch {
            name: Some(self.name),
            email: Some(self.email.into_inner()),
            phone: Some(self.phone.unwrap_or_default()),
            password: self.password,
            address: self.address,
            verified: Some(self.verified),
            role: Some(self.role),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_product_form() -> ProductForm {
        ProductForm {
            name: "Fjord Lounge Chair".to_string(),
            price: "449.50".to_string(),
            description: "Steam-bent oak frame.".to_string(),
            discount: "15".to_string(),
            stock: "8".to_string(),
            category: "Chair".to_string(),
            featured: true,
        }
    }

    #[test]
    fn test_product_form_valid() {
        let validated = valid_product_form().validate().unwrap();
        assert_eq!(validated.name, "Fjord Lounge Chair");
        assert_eq!(validated.stock, 8);
        assert_eq!(validated.category, ProductCategory::Chair);
    }

    #[test]
    fn test_product_form_rejects_missing_name() {
        let form = ProductForm {
            name: "   ".to_string(),
            ..valid_product_form()
        };
        assert_eq!(form.validate().unwrap_err(), "Name is required.");
    }

    #[test]
    fn test_product_form_rejects_missing_stock() {
        let form = ProductForm {
            stock: String::new(),
            ..valid_product_form()
        };
        assert_eq!(form.validate().unwrap_err(), "Stock is required.");
    }

    #[test]
    fn test_product_form_rejects_bad_price() {
        let form = ProductForm {
            price: "abc".to_string(),
            ..valid_product_form()
        };
        assert_eq!(form.validate().unwrap_err(), "Price must be a number.");
    }

    #[test]
    fn test_product_form_empty_discount_defaults_to_zero() {
        let form = ProductForm {
            discount: String::new(),
            ..valid_product_form()
        };
        assert_eq!(form.validate().unwrap().discount, 0);
    }

    #[test]
    fn test_product_form_rejects_out_of_range_discount() {
        let form = ProductForm {
            discount: "120".to_string(),
            ..valid_product_form()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            "Discount must be between 0 and 100."
        );
    }

    #[test]
    fn test_product_patch_includes_image_only_when_uploaded() {
        let validated = valid_product_form().validate().unwrap();
        let patch = validated.into_patch(None);
        let json = serde_json::to_value(&patch).unwrap();
        assert!(json.get("image").is_none());
        assert_eq!(json["name"], "Fjord Lounge Chair");
    }

    fn valid_user_form() -> UserForm {
        UserForm {
            name: "Marta Oduya".to_string(),
            email: "marta@example.com".to_string(),
            phone: String::new(),
            password: "hunter2".to_string(),
            street: "44 Birch Ln".to_string(),
            city: "Salem".to_string(),
            zip: "97301".to_string(),
            verified: true,
            role: "user".to_string(),
        }
    }

    #[test]
    fn test_user_form_valid() {
        let validated = valid_user_form().validate_new().unwrap();
        assert_eq!(validated.email.as_str(), "marta@example.com");
        assert!(validated.phone.is_none());
        assert_eq!(validated.address.unwrap().city, "Salem");
    }

    #[test]
    fn test_user_form_rejects_bad_email() {
        let form = UserForm {
            email: "not-an-email".to_string(),
            ..valid_user_form()
        };
        assert_eq!(
            form.validate_new().unwrap_err(),
            "Enter a valid email address."
        );
    }

    #[test]
    fn test_user_create_requires_password() {
        let form = UserForm {
            password: String::new(),
            ..valid_user_form()
        };
        assert_eq!(form.validate_new().unwrap_err(), "Password is required.");
        // The same blank password is fine on update
        assert!(form.validate_update().is_ok());
    }

    #[test]
    fn test_user_patch_omits_blank_password() {
        let form = UserForm {
            password: String::new(),
            ..valid_user_form()
        };
        let patch = form.validate_update().unwrap().into_patch();
        let json = serde_json::to_value(&patch).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "marta@example.com");
    }

    #[test]
    fn test_user_form_prefill_leaves_password_blank() {
        let doc: UserDoc = serde_json::from_str(
            r#"{
                "_id": "user-1",
                "_createdAt": "2026-01-02T18:04:11Z",
                "name": "Marta",
                "email": "marta@example.com",
                "password": "hunter2",
                "role": "admin"
            }"#,
        )
        .unwrap();
        let form = UserForm::from_doc(&doc);
        assert_eq!(form.password, "");
        assert_eq!(form.role, "admin");
    }
}
