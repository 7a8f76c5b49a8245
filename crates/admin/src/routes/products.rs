//! Products screen: list, create, edit, delete.
//!
//! The add/edit form posts multipart so an image can ride along; the file
//! is handed to the backend's asset API as-is and the returned asset
//! reference is stored on the product document.

use askama::Template;
use axum::{
    extract::{Multipart, Path, Query, State},
    response::{Html, Redirect},
};
use tracing::instrument;

use loomwood_core::{apply_discount, format_usd};

use crate::error::AppError;
use crate::filters;
use crate::middleware::auth::RequireAdminAuth;
use crate::models::ProductForm;
use crate::sanity::SanityClient;
use crate::sanity::queries;
use crate::sanity::types::{ImageRef, ProductDoc};
use crate::state::AppState;

use super::{Flash, ScreenQuery, flash_redirect, render_html};

/// Product view for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub has_image: bool,
    pub price: String,
    pub discounted_price: String,
    pub has_discount: bool,
    pub discount: i64,
    pub featured: bool,
    pub stock: i64,
    pub in_stock: bool,
    pub category: String,
    pub description: String,
    pub created: String,
}

/// Build a product view, resolving the image reference to its public URL.
pub fn product_view(doc: &ProductDoc, sanity: &SanityClient) -> ProductView {
    let image_url = doc
        .image
        .as_ref()
        .and_then(|image| sanity.image_url(image.asset_ref()))
        .unwrap_or_default();

    let has_discount = doc.discount > 0;
    let discounted_price = if has_discount {
        format_usd(apply_discount(doc.price, doc.discount))
    } else {
        String::new()
    };

    ProductView {
        id: doc.id.to_string(),
        name: doc.name.clone(),
        has_image: !image_url.is_empty(),
        image_url,
        price: format_usd(doc.price),
        discounted_price,
        has_discount,
        discount: doc.discount,
        featured: doc.featured,
        stock: doc.stock,
        in_stock: doc.stock > 0,
        category: doc.category.as_str().to_string(),
        description: doc.description.clone(),
        created: doc.created_at.format("%b %e, %Y").to_string(),
    }
}

/// Products list page template.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub admin_email: String,
    pub current_path: String,
    pub error: String,
    pub notice: String,
    pub products: Vec<ProductView>,
    pub editor_open: bool,
    pub editor_is_edit: bool,
    pub editor_title: String,
    pub submit_path: String,
    pub form: ProductForm,
}

/// Products list page handler.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ScreenQuery>,
) -> Html<String> {
    let mut screen = state.screens().products.write().await;

    if !screen.loaded || query.wants_reload() {
        match state
            .sanity()
            .query::<Vec<ProductDoc>>(queries::ALL_PRODUCTS, &[])
            .await
        {
            Ok(docs) => {
                screen.store.replace_all(docs);
                screen.loaded = true;
            }
            Err(e) => {
                tracing::error!("Failed to fetch products: {e}");
            }
        }
    }

    let sanity = state.sanity();
    let products: Vec<ProductView> = screen
        .store
        .items()
        .iter()
        .map(|doc| product_view(doc, sanity))
        .collect();

    let editor = &screen.editor;
    let editor_is_edit = editor.editing_id().is_some();
    let submit_path = editor
        .editing_id()
        .map_or_else(|| "/products".to_string(), |id| format!("/products/{id}"));

    let template = ProductsIndexTemplate {
        admin_email: admin.email,
        current_path: "/products".to_string(),
        error: query.error_text(),
        notice: query.notice_text(),
        products,
        editor_open: editor.is_open(),
        editor_is_edit,
        editor_title: if editor_is_edit {
            "Edit product".to_string()
        } else {
            "Add product".to_string()
        },
        submit_path,
        form: editor.buffer().cloned().unwrap_or_default(),
    };

    render_html(&template)
}

/// Open the add form with empty defaults.
#[instrument(skip(_admin, state))]
pub async fn open_create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Redirect {
    let mut screen = state.screens().products.write().await;
    screen.editor.open_create(ProductForm::default());
    Redirect::to("/products")
}

/// Open the edit form prefilled from the cached record.
#[instrument(skip(_admin, state))]
pub async fn open_edit(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Redirect {
    let mut screen = state.screens().products.write().await;

    let Some(doc) = screen.store.get(&id) else {
        return flash_redirect(
            "/products",
            Flash::Error,
            "That product is no longer in the list.",
        );
    };

    let buffer = ProductForm::from_doc(doc);
    screen.editor.open_edit(id, buffer);
    Redirect::to("/products")
}

/// Close the form without submitting.
#[instrument(skip(_admin, state))]
pub async fn close_editor(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Redirect {
    let mut screen = state.screens().products.write().await;
    screen.editor.close();
    Redirect::to("/products")
}

/// An image file pulled out of the multipart form.
struct UploadedImage {
    bytes: Vec<u8>,
    content_type: String,
}

/// Read the product form fields (and optional image file) out of a
/// multipart body.
async fn read_product_form(
    multipart: &mut Multipart,
) -> Result<(ProductForm, Option<UploadedImage>), AppError> {
    let mut form = ProductForm::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed form: {e}")))?
    {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        if name == "image" {
            let has_file = field.file_name().is_some_and(|f| !f.is_empty());
            let content_type = field
                .content_type()
                .map_or_else(|| "application/octet-stream".to_string(), ToString::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Malformed upload: {e}")))?;
            if has_file && !bytes.is_empty() {
                image = Some(UploadedImage {
                    bytes: bytes.to_vec(),
                    content_type,
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("Malformed form: {e}")))?;

        match name.as_str() {
            "name" => form.name = value,
            "price" => form.price = value,
            "description" => form.description = value,
            "discount" => form.discount = value,
            "stock" => form.stock = value,
            "category" => form.category = value,
            "featured" => form.featured = value == "true" || value == "on",
            _ => {}
        }
    }

    Ok((form, image))
}

/// Upload the image (if one was attached) and return its stored reference.
async fn upload_image_ref(
    sanity: &SanityClient,
    image: Option<UploadedImage>,
) -> Result<Option<ImageRef>, AppError> {
    let Some(upload) = image else {
        return Ok(None);
    };

    let asset = sanity
        .upload_image(upload.bytes, &upload.content_type)
        .await?;
    Ok(Some(ImageRef::from_asset_id(asset.id.as_str())))
}

/// Create a product.
#[instrument(skip(_admin, state, multipart))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let (form, image) = read_product_form(&mut multipart).await?;

    // Validate before any network call
    let validated = match form.validate() {
        Ok(validated) => validated,
        Err(message) => {
            let mut screen = state.screens().products.write().await;
            screen.editor.open_create(form);
            return Ok(flash_redirect("/products", Flash::Error, &message));
        }
    };

    let image_ref = match upload_image_ref(state.sanity(), image).await {
        Ok(image_ref) => image_ref,
        Err(e) => {
            tracing::error!("Failed to upload product image: {e}");
            let mut screen = state.screens().products.write().await;
            screen.editor.open_create(form);
            return Ok(flash_redirect(
                "/products",
                Flash::Error,
                "Could not upload the image. Nothing was saved.",
            ));
        }
    };

    let created: Result<ProductDoc, _> = state.sanity().create(&validated.into_new(image_ref)).await;
    match created {
        Ok(doc) => {
            let mut screen = state.screens().products.write().await;
            screen.store.insert_created(doc);
            screen.editor.submit_succeeded();
            Ok(flash_redirect("/products", Flash::Notice, "Product created."))
        }
        Err(e) => {
            tracing::error!("Failed to create product: {e}");
            let mut screen = state.screens().products.write().await;
            screen.editor.open_create(form);
            Ok(flash_redirect(
                "/products",
                Flash::Error,
                "Could not create the product. Nothing was saved.",
            ))
        }
    }
}

/// Update a product.
#[instrument(skip(_admin, state, multipart))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let (form, image) = read_product_form(&mut multipart).await?;

    let validated = match form.validate() {
        Ok(validated) => validated,
        Err(message) => {
            let mut screen = state.screens().products.write().await;
            screen.editor.open_edit(id, form);
            return Ok(flash_redirect("/products", Flash::Error, &message));
        }
    };

    let image_ref = match upload_image_ref(state.sanity(), image).await {
        Ok(image_ref) => image_ref,
        Err(e) => {
            tracing::error!("Failed to upload product image: {e}");
            let mut screen = state.screens().products.write().await;
            screen.editor.open_edit(id, form);
            return Ok(flash_redirect(
                "/products",
                Flash::Error,
                "Could not upload the image. Nothing was saved.",
            ));
        }
    };

    let updated: Result<ProductDoc, _> = state
        .sanity()
        .patch(&id, &validated.into_patch(image_ref))
        .await;
    match updated {
        Ok(doc) => {
            let mut screen = state.screens().products.write().await;
            screen.store.apply_updated(doc);
            screen.editor.submit_succeeded();
            Ok(flash_redirect("/products", Flash::Notice, "Product updated."))
        }
        Err(e) => {
            tracing::error!("Failed to update product {id}: {e}");
            let mut screen = state.screens().products.write().await;
            screen.editor.open_edit(id, form);
            Ok(flash_redirect(
                "/products",
                Flash::Error,
                "Could not save the product. Your changes are still in the form.",
            ))
        }
    }
}

/// Delete a product.
#[instrument(skip(_admin, state))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Redirect {
    match state.sanity().delete(&id).await {
        Ok(()) => {
            let mut screen = state.screens().products.write().await;
            screen.store.remove(&id);
            flash_redirect("/products", Flash::Notice, "Product deleted.")
        }
        Err(e) => {
            tracing::error!("Failed to delete product {id}: {e}");
            flash_redirect(
                "/products",
                Flash::Error,
                "Could not delete the product. It is still in the list.",
            )
        }
    }
}
