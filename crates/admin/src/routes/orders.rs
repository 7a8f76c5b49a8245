//! Orders screen: list (pending first), mark completed, delete.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use tracing::instrument;

use loomwood_core::{OrderStatus, format_usd};

use crate::filters;
use crate::middleware::auth::RequireAdminAuth;
use crate::sanity::SanityClient;
use crate::sanity::queries;
use crate::sanity::types::{LineItem, OrderDoc, OrderPatch, PostalAddress};
use crate::state::AppState;

use super::{Flash, ScreenQuery, flash_redirect, render_html};

/// Line item view for templates.
#[derive(Debug, Clone)]
pub struct LineItemView {
    pub name: String,
    pub quantity: i64,
    pub image_url: String,
    pub has_image: bool,
    pub line_total: String,
}

/// Order view for templates.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: String,
    pub customer: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub created: String,
    pub payment_method: String,
    pub payment_status: String,
    pub amount: String,
    pub items: Vec<LineItemView>,
    pub pending: bool,
}

/// Build a line item view, resolving the denormalized image reference to
/// its public URL. Nothing beyond this render caches the resolved URL.
fn line_item_view(item: &LineItem, sanity: &SanityClient) -> LineItemView {
    let image_url = item
        .image
        .as_ref()
        .and_then(|image| sanity.image_url(image.asset_ref()))
        .unwrap_or_default();

    let line_total = item
        .price
        .map(|price| format_usd(price * rust_decimal::Decimal::from(item.quantity)))
        .unwrap_or_default();

    LineItemView {
        name: item.name.clone(),
        quantity: item.quantity,
        has_image: !image_url.is_empty(),
        image_url,
        line_total,
    }
}

/// Build an order view for rendering.
pub fn order_view(doc: &OrderDoc, sanity: &SanityClient) -> OrderView {
    OrderView {
        id: doc.id.to_string(),
        customer: doc.customer_name(),
        email: doc.email.clone(),
        phone: doc.phone.clone().unwrap_or_default(),
        address: doc
            .address
            .as_ref()
            .map(PostalAddress::display_line)
            .unwrap_or_default(),
        created: doc.created_at.format("%b %e, %Y %H:%M").to_string(),
        payment_method: doc.payment_method.clone(),
        payment_status: doc.payment_status.label().to_string(),
        amount: format_usd(doc.amount),
        items: doc
            .items
            .iter()
            .map(|item| line_item_view(item, sanity))
            .collect(),
        pending: doc.status == OrderStatus::Pending,
    }
}

/// Orders list page template.
#[derive(Template)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub admin_email: String,
    pub current_path: String,
    pub error: String,
    pub notice: String,
    pub pending: Vec<OrderView>,
    pub completed: Vec<OrderView>,
}

/// Orders list page handler.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ScreenQuery>,
) -> Html<String> {
    let mut screen = state.screens().orders.write().await;

    if !screen.loaded || query.wants_reload() {
        match state
            .sanity()
            .query::<Vec<OrderDoc>>(queries::ALL_ORDERS, &[])
            .await
        {
            Ok(docs) => {
                screen.store.replace_all(docs);
                screen.loaded = true;
            }
            Err(e) => {
                tracing::error!("Failed to fetch orders: {e}");
            }
        }
    }

    let sanity = state.sanity();
    let (pending, completed): (Vec<&OrderDoc>, Vec<&OrderDoc>) = screen
        .store
        .items()
        .iter()
        .partition(|doc| doc.status == OrderStatus::Pending);

    let template = OrdersIndexTemplate {
        admin_email: admin.email,
        current_path: "/orders".to_string(),
        error: query.error_text(),
        notice: query.notice_text(),
        pending: pending.iter().map(|doc| order_view(doc, sanity)).collect(),
        completed: completed.iter().map(|doc| order_view(doc, sanity)).collect(),
    };

    render_html(&template)
}

/// Mark a pending order completed.
///
/// This transition is one-way; nothing in the dashboard moves an order
/// back to pending.
#[instrument(skip(_admin, state))]
pub async fn complete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Redirect {
    let patch = OrderPatch {
        status: OrderStatus::Completed,
    };

    let updated: Result<OrderDoc, _> = state.sanity().patch(&id, &patch).await;
    match updated {
        Ok(doc) => {
            let mut screen = state.screens().orders.write().await;
            screen.store.apply_updated(doc);
            flash_redirect("/orders", Flash::Notice, "Order marked completed.")
        }
        Err(e) => {
            tracing::error!("Failed to complete order {id}: {e}");
            flash_redirect(
                "/orders",
                Flash::Error,
                "Could not update the order. Nothing was changed.",
            )
        }
    }
}

/// Delete an order.
#[instrument(skip(_admin, state))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Redirect {
    match state.sanity().delete(&id).await {
        Ok(()) => {
            let mut screen = state.screens().orders.write().await;
            screen.store.remove(&id);
            flash_redirect("/orders", Flash::Notice, "Order deleted.")
        }
        Err(e) => {
            tracing::error!("Failed to delete order {id}: {e}");
            flash_redirect(
                "/orders",
                Flash::Error,
                "Could not delete the order. It is still in the list.",
            )
        }
    }
}
