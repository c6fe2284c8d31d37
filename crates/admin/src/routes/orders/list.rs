//! Orders list page, detail toggle and reload.

use askama::Template;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use order_desk_core::{DetailToggle, OrderId};

use crate::{
    error::AppError, filters, middleware::RequireAdminAuth, models::session_keys,
    routes::flash, routes::render, services::LoadState, state::AppState,
};

use super::types::{
    FilterTabView, NO_ITEMS_LABEL, NotificationView, OrderRowView, OrdersQuery, ReturnForm,
    orders_path, parse_filter,
};

/// Orders list page template.
#[derive(Template)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub admin_email: String,
    pub current_path: String,
    pub tabs: Vec<FilterTabView>,
    /// Query value of the active filter, echoed into forms.
    pub filter_value: &'static str,
    pub orders: Vec<OrderRowView>,
    pub notification: Option<NotificationView>,
    /// When the last load failed, if it did.
    pub degraded_at: Option<String>,
    /// "Loaded N orders at ..." line, if a load has succeeded.
    pub loaded_summary: Option<String>,
    pub no_items_label: &'static str,
}

/// Read the detail toggle from the session.
pub(super) async fn detail_toggle(session: &Session) -> Result<DetailToggle, AppError> {
    Ok(session
        .get::<DetailToggle>(session_keys::EXPANDED_ORDER)
        .await?
        .unwrap_or_default())
}

/// Orders list page handler.
///
/// GET /orders?status=
#[instrument(skip(admin, state, session))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<OrdersQuery>,
) -> Result<Response, AppError> {
    let filter = query.filter()?;
    let toggle = detail_toggle(&session).await?;
    let notification = flash::take(&session).await?.map(NotificationView::from);

    let orders = state
        .orders()
        .visible(filter)
        .await
        .iter()
        .map(|order| OrderRowView::new(order, toggle.is_expanded(&order.id)))
        .collect();

    let load_state = state.orders().load_state().await;
    let loaded_summary = match load_state {
        LoadState::Ready { loaded_at, count } => Some(format!(
            "Loaded {count} order(s) at {} UTC",
            loaded_at.format("%Y-%m-%d %H:%M")
        )),
        LoadState::Pending | LoadState::Degraded { .. } => None,
    };
    let degraded_at = match load_state {
        LoadState::Degraded { failed_at } => {
            Some(failed_at.format("%Y-%m-%d %H:%M").to_string())
        }
        LoadState::Pending | LoadState::Ready { .. } => None,
    };

    let template = OrdersIndexTemplate {
        admin_email: admin.email.to_string(),
        current_path: orders_path(filter),
        tabs: FilterTabView::all(filter),
        filter_value: filter.as_str(),
        orders,
        notification,
        degraded_at,
        loaded_summary,
        no_items_label: NO_ITEMS_LABEL,
    };

    Ok(render(&template))
}

/// Expand or collapse an order's detail.
///
/// POST /orders/{id}/toggle
#[instrument(skip(_admin, session, form))]
pub async fn toggle(
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<ReturnForm>,
) -> Result<Redirect, AppError> {
    let filter = parse_filter(form.filter.as_deref())?;
    let mut toggle = detail_toggle(&session).await?;
    toggle.toggle(OrderId::new(id));
    session.insert(session_keys::EXPANDED_ORDER, &toggle).await?;

    Ok(Redirect::to(&orders_path(filter)))
}

/// Re-fetch orders from the store.
///
/// POST /orders/reload
#[instrument(skip(_admin, state, session, form))]
pub async fn reload(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ReturnForm>,
) -> Result<Redirect, AppError> {
    let filter = parse_filter(form.filter.as_deref())?;
    let notification = state.orders().reload().await;
    flash::push(&session, &notification).await?;

    Ok(Redirect::to(&orders_path(filter)))
}
