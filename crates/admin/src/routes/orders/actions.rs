//! Single order action handlers: status change and delete.

use askama::Template;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use order_desk_core::{ConfirmPrompt, OrderId, OrderStatus};

use crate::{
    error::AppError, filters, middleware::RequireAdminAuth, models::session_keys,
    routes::flash, routes::render, services::MutationOutcome, state::AppState,
};

use super::list::detail_toggle;
use super::types::{
    DeleteForm, OrdersQuery, StatusForm, order_path, orders_path, parse_filter,
};

/// Delete confirmation page.
#[derive(Template)]
#[template(path = "orders/confirm_delete.html")]
pub struct ConfirmDeleteTemplate {
    pub admin_email: String,
    pub current_path: String,
    pub prompt: ConfirmPrompt,
    pub order_id: String,
    /// `/orders/{id}` with the ID encoded.
    pub order_path: String,
    pub customer_name: String,
    pub total: String,
    pub filter_value: &'static str,
}

/// Push the outcome's toast, if any.
async fn notify(session: &Session, outcome: &MutationOutcome) -> Result<(), AppError> {
    if let Some(notification) = outcome.notification() {
        flash::push(session, notification).await?;
    }
    Ok(())
}

/// Change an order's status.
///
/// POST /orders/{id}/status
#[instrument(skip(_admin, state, session))]
pub async fn update_status(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect, AppError> {
    let filter = parse_filter(form.filter.as_deref())?;
    let status: OrderStatus = form
        .status
        .parse()
        .map_err(|e| AppError::BadRequest(format!("{e}")))?;

    let outcome = state
        .orders()
        .change_status(&OrderId::new(id), status)
        .await;
    notify(&session, &outcome).await?;

    Ok(Redirect::to(&orders_path(filter)))
}

/// Ask the operator to confirm a delete.
///
/// GET /orders/{id}/delete
#[instrument(skip(admin, state))]
pub async fn confirm_delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<OrdersQuery>,
) -> Result<Response, AppError> {
    let filter = query.filter()?;
    let order = state
        .orders()
        .get(&OrderId::new(id.as_str()))
        .await
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    let template = ConfirmDeleteTemplate {
        admin_email: admin.email.to_string(),
        current_path: orders_path(filter),
        prompt: ConfirmPrompt::delete_order(),
        order_id: order.id.to_string(),
        order_path: order_path(&order.id),
        customer_name: order.customer.full(),
        total: order.total.to_string(),
        filter_value: filter.as_str(),
    };

    Ok(render(&template))
}

/// Delete an order if the operator confirmed.
///
/// POST /orders/{id}/delete
#[instrument(skip(_admin, state, session))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect, AppError> {
    let filter = parse_filter(form.filter.as_deref())?;
    let id = OrderId::new(id);

    let outcome = state.orders().delete(&id, form.choice).await;
    if outcome.is_applied() {
        let mut toggle = detail_toggle(&session).await?;
        if toggle.is_expanded(&id) {
            toggle.clear();
            session.insert(session_keys::EXPANDED_ORDER, &toggle).await?;
        }
    }
    notify(&session, &outcome).await?;

    Ok(Redirect::to(&orders_path(filter)))
}
