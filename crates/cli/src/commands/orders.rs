//! Order maintenance against the live dataset.
//!
//! # Usage
//!
//! ```bash
//! od-cli orders list --status pending
//! od-cli orders set-status 6f1c2a dispatch
//! od-cli orders delete 6f1c2a
//! ```
//!
//! # Environment Variables
//!
//! - `SANITY_PROJECT_ID`, `SANITY_DATASET`, `SANITY_API_TOKEN`
//! - `SANITY_API_VERSION`, `SANITY_API_HOST` (optional)

use std::io::{BufRead, Write};
use std::sync::Arc;

use thiserror::Error;

use order_desk_admin::config::{ConfigError, SanityConfig};
use order_desk_admin::sanity::SanityClient;
use order_desk_admin::services::{MutationOutcome, OrderDesk};
use order_desk_admin::store::DocumentStoreError;
use order_desk_core::{
    ConfirmPrompt, Confirmation, Order, OrderId, OrderStatus, StatusFilter, StatusParseError,
};

/// Errors that can occur during order commands.
#[derive(Debug, Error)]
pub enum OrdersError {
    /// Store configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The store could not be reached or rejected the request.
    #[error("Store error: {0}")]
    Store(#[from] DocumentStoreError),

    /// Unknown status or filter value.
    #[error("{0}. Valid values: pending, dispatch, success")]
    InvalidStatus(#[from] StatusParseError),

    /// No order with this ID in the dataset.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The mutation was sent but the store did not apply it.
    #[error("{0}")]
    Rejected(String),

    /// Terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Connect to the store and load every order.
async fn open_desk() -> Result<OrderDesk, OrdersError> {
    dotenvy::dotenv().ok();

    let config = SanityConfig::from_env()?;
    tracing::info!(project = %config.project_id, dataset = %config.dataset, "Connecting to Sanity...");

    let client = SanityClient::new(&config)?;
    let desk = OrderDesk::new(Arc::new(client));
    let count = desk.load().await?;
    tracing::info!(count, "Orders loaded");

    Ok(desk)
}

/// Print one line per order: ID, status, date, total and customer.
///
/// # Errors
///
/// Returns `OrdersError` if the filter is invalid or the store cannot be read.
pub async fn list(status: Option<&str>) -> Result<(), OrdersError> {
    let filter: StatusFilter = status.map_or(Ok(StatusFilter::All), str::parse)?;
    let desk = open_desk().await?;

    let mut stdout = std::io::stdout().lock();
    for order in desk.visible(filter).await {
        writeln!(stdout, "{}", summary_line(&order))?;
    }
    Ok(())
}

/// Change an order's status.
///
/// # Errors
///
/// Returns `OrdersError` if the status is unknown, the order does not exist,
/// or the store rejects the patch.
pub async fn set_status(id: &str, status: &str) -> Result<(), OrdersError> {
    let status: OrderStatus = status.parse()?;
    let desk = open_desk().await?;
    let id = OrderId::new(id);

    if desk.get(&id).await.is_none() {
        return Err(OrdersError::NotFound(id.into_inner()));
    }

    report(&desk.change_status(&id, status).await)
}

/// Delete an order after confirmation.
///
/// # Errors
///
/// Returns `OrdersError` if the order does not exist or the store rejects the
/// delete. Declining the prompt is not an error.
pub async fn delete(id: &str, assume_yes: bool) -> Result<(), OrdersError> {
    let desk = open_desk().await?;
    let id = OrderId::new(id);

    let Some(order) = desk.get(&id).await else {
        return Err(OrdersError::NotFound(id.into_inner()));
    };

    let confirmation = if assume_yes {
        Confirmation::Confirmed
    } else {
        confirm(&ConfirmPrompt::delete_order(), &order)?
    };

    report(&desk.delete(&id, confirmation).await)
}

fn report(outcome: &MutationOutcome) -> Result<(), OrdersError> {
    match outcome {
        MutationOutcome::Applied(notification) => {
            tracing::info!("{}: {}", notification.title, notification.message);
            Ok(())
        }
        MutationOutcome::Failed(notification) => {
            Err(OrdersError::Rejected(notification.message.clone()))
        }
        MutationOutcome::Cancelled => {
            tracing::info!("Cancelled, nothing was changed");
            Ok(())
        }
    }
}

/// Ask on the terminal. Anything other than `y`/`yes` cancels.
fn confirm(prompt: &ConfirmPrompt, order: &Order) -> Result<Confirmation, OrdersError> {
    let mut stderr = std::io::stderr().lock();
    writeln!(stderr, "{}", prompt.title)?;
    writeln!(stderr, "{}", prompt.body)?;
    writeln!(stderr, "  {}", summary_line(order))?;
    write!(stderr, "{} [y/N]: ", prompt.confirm_label)?;
    stderr.flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(parse_answer(&answer))
}

fn parse_answer(answer: &str) -> Confirmation {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Confirmation::Confirmed,
        _ => Confirmation::Cancelled,
    }
}

fn summary_line(order: &Order) -> String {
    let status = order.status.map_or("unset", OrderStatus::as_str);
    let date = order
        .ordered_at
        .map_or_else(|| "unknown".to_owned(), |at| at.format("%Y-%m-%d").to_string());
    format!(
        "{}\t{status}\t{date}\t{}\t{}",
        order.id,
        order.total,
        order.customer.full()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use order_desk_core::{Contact, CustomerName, Money, ShippingAddress};

    #[test]
    fn test_parse_answer_defaults_to_cancel() {
        assert_eq!(parse_answer("y\n"), Confirmation::Confirmed);
        assert_eq!(parse_answer("YES"), Confirmation::Confirmed);
        assert_eq!(parse_answer("\n"), Confirmation::Cancelled);
        assert_eq!(parse_answer("no"), Confirmation::Cancelled);
        assert_eq!(parse_answer("yep"), Confirmation::Cancelled);
    }

    #[test]
    fn test_summary_line_marks_missing_fields() {
        let order = Order {
            id: OrderId::new("o-1"),
            customer: CustomerName {
                first: "Grace".to_owned(),
                last: "Hopper".to_owned(),
            },
            contact: Contact::default(),
            shipping: ShippingAddress::default(),
            total: Money::ZERO,
            ordered_at: None,
            status: None,
            cart_items: Vec::new(),
        };
        let line = summary_line(&order);
        assert!(line.starts_with("o-1\tunset\tunknown\t"));
        assert!(line.ends_with("Grace Hopper"));
    }
}
