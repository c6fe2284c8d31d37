//! Integration tests for the order workflows, driven through the admin routes.
//!
//! Each test logs in, performs form posts the way the browser would, then
//! checks both what the store received and what the next page shows.
//!
//! Run with: cargo test -p order-desk-integration-tests

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;

use order_desk_admin::store::StoreCall;
use order_desk_core::{OrderId, OrderStatus};
use order_desk_integration_tests::{TestApp, body_text, location, order};

fn pending_and_dispatch() -> Vec<order_desk_core::Order> {
    vec![
        order("o1", Some(OrderStatus::Pending), 1000),
        order("o2", Some(OrderStatus::Dispatch), 2000),
        order("o3", None, 3000),
    ]
}

// ============================================================================
// Filtering
// ============================================================================

#[tokio::test]
async fn test_filter_tabs_show_matching_orders_only() {
    let app = TestApp::new(pending_and_dispatch()).await;
    let cookie = app.login().await;

    let all = app.orders_page("/orders", &cookie).await;
    assert!(all.contains(r#"id="order-o1""#));
    assert!(all.contains(r#"id="order-o2""#));
    assert!(all.contains(r#"id="order-o3""#));

    let pending = app.orders_page("/orders?status=pending", &cookie).await;
    assert!(pending.contains(r#"id="order-o1""#));
    assert!(!pending.contains(r#"id="order-o2""#));
    // Unset status only shows under All
    assert!(!pending.contains(r#"id="order-o3""#));

    let completed = app.orders_page("/orders?status=success", &cookie).await;
    assert!(completed.contains("No orders to show."));
}

// ============================================================================
// Status Change
// ============================================================================

#[tokio::test]
async fn test_status_change_reaches_store_and_list() {
    let app = TestApp::new(pending_and_dispatch()).await;
    let cookie = app.login().await;

    let response = app
        .post_form(
            "/orders/o1/status",
            "status=dispatch&filter=pending",
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/orders?status=pending"));

    assert!(
        app.store
            .calls()
            .await
            .contains(&StoreCall::SetStatus(OrderId::new("o1"), OrderStatus::Dispatch))
    );
    let updated = app.desk.get(&OrderId::new("o1")).await.unwrap();
    assert_eq!(updated.status, Some(OrderStatus::Dispatch));

    // The pending view no longer lists it, and the toast is shown once
    let page = app.orders_page("/orders?status=pending", &cookie).await;
    assert!(!page.contains(r#"id="order-o1""#));
    assert!(page.contains("The order status has been updated to dispatch."));

    let again = app.orders_page("/orders?status=pending", &cookie).await;
    assert!(!again.contains("The order status has been updated"));
}

#[tokio::test]
async fn test_action_urls_encode_order_id() {
    let app = TestApp::new([order("drafts.a/b", Some(OrderStatus::Pending), 500)]).await;
    let cookie = app.login().await;

    let page = app.orders_page("/orders", &cookie).await;
    assert!(page.contains(r#"action="/orders/drafts.a%2Fb/status""#));
    assert!(page.contains(r#"href="/orders/drafts.a%2Fb/delete?status=All""#));

    let response = app
        .post_form(
            "/orders/drafts.a%2Fb/status",
            "status=success&filter=All",
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let id = OrderId::new("drafts.a/b");
    assert!(
        app.store
            .calls()
            .await
            .contains(&StoreCall::SetStatus(id.clone(), OrderStatus::Success))
    );
    assert_eq!(
        app.desk.get(&id).await.unwrap().status,
        Some(OrderStatus::Success)
    );
}

#[tokio::test]
async fn test_rejected_status_change_keeps_local_status() {
    let app = TestApp::new(pending_and_dispatch()).await;
    let cookie = app.login().await;
    app.store.fail_mutations(true);

    let response = app
        .post_form("/orders/o1/status", "status=success&filter=All", Some(&cookie))
        .await;
    assert_eq!(location(&response), Some("/orders"));

    let unchanged = app.desk.get(&OrderId::new("o1")).await.unwrap();
    assert_eq!(unchanged.status, Some(OrderStatus::Pending));

    let page = app.orders_page("/orders", &cookie).await;
    assert!(page.contains("Something went wrong while updating the status."));
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_asks_for_confirmation_first() {
    let app = TestApp::new(pending_and_dispatch()).await;
    let cookie = app.login().await;

    let response = app
        .get("/orders/o2/delete?status=dispatch", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Are you sure?"));
    assert!(body.contains(r#"value="confirm""#));
    assert!(body.contains(r#"value="cancel""#));
    assert!(body.contains(r#"name="filter" value="dispatch""#));

    // Showing the prompt does not touch the store
    assert_eq!(app.store.calls().await, vec![StoreCall::Fetch]);
}

#[tokio::test]
async fn test_cancelled_delete_changes_nothing() {
    let app = TestApp::new(pending_and_dispatch()).await;
    let cookie = app.login().await;

    let response = app
        .post_form("/orders/o2/delete", "choice=cancel&filter=All", Some(&cookie))
        .await;
    assert_eq!(location(&response), Some("/orders"));

    assert_eq!(app.store.calls().await, vec![StoreCall::Fetch]);
    assert!(app.desk.get(&OrderId::new("o2")).await.is_some());
}

#[tokio::test]
async fn test_confirmed_delete_removes_order() {
    let app = TestApp::new(pending_and_dispatch()).await;
    let cookie = app.login().await;

    let response = app
        .post_form("/orders/o2/delete", "choice=confirm&filter=All", Some(&cookie))
        .await;
    assert_eq!(location(&response), Some("/orders"));

    assert!(
        app.store
            .calls()
            .await
            .contains(&StoreCall::Delete(OrderId::new("o2")))
    );
    assert!(app.desk.get(&OrderId::new("o2")).await.is_none());

    let page = app.orders_page("/orders", &cookie).await;
    assert!(!page.contains(r#"id="order-o2""#));
    assert!(page.contains("Your order has been deleted."));
}

#[tokio::test]
async fn test_failed_delete_keeps_order() {
    let app = TestApp::new(pending_and_dispatch()).await;
    let cookie = app.login().await;
    app.store.fail_mutations(true);

    app.post_form("/orders/o2/delete", "choice=confirm&filter=All", Some(&cookie))
        .await;

    assert!(app.desk.get(&OrderId::new("o2")).await.is_some());
    let page = app.orders_page("/orders", &cookie).await;
    assert!(page.contains(r#"id="order-o2""#));
    assert!(page.contains("Something went wrong while deleting."));
}

#[tokio::test]
async fn test_invalid_choice_is_rejected() {
    let app = TestApp::new(pending_and_dispatch()).await;
    let cookie = app.login().await;

    let response = app
        .post_form("/orders/o2/delete", "choice=maybe&filter=All", Some(&cookie))
        .await;
    assert!(response.status().is_client_error());
    assert_eq!(app.store.calls().await, vec![StoreCall::Fetch]);
}

// ============================================================================
// Detail Toggle
// ============================================================================

#[tokio::test]
async fn test_detail_toggle_is_single_selection() {
    let app = TestApp::new(pending_and_dispatch()).await;
    let cookie = app.login().await;

    app.post_form("/orders/o1/toggle", "filter=All", Some(&cookie))
        .await;
    let page = app.orders_page("/orders", &cookie).await;
    assert!(page.contains("Product for o1"));
    assert!(!page.contains("Product for o2"));

    // Opening another row closes the first
    app.post_form("/orders/o2/toggle", "filter=All", Some(&cookie))
        .await;
    let page = app.orders_page("/orders", &cookie).await;
    assert!(!page.contains("Product for o1"));
    assert!(page.contains("Product for o2"));

    // Toggling the open row closes it
    app.post_form("/orders/o2/toggle", "filter=All", Some(&cookie))
        .await;
    let page = app.orders_page("/orders", &cookie).await;
    assert!(!page.contains("Order Details"));
}

// ============================================================================
// Reload
// ============================================================================

#[tokio::test]
async fn test_reload_picks_up_store_changes() {
    let app = TestApp::new(pending_and_dispatch()).await;
    let cookie = app.login().await;

    app.store.replace([order("o9", None, 900)]).await;
    let response = app
        .post_form("/orders/reload", "filter=All", Some(&cookie))
        .await;
    assert_eq!(location(&response), Some("/orders"));

    let page = app.orders_page("/orders", &cookie).await;
    assert!(page.contains(r#"id="order-o9""#));
    assert!(!page.contains(r#"id="order-o1""#));
    assert!(page.contains("Loaded 1 order from the store."));
}

#[tokio::test]
async fn test_failed_reload_keeps_list_and_shows_banner() {
    let app = TestApp::new(pending_and_dispatch()).await;
    let cookie = app.login().await;

    app.store.fail_fetch(true);
    app.post_form("/orders/reload", "filter=All", Some(&cookie))
        .await;

    let page = app.orders_page("/orders", &cookie).await;
    assert!(page.contains("Orders could not be loaded"));
    assert!(page.contains("Something went wrong while loading orders."));
    assert!(page.contains(r#"id="order-o1""#));
}

#[tokio::test]
async fn test_failed_initial_load_still_serves_empty_page() {
    let app = TestApp::unloaded(pending_and_dispatch());
    app.store.fail_fetch(true);
    assert!(app.desk.load().await.is_err());

    let cookie = app.login().await;
    let response = app.get("/orders", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains("Orders could not be loaded"));
    assert!(page.contains("No orders to show."));
}

// ============================================================================
// End to End
// ============================================================================

#[tokio::test]
async fn test_status_change_then_delete_scenario() {
    let app = TestApp::new([
        order("o1", Some(OrderStatus::Pending), 1000),
        order("o2", Some(OrderStatus::Success), 2000),
    ])
    .await;
    let cookie = app.login().await;

    app.post_form("/orders/o1/status", "status=dispatch&filter=All", Some(&cookie))
        .await;
    let statuses: Vec<_> = app
        .desk
        .snapshot()
        .await
        .iter()
        .map(|o| (o.id.to_string(), o.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("o1".to_owned(), Some(OrderStatus::Dispatch)),
            ("o2".to_owned(), Some(OrderStatus::Success)),
        ]
    );

    app.post_form("/orders/o2/delete", "choice=confirm&filter=All", Some(&cookie))
        .await;
    let remaining: Vec<_> = app
        .desk
        .snapshot()
        .await
        .iter()
        .map(|o| (o.id.to_string(), o.status))
        .collect();
    assert_eq!(remaining, vec![("o1".to_owned(), Some(OrderStatus::Dispatch))]);

    assert_eq!(
        app.store.calls().await,
        vec![
            StoreCall::Fetch,
            StoreCall::SetStatus(OrderId::new("o1"), OrderStatus::Dispatch),
            StoreCall::Delete(OrderId::new("o2")),
        ]
    );
}
