//! Integration tests for Order Desk.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p order-desk-integration-tests
//! ```
//!
//! The admin router runs in-process against an [`InMemoryStore`], so no
//! network access or Sanity credentials are needed.
//!
//! # Test Categories
//!
//! - `admin_routes` - Authentication, probes and request validation
//! - `admin_order_workflows` - Status change, delete and reload end to end

use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, OnceLock};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use secrecy::SecretString;
use tower::ServiceExt;

use order_desk_admin::config::{AdminConfig, AuthConfig, SanityConfig};
use order_desk_admin::middleware::session_layer;
use order_desk_admin::routes;
use order_desk_admin::services::{OrderDesk, hash_password};
use order_desk_admin::state::AppState;
use order_desk_admin::store::InMemoryStore;
use order_desk_core::{
    CartItem, Contact, CustomerName, Email, Money, Order, OrderId, OrderStatus, ProductLine,
    ShippingAddress,
};

/// Operator login used by every test app.
pub const OPERATOR_EMAIL: &str = "ops@example.com";
/// Plain-text password matching [`OPERATOR_EMAIL`].
pub const OPERATOR_PASSWORD: &str = "correct-horse-battery";

/// Argon2 is slow in debug builds; hash once per test binary.
fn operator_password_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| {
        hash_password(OPERATOR_PASSWORD).unwrap_or_else(|e| panic!("hashing test password: {e}"))
    })
}

/// Configuration for an in-process admin server.
///
/// # Panics
///
/// Panics if the operator email constant is malformed.
#[must_use]
pub fn test_config() -> AdminConfig {
    AdminConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 3001,
        base_url: "http://localhost:3001".to_owned(),
        auth: AuthConfig {
            email: Email::parse(OPERATOR_EMAIL)
                .unwrap_or_else(|e| panic!("test email: {e}")),
            password_hash: SecretString::from(operator_password_hash().to_owned()),
        },
        sanity: SanityConfig {
            project_id: "testproj".to_owned(),
            dataset: "production".to_owned(),
            api_version: "2021-10-21".to_owned(),
            api_host: "https://testproj.api.sanity.io".to_owned(),
            token: SecretString::from("unused-in-tests".to_owned()),
        },
        refresh_interval: None,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
        tls: None,
    }
}

/// An order with a single valid cart item.
///
/// # Panics
///
/// Panics if `total_cents` is negative.
#[must_use]
pub fn order(id: &str, status: Option<OrderStatus>, total_cents: i64) -> Order {
    Order {
        id: OrderId::new(id),
        customer: CustomerName {
            first: "Ada".to_owned(),
            last: format!("Customer {id}"),
        },
        contact: Contact {
            phone: "5550100".to_owned(),
            email: format!("{id}@example.com"),
        },
        shipping: ShippingAddress {
            street: "1 Main St".to_owned(),
            city: "Springfield".to_owned(),
            zip: "12345".to_owned(),
        },
        total: Money::new(Decimal::new(total_cents, 2))
            .unwrap_or_else(|e| panic!("test total: {e}")),
        ordered_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).single(),
        status,
        cart_items: vec![CartItem::Product(ProductLine {
            product_name: Some(format!("Product for {id}")),
            image_url: "/static/default-image.svg".to_owned(),
        })],
    }
}

/// The admin router wired to an in-memory store.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub desk: Arc<OrderDesk>,
}

impl TestApp {
    /// Build the app and perform the initial load.
    pub async fn new(orders: impl IntoIterator<Item = Order>) -> Self {
        let app = Self::unloaded(orders);
        let _ = app.desk.load().await;
        app
    }

    /// Build the app without loading; the desk stays pending.
    #[must_use]
    pub fn unloaded(orders: impl IntoIterator<Item = Order>) -> Self {
        let store = Arc::new(InMemoryStore::new(orders));
        let desk = Arc::new(OrderDesk::new(store.clone()));
        let state = AppState::new(test_config(), Arc::clone(&desk));
        let router = routes::app(state, session_layer(false));
        Self {
            router,
            store,
            desk,
        }
    }

    /// Send a request through the router.
    ///
    /// # Panics
    ///
    /// Panics if the router itself fails, which axum routers never do.
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|e| match e {})
    }

    /// GET `path`, with the session cookie if given.
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response<Body> {
        self.send(build(Request::get(path), cookie, Body::empty()))
            .await
    }

    /// POST a urlencoded form to `path`.
    pub async fn post_form(&self, path: &str, form: &str, cookie: Option<&str>) -> Response<Body> {
        let builder = Request::post(path).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(build(builder, cookie, Body::from(form.to_owned())))
            .await
    }

    /// Log in as the operator and return the session cookie.
    ///
    /// # Panics
    ///
    /// Panics if the login does not redirect or sets no cookie.
    pub async fn login(&self) -> String {
        let form = format!("email={OPERATOR_EMAIL}&password={OPERATOR_PASSWORD}");
        let response = self.post_form("/auth/login", &form, None).await;
        assert_eq!(location(&response), Some("/orders"), "login should redirect");
        session_cookie(&response).unwrap_or_else(|| panic!("login set no session cookie"))
    }

    /// Render the orders page as the given session.
    pub async fn orders_page(&self, path: &str, cookie: &str) -> String {
        body_text(self.get(path, Some(cookie)).await).await
    }
}

fn build(
    builder: axum::http::request::Builder,
    cookie: Option<&str>,
    body: Body,
) -> Request<Body> {
    let builder = match cookie {
        Some(cookie) => builder.header(header::COOKIE, cookie),
        None => builder,
    };
    builder
        .body(body)
        .unwrap_or_else(|e| panic!("building request: {e}"))
}

/// `name=value` of the first `Set-Cookie` header.
#[must_use]
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .next()
        .map(str::to_owned)
}

/// The `Location` header, if any.
#[must_use]
pub fn location(response: &Response<Body>) -> Option<&str> {
    response.headers().get(header::LOCATION)?.to_str().ok()
}

/// Collect a response body as UTF-8.
///
/// # Panics
///
/// Panics if the body cannot be read or is not UTF-8.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_else(|e| panic!("reading body: {e}"));
    String::from_utf8(bytes.to_vec()).unwrap_or_else(|e| panic!("body is not UTF-8: {e}"))
}
