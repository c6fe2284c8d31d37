//! Conversions from Sanity documents to domain orders.
//!
//! Nothing in here fails: malformed values degrade to an unset status, a zero
//! total, a missing timestamp or an [`CartItem::Invalid`] entry, with a log
//! line naming the order.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::warn;

use order_desk_core::{
    CartItem, Contact, CustomerName, Money, Order, OrderId, OrderStatus, ProductLine,
    ShippingAddress,
};

use super::types::{CartItemDocument, OrderDocument};

/// Image shown when a product has none, or its reference cannot be resolved.
pub const FALLBACK_IMAGE: &str = "/static/default-image.svg";

const CDN_HOST: &str = "https://cdn.sanity.io";

/// Resolves Sanity image asset references to CDN URLs.
#[derive(Debug, Clone)]
pub struct AssetUrls {
    project_id: String,
    dataset: String,
}

impl AssetUrls {
    #[must_use]
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    /// Resolve `image-<hash>-<w>x<h>-<ext>` to its CDN URL.
    #[must_use]
    pub fn resolve_ref(&self, asset_ref: &str) -> Option<String> {
        let rest = asset_ref.strip_prefix("image-")?;
        let (rest, ext) = rest.rsplit_once('-')?;
        let (hash, dimensions) = rest.rsplit_once('-')?;
        let (width, height) = dimensions.split_once('x')?;

        let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if hash.is_empty() || ext.is_empty() || !is_digits(width) || !is_digits(height) {
            return None;
        }

        Some(format!(
            "{CDN_HOST}/images/{}/{}/{hash}-{dimensions}.{ext}",
            self.project_id, self.dataset
        ))
    }

    /// Displayable URL for an `image` field, falling back to [`FALLBACK_IMAGE`].
    ///
    /// URLs on hosts other than the Sanity CDN also fall back.
    #[must_use]
    pub fn image_url(&self, image: Option<&Value>) -> String {
        let resolved = match image {
            Some(Value::String(s)) if is_cdn_url(s) => Some(s.clone()),
            Some(Value::String(s)) => self.resolve_ref(s),
            Some(Value::Object(obj)) => obj.get("asset").and_then(|asset| {
                asset
                    .get("url")
                    .and_then(Value::as_str)
                    .filter(|url| is_cdn_url(url))
                    .map(String::from)
                    .or_else(|| {
                        asset
                            .get("_ref")
                            .and_then(Value::as_str)
                            .and_then(|r| self.resolve_ref(r))
                    })
            }),
            _ => None,
        };
        resolved.unwrap_or_else(|| FALLBACK_IMAGE.to_string())
    }
}

/// Only CDN URLs are passed through: the admin CSP blocks images from any
/// other host.
fn is_cdn_url(s: &str) -> bool {
    s.strip_prefix(CDN_HOST).is_some_and(|path| path.starts_with('/'))
}

/// Convert raw query results, skipping entries without an `_id`.
///
/// Duplicate IDs are passed through; [`order_desk_core::OrderList`] keeps the
/// first.
pub fn convert_orders(documents: Vec<Value>, assets: &AssetUrls) -> Vec<Order> {
    documents
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<OrderDocument>(value) {
            Ok(doc) => Some(convert_order(doc, assets)),
            Err(e) => {
                warn!(error = %e, "Skipping unreadable order document");
                None
            }
        })
        .collect()
}

/// Convert one order document.
pub fn convert_order(doc: OrderDocument, assets: &AssetUrls) -> Order {
    let id = OrderId::new(doc.id);
    let status = convert_status(&id, doc.status.as_deref());
    let total = convert_total(&id, doc.total.as_ref());
    let ordered_at = doc.order_date.as_deref().and_then(|raw| {
        let parsed = parse_order_date(raw);
        if parsed.is_none() {
            warn!(order_id = %id, order_date = raw, "Unparseable order date");
        }
        parsed
    });
    let cart_items = doc
        .cart_items
        .unwrap_or_default()
        .into_iter()
        .map(|item| convert_cart_item(item, assets))
        .collect();

    Order {
        id,
        customer: CustomerName {
            first: doc.first_name.unwrap_or_default(),
            last: doc.last_name.unwrap_or_default(),
        },
        contact: Contact {
            phone: doc.phone.unwrap_or_default(),
            email: doc.email.unwrap_or_default(),
        },
        shipping: ShippingAddress {
            street: doc.address.unwrap_or_default(),
            city: doc.city.unwrap_or_default(),
            zip: doc.zip.unwrap_or_default(),
        },
        total,
        ordered_at,
        status,
        cart_items,
    }
}

/// A `null`, non-object or unreadable entry becomes [`CartItem::Invalid`].
fn convert_cart_item(value: Value, assets: &AssetUrls) -> CartItem {
    if !value.is_object() {
        return CartItem::Invalid;
    }
    match serde_json::from_value::<CartItemDocument>(value) {
        Ok(item) => CartItem::Product(ProductLine {
            product_name: item
                .product_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            image_url: assets.image_url(item.image.as_ref()),
        }),
        Err(_) => CartItem::Invalid,
    }
}

fn convert_status(id: &OrderId, raw: Option<&str>) -> Option<OrderStatus> {
    let raw = raw?;
    match raw.parse() {
        Ok(status) => Some(status),
        Err(e) => {
            warn!(order_id = %id, error = %e, "Order has an unknown status");
            None
        }
    }
}

fn convert_total(id: &OrderId, raw: Option<&Value>) -> Money {
    let parsed = match raw {
        None | Some(Value::Null) => return Money::ZERO,
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| "not representable".to_string())
            .and_then(|f| Money::from_f64(f).map_err(|e| e.to_string())),
        Some(Value::String(s)) => s
            .trim()
            .parse::<Decimal>()
            .map_err(|e| e.to_string())
            .and_then(|d| Money::new(d).map_err(|e| e.to_string())),
        Some(other) => Err(format!("unexpected JSON {other}")),
    };

    parsed.unwrap_or_else(|error| {
        warn!(order_id = %id, %error, "Invalid order total, showing zero");
        Money::ZERO
    })
}

/// RFC 3339 timestamps, or bare `YYYY-MM-DD` dates taken as UTC midnight.
fn parse_order_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assets() -> AssetUrls {
        AssetUrls::new("abc123", "production")
    }

    #[test]
    fn test_resolve_image_ref() {
        assert_eq!(
            assets()
                .resolve_ref("image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg")
                .as_deref(),
            Some(
                "https://cdn.sanity.io/images/abc123/production/Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg"
            )
        );
        assert!(assets().resolve_ref("file-abc-pdf").is_none());
        assert!(assets().resolve_ref("image-abc-wide-png").is_none());
    }

    #[test]
    fn test_image_url_shapes() {
        let a = assets();
        assert_eq!(
            a.image_url(Some(&json!("https://cdn.sanity.io/images/abc123/production/t-1x1.png"))),
            "https://cdn.sanity.io/images/abc123/production/t-1x1.png"
        );
        assert_eq!(
            a.image_url(Some(&json!("https://example.com/tea.png"))),
            FALLBACK_IMAGE
        );
        assert_eq!(
            a.image_url(Some(&json!({"asset": {"url": "http://cdn.sanity.io.evil.test/x.png"}}))),
            FALLBACK_IMAGE
        );
        assert_eq!(
            a.image_url(Some(&json!({"_type": "image", "asset": {"_ref": "image-h-10x20-png"}}))),
            "https://cdn.sanity.io/images/abc123/production/h-10x20.png"
        );
        assert_eq!(a.image_url(None), FALLBACK_IMAGE);
        assert_eq!(a.image_url(Some(&json!({"asset": null}))), FALLBACK_IMAGE);
        assert_eq!(a.image_url(Some(&json!(42))), FALLBACK_IMAGE);
    }

    #[test]
    fn test_invalid_cart_entries_do_not_hide_valid_ones() {
        let docs = vec![json!({
            "_id": "o1",
            "cartItems": [
                null,
                {"productName": "Green Tea", "image": null},
                "garbage",
                {"productName": 7},
                {"image": {"asset": {"_ref": "image-h-1x1-webp"}}}
            ]
        })];
        let orders = convert_orders(docs, &assets());
        let items = &orders[0].cart_items;

        assert_eq!(items.len(), 5);
        assert!(items[0].is_invalid());
        assert_eq!(
            items[1],
            CartItem::Product(ProductLine {
                product_name: Some("Green Tea".to_string()),
                image_url: FALLBACK_IMAGE.to_string(),
            })
        );
        assert!(items[2].is_invalid());
        assert!(items[3].is_invalid());
        assert!(matches!(
            &items[4],
            CartItem::Product(ProductLine { product_name: None, .. })
        ));
    }

    #[test]
    fn test_convert_order_fields() {
        let docs = vec![json!({
            "_id": "o1",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "phone": 5_550_100,
            "email": "ada@example.com",
            "address": "1 Analytical Way",
            "city": "London",
            "zip": 12345,
            "total": 42.5,
            "orderDate": "2025-02-07T10:30:00Z",
            "status": "dispatch"
        })];
        let order = convert_orders(docs, &assets()).remove(0);

        assert_eq!(order.customer.full(), "Ada Lovelace");
        assert_eq!(order.contact.phone, "5550100");
        assert_eq!(order.shipping.zip, "12345");
        assert_eq!(order.total.to_string(), "$42.50");
        assert_eq!(order.status, Some(OrderStatus::Dispatch));
        assert_eq!(
            order.ordered_at.unwrap().to_rfc3339(),
            "2025-02-07T10:30:00+00:00"
        );
        assert!(order.cart_items.is_empty());
    }

    #[test]
    fn test_unknown_status_is_unset() {
        let docs = vec![
            json!({"_id": "o1", "status": "refunded"}),
            json!({"_id": "o2"}),
        ];
        let orders = convert_orders(docs, &assets());
        assert!(orders.iter().all(|o| o.status.is_none()));
    }

    #[test]
    fn test_wrongly_typed_fields_keep_the_order() {
        let docs = vec![
            json!({"_id": "o1", "status": 2, "email": 5}),
            json!({"_id": "o2", "firstName": {}, "orderDate": 0, "city": ["x"]}),
        ];
        let orders = convert_orders(docs, &assets());

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id.as_str(), "o1");
        assert_eq!(orders[0].status, None);
        assert_eq!(orders[0].contact.email, "");
        assert_eq!(orders[1].customer.first, "");
        assert!(orders[1].ordered_at.is_none());
        assert_eq!(orders[1].shipping.city, "");
    }

    #[test]
    fn test_bad_totals_become_zero() {
        for total in [json!(-5), json!("abc"), json!(true), json!("-1.00")] {
            let docs = vec![json!({"_id": "o1", "total": total})];
            assert_eq!(convert_orders(docs, &assets())[0].total, Money::ZERO);
        }
        let docs = vec![json!({"_id": "o1", "total": "19.99"})];
        assert_eq!(convert_orders(docs, &assets())[0].total.to_string(), "$19.99");
    }

    #[test]
    fn test_documents_without_id_are_skipped() {
        let docs = vec![json!({"firstName": "Nobody"}), json!({"_id": "o2"})];
        let orders = convert_orders(docs, &assets());
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id.as_str(), "o2");
    }

    #[test]
    fn test_parse_order_date_variants() {
        assert!(parse_order_date("2025-02-07").is_some());
        assert!(parse_order_date("2025-02-07T10:30:00.123+02:00").is_some());
        assert!(parse_order_date("yesterday").is_none());
    }
}
