//! GROQ queries sent to the Sanity query endpoint.

/// Every order with its cart references dereferenced.
///
/// `->` resolves each cart reference at query time; a dangling reference
/// comes back as `null`.
pub const ORDERS_QUERY: &str = r#"*[_type == "order"]{_id, firstName, lastName, phone, email, address, city, zip, total, orderDate, status, cartItems[]->{productName, image}}"#;
