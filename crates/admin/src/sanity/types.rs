//! Wire types for the Sanity HTTP API.
//!
//! These mirror the JSON shapes of the query and mutate endpoints. Documents
//! are schema-less: any field may be missing, and `phone`/`zip` arrive as
//! either strings or numbers.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// =============================================================================
// Query endpoint
// =============================================================================

/// Envelope of `GET /data/query/{dataset}`.
#[derive(Debug, Deserialize)]
pub struct QueryResponse<T> {
    pub result: T,
}

/// An order document as projected by [`super::queries::ORDERS_QUERY`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub zip: Option<String>,
    /// Number in practice, but older documents hold strings.
    #[serde(default)]
    pub total: Option<Value>,
    #[serde(default, deserialize_with = "text")]
    pub order_date: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub status: Option<String>,
    /// Raw entries; each may be `null` or malformed and is validated one by one.
    #[serde(default, deserialize_with = "array")]
    pub cart_items: Option<Vec<Value>>,
}

/// A dereferenced product inside `cartItems`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDocument {
    #[serde(default)]
    pub product_name: Option<String>,
    /// Image object (`{"asset": {"_ref": ...}}`) or a plain URL.
    #[serde(default)]
    pub image: Option<Value>,
}

fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn array<'de, D>(deserializer: D) -> Result<Option<Vec<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(items),
        _ => None,
    })
}

// =============================================================================
// Mutate endpoint
// =============================================================================

/// Body of `POST /data/mutate/{dataset}`.
#[derive(Debug, Serialize)]
pub struct MutateRequest<'a> {
    pub mutations: Vec<Mutation<'a>>,
}

/// A single mutation. Serializes as `{"patch": {...}}` or `{"delete": {...}}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Mutation<'a> {
    Patch(Patch<'a>),
    Delete(DocumentTarget<'a>),
}

/// Field-level patch of one document.
#[derive(Debug, Serialize)]
pub struct Patch<'a> {
    pub id: &'a str,
    pub set: StatusSet<'a>,
}

/// The only field the admin panel ever writes.
#[derive(Debug, Serialize)]
pub struct StatusSet<'a> {
    pub status: &'a str,
}

#[derive(Debug, Serialize)]
pub struct DocumentTarget<'a> {
    pub id: &'a str,
}

/// Successful mutate response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutateResponse {
    pub transaction_id: String,
}

// =============================================================================
// Errors
// =============================================================================

/// Body of a non-2xx response.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}
