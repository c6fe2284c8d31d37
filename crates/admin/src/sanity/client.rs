//! Sanity HTTP API client.
//!
//! Talks to the query and mutate endpoints of one dataset with a bearer token.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, instrument};
use url::Url;

use order_desk_core::{Order, OrderId, OrderStatus};

use crate::config::SanityConfig;
use crate::store::{DocumentStore, DocumentStoreError};

use super::conversions::{AssetUrls, convert_orders};
use super::queries::ORDERS_QUERY;
use super::types::{
    DocumentTarget, ErrorResponse, MutateRequest, MutateResponse, Mutation, Patch,
    QueryResponse, StatusSet,
};

/// Client for one Sanity project and dataset.
#[derive(Clone)]
pub struct SanityClient {
    client: Client,
    /// `{api_host}/v{api_version}/`
    base_url: Url,
    dataset: String,
    token: SecretString,
    assets: AssetUrls,
}

impl std::fmt::Debug for SanityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SanityClient")
            .field("base_url", &self.base_url.as_str())
            .field("dataset", &self.dataset)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl SanityClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `DocumentStoreError::Url` if the API host is not a valid URL.
    pub fn new(config: &SanityConfig) -> Result<Self, DocumentStoreError> {
        let base_url = Url::parse(&format!(
            "{}/v{}/",
            config.api_host.trim_end_matches('/'),
            config.api_version
        ))?;

        Ok(Self {
            client: Client::new(),
            base_url,
            dataset: config.dataset.clone(),
            token: config.token.clone(),
            assets: AssetUrls::new(&config.project_id, &config.dataset),
        })
    }

    /// URL of the orders query.
    pub(crate) fn query_url(&self) -> Result<Url, DocumentStoreError> {
        let mut url = self
            .base_url
            .join(&format!("data/query/{}", self.dataset))?;
        url.query_pairs_mut().append_pair("query", ORDERS_QUERY);
        Ok(url)
    }

    /// URL of the mutate endpoint. `visibility=sync` makes the change visible
    /// to the next query before the call returns.
    pub(crate) fn mutate_url(&self) -> Result<Url, DocumentStoreError> {
        let mut url = self
            .base_url
            .join(&format!("data/mutate/{}", self.dataset))?;
        url.query_pairs_mut().append_pair("visibility", "sync");
        Ok(url)
    }

    async fn mutate(&self, mutation: Mutation<'_>) -> Result<(), DocumentStoreError> {
        let body = MutateRequest {
            mutations: vec![mutation],
        };

        let response = self
            .client
            .post(self.mutate_url()?)
            .bearer_auth(self.token.expose_secret())
            .json(&body)
            .send()
            .await?;

        let result: MutateResponse = check_status(response).await?.json().await?;
        debug!(transaction_id = %result.transaction_id, "Mutation committed");
        Ok(())
    }
}

/// Turn a non-2xx response into `DocumentStoreError::Api`.
async fn check_status(response: Response) -> Result<Response, DocumentStoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let description = describe_error(body);

    error!(status = status.as_u16(), %description, "Sanity API error");
    Err(DocumentStoreError::Api {
        status: status.as_u16(),
        description,
    })
}

/// `"<type>: <description>"` from a Sanity error body, or the raw body.
fn describe_error(body: String) -> String {
    let Ok(ErrorResponse { error }) = serde_json::from_str::<ErrorResponse>(&body) else {
        return body;
    };
    match (error.kind, error.description) {
        (Some(kind), Some(description)) => format!("{kind}: {description}"),
        (None, Some(description)) => description,
        (Some(kind), None) => kind,
        (None, None) => body,
    }
}

#[async_trait]
impl DocumentStore for SanityClient {
    #[instrument(skip(self), fields(dataset = %self.dataset))]
    async fn fetch_orders(&self) -> Result<Vec<Order>, DocumentStoreError> {
        let response = self
            .client
            .get(self.query_url()?)
            .bearer_auth(self.token.expose_secret())
            .send()
            .await?;

        let body: QueryResponse<Vec<serde_json::Value>> =
            check_status(response).await?.json().await?;
        let orders = convert_orders(body.result, &self.assets);
        debug!(count = orders.len(), "Fetched orders");
        Ok(orders)
    }

    #[instrument(skip(self), fields(order_id = %id, status = %status))]
    async fn set_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), DocumentStoreError> {
        self.mutate(Mutation::Patch(Patch {
            id: id.as_str(),
            set: StatusSet {
                status: status.as_str(),
            },
        }))
        .await
    }

    #[instrument(skip(self), fields(order_id = %id))]
    async fn delete(&self, id: &OrderId) -> Result<(), DocumentStoreError> {
        self.mutate(Mutation::Delete(DocumentTarget { id: id.as_str() }))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config() -> SanityConfig {
        SanityConfig {
            project_id: "abc123".to_string(),
            dataset: "production".to_string(),
            api_version: "2025-02-07".to_string(),
            api_host: "https://abc123.api.sanity.io/".to_string(),
            token: SecretString::from("skQ8vT2mZ4rLx9Wn"),
        }
    }

    #[test]
    fn test_query_url() {
        let client = SanityClient::new(&config()).unwrap();
        let url = client.query_url().unwrap();
        assert_eq!(url.path(), "/v2025-02-07/data/query/production");
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "query");
        assert_eq!(value, ORDERS_QUERY);
    }

    #[test]
    fn test_mutate_url() {
        let client = SanityClient::new(&config()).unwrap();
        assert_eq!(
            client.mutate_url().unwrap().as_str(),
            "https://abc123.api.sanity.io/v2025-02-07/data/mutate/production?visibility=sync"
        );
    }

    #[test]
    fn test_invalid_host_is_rejected() {
        let mut config = config();
        config.api_host = "not a url".to_string();
        assert!(matches!(
            SanityClient::new(&config),
            Err(DocumentStoreError::Url(_))
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = SanityClient::new(&config()).unwrap();
        let debug_output = format!("{client:?}");
        assert!(debug_output.contains("production"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("skQ8vT2mZ4rLx9Wn"));
    }

    #[test]
    fn test_describe_error() {
        assert_eq!(
            describe_error(
                r#"{"error":{"description":"Document not found","type":"mutationError"}}"#
                    .to_string()
            ),
            "mutationError: Document not found"
        );
        assert_eq!(
            describe_error(r#"{"error":{"description":"Unauthorized"}}"#.to_string()),
            "Unauthorized"
        );
        assert_eq!(describe_error("Bad Gateway".to_string()), "Bad Gateway");
    }
}
