use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use shared::{
    catalog::{CategoryDetail, PageListing, ProductDetail, RouteLookup},
    domain::{CategoryUid, ProductSku},
};
use tracing::{debug, error};

pub mod error;
mod fetcher;
pub mod queries;
mod resolver;

pub use error::FetchError;
pub use fetcher::{Entity, EntityFetcher, Fetched, PageExtension};
pub use resolver::{RouteKind, RouteResolver};

use queries::{
    Operation, GET_CATEGORY_BY_ROUTE, GET_CATEGORY_BY_UID, GET_PAGES, GET_PRODUCT_BY_ROUTE,
    GET_PRODUCT_BY_SKU,
};

/// The named queries the storefront issues against the catalog mesh.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn category_by_route(&self, url: &str) -> Result<RouteLookup, FetchError>;
    async fn category_by_uid(&self, uid: &CategoryUid) -> Result<CategoryDetail, FetchError>;
    async fn product_by_route(&self, url: &str) -> Result<RouteLookup, FetchError>;
    async fn product_by_sku(&self, sku: &ProductSku) -> Result<ProductDetail, FetchError>;
    async fn pages(&self) -> Result<PageListing, FetchError>;
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    #[serde(rename = "operationName")]
    operation_name: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphQlErrorEntry>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

/// Single-shot GraphQL client: one POST per query, no caching, no retries.
#[derive(Clone)]
pub struct GraphqlClient {
    http: Client,
    endpoint: String,
}

impl GraphqlClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Builds a client whose transport gives up after `timeout`.
    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(FetchError::Client)?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn query<T: DeserializeOwned>(
        &self,
        operation: Operation,
        variables: Value,
    ) -> Result<T, FetchError> {
        debug!(operation = operation.name, endpoint = %self.endpoint, "issuing GraphQL query");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&GraphQlRequest {
                query: operation.document,
                operation_name: operation.name,
                variables,
            })
            .send()
            .await
            .map_err(|source| {
                error!(operation = operation.name, %source, "GraphQL transport failure");
                FetchError::Transport {
                    operation: operation.name,
                    source,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(
                operation = operation.name,
                status = status.as_u16(),
                "GraphQL endpoint rejected query"
            );
            return Err(FetchError::Status {
                operation: operation.name,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                operation: operation.name,
                source,
            })?;
        decode_response(operation.name, &body)
    }
}

fn decode_response<T: DeserializeOwned>(
    operation: &'static str,
    body: &[u8],
) -> Result<T, FetchError> {
    let envelope: GraphQlResponse = serde_json::from_slice(body)
        .map_err(|source| FetchError::Decode { operation, source })?;

    if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
        return Err(FetchError::GraphQl {
            operation,
            messages: errors.into_iter().map(|entry| entry.message).collect(),
        });
    }

    let data = envelope
        .data
        .filter(|data| !data.is_null())
        .ok_or(FetchError::MissingData { operation })?;
    serde_json::from_value(data).map_err(|source| FetchError::Decode { operation, source })
}

#[async_trait]
impl EntityStore for GraphqlClient {
    async fn category_by_route(&self, url: &str) -> Result<RouteLookup, FetchError> {
        self.query(GET_CATEGORY_BY_ROUTE, json!({ "url": url })).await
    }

    async fn category_by_uid(&self, uid: &CategoryUid) -> Result<CategoryDetail, FetchError> {
        self.query(GET_CATEGORY_BY_UID, json!({ "uid": uid.as_str() }))
            .await
    }

    async fn product_by_route(&self, url: &str) -> Result<RouteLookup, FetchError> {
        self.query(GET_PRODUCT_BY_ROUTE, json!({ "url": url })).await
    }

    async fn product_by_sku(&self, sku: &ProductSku) -> Result<ProductDetail, FetchError> {
        self.query(GET_PRODUCT_BY_SKU, json!({ "sku": sku.as_str() }))
            .await
    }

    async fn pages(&self) -> Result<PageListing, FetchError> {
        self.query(GET_PAGES, json!({})).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
