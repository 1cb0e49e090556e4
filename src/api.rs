//! REST transport for inventory resources.
//!
//! [`ResourceApi`] is the seam between a controller and the network: the
//! four collection calls every resource supports. [`RestClient`] is the
//! `reqwest` implementation used by the console; tests substitute an
//! in-memory double.

use std::future::Future;

use reqwest::{Response, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::Result;
use crate::config::ApiConfig;
use crate::models::{Order, Product, Resource, Stock, Supplier};

/// Collection-level CRUD calls for one resource.
///
/// Response bodies of create, update and delete are ignored: callers
/// resynchronise by listing the collection again.
pub trait ResourceApi<R: Resource>: Clone + Send + Sync + 'static {
    /// `GET /{resource}`
    fn list(&self) -> impl Future<Output = Result<Vec<R>>> + Send;

    /// `POST /{resource}`
    fn create(&self, payload: &R::Payload) -> impl Future<Output = Result<()>> + Send;

    /// `PUT /{resource}/{id}`
    fn update(&self, id: &R::Id, payload: &R::Payload)
    -> impl Future<Output = Result<()>> + Send;

    /// `DELETE /{resource}/{id}`
    fn delete(&self, id: &R::Id) -> impl Future<Output = Result<()>> + Send;
}

/// A transport that serves every inventory resource.
pub trait InventoryApi:
    ResourceApi<Product> + ResourceApi<Supplier> + ResourceApi<Stock> + ResourceApi<Order>
{
}

impl<T> InventoryApi for T where
    T: ResourceApi<Product> + ResourceApi<Supplier> + ResourceApi<Stock> + ResourceApi<Order>
{
}

/// HTTP client bound to one API base URL.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl RestClient {
    /// Builds a client for the given API configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ImsError::Config`](crate::ImsError::Config) if the HTTP
    /// client cannot be constructed.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            crate::ImsError::Config(format!("failed to build HTTP client: {e}"))
        })?;
        Ok(Self { http, config })
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn collection_url<R: Resource>(&self) -> Url {
        self.config.endpoint(R::PATH)
    }

    fn member_url<R: Resource>(&self, id: &R::Id) -> Url {
        let mut url = self.collection_url::<R>();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(&id.to_string());
        }
        url
    }
}

impl<R: Resource> ResourceApi<R> for RestClient {
    async fn list(&self) -> Result<Vec<R>> {
        let url = self.collection_url::<R>();
        debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        let body = ensure_success(response).await?.text().await?;
        let items = serde_json::from_str::<Vec<R>>(&body).map_err(|e| {
            warn!(resource = R::PATH, error = %e, "unexpected collection body");
            e
        })?;
        Ok(items)
    }

    async fn create(&self, payload: &R::Payload) -> Result<()> {
        let url = self.collection_url::<R>();
        debug!(%url, ?payload, "POST");
        let response = self.http.post(url).json(payload).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn update(&self, id: &R::Id, payload: &R::Payload) -> Result<()> {
        let url = self.member_url::<R>(id);
        debug!(%url, ?payload, "PUT");
        let response = self.http.put(url).json(payload).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn delete(&self, id: &R::Id) -> Result<()> {
        let url = self.member_url::<R>(id);
        debug!(%url, "DELETE");
        let response = self.http.delete(url).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

/// Turns a non-2xx response into [`ImsError::Status`](crate::ImsError::Status).
///
/// The `message` field of a JSON error body is kept when present.
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body);
    warn!(%url, %status, server_message = message.as_deref(), "request rejected");

    Err(crate::ImsError::Status { status, message })
}

/// Extracts a non-empty `message` string from a JSON error body.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(String::from)
}
