// API client module: a small blocking HTTP client that talks to the
// vault's REST API. It is intentionally small and synchronous; the
// walkthrough is a strictly sequential flow with nothing to parallelize.
//
// The surface is split into resource-scoped sub-clients the way the
// service documents its API: system (health), collections (schemas),
// objects (records) and tokens.

mod collections;
mod error;
mod models;
mod objects;
mod system;
mod tokens;

pub use collections::CollectionsClient;
pub use error::{ApiError, ApiResult};
pub use models::*;
pub use objects::{ListObjectsParams, ObjectsClient};
pub use system::SystemClient;
pub use tokens::TokensClient;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::VaultConfig;

/// All endpoints live under this version prefix.
const API_PREFIX: &str = "/api/pvlt/1.0";

/// Client for a single vault instance: holds a reqwest blocking client,
/// the base URL and the bearer token sent on every call.
#[derive(Clone)]
pub struct VaultClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl VaultClient {
    pub fn new(config: &VaultConfig) -> ApiResult<Self> {
        let http = Client::builder().build()?;
        Ok(VaultClient {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Health endpoints.
    pub fn system(&self) -> SystemClient<'_> {
        SystemClient { vault: self }
    }

    /// Collection (schema) management.
    pub fn collections(&self) -> CollectionsClient<'_> {
        CollectionsClient { vault: self }
    }

    /// Object storage, listing and search.
    pub fn objects(&self) -> ObjectsClient<'_> {
        ObjectsClient { vault: self }
    }

    /// Tokenization, token search and deletion.
    pub fn tokens(&self) -> TokensClient<'_> {
        TokensClient { vault: self }
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}{}", self.base_url, API_PREFIX, path);
        debug!(%method, %url, "vault request");
        self.http
            .request(method, url)
            .bearer_auth(&self.api_key)
    }

    /// Send a request and decode the JSON response, mapping non-success
    /// statuses to `ApiError::Api`.
    pub(crate) fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = Self::check(request.send()?)?;
        Ok(response.json()?)
    }

    /// Send a request whose response body is irrelevant (deletes).
    pub(crate) fn send_no_content(&self, request: RequestBuilder) -> ApiResult<()> {
        Self::check(request.send()?)?;
        Ok(())
    }

    /// Like `send`, but attaches a JSON body first.
    pub(crate) fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        body: &B,
    ) -> ApiResult<T> {
        self.send(request.json(body))
    }

    fn check(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        debug!(%status, %body, "vault request failed");
        Err(ApiError::from_status(status, &body))
    }
}
