//! GitHub HTTP Client
//!
//! Shared reqwest client carrying the credential and API headers used by
//! both the GraphQL tree source and the git-data writer.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::GitHubConfig;
use crate::error::{BridgeError, BridgeResult};

const ACCEPT_JSON: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "x-github-api-version";
const API_VERSION: &str = "2022-11-28";
const CLIENT_NAME: &str = concat!("reward-bridge/", env!("CARGO_PKG_VERSION"));

/// Authenticated GitHub client
#[derive(Debug, Clone)]
pub struct GitHubHttp {
    client: Client,
    api_url: String,
    graphql_url: String,
}

impl GitHubHttp {
    /// Build a client from connection settings
    pub fn new(config: &GitHubConfig) -> BridgeResult<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| BridgeError::Config("token contains invalid header characters".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_NAME));
        headers.insert(API_VERSION_HEADER, HeaderValue::from_static(API_VERSION));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BridgeError::Config(e.to_string()))?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            graphql_url: config.graphql_url.clone(),
        })
    }

    /// Underlying HTTP client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// GraphQL endpoint
    pub fn graphql_url(&self) -> &str {
        &self.graphql_url
    }

    /// Absolute REST URL for a path starting with `/`
    pub fn rest_url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

/// Decode a successful JSON response or turn the status into an error
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> BridgeResult<T> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json().await?)
    } else {
        Err(BridgeError::api(
            status.as_u16(),
            response.text().await.unwrap_or_default(),
        ))
    }
}
