//! Typed HTTP client for the registry REST API
//!
//! Thin wrapper over `reqwest` shared by every service: endpoint building,
//! bearer authentication, status checking and response decoding.
//!
//! # Response shapes
//!
//! The API returns either the payload itself or the payload wrapped as
//! `{"data": ...}`. Both are accepted.

use super::error::ServiceError;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest error body kept in a `ServiceError::Status` message
const MAX_ERROR_BODY: usize = 200;

/// Connection settings for [`ApiClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
}

/// Shared REST client
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    api_token: Option<String>,
    client: reqwest::Client,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "error")]
    message: String,
}

impl ApiClient {
    /// Build a client from `config`.
    ///
    /// # Errors
    ///
    /// `ServiceError::Config` when the base URL does not parse or cannot
    /// carry a path, or the underlying client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ServiceError> {
        let base_url = Url::parse(config.base_url.trim()).map_err(|e| {
            ServiceError::config(format!("invalid base URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::config(format!(
                "base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout.max(Duration::from_millis(1)))
            .build()
            .map_err(|e| ServiceError::config(e.to_string()))?;

        Ok(Self {
            base_url,
            api_token: config
                .api_token
                .clone()
                .filter(|token| !token.trim().is_empty()),
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `segments` appended, each percent-encoded
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::invalid_request("base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// `GET` and decode the response body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<T, ServiceError> {
        let url = self.endpoint(segments)?;
        tracing::debug!("GET {}", url);

        let response = self.request(Method::GET, url.clone()).send().await?;
        let body = check_status(response).await?.text().await?;
        decode_body(&body, url.path())
    }

    /// Send `body` as JSON; the response body is ignored
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<(), ServiceError> {
        let url = self.endpoint(segments)?;
        tracing::debug!("{} {}", method, url);

        let response = self.request(method, url).json(body).send().await?;
        check_status(response).await?;
        Ok(())
    }

    /// `DELETE`; the response body is ignored
    pub async fn delete(&self, segments: &[&str]) -> Result<(), ServiceError> {
        let url = self.endpoint(segments)?;
        tracing::debug!("DELETE {}", url);

        let response = self.request(Method::DELETE, url).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ServiceError::status(status.as_u16(), error_message(&body)))
}

/// Decode a body that is either `T` or `{"data": T}`
pub(crate) fn decode_body<T: DeserializeOwned>(
    body: &str,
    context: &str,
) -> Result<T, ServiceError> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(Envelope::into_inner)
        .map_err(|e| ServiceError::decode(context, e.to_string()))
}

/// `message`/`error` from a JSON error body, else the raw body, truncated
pub(crate) fn error_message(body: &str) -> String {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => body.trim().to_string(),
    };

    if message.is_empty() {
        return "<no body>".to_string();
    }
    match message.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &message[..cut]),
        None => message,
    }
}
