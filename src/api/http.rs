//! HTTP client for the quality backend
//!
//! Thin layer over `reqwest`: joins resource paths onto the configured base
//! URL, attaches the bearer token of an explicit [`AuthContext`] and turns
//! non-success responses into [`Error::Api`] with the parsed error payload.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::auth::AuthContext;
use crate::config::ApiConfig;
use crate::error::{ApiErrorBody, Error, Result};

/// Backend client. Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    auth: Option<AuthContext>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth: None,
        })
    }

    /// Copy of this client that authenticates as `auth`
    pub fn with_auth(&self, auth: AuthContext) -> Self {
        Self {
            auth: Some(auth),
            ..self.clone()
        }
    }

    /// Copy of this client without credentials
    pub fn without_auth(&self) -> Self {
        Self {
            auth: None,
            ..self.clone()
        }
    }

    pub fn auth(&self) -> Option<&AuthContext> {
        self.auth.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path`; leading slashes on the path are optional
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Request builder with the bearer header already applied
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.auth {
            Some(auth) => builder.bearer_auth(auth.token()),
            None => builder,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = Self::send(self.request(Method::GET, path)).await?;
        Ok(response.json().await?)
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = Self::send(self.request(Method::POST, path).json(body)).await?;
        Ok(response.json().await?)
    }

    /// POST whose response body is not needed
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        Self::send(self.request(Method::POST, path).json(body)).await?;
        Ok(())
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        Self::send(self.request(Method::PUT, path).json(body)).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        Self::send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    async fn send(builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        debug!(url = %response.url(), %status, "API response");
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let err = error_from_response(status, &text);
        warn!(%status, error = %err, "API request failed");
        Err(err)
    }
}

/// Map a failed response to [`Error::Api`]; bodies that are not an error
/// payload yield an empty one
pub fn error_from_response(status: StatusCode, body: &str) -> Error {
    let body = serde_json::from_str::<ApiErrorBody>(body).unwrap_or_default();
    Error::api(status.as_u16(), body)
}
