//! Shared HTTP client for the clinic backend.

use odonto_core::session::{PROFILE_KEY, SessionStore, TOKEN_KEY};
use odonto_core::user::UserProfile;
use odonto_core::{OdontoError, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::config::ApiConfig;

/// How a request authenticates.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Auth<'a> {
    /// Bearer token read from the session store, if one is persisted
    Stored,
    /// Bearer token supplied by the caller
    Token(&'a str),
    /// Login request: no token, and a 401 means bad credentials
    Login,
}

/// HTTP client bound to one backend.
///
/// Attaches `Authorization: Bearer <token>` to every request once a token
/// is persisted, and maps non-2xx responses onto `OdontoError` categories.
/// Requests are never retried.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    store: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        let base_url = Url::parse(config.base_url.trim())
            .map_err(|e| OdontoError::config(format!("Invalid api.base_url: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(OdontoError::config("api.base_url cannot be used as a base URL"));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| OdontoError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            store,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds an absolute URL from path segments, percent-encoding each one.
    pub fn url<S: AsRef<str>>(&self, segments: &[S]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| OdontoError::config("api.base_url cannot be used as a base URL"))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment.as_ref());
            }
        }
        Ok(url)
    }

    /// Id of the persisted user, for user-scoped paths.
    pub(crate) fn current_user_id(&self) -> Result<String> {
        let raw = self
            .store
            .get(PROFILE_KEY)?
            .ok_or(OdontoError::Unauthorized)?;
        let profile: UserProfile = serde_json::from_str(&raw).map_err(|_| OdontoError::Unauthorized)?;
        Ok(profile.id)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url, auth: Auth<'_>) -> Result<T> {
        let response = self.execute(self.client.get(url), auth).await?;
        Ok(response.json::<T>().await?)
    }

    pub(crate) async fn send_json<B, T>(&self, method: Method, url: Url, body: &B, auth: Auth<'_>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.request(method, url).json(body);
        let response = self.execute(request, auth).await?;
        Ok(response.json::<T>().await?)
    }

    pub(crate) async fn delete(&self, url: Url) -> Result<()> {
        self.execute(self.client.delete(url), Auth::Stored).await?;
        Ok(())
    }

    async fn execute(&self, request: RequestBuilder, auth: Auth<'_>) -> Result<Response> {
        let request = match auth {
            Auth::Stored => match self.store.get(TOKEN_KEY)? {
                Some(token) => request.header(AUTHORIZATION, format!("Bearer {}", token)),
                None => request,
            },
            Auth::Token(token) => request.header(AUTHORIZATION, format!("Bearer {}", token)),
            Auth::Login => request,
        };

        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!("{} {}", method, url);

        let response = self.client.execute(request).await.map_err(|e| {
            tracing::warn!("{} {} failed: {}", method, url, e);
            OdontoError::network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        tracing::warn!("{} {} returned {}: {}", method, url, status, message);

        Err(OdontoError::from_status(
            status.as_u16(),
            message,
            matches!(auth, Auth::Login),
        ))
    }
}

/// Extracts a readable message from an error response body.
///
/// Prefers a JSON `message` (or `error`) field, falls back to the raw text.
pub fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    body.trim().to_string()
}
