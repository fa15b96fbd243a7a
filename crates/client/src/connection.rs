//! Connection management for the Mensa backend.
//!
//! A thin wrapper over `reqwest` that attaches the session's bearer token,
//! maps non-2xx responses to [`ApiError`] with the server-provided message
//! when one is present, and deserializes JSON bodies. No automatic retry;
//! the caller decides what a failure means for its view.

use std::sync::Arc;

use eyre::{bail, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::errors::ApiError;
use crate::session::SessionTokens;

#[derive(Clone, Copy, Debug)]
enum RequestType {
    Get,
    Post,
    Patch,
    Delete,
}

/// A configured connection: base address, shared HTTP client, token source.
#[derive(Clone, Debug)]
pub struct ConnectionInfo {
    pub api_url: Url,
    pub client: Client,
    session: Arc<dyn SessionTokens>,
}

impl ConnectionInfo {
    #[must_use]
    pub fn new(api_url: Url, session: Arc<dyn SessionTokens>) -> Self {
        Self {
            api_url,
            client: Client::new(),
            session,
        }
    }

    /// The current session token, if the user is signed in.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(RequestType::Get, path, None::<()>).await
    }

    pub async fn post<I, O>(&self, path: &str, body: I) -> Result<O>
    where
        I: Serialize,
        O: DeserializeOwned,
    {
        self.request(RequestType::Post, path, Some(body)).await
    }

    pub async fn patch<I, O>(&self, path: &str, body: I) -> Result<O>
    where
        I: Serialize,
        O: DeserializeOwned,
    {
        self.request(RequestType::Patch, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(RequestType::Delete, path, None::<()>).await
    }

    async fn request<I, O>(&self, req_type: RequestType, path: &str, body: Option<I>) -> Result<O>
    where
        I: Serialize,
        O: DeserializeOwned,
    {
        let mut url = self.api_url.clone();
        url.set_path(path);

        let mut builder = match req_type {
            RequestType::Get => self.client.get(url),
            RequestType::Post => self.client.post(url).json(&body),
            RequestType::Patch => self.client.patch(url).json(&body),
            RequestType::Delete => self.client.delete(url),
        };

        if let Some(token) = self.session.token() {
            builder = builder.header("Authorization", format!("Token {token}"));
        }

        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            bail!(ApiError {
                status_code: status.as_u16(),
                message: extract_server_message(&text)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_owned()),
            });
        }

        response.json::<O>().await.map_err(Into::into)
    }
}

/// Pull the `detail`, `message` or `error` field out of an error body, if
/// it is JSON and carries one.
fn extract_server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .or_else(|| value.get("message"))
        .or_else(|| value.get("error"))
        .and_then(|v| v.as_str())
        .map(ToOwned::to_owned)
}
