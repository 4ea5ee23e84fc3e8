//! Typed client for the election REST API.
//!
//! Calls are grouped by who makes them, one `impl ApiClient` block per file:
//! [`auth`] for signing in, [`public`] for anonymous reads, [`voter`] for
//! casting a ballot and [`admin`] for the administrator console.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::Config,
    error::{Error, Result},
    logging::{self, RequestId},
    model::api::Ack,
};

mod admin;
mod auth;
mod public;
mod voter;

/// Client for one election API. Cheap to clone; clones share a connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for the configured API.
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(http, config.api_url()))
    }

    /// Use an existing `reqwest` client, e.g. to share its pool.
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request, logging it, and turn non-success statuses into errors.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response> {
        let id = RequestId::next();
        logging::request(id, &method, path);

        let response = build(self.http.request(method, self.url(path)))
            .send()
            .await
            .map_err(|err| {
                logging::no_response(id, path, &err);
                err
            })?;

        let status = response.status();
        logging::response(id, status, path);
        if status.is_success() {
            Ok(response)
        } else {
            Err(Error::Status {
                status,
                path: path.to_string(),
            })
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.execute(Method::GET, path, |req| req).await?;
        Ok(response.json().await?)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(Method::POST, path, |req| req.json(body))
            .await?;
        Ok(response.json().await?)
    }

    /// Like [`post_json`](Self::post_json), for calls whose response body is
    /// not pinned down.
    async fn post_for_ack<B>(&self, path: &str, body: &B) -> Result<Ack>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .execute(Method::POST, path, |req| req.json(body))
            .await?;
        Ok(Ack::from_body(&response.bytes().await?))
    }

    async fn delete_for_ack(&self, path: &str) -> Result<Ack> {
        let response = self.execute(Method::DELETE, path, |req| req).await?;
        Ok(Ack::from_body(&response.bytes().await?))
    }

    async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let response = self.execute(Method::GET, path, |req| req).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
