//! REST Command Wrappers
//!
//! Frontend bindings to the backend API, organized by domain. Every call goes
//! through `ApiClient`, which attaches the bearer token and unwraps the
//! `{code, message, data}` envelope.

mod auth;
mod project;
mod task;

use serde::de::DeserializeOwned;
use serde::Serialize;
use taskline_core::wire;
use taskline_core::ApiError;

pub use auth::*;
pub use project::*;
pub use task::*;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn send_raw(&self, builder: reqwest::RequestBuilder) -> Result<(u16, String), ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok((status, body))
    }

    async fn send<T: DeserializeOwned>(&self, builder: reqwest::RequestBuilder) -> Result<T, ApiError> {
        let (status, body) = self.send_raw(builder).await?;
        wire::decode_response(status, &body)
    }

    async fn send_ack(&self, builder: reqwest::RequestBuilder) -> Result<(), ApiError> {
        let (status, body) = self.send_raw(builder).await?;
        wire::decode_ack(status, &body)
    }

    pub(crate) async fn get_text<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> Result<(u16, String), ApiError> {
        self.send_raw(self.request(reqwest::Method::GET, path).query(query)).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        self.send(self.request(reqwest::Method::POST, path).json(body)).await
    }

    pub(crate) async fn post_ack<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.send_ack(self.request(reqwest::Method::POST, path).json(body)).await
    }

    pub(crate) async fn put_ack<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.send_ack(self.request(reqwest::Method::PUT, path).json(body)).await
    }

    pub(crate) async fn delete_ack(&self, path: &str, body: Option<&serde_json::Value>) -> Result<(), ApiError> {
        let builder = self.request(reqwest::Method::DELETE, path);
        let builder = match body {
            Some(body) => builder.json(body),
            None => builder,
        };
        self.send_ack(builder).await
    }
}
