//! HTTP plumbing shared by the services.
//!
//! [`ApiClient`] knows the JSON conventions of the backend and attaches the
//! stored access token. The wire itself sits behind [`Transport`] so the
//! services can be exercised without a server.

use crate::error::{ApiError, Result};
use crate::storage::TokenStore;
use async_trait::async_trait;
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
        })
    }
}

/// A request as handed to the transport, already fully shaped.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the base URL, e.g. `/api/auth/profile/`.
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<serde_json::Value>,
    pub bearer: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves one request over the wire. Errors only on transport failure; HTTP
/// error statuses come back as a normal [`RawResponse`].
#[async_trait(?Send)]
pub trait Transport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse>;
}

/// `reqwest` backed transport. On wasm this goes through `fetch`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!("[api] {} {}", request.method, url);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Patch => self.client.patch(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response: {}", e)))?;

        Ok(RawResponse { status, body })
    }
}

/// JSON client for the fraud-detection backend.
#[derive(Clone)]
pub struct ApiClient {
    transport: Rc<dyn Transport>,
    tokens: TokenStore,
}

impl ApiClient {
    pub fn new(transport: Rc<dyn Transport>, tokens: TokenStore) -> Self {
        Self { transport, tokens }
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(&'static str, String)>,
    ) -> Result<T> {
        let response = self.send(Method::Get, path, query, None).await?;
        parse_response(response)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self
            .send(Method::Post, path, Vec::new(), Some(encode(body)?))
            .await?;
        parse_response(response)
    }

    /// POST whose response body is irrelevant.
    pub async fn post_discard<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let response = self
            .send(Method::Post, path, Vec::new(), Some(encode(body)?))
            .await?;
        if response.is_success() {
            Ok(())
        } else {
            Err(ApiError::from_status(response.status, &response.body))
        }
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .send(Method::Patch, path, Vec::new(), Some(encode(body)?))
            .await?;
        parse_response(response)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: Vec<(&'static str, String)>,
        body: Option<serde_json::Value>,
    ) -> Result<RawResponse> {
        let request = ApiRequest {
            method,
            path: path.to_string(),
            query,
            body,
            bearer: self.tokens.access(),
        };
        self.transport.execute(request).await
    }
}

fn encode<B: Serialize>(body: &B) -> Result<serde_json::Value> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(format!("Failed to encode body: {}", e)))
}

fn parse_response<T: DeserializeOwned>(response: RawResponse) -> Result<T> {
    if !response.is_success() {
        return Err(ApiError::from_status(response.status, &response.body));
    }
    serde_json::from_str(&response.body).map_err(|e| {
        ApiError::Decode(format!(
            "{} - {}",
            e,
            response.body.chars().take(200).collect::<String>()
        ))
    })
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::storage::Credentials;

    #[tokio::test]
    async fn test_bearer_attached_when_token_stored() {
        let transport = MockTransport::new();
        let tokens = TokenStore::in_memory();
        let api = client(&transport, &tokens);

        transport.reply(Method::Get, "/ping/", 200, serde_json::json!({"ok": true}));
        transport.reply(Method::Get, "/ping/", 200, serde_json::json!({"ok": true}));

        let _: serde_json::Value = api.get("/ping/", Vec::new()).await.unwrap();
        tokens
            .save(&Credentials {
                access: "abc".into(),
                refresh: "def".into(),
            })
            .unwrap();
        let _: serde_json::Value = api.get("/ping/", Vec::new()).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].bearer, None);
        assert_eq!(requests[1].bearer.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_error_status_classified() {
        let transport = MockTransport::new();
        let api = client(&transport, &TokenStore::in_memory());
        transport.reply(
            Method::Post,
            "/thing/",
            400,
            serde_json::json!({"amount": ["Amount must be greater than zero."]}),
        );

        let err = api
            .post::<_, serde_json::Value>("/thing/", &serde_json::json!({"amount": 0}))
            .await
            .unwrap_err();
        assert_eq!(
            err.field_message("amount"),
            Some("Amount must be greater than zero.")
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let transport = MockTransport::new();
        let api = client(&transport, &TokenStore::in_memory());
        transport.reply(Method::Get, "/thing/", 200, serde_json::json!("not an object"));

        let err = api
            .get::<crate::models::User>("/thing/", Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let transport = MockTransport::new();
        let api = client(&transport, &TokenStore::in_memory());
        transport.fail(
            Method::Get,
            "/thing/",
            ApiError::Network("connection refused".into()),
        );

        let err = api
            .get::<serde_json::Value>("/thing/", Vec::new())
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Network("connection refused".into()));
    }
}
