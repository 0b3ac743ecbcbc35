use crate::types::{ApiResponse, SaveUserDataRequest, UserRecord};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid uri {0}")]
    InvalidUri(String),
    #[error("failed to build request: {0}")]
    Http(#[from] axum::http::Error),
    #[error("request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),
    #[error("failed to read response: {0}")]
    Body(#[from] hyper::Error),
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("server answered {status}: {message}")]
    Status { status: StatusCode, message: String },
}

/// Talks to a token server over plain HTTP.
#[derive(Clone)]
pub struct TokenClient {
    base_url: String,
    http: Client<HttpConnector, Body>,
}

impl TokenClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: Client::builder(TokioExecutor::new()).build_http(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `Ok(None)` when the server has never seen this device.
    pub async fn get_user_data(&self, device_id: &str) -> Result<Option<UserRecord>, ClientError> {
        let url = format!(
            "{}/api/user-data?deviceId={}",
            self.base_url,
            encode_query_value(device_id)
        );
        let request = Request::builder()
            .method(Method::GET)
            .uri(parse_uri(&url)?)
            .body(Body::empty())?;

        match self.send::<UserRecord>(request).await {
            Ok(record) => Ok(Some(record)),
            Err(ClientError::Status { status, .. }) if status == StatusCode::NOT_FOUND => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn save_user_data(
        &self,
        request: &SaveUserDataRequest,
    ) -> Result<UserRecord, ClientError> {
        let url = format!("{}/api/user-data", self.base_url);
        let body = serde_json::to_vec(request)?;
        let request = Request::builder()
            .method(Method::POST)
            .uri(parse_uri(&url)?)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))?;

        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: Request<Body>) -> Result<T, ClientError> {
        let response = self.http.request(request).await?;
        let (parts, body) = response.into_parts();
        let bytes = body.collect().await?.to_bytes();

        let envelope: ApiResponse<T> = serde_json::from_slice(&bytes).map_err(|e| {
            if parts.status.is_success() {
                ClientError::Decode(e)
            } else {
                ClientError::Status {
                    status: parts.status,
                    message: String::from_utf8_lossy(&bytes).into_owned(),
                }
            }
        })?;

        match envelope.data {
            Some(data) if parts.status.is_success() && envelope.success => Ok(data),
            _ => Err(ClientError::Status {
                status: parts.status,
                message: envelope.error.unwrap_or_else(|| "empty response".to_string()),
            }),
        }
    }
}

fn parse_uri(url: &str) -> Result<hyper::Uri, ClientError> {
    url.parse()
        .map_err(|e| ClientError::InvalidUri(format!("{url}: {e}")))
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
