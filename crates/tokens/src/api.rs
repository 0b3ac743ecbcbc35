//! HTTP surface for the token store.
//!
//! `GET /api/user-data?deviceId=…` reads a balance, `POST /api/user-data`
//! saves one. The same handlers also answer on the serverless-function paths
//! the web client was built against.

use crate::store::{StoreError, TokenStore};
use crate::types::{ApiResponse, SaveUserDataRequest, UserRecord};
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub const SAVED_MESSAGE: &str = "User data saved successfully";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing deviceId parameter")]
    MissingDeviceId,
    #[error("Missing required fields: deviceId and hoplaTokens")]
    InvalidBody,
    #[error("User not found")]
    NotFound,
    #[error("Internal server error")]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingDeviceId | ApiError::InvalidBody => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store(e) = &self {
            tracing::error!("store failure: {}", e);
        }
        let body = ApiResponse::<()>::failure(self.to_string());
        (self.status(), Json(body)).into_response()
    }
}

pub fn router<S: TokenStore>(store: Arc<S>) -> Router {
    Router::new()
        .route(
            "/api/user-data",
            get(get_user_data::<S>).post(save_user_data::<S>),
        )
        .route("/.netlify/functions/get-user-data", get(get_user_data::<S>))
        .route("/.netlify/functions/save-user-data", post(save_user_data::<S>))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(store)
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
struct DeviceQuery {
    #[serde(rename = "deviceId")]
    device_id: Option<String>,
}

async fn get_user_data<S: TokenStore>(
    State(store): State<Arc<S>>,
    Query(query): Query<DeviceQuery>,
) -> Result<Json<ApiResponse<UserRecord>>, ApiError> {
    let device_id = query
        .device_id
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::MissingDeviceId)?;

    let record = store.get(&device_id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(ApiResponse::ok(record)))
}

async fn save_user_data<S: TokenStore>(
    State(store): State<Arc<S>>,
    body: Bytes,
) -> Result<Json<ApiResponse<UserRecord>>, ApiError> {
    let request = parse_save_request(&body)?;
    let record = store.upsert(&request).await?;
    tracing::info!(device_id = %record.device_id, tokens = record.hopla_tokens, "balance saved");
    Ok(Json(ApiResponse::ok(record).with_message(SAVED_MESSAGE)))
}

/// Accepts any JSON object with a non-empty `deviceId` and a non-negative
/// whole-number `hoplaTokens`. A `score` that is not a whole number is dropped.
pub fn parse_save_request(body: &[u8]) -> Result<SaveUserDataRequest, ApiError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| ApiError::InvalidBody)?;

    let device_id = value
        .get("deviceId")
        .and_then(|v| v.as_str())
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::InvalidBody)?;
    let hopla_tokens = value
        .get("hoplaTokens")
        .and_then(|v| v.as_u64())
        .ok_or(ApiError::InvalidBody)?;
    let score = value.get("score").and_then(|v| v.as_u64());

    Ok(SaveUserDataRequest {
        device_id: device_id.to_string(),
        hopla_tokens,
        score,
    })
}
