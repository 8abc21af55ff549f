//! Response envelope and error mapping.
//!
//! # Design Decisions
//! - Every body is `{code, message, data}` so nodes parse one shape
//! - Not-ready maps to 503 (retry later); unknown group to 400
//! - Listing failures map to 500 and never carry partial data

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::SyncError;

#[derive(Debug, Serialize)]
pub struct ApiResult<T> {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResult<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            message: "success".to_string(),
            data: Some(data),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResult<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

pub fn status_for(err: &SyncError) -> StatusCode {
    match err {
        SyncError::UnknownGroup(_) => StatusCode::BAD_REQUEST,
        SyncError::NotReady(_) => StatusCode::SERVICE_UNAVAILABLE,
        SyncError::Serialize(_) | SyncError::Source { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for SyncError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() && !self.is_retryable() {
            tracing::error!(error = %self, "Fetch failed");
        }
        let body = ApiResult::<()> {
            code: status.as_u16(),
            message: self.to_string(),
            data: None,
        };
        let mut response = (status, Json(body)).into_response();
        if self.is_retryable() {
            response
                .headers_mut()
                .insert(axum::http::header::RETRY_AFTER, axum::http::HeaderValue::from_static("1"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConfigGroup;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&SyncError::UnknownGroup("X".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&SyncError::NotReady(ConfigGroup::Plugin)),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_not_ready_sets_retry_after() {
        let response = SyncError::NotReady(ConfigGroup::Rule).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(response.headers().contains_key("retry-after"));
    }
}
