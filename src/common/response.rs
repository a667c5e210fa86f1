//! JSON response envelope shared by every endpoint

use crate::common::error::{Error, CODE_SUCCESS};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// `{code, message, data}` envelope. On failure `data` is the error detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u32,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: CODE_SUCCESS,
            message: "ok".to_string(),
            data,
        }
    }
}

impl ApiResponse<String> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            code: err.code(),
            message: err.message().to_string(),
            data: err.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.to_http_status(), Json(ApiResponse::from_error(&self))).into_response()
    }
}
