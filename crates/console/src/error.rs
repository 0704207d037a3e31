// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error kinds surfaced by the console proxy.
///
/// The route-specific kinds (`Fetch` .. `Reset`) are only synthesized when the
/// upstream answered with a body the proxy could not parse; their status code
/// is whatever the upstream returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsoleError {
    Unauthorized,
    BadRequest,
    NotFound,
    MethodNotAllowed,
    Internal,
    Fetch,
    Create,
    Update,
    Delete,
    Assign,
    Revoke,
    Reset,
}

impl ConsoleError {
    /// Status used when the error is raised by the proxy itself.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Unauthorized => 401,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            _ => 500,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UnauthorizedError",
            Self::BadRequest => "BadRequestError",
            Self::NotFound => "NotFoundError",
            Self::MethodNotAllowed => "MethodNotAllowedError",
            Self::Internal => "InternalServerError",
            Self::Fetch => "FetchError",
            Self::Create => "CreateError",
            Self::Update => "UpdateError",
            Self::Delete => "DeleteError",
            Self::Assign => "AssignError",
            Self::Revoke => "RevokeError",
            Self::Reset => "ResetError",
        }
    }

    pub fn to_error_body(&self, message: impl Into<String>, code: u16) -> ErrorBody {
        ErrorBody { message: message.into(), kind: self.as_str().to_owned(), code }
    }

    /// Envelope + status for an error raised by the proxy itself.
    pub fn to_http_response(&self, message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
        self.to_http_response_with_status(message, self.http_status())
    }

    /// Envelope + status for an error that mirrors an upstream status code.
    pub fn to_http_response_with_status(
        &self,
        message: impl Into<String>,
        status: u16,
    ) -> (StatusCode, Json<ErrorResponse>) {
        let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse { error: self.to_error_body(message, code.as_u16()) };
        (code, Json(body))
    }
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level error response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error body: human-readable message, machine-readable type, status code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub code: u16,
}

/// `401 {"error":{"message":"Authorization header is required",...}}`
pub fn missing_authorization() -> Response {
    ConsoleError::Unauthorized.to_http_response("Authorization header is required").into_response()
}

/// `500 {"error":{"message":"Internal server error",...}}`
pub fn internal_error() -> Response {
    ConsoleError::Internal.to_http_response("Internal server error").into_response()
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
