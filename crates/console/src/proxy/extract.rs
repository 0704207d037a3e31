// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Extractors whose rejections answer with the JSON error envelope instead of
//! axum's plain-text defaults.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::ConsoleError;

/// Percent-decoded path parameters.
#[derive(Debug)]
pub struct Segments<T>(pub T);

impl<S, T> FromRequestParts<S> for Segments<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(path = %parts.uri.path(), err = %rejection.body_text(), "rejected path");
                Err(rejected(rejection.status(), rejection.body_text()))
            }
        }
    }
}

/// Raw request body, bounded by the router's body limit.
#[derive(Debug)]
pub struct RawBody(pub Bytes);

impl<S> FromRequest<S> for RawBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Bytes::from_request(req, state).await {
            Ok(bytes) => Ok(Self(bytes)),
            Err(rejection) => {
                tracing::debug!(err = %rejection.body_text(), "rejected body");
                Err(rejected(rejection.status(), rejection.body_text()))
            }
        }
    }
}

/// Envelope for an extractor rejection, keeping axum's status and message.
pub fn rejected(status: StatusCode, message: String) -> Response {
    let kind = if status.is_server_error() { ConsoleError::Internal } else { ConsoleError::BadRequest };
    kind.to_http_response_with_status(message, status.as_u16()).into_response()
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
