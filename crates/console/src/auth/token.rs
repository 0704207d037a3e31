// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! OAuth2 client-credentials request and token types.

use serde::{Deserialize, Serialize};

/// Scope requested when the caller does not name one.
pub const DEFAULT_SCOPE: &str = "PRINCIPAL_ROLE:ALL";

/// Token type assumed when the token endpoint omits one.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// Sign-in request accepted by `POST /api/auth` and `POST /api/signin`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignInRequest {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Tenant header sent on the token request itself and kept for later calls.
    #[serde(
        default,
        rename = "realmHeaderName",
        alias = "realm_header_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub realm_header_name: Option<String>,
    #[serde(
        default,
        rename = "realmHeaderValue",
        alias = "realm_header_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub realm_header_value: Option<String>,
}

impl SignInRequest {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self { client_id: client_id.into(), client_secret: client_secret.into(), ..Self::default() }
    }

    /// Requested scope, falling back to [`DEFAULT_SCOPE`] when absent or empty.
    pub fn scope_or_default(&self) -> &str {
        match self.scope.as_deref() {
            Some(scope) if !scope.is_empty() => scope,
            _ => DEFAULT_SCOPE,
        }
    }

    /// The realm header pair, only when both halves are non-empty.
    pub fn realm_header(&self) -> Option<(&str, &str)> {
        match (self.realm_header_name.as_deref(), self.realm_header_value.as_deref()) {
            (Some(name), Some(value)) if !name.is_empty() && !value.is_empty() => {
                Some((name, value))
            }
            _ => None,
        }
    }

    /// Form fields for the token endpoint.
    pub fn form(&self) -> [(&str, &str); 4] {
        [
            ("grant_type", "client_credentials"),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("scope", self.scope_or_default()),
        ]
    }
}

/// Standard OAuth2 token response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl TokenResponse {
    pub fn token_type_or_default(&self) -> &str {
        match self.token_type.as_deref() {
            Some(kind) if !kind.is_empty() => kind,
            _ => DEFAULT_TOKEN_TYPE,
        }
    }
}
