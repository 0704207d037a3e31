// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed calls for each proxy route.
//!
//! List endpoints come back in several shapes depending on the resource
//! (`[...]`, `{"roles":[...]}`, `{"catalogs":[...]}`, ...). They are
//! normalized here, once, so view code only ever sees a `Vec`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::client::invoker::{CallOptions, ConsoleClient};
use crate::client::outcome::CallOutcome;

/// Every list shape the management API is known to return.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Roles { roles: Vec<T> },
    Data { data: Vec<T> },
    Catalogs { catalogs: Vec<T> },
    Principals { principals: Vec<T> },
    Grants { grants: Vec<T> },
}

impl<T> ListEnvelope<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items)
            | Self::Roles { roles: items }
            | Self::Data { data: items }
            | Self::Catalogs { catalogs: items }
            | Self::Principals { principals: items }
            | Self::Grants { grants: items } => items,
        }
    }
}

/// Decode any known list shape into its items.
pub fn normalize_list<T: DeserializeOwned>(value: Value) -> anyhow::Result<Vec<T>> {
    let envelope: ListEnvelope<T> = serde_json::from_value(value)
        .map_err(|e| anyhow::anyhow!("unrecognized list response: {e}"))?;
    Ok(envelope.into_vec())
}

impl ConsoleClient {
    async fn at(&self, segments: &[&str], options: CallOptions) -> CallOutcome {
        match self.endpoint(segments) {
            Ok(url) => self.call(url, options).await,
            Err(e) => CallOutcome::failed(None, e.to_string()),
        }
    }

    async fn list(&self, segments: &[&str]) -> CallOutcome<Vec<Value>> {
        self.at(segments, CallOptions::get()).await.and_then(|value| match normalize_list(value) {
            Ok(items) => CallOutcome::Ok(items),
            Err(e) => {
                tracing::warn!(err = %e, "unexpected list shape");
                CallOutcome::failed(None, e.to_string())
            }
        })
    }

    // -- Catalogs -------------------------------------------------------------

    pub async fn catalogs(&self) -> CallOutcome<Vec<Value>> {
        self.list(&["catalogs"]).await
    }

    pub async fn catalog(&self, catalog: &str) -> CallOutcome {
        self.at(&["catalogs", catalog], CallOptions::get()).await
    }

    pub async fn create_catalog(&self, body: Value) -> CallOutcome {
        self.at(&["catalogs"], CallOptions::post(body)).await
    }

    pub async fn update_catalog(&self, catalog: &str, body: Value) -> CallOutcome {
        self.at(&["catalogs", catalog], CallOptions::put(body)).await
    }

    pub async fn delete_catalog(&self, catalog: &str) -> CallOutcome {
        self.at(&["catalogs", catalog], CallOptions::delete()).await
    }

    // -- Catalog roles --------------------------------------------------------

    pub async fn catalog_roles(&self, catalog: &str) -> CallOutcome<Vec<Value>> {
        self.list(&["catalog-roles", catalog]).await
    }

    pub async fn create_catalog_role(&self, catalog: &str, body: Value) -> CallOutcome {
        self.at(&["catalog-roles", catalog], CallOptions::post(body)).await
    }

    pub async fn catalog_role(&self, catalog: &str, role: &str) -> CallOutcome {
        self.at(&["catalogs", catalog, "catalog-roles", role], CallOptions::get()).await
    }

    pub async fn update_catalog_role(&self, catalog: &str, role: &str, body: Value) -> CallOutcome {
        self.at(&["catalogs", catalog, "catalog-roles", role], CallOptions::put(body)).await
    }

    pub async fn delete_catalog_role(&self, catalog: &str, role: &str) -> CallOutcome {
        self.at(&["catalogs", catalog, "catalog-roles", role], CallOptions::delete()).await
    }

    pub async fn catalog_role_principal_roles(
        &self,
        catalog: &str,
        role: &str,
    ) -> CallOutcome<Vec<Value>> {
        self.list(&["catalogs", catalog, "catalog-roles", role, "principal-roles"]).await
    }

    // -- Grants ---------------------------------------------------------------

    pub async fn grants(&self, catalog: &str, role: &str) -> CallOutcome<Vec<Value>> {
        self.list(&["grants", catalog, role]).await
    }

    pub async fn add_grant(&self, catalog: &str, role: &str, grant: Value) -> CallOutcome {
        self.at(&["grants", catalog, role], CallOptions::put(grant)).await
    }

    pub async fn revoke_grant(&self, catalog: &str, role: &str, grant: Value) -> CallOutcome {
        self.at(&["grants", catalog, role], CallOptions::delete().with_body(grant)).await
    }

    // -- Principals -----------------------------------------------------------

    pub async fn principals(&self) -> CallOutcome<Vec<Value>> {
        self.list(&["principals"]).await
    }

    pub async fn create_principal(&self, body: Value) -> CallOutcome {
        self.at(&["principals"], CallOptions::post(body)).await
    }

    pub async fn principal(&self, principal: &str) -> CallOutcome {
        self.at(&["principals", principal], CallOptions::get()).await
    }

    pub async fn update_principal(&self, principal: &str, body: Value) -> CallOutcome {
        self.at(&["principals", principal], CallOptions::put(body)).await
    }

    pub async fn delete_principal(&self, principal: &str) -> CallOutcome {
        self.at(&["principals", principal], CallOptions::delete()).await
    }

    /// Returns the new credentials.
    pub async fn reset_principal(&self, principal: &str, body: Value) -> CallOutcome {
        self.at(&["principals", principal, "reset"], CallOptions::post(body)).await
    }

    pub async fn rotate_principal(&self, principal: &str) -> CallOutcome {
        self.at(&["principals", principal, "rotate"], CallOptions::new(reqwest::Method::POST)).await
    }

    pub async fn principal_roles_of(&self, principal: &str) -> CallOutcome<Vec<Value>> {
        self.list(&["principals", principal, "principal-roles"]).await
    }

    pub async fn assign_principal_role(&self, principal: &str, body: Value) -> CallOutcome {
        self.at(&["principals", principal, "principal-roles"], CallOptions::put(body)).await
    }

    pub async fn revoke_principal_role(&self, principal: &str, role: &str) -> CallOutcome {
        self.at(&["principals", principal, "principal-roles", role], CallOptions::delete()).await
    }

    // -- Principal roles ------------------------------------------------------

    pub async fn principal_roles(&self) -> CallOutcome<Vec<Value>> {
        self.list(&["principal-roles"]).await
    }

    pub async fn create_principal_role(&self, body: Value) -> CallOutcome {
        self.at(&["principal-roles"], CallOptions::post(body)).await
    }

    pub async fn principal_role(&self, role: &str) -> CallOutcome {
        self.at(&["principal-roles", role], CallOptions::get()).await
    }

    pub async fn update_principal_role(&self, role: &str, body: Value) -> CallOutcome {
        self.at(&["principal-roles", role], CallOptions::put(body)).await
    }

    pub async fn delete_principal_role(&self, role: &str) -> CallOutcome {
        self.at(&["principal-roles", role], CallOptions::delete()).await
    }

    pub async fn catalog_roles_of(&self, role: &str, catalog: &str) -> CallOutcome<Vec<Value>> {
        self.list(&["principal-roles", role, "catalog-roles", catalog]).await
    }

    pub async fn assign_catalog_role(&self, role: &str, catalog: &str, body: Value) -> CallOutcome {
        self.at(&["principal-roles", role, "catalog-roles", catalog], CallOptions::put(body)).await
    }

    pub async fn revoke_catalog_role(
        &self,
        role: &str,
        catalog: &str,
        catalog_role: &str,
    ) -> CallOutcome {
        let segments = ["principal-roles", role, "catalog-roles", catalog, catalog_role];
        self.at(&segments, CallOptions::delete()).await
    }

    pub async fn role_principals(&self, role: &str) -> CallOutcome<Vec<Value>> {
        self.list(&["principal-role-principals", role]).await
    }
}

#[cfg(test)]
#[path = "resources_tests.rs"]
mod tests;
