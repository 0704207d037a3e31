// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Proxy handlers, one per UI-facing route.
//!
//! Path parameters arrive percent-decoded and are re-encoded as opaque
//! segments when the management URL is built.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, Method};
use axum::response::Response;

use crate::error::ConsoleError;
use crate::proxy::extract::{RawBody, Segments};
use crate::proxy::forward::{Forward, ProxyRoute};
use crate::state::ConsoleState;

type Shared = State<Arc<ConsoleState>>;

// -- Route table --------------------------------------------------------------

const LIST_CATALOGS: ProxyRoute = ProxyRoute::body("Failed to fetch catalogs", ConsoleError::Fetch);
const CREATE_CATALOG: ProxyRoute =
    ProxyRoute::body("Failed to create catalog", ConsoleError::Create);
const GET_CATALOG: ProxyRoute = ProxyRoute::body("Failed to fetch catalog", ConsoleError::Fetch);
const UPDATE_CATALOG: ProxyRoute =
    ProxyRoute::body("Failed to update catalog", ConsoleError::Update);
const DELETE_CATALOG: ProxyRoute =
    ProxyRoute::empty("Failed to delete catalog", ConsoleError::Delete);

const LIST_CATALOG_ROLES: ProxyRoute =
    ProxyRoute::body("Failed to fetch catalog roles", ConsoleError::Fetch);
const CREATE_CATALOG_ROLE: ProxyRoute =
    ProxyRoute::body("Failed to create catalog role", ConsoleError::Create);
const GET_CATALOG_ROLE: ProxyRoute =
    ProxyRoute::body("Failed to fetch catalog role", ConsoleError::Fetch);
const UPDATE_CATALOG_ROLE: ProxyRoute =
    ProxyRoute::body("Failed to update catalog role", ConsoleError::Update);
const DELETE_CATALOG_ROLE: ProxyRoute =
    ProxyRoute::empty("Failed to delete catalog role", ConsoleError::Delete);
const CATALOG_ROLE_PRINCIPAL_ROLES: ProxyRoute =
    ProxyRoute::body("Failed to fetch principal roles", ConsoleError::Fetch);

const LIST_GRANTS: ProxyRoute = ProxyRoute::body("Failed to fetch grants", ConsoleError::Fetch);
const ADD_GRANT: ProxyRoute = ProxyRoute::body("Failed to add grant", ConsoleError::Assign);
const REVOKE_GRANT: ProxyRoute = ProxyRoute::empty("Failed to revoke grant", ConsoleError::Revoke);

const LIST_PRINCIPALS: ProxyRoute =
    ProxyRoute::body("Failed to fetch principals", ConsoleError::Fetch);
const CREATE_PRINCIPAL: ProxyRoute =
    ProxyRoute::body("Failed to create principal", ConsoleError::Create);
const GET_PRINCIPAL: ProxyRoute = ProxyRoute::body("Failed to fetch principal", ConsoleError::Fetch);
const UPDATE_PRINCIPAL: ProxyRoute =
    ProxyRoute::body("Failed to update principal", ConsoleError::Update);
const DELETE_PRINCIPAL: ProxyRoute =
    ProxyRoute::empty("Failed to delete principal", ConsoleError::Delete);
const RESET_PRINCIPAL: ProxyRoute =
    ProxyRoute::body("Failed to reset principal credentials", ConsoleError::Reset);
const ROTATE_PRINCIPAL: ProxyRoute =
    ProxyRoute::body("Failed to rotate principal credentials", ConsoleError::Reset);
const PRINCIPAL_ROLES_OF: ProxyRoute =
    ProxyRoute::body("Failed to fetch principal roles", ConsoleError::Fetch);
const ASSIGN_PRINCIPAL_ROLE: ProxyRoute =
    ProxyRoute::body("Failed to assign principal role", ConsoleError::Assign);
const REVOKE_PRINCIPAL_ROLE: ProxyRoute =
    ProxyRoute::empty("Failed to revoke principal role", ConsoleError::Revoke);

const LIST_PRINCIPAL_ROLES: ProxyRoute =
    ProxyRoute::body("Failed to fetch principal roles", ConsoleError::Fetch);
const CREATE_PRINCIPAL_ROLE: ProxyRoute =
    ProxyRoute::body("Failed to create principal role", ConsoleError::Create);
const GET_PRINCIPAL_ROLE: ProxyRoute =
    ProxyRoute::body("Failed to fetch principal role", ConsoleError::Fetch);
const UPDATE_PRINCIPAL_ROLE: ProxyRoute =
    ProxyRoute::body("Failed to update principal role", ConsoleError::Update);
const DELETE_PRINCIPAL_ROLE: ProxyRoute =
    ProxyRoute::empty("Failed to delete principal role", ConsoleError::Delete);
const CATALOG_ROLES_OF: ProxyRoute =
    ProxyRoute::body("Failed to fetch catalog roles", ConsoleError::Fetch);
const ASSIGN_CATALOG_ROLE: ProxyRoute =
    ProxyRoute::body("Failed to assign catalog role", ConsoleError::Assign);
const REVOKE_CATALOG_ROLE: ProxyRoute =
    ProxyRoute::empty("Failed to revoke catalog role", ConsoleError::Revoke);
const ROLE_PRINCIPALS: ProxyRoute =
    ProxyRoute::body("Failed to fetch principals", ConsoleError::Fetch);

// -- Catalogs -----------------------------------------------------------------

/// `GET /api/catalogs`
pub async fn list_catalogs(State(s): Shared, headers: HeaderMap) -> Response {
    Forward::new(Method::GET, &LIST_CATALOGS, &["catalogs"]).send(&s, &headers, &[]).await
}

/// `POST /api/catalogs`
pub async fn create_catalog(State(s): Shared, headers: HeaderMap, RawBody(body): RawBody) -> Response {
    Forward::new(Method::POST, &CREATE_CATALOG, &["catalogs"]).send(&s, &headers, &body).await
}

/// `GET /api/catalogs/{catalog}`
pub async fn get_catalog(
    State(s): Shared,
    Segments(catalog): Segments<String>,
    headers: HeaderMap,
) -> Response {
    Forward::new(Method::GET, &GET_CATALOG, &["catalogs", &catalog]).send(&s, &headers, &[]).await
}

/// `PUT /api/catalogs/{catalog}`
pub async fn update_catalog(
    State(s): Shared,
    Segments(catalog): Segments<String>,
    headers: HeaderMap,
    RawBody(body): RawBody,
) -> Response {
    Forward::new(Method::PUT, &UPDATE_CATALOG, &["catalogs", &catalog])
        .send(&s, &headers, &body)
        .await
}

/// `DELETE /api/catalogs/{catalog}`
pub async fn delete_catalog(
    State(s): Shared,
    Segments(catalog): Segments<String>,
    headers: HeaderMap,
) -> Response {
    Forward::new(Method::DELETE, &DELETE_CATALOG, &["catalogs", &catalog])
        .send(&s, &headers, &[])
        .await
}

// -- Catalog roles ------------------------------------------------------------

/// `GET /api/catalog-roles/{catalog}`
pub async fn list_catalog_roles(
    State(s): Shared,
    Segments(catalog): Segments<String>,
    headers: HeaderMap,
) -> Response {
    Forward::new(Method::GET, &LIST_CATALOG_ROLES, &["catalogs", &catalog, "catalog-roles"])
        .send(&s, &headers, &[])
        .await
}

/// `POST /api/catalog-roles/{catalog}`
pub async fn create_catalog_role(
    State(s): Shared,
    Segments(catalog): Segments<String>,
    headers: HeaderMap,
    RawBody(body): RawBody,
) -> Response {
    Forward::new(Method::POST, &CREATE_CATALOG_ROLE, &["catalogs", &catalog, "catalog-roles"])
        .send(&s, &headers, &body)
        .await
}

/// `GET /api/catalogs/{catalog}/catalog-roles/{role}`
pub async fn get_catalog_role(
    State(s): Shared,
    Segments((catalog, role)): Segments<(String, String)>,
    headers: HeaderMap,
) -> Response {
    Forward::new(Method::GET, &GET_CATALOG_ROLE, &["catalogs", &catalog, "catalog-roles", &role])
        .send(&s, &headers, &[])
        .await
}

/// `PUT /api/catalogs/{catalog}/catalog-roles/{role}`
pub async fn update_catalog_role(
    State(s): Shared,
    Segments((catalog, role)): Segments<(String, String)>,
    headers: HeaderMap,
    RawBody(body): RawBody,
) -> Response {
    let segments: &[&str] = &["catalogs", &catalog, "catalog-roles", &role];
    Forward::new(Method::PUT, &UPDATE_CATALOG_ROLE, segments).send(&s, &headers, &body).await
}

/// `DELETE /api/catalogs/{catalog}/catalog-roles/{role}`
pub async fn delete_catalog_role(
    State(s): Shared,
    Segments((catalog, role)): Segments<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let segments: &[&str] = &["catalogs", &catalog, "catalog-roles", &role];
    Forward::new(Method::DELETE, &DELETE_CATALOG_ROLE, segments).send(&s, &headers, &[]).await
}

/// `GET /api/catalogs/{catalog}/catalog-roles/{role}/principal-roles`
pub async fn catalog_role_principal_roles(
    State(s): Shared,
    Segments((catalog, role)): Segments<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let segments: &[&str] = &["catalogs", &catalog, "catalog-roles", &role, "principal-roles"];
    Forward::new(Method::GET, &CATALOG_ROLE_PRINCIPAL_ROLES, segments)
        .send(&s, &headers, &[])
        .await
}

// -- Grants -------------------------------------------------------------------

/// `GET /api/grants/{catalog}/{role}`
pub async fn list_grants(
    State(s): Shared,
    Segments((catalog, role)): Segments<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let segments: &[&str] = &["catalogs", &catalog, "catalog-roles", &role, "grants"];
    Forward::new(Method::GET, &LIST_GRANTS, segments).send(&s, &headers, &[]).await
}

/// `PUT /api/grants/{catalog}/{role}`
pub async fn add_grant(
    State(s): Shared,
    Segments((catalog, role)): Segments<(String, String)>,
    headers: HeaderMap,
    RawBody(body): RawBody,
) -> Response {
    let segments: &[&str] = &["catalogs", &catalog, "catalog-roles", &role, "grants"];
    Forward::new(Method::PUT, &ADD_GRANT, segments).send(&s, &headers, &body).await
}

/// `DELETE /api/grants/{catalog}/{role}`. Polaris revokes with `POST .../grants`.
pub async fn revoke_grant(
    State(s): Shared,
    Segments((catalog, role)): Segments<(String, String)>,
    headers: HeaderMap,
    RawBody(body): RawBody,
) -> Response {
    let segments: &[&str] = &["catalogs", &catalog, "catalog-roles", &role, "grants"];
    Forward::new(Method::POST, &REVOKE_GRANT, segments).send(&s, &headers, &body).await
}

// -- Principals ---------------------------------------------------------------

/// `GET /api/principals`
pub async fn list_principals(State(s): Shared, headers: HeaderMap) -> Response {
    Forward::new(Method::GET, &LIST_PRINCIPALS, &["principals"]).send(&s, &headers, &[]).await
}

/// `POST /api/principals`
pub async fn create_principal(State(s): Shared, headers: HeaderMap, RawBody(body): RawBody) -> Response {
    Forward::new(Method::POST, &CREATE_PRINCIPAL, &["principals"]).send(&s, &headers, &body).await
}

/// `GET /api/principals/{principal}`
pub async fn get_principal(
    State(s): Shared,
    Segments(principal): Segments<String>,
    headers: HeaderMap,
) -> Response {
    Forward::new(Method::GET, &GET_PRINCIPAL, &["principals", &principal])
        .send(&s, &headers, &[])
        .await
}

/// `PUT /api/principals/{principal}`
pub async fn update_principal(
    State(s): Shared,
    Segments(principal): Segments<String>,
    headers: HeaderMap,
    RawBody(body): RawBody,
) -> Response {
    Forward::new(Method::PUT, &UPDATE_PRINCIPAL, &["principals", &principal])
        .send(&s, &headers, &body)
        .await
}

/// `DELETE /api/principals/{principal}`
pub async fn delete_principal(
    State(s): Shared,
    Segments(principal): Segments<String>,
    headers: HeaderMap,
) -> Response {
    Forward::new(Method::DELETE, &DELETE_PRINCIPAL, &["principals", &principal])
        .send(&s, &headers, &[])
        .await
}

/// `POST /api/principals/{principal}/reset`
pub async fn reset_principal(
    State(s): Shared,
    Segments(principal): Segments<String>,
    headers: HeaderMap,
    RawBody(body): RawBody,
) -> Response {
    Forward::new(Method::POST, &RESET_PRINCIPAL, &["principals", &principal, "reset"])
        .send(&s, &headers, &body)
        .await
}

/// `POST /api/principals/{principal}/rotate`
pub async fn rotate_principal(
    State(s): Shared,
    Segments(principal): Segments<String>,
    headers: HeaderMap,
) -> Response {
    Forward::new(Method::POST, &ROTATE_PRINCIPAL, &["principals", &principal, "rotate"])
        .send(&s, &headers, &[])
        .await
}

/// `GET /api/principals/{principal}/principal-roles`
pub async fn principal_roles_of(
    State(s): Shared,
    Segments(principal): Segments<String>,
    headers: HeaderMap,
) -> Response {
    let segments: &[&str] = &["principals", &principal, "principal-roles"];
    Forward::new(Method::GET, &PRINCIPAL_ROLES_OF, segments).send(&s, &headers, &[]).await
}

/// `PUT /api/principals/{principal}/principal-roles`
pub async fn assign_principal_role(
    State(s): Shared,
    Segments(principal): Segments<String>,
    headers: HeaderMap,
    RawBody(body): RawBody,
) -> Response {
    let segments: &[&str] = &["principals", &principal, "principal-roles"];
    Forward::new(Method::PUT, &ASSIGN_PRINCIPAL_ROLE, segments).send(&s, &headers, &body).await
}

/// `DELETE /api/principals/{principal}/principal-roles/{role}`
pub async fn revoke_principal_role(
    State(s): Shared,
    Segments((principal, role)): Segments<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let segments: &[&str] = &["principals", &principal, "principal-roles", &role];
    Forward::new(Method::DELETE, &REVOKE_PRINCIPAL_ROLE, segments).send(&s, &headers, &[]).await
}

// -- Principal roles ----------------------------------------------------------

/// `GET /api/principal-roles`
pub async fn list_principal_roles(State(s): Shared, headers: HeaderMap) -> Response {
    Forward::new(Method::GET, &LIST_PRINCIPAL_ROLES, &["principal-roles"])
        .send(&s, &headers, &[])
        .await
}

/// `POST /api/principal-roles`
pub async fn create_principal_role(State(s): Shared, headers: HeaderMap, RawBody(body): RawBody) -> Response {
    Forward::new(Method::POST, &CREATE_PRINCIPAL_ROLE, &["principal-roles"])
        .send(&s, &headers, &body)
        .await
}

/// `GET /api/principal-roles/{role}`
pub async fn get_principal_role(
    State(s): Shared,
    Segments(role): Segments<String>,
    headers: HeaderMap,
) -> Response {
    Forward::new(Method::GET, &GET_PRINCIPAL_ROLE, &["principal-roles", &role])
        .send(&s, &headers, &[])
        .await
}

/// `PUT /api/principal-roles/{role}`
pub async fn update_principal_role(
    State(s): Shared,
    Segments(role): Segments<String>,
    headers: HeaderMap,
    RawBody(body): RawBody,
) -> Response {
    Forward::new(Method::PUT, &UPDATE_PRINCIPAL_ROLE, &["principal-roles", &role])
        .send(&s, &headers, &body)
        .await
}

/// `DELETE /api/principal-roles/{role}`
pub async fn delete_principal_role(
    State(s): Shared,
    Segments(role): Segments<String>,
    headers: HeaderMap,
) -> Response {
    Forward::new(Method::DELETE, &DELETE_PRINCIPAL_ROLE, &["principal-roles", &role])
        .send(&s, &headers, &[])
        .await
}

/// `GET /api/principal-roles/{role}/catalog-roles/{catalog}`
pub async fn catalog_roles_of(
    State(s): Shared,
    Segments((role, catalog)): Segments<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let segments: &[&str] = &["principal-roles", &role, "catalog-roles", &catalog];
    Forward::new(Method::GET, &CATALOG_ROLES_OF, segments).send(&s, &headers, &[]).await
}

/// `PUT /api/principal-roles/{role}/catalog-roles/{catalog}`
pub async fn assign_catalog_role(
    State(s): Shared,
    Segments((role, catalog)): Segments<(String, String)>,
    headers: HeaderMap,
    RawBody(body): RawBody,
) -> Response {
    let segments: &[&str] = &["principal-roles", &role, "catalog-roles", &catalog];
    Forward::new(Method::PUT, &ASSIGN_CATALOG_ROLE, segments).send(&s, &headers, &body).await
}

/// `DELETE /api/principal-roles/{role}/catalog-roles/{catalog}/{catalog_role}`
pub async fn revoke_catalog_role(
    State(s): Shared,
    Segments((role, catalog, catalog_role)): Segments<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    let segments: &[&str] = &["principal-roles", &role, "catalog-roles", &catalog, &catalog_role];
    Forward::new(Method::DELETE, &REVOKE_CATALOG_ROLE, segments).send(&s, &headers, &[]).await
}

/// `GET /api/principal-role-principals/{role}`
pub async fn role_principals(
    State(s): Shared,
    Segments(role): Segments<String>,
    headers: HeaderMap,
) -> Response {
    Forward::new(Method::GET, &ROLE_PRINCIPALS, &["principal-roles", &role, "principals"])
        .send(&s, &headers, &[])
        .await
}
