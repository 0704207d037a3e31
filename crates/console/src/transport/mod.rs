// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP transport for the console proxy.

pub mod auth;
pub mod http;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::exchange::exchange_credentials;
use crate::proxy::routes;
use crate::state::ConsoleState;

/// Build the axum `Router` with all console routes under `/api`.
pub fn build_router(state: Arc<ConsoleState>) -> Router {
    let proxied = Router::new()
        // Catalogs
        .route("/catalogs", get(routes::list_catalogs).post(routes::create_catalog))
        .route(
            "/catalogs/{catalog}",
            get(routes::get_catalog).put(routes::update_catalog).delete(routes::delete_catalog),
        )
        // Catalog roles
        .route(
            "/catalog-roles/{catalog}",
            get(routes::list_catalog_roles).post(routes::create_catalog_role),
        )
        .route(
            "/catalogs/{catalog}/catalog-roles/{role}",
            get(routes::get_catalog_role)
                .put(routes::update_catalog_role)
                .delete(routes::delete_catalog_role),
        )
        .route(
            "/catalogs/{catalog}/catalog-roles/{role}/principal-roles",
            get(routes::catalog_role_principal_roles),
        )
        // Grants
        .route(
            "/grants/{catalog}/{role}",
            get(routes::list_grants).put(routes::add_grant).delete(routes::revoke_grant),
        )
        // Principals
        .route("/principals", get(routes::list_principals).post(routes::create_principal))
        .route(
            "/principals/{principal}",
            get(routes::get_principal)
                .put(routes::update_principal)
                .delete(routes::delete_principal),
        )
        .route("/principals/{principal}/reset", post(routes::reset_principal))
        .route("/principals/{principal}/rotate", post(routes::rotate_principal))
        .route(
            "/principals/{principal}/principal-roles",
            get(routes::principal_roles_of).put(routes::assign_principal_role),
        )
        .route(
            "/principals/{principal}/principal-roles/{role}",
            delete(routes::revoke_principal_role),
        )
        // Principal roles
        .route(
            "/principal-roles",
            get(routes::list_principal_roles).post(routes::create_principal_role),
        )
        .route(
            "/principal-roles/{role}",
            get(routes::get_principal_role)
                .put(routes::update_principal_role)
                .delete(routes::delete_principal_role),
        )
        .route(
            "/principal-roles/{role}/catalog-roles/{catalog}",
            get(routes::catalog_roles_of).put(routes::assign_catalog_role),
        )
        .route(
            "/principal-roles/{role}/catalog-roles/{catalog}/{catalog_role}",
            delete(routes::revoke_catalog_role),
        )
        .route("/principal-role-principals/{role}", get(routes::role_principals))
        .route_layer(middleware::from_fn(auth::require_authorization));

    let open = Router::new()
        .route("/health", get(http::health))
        .route("/auth", post(exchange_credentials))
        .route("/signin", post(exchange_credentials));

    let api = open
        .merge(proxied)
        .method_not_allowed_fallback(http::method_not_allowed)
        .fallback(http::not_found);

    Router::new()
        .nest("/api", api)
        .fallback(http::not_found)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()))
        .with_state(state)
}

