// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Polaris console: authenticated request proxy and session lifecycle for
//! the Polaris admin console.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod proxy;
pub mod session;
pub mod state;
pub mod transport;
pub mod upstream;

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::state::ConsoleState;
use crate::transport::build_router;

/// Run the console proxy until ctrl-c or until `shutdown` is cancelled.
pub async fn run(config: Config, shutdown: CancellationToken) -> anyhow::Result<()> {
    config.validate()?;
    let addr = format!("{}:{}", config.host, config.port);

    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("received ctrl-c, shutting down");
                    shutdown.cancel();
                }
                _ = shutdown.cancelled() => {}
            }
        });
    }

    tracing::info!(
        catalog = %config.catalog_api_base,
        management = %config.management_api_base,
        "polaris-console listening on {addr}"
    );
    let state = Arc::new(ConsoleState::new(config));
    let router = build_router(state);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown.cancelled_owned()).await?;

    Ok(())
}
