// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Result};
use kube::Client;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use regpatch::config::Config;
use regpatch::remediation::Remediator;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting regpatch");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: node={}, taint={}, namespace={}",
        config.node_name, config.taint, config.namespace
    );

    let cancel = CancellationToken::new();
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");
    let remediator = Remediator::new(client, &config, cancel.clone())?;

    tokio::spawn(async move {
        shutdown_signal().await;
        warn!("Shutdown requested");
        cancel.cancel();
    });

    let outcome = remediator.run().await;
    if !outcome.is_success() {
        bail!(
            "Remediation of node {} did not complete: {:?}",
            config.node_name,
            outcome
        );
    }

    info!("Remediation of node {} complete", config.node_name);
    Ok(())
}

/// Resolve on SIGINT, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
