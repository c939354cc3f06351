// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::defaults;
use anyhow::{anyhow, Context, Result};
use std::env;
use std::time::Duration;

/// Remediation configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Node to remediate
    pub node_name: String,
    /// Taint descriptor in `key[=value]:effect` form
    pub taint: String,
    /// Namespace the helper pod is created in
    pub namespace: String,
    pub poll_interval: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let node_name = lookup("NODE_NAME").context("NODE_NAME environment variable not set")?;
        let taint = lookup("TAINT").context("TAINT environment variable not set")?;
        let namespace = lookup("POD_NAMESPACE").unwrap_or_else(|| defaults::NAMESPACE.to_string());

        let poll_interval_secs = match lookup("POLL_INTERVAL_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("POLL_INTERVAL_SECS is not a number: {}", raw))?,
            None => defaults::POLL_INTERVAL_SECS,
        };
        if poll_interval_secs == 0 {
            return Err(anyhow!("POLL_INTERVAL_SECS must be greater than zero"))
                .context("Invalid poll interval");
        }

        Ok(Config {
            node_name,
            taint,
            namespace,
            poll_interval: Duration::from_secs(poll_interval_secs),
        })
    }
}
