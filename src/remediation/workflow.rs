// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Remediation workflow: dispatch the helper pod, wait for it, then clear the
//! taint and label the node.

use crate::config::Config;
use crate::constants::{labels, phase};
use crate::error::{RemediationError, Result};
use crate::kubernetes::{
    has_label, has_matching_taint, helper_pod, helper_pod_name, pod_phase, with_label,
    without_matching_taints,
};
use crate::types::TaintSpec;
use k8s_openapi::api::core::v1::{Node, Pod};
use kube::{api::PostParams, Api, Client};
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// How a remediation run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemediationOutcome {
    /// Taint removed and node labelled
    Completed,
    /// The helper pod could not be created; the node was not touched
    DispatchFailed,
    /// The helper pod did not succeed; the node was not touched
    CompletionFailed,
    /// Shutdown was requested before the node was touched
    Cancelled,
    /// The helper pod succeeded but at least one node update failed
    Incomplete { taint_removed: bool, labelled: bool },
}

impl RemediationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RemediationOutcome::Completed)
    }
}

/// Runs the remediation steps for a single node
pub struct Remediator {
    client: Client,
    node_name: String,
    namespace: String,
    poll_interval: Duration,
    target: TaintSpec,
    cancel: CancellationToken,
}

impl Remediator {
    /// Create a remediator for the configured node.
    ///
    /// Fails with `InvalidTaintFormat` before any API call when the taint
    /// descriptor is malformed.
    pub fn new(client: Client, config: &Config, cancel: CancellationToken) -> Result<Self> {
        let target = config.taint.parse()?;
        Ok(Self {
            client,
            node_name: config.node_name.clone(),
            namespace: config.namespace.clone(),
            poll_interval: config.poll_interval,
            target,
            cancel,
        })
    }

    fn pods(&self) -> Api<Pod> {
        Api::namespaced(self.client.clone(), &self.namespace)
    }

    fn nodes(&self) -> Api<Node> {
        Api::all(self.client.clone())
    }

    /// Run all steps in order.
    ///
    /// The node is only modified after the helper pod has succeeded and no
    /// shutdown was requested. Once started, taint removal and labelling both
    /// run whatever the other's result.
    #[instrument(skip(self), fields(node = %self.node_name, taint = %self.target))]
    pub async fn run(&self) -> RemediationOutcome {
        info!("Starting registry patch remediation");

        if !self.dispatch_job().await {
            return RemediationOutcome::DispatchFailed;
        }

        let completed = self.await_completion().await;
        if self.cancel.is_cancelled() {
            warn!("Shutdown requested, leaving node untouched");
            return RemediationOutcome::Cancelled;
        }
        if !completed {
            return RemediationOutcome::CompletionFailed;
        }

        let taint_removed = self.remove_taint().await;
        let labelled = self.label_node().await;

        if taint_removed && labelled {
            info!("Node remediated");
            RemediationOutcome::Completed
        } else {
            warn!(taint_removed, labelled, "Node remediation incomplete");
            RemediationOutcome::Incomplete {
                taint_removed,
                labelled,
            }
        }
    }

    /// Create the helper pod on the node
    pub async fn dispatch_job(&self) -> bool {
        report("Error creating helper pod", self.try_dispatch_job().await)
    }

    /// Poll the helper pod until it succeeds, fails, or shutdown is requested
    pub async fn await_completion(&self) -> bool {
        report("Error waiting for helper pod", self.try_await_completion().await)
    }

    /// Remove every taint matching the target from the node
    pub async fn remove_taint(&self) -> bool {
        report("Error removing taint", self.try_remove_taint().await)
    }

    /// Mark the node as patched
    pub async fn label_node(&self) -> bool {
        report("Error labelling node", self.try_label_node().await)
    }

    #[instrument(skip(self), fields(node = %self.node_name))]
    async fn try_dispatch_job(&self) -> Result<()> {
        let pod = helper_pod(&self.node_name, &self.namespace, &self.target);
        let name = helper_pod_name(&self.node_name);

        info!("Creating helper pod {}/{}", self.namespace, name);

        match self.pods().create(&PostParams::default(), &pod).await {
            Ok(created) if created.metadata.name.is_some() => {
                info!("Helper pod {}/{} created", self.namespace, name);
                Ok(())
            }
            Ok(_) => Err(RemediationError::DispatchError(format!(
                "API returned no pod for {}/{}",
                self.namespace, name
            ))),
            Err(kube::Error::Api(err)) if err.code == 409 => {
                info!(
                    "Helper pod {}/{} already exists, waiting on it",
                    self.namespace, name
                );
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self), fields(node = %self.node_name))]
    async fn try_await_completion(&self) -> Result<()> {
        let name = helper_pod_name(&self.node_name);
        let pods = self.pods();

        loop {
            if self.cancel.is_cancelled() {
                return Err(RemediationError::Cancelled);
            }

            let pod = tokio::select! {
                _ = self.cancel.cancelled() => return Err(RemediationError::Cancelled),
                pod = pods.get_status(&name) => pod?,
            };
            match pod_phase(&pod) {
                Some(phase::SUCCEEDED) => {
                    info!("Helper pod {}/{} succeeded", self.namespace, name);
                    return Ok(());
                }
                Some(phase::FAILED) => {
                    return Err(RemediationError::CompletionError(format!(
                        "helper pod {}/{} failed",
                        self.namespace, name
                    )));
                }
                other => debug!(
                    "Helper pod {}/{} in phase {}, checking again in {:?}",
                    self.namespace,
                    name,
                    other.unwrap_or("<none>"),
                    self.poll_interval
                ),
            }

            tokio::select! {
                _ = self.cancel.cancelled() => return Err(RemediationError::Cancelled),
                _ = sleep(self.poll_interval) => {}
            }
        }
    }

    #[instrument(skip(self), fields(node = %self.node_name))]
    async fn try_remove_taint(&self) -> Result<()> {
        let nodes = self.nodes();
        let node = nodes.get(&self.node_name).await?;

        if !has_matching_taint(&node, &self.target) {
            debug!("Node {} has no taint matching {}", self.node_name, self.target);
        }

        let node = without_matching_taints(node, &self.target);
        let replaced = nodes
            .replace(&self.node_name, &PostParams::default(), &node)
            .await?;

        if has_matching_taint(&replaced, &self.target) {
            return Err(RemediationError::TaintRemovalError(format!(
                "node {} still carries taint {}",
                self.node_name, self.target
            )));
        }

        info!("Removed taint {} from node {}", self.target, self.node_name);
        Ok(())
    }

    #[instrument(skip(self), fields(node = %self.node_name))]
    async fn try_label_node(&self) -> Result<()> {
        let nodes = self.nodes();
        let node = nodes.get(&self.node_name).await?;

        if has_label(&node, labels::REGISTRY_PATCHED) {
            info!("Node {} is already labelled", self.node_name);
            return Ok(());
        }

        let node = with_label(node, labels::REGISTRY_PATCHED, labels::REGISTRY_PATCHED_VALUE);
        let replaced = nodes
            .replace(&self.node_name, &PostParams::default(), &node)
            .await?;

        if !has_label(&replaced, labels::REGISTRY_PATCHED) {
            return Err(RemediationError::LabelError(format!(
                "label {} missing from node {} after update",
                labels::REGISTRY_PATCHED,
                self.node_name
            )));
        }

        info!("Labelled node {} with {}", self.node_name, labels::REGISTRY_PATCHED);
        Ok(())
    }
}

/// Log a step failure, including the API status payload, and flatten it to a bool
fn report(context: &str, result: Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(RemediationError::Cancelled) => {
            warn!("{}: cancelled", context);
            false
        }
        Err(e) => {
            error!("{}: {}", context, e);
            if let Some(payload) = e.api_payload() {
                error!("{}", payload);
            }
            false
        }
    }
}
