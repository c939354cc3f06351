// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Taint and label edits on Node objects

use crate::types::TaintSpec;
use k8s_openapi::api::core::v1::{Node, NodeSpec};

/// Check whether any taint on the node matches the target
pub fn has_matching_taint(node: &Node, target: &TaintSpec) -> bool {
    node.spec
        .as_ref()
        .and_then(|s| s.taints.as_ref())
        .is_some_and(|taints| taints.iter().any(|t| target.matches(t)))
}

/// Return the node with every taint matching the target dropped
pub fn without_matching_taints(mut node: Node, target: &TaintSpec) -> Node {
    let spec = node.spec.get_or_insert_with(NodeSpec::default);
    let remaining = spec
        .taints
        .take()
        .unwrap_or_default()
        .into_iter()
        .filter(|t| !target.matches(t))
        .collect();
    spec.taints = Some(remaining);
    node
}

/// Check whether the node carries the label key, whatever its value
pub fn has_label(node: &Node, key: &str) -> bool {
    node.metadata
        .labels
        .as_ref()
        .is_some_and(|labels| labels.contains_key(key))
}

/// Return the node with the label set
pub fn with_label(mut node: Node, key: &str, value: &str) -> Node {
    node.metadata
        .labels
        .get_or_insert_with(Default::default)
        .insert(key.to_string(), value.to_string());
    node
}
