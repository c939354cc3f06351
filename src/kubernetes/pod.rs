// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Helper pod manifest

use crate::constants::helper;
use crate::types::TaintSpec;
use k8s_openapi::api::core::v1::{
    Container, Pod, PodSecurityContext, PodSpec, WindowsSecurityContextOptions,
};
use kube::api::ObjectMeta;

/// Name of the helper pod for a node
pub fn helper_pod_name(node_name: &str) -> String {
    format!("{}{}", helper::POD_NAME_PREFIX, node_name)
}

/// Build the host-process pod that applies the registry patch on `node_name`.
///
/// The pod is pinned to the node directly, bypassing the scheduler's node
/// selection, and tolerates `taint` so the kubelet admits it.
pub fn helper_pod(node_name: &str, namespace: &str, taint: &TaintSpec) -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some(helper_pod_name(node_name)),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        spec: Some(PodSpec {
            node_name: Some(node_name.to_string()),
            containers: vec![Container {
                name: helper::CONTAINER_NAME.to_string(),
                image: Some(helper::IMAGE.to_string()),
                command: Some(vec![helper::COMMAND.to_string()]),
                args: Some(helper::ARGS.iter().map(|a| a.to_string()).collect()),
                ..Default::default()
            }],
            restart_policy: Some(helper::RESTART_POLICY.to_string()),
            host_network: Some(true),
            security_context: Some(PodSecurityContext {
                windows_options: Some(WindowsSecurityContextOptions {
                    host_process: Some(true),
                    run_as_user_name: Some(helper::RUN_AS_USER.to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            tolerations: Some(vec![taint.toleration()]),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// The pod's `status.phase`, if reported yet
pub fn pod_phase(pod: &Pod) -> Option<&str> {
    pod.status.as_ref().and_then(|s| s.phase.as_deref())
}
