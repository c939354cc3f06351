// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Builders and transformations over the Kubernetes objects regpatch touches.

pub mod node;
pub mod pod;

pub use node::{has_label, has_matching_taint, with_label, without_matching_taints};
pub use pod::{helper_pod, helper_pod_name, pod_phase};
