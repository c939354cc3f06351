// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! One-shot node remediation.

pub mod workflow;

pub use workflow::{RemediationOutcome, Remediator};
