// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Target taint parsed from a `key[=value]:effect` descriptor.

use crate::error::RemediationError;
use k8s_openapi::api::core::v1::{Taint, Toleration};
use std::fmt;
use std::str::FromStr;

/// The taint a remediation run removes from its node.
///
/// An unset `value` acts as a wildcard when matching node taints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaintSpec {
    pub key: String,
    pub value: Option<String>,
    pub effect: String,
}

impl FromStr for TaintSpec {
    type Err = RemediationError;

    fn from_str(descriptor: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = descriptor.split(':').collect();
        let [key_value, effect] = parts.as_slice() else {
            return Err(RemediationError::InvalidTaintFormat(format!(
                "'{}' is not of the form key[=value]:effect",
                descriptor
            )));
        };

        let mut fragments = key_value.split('=');
        let key = fragments.next().unwrap_or_default();
        let value = fragments.next().map(str::to_string);

        if key.is_empty() || effect.is_empty() {
            return Err(RemediationError::InvalidTaintFormat(format!(
                "'{}' has an empty key or effect",
                descriptor
            )));
        }

        Ok(TaintSpec {
            key: key.to_string(),
            value,
            effect: effect.to_string(),
        })
    }
}

impl fmt::Display for TaintSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}:{}", self.key, value, self.effect),
            None => write!(f, "{}:{}", self.key, self.effect),
        }
    }
}

impl TaintSpec {
    /// Check whether this target matches a concrete taint found on a node.
    ///
    /// Not symmetric: a target without a value matches any value on the
    /// candidate, a target with a value requires it to be equal. An absent
    /// candidate value compares as the empty string.
    pub fn matches(&self, candidate: &Taint) -> bool {
        self.key == candidate.key
            && self.effect == candidate.effect
            && self
                .value
                .as_deref()
                .is_none_or(|v| candidate.value.as_deref().unwrap_or_default() == v)
    }

    /// Toleration letting the helper pod schedule onto a node carrying this taint
    pub fn toleration(&self) -> Toleration {
        let operator = if self.value.is_some() { "Equal" } else { "Exists" };
        Toleration {
            key: Some(self.key.clone()),
            operator: Some(operator.to_string()),
            value: self.value.clone(),
            effect: Some(self.effect.clone()),
            ..Default::default()
        }
    }
}
