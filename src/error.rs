// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemediationError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Invalid taint format: {0}")]
    InvalidTaintFormat(String),

    #[error("Helper pod dispatch failed: {0}")]
    DispatchError(String),

    #[error("Helper pod did not complete: {0}")]
    CompletionError(String),

    #[error("Taint removal failed: {0}")]
    TaintRemovalError(String),

    #[error("Node labelling failed: {0}")]
    LabelError(String),

    #[error("Cancelled while waiting for helper pod")]
    Cancelled,
}

impl RemediationError {
    /// The raw API status payload, when the error came back from the API server
    pub fn api_payload(&self) -> Option<String> {
        match self {
            RemediationError::KubeError(kube::Error::Api(resp)) => serde_json::to_string(resp).ok(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RemediationError>;
