// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Node labels written by regpatch
pub mod labels {
    /// Set to "true" once the registry patch has been applied to the node
    pub const REGISTRY_PATCHED: &str = "RegistryPatched";
    pub const REGISTRY_PATCHED_VALUE: &str = "true";
}

/// Helper pod definition
pub mod helper {
    /// The pod name is this prefix followed by the node name
    pub const POD_NAME_PREFIX: &str = "add-reg-key-";
    pub const CONTAINER_NAME: &str = "add-reg-key";
    pub const IMAGE: &str = "mcr.microsoft.com/windows/nanoserver:ltsc2019";
    pub const COMMAND: &str = "cmd.exe";
    pub const ARGS: &[&str] = &[
        "/c",
        "reg",
        "add",
        r"HKLM\SYSTEM\CurrentControlSet\Services\hns\State",
        "/v",
        "DNSMaximumTTL",
        "/t",
        "REG_DWORD",
        "/d",
        "30",
        "/f",
    ];
    pub const RUN_AS_USER: &str = r"NT AUTHORITY\SYSTEM";
    pub const RESTART_POLICY: &str = "Never";
}

/// Pod phases reported in `status.phase`
pub mod phase {
    pub const SUCCEEDED: &str = "Succeeded";
    pub const FAILED: &str = "Failed";
}

/// Configuration defaults
pub mod defaults {
    pub const NAMESPACE: &str = "default";
    /// Interval between helper pod status reads
    pub const POLL_INTERVAL_SECS: u64 = 5;
}
