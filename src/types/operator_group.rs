// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// Scopes which namespaces the operators installed in its namespace may watch
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(group = "operators.coreos.com", version = "v1", kind = "OperatorGroup")]
#[kube(namespaced)]
#[serde(rename_all = "camelCase")]
pub struct OperatorGroupSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_namespaces: Option<Vec<String>>,
}

impl OperatorGroup {
    /// An OperatorGroup in `namespace` watching exactly `targets`
    pub fn targeting(name: &str, namespace: &str, targets: &[&str]) -> Self {
        let mut group = OperatorGroup::new(
            name,
            OperatorGroupSpec {
                target_namespaces: Some(targets.iter().map(|t| t.to_string()).collect()),
            },
        );
        group.metadata.namespace = Some(namespace.to_string());
        group
    }
}
