// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::catalog;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// Asks OLM to install and keep updated an operator package from a catalog
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[kube(group = "operators.coreos.com", version = "v1alpha1", kind = "Subscription")]
#[kube(namespaced)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Left unset, OLM falls back to its own default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_plan_approval: Option<InstallPlanApproval>,
    /// Package name in the catalog
    pub name: String,
    pub source: String,
    pub source_namespace: String,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, schemars::JsonSchema)]
pub enum InstallPlanApproval {
    Automatic,
}

impl Subscription {
    /// A subscription to `package` on `channel` from the operatorhub.io catalog
    pub fn from_catalog(name: &str, namespace: &str, package: &str, channel: &str) -> Self {
        let mut subscription = Subscription::new(
            name,
            SubscriptionSpec {
                channel: Some(channel.to_string()),
                install_plan_approval: None,
                name: package.to_string(),
                source: catalog::SOURCE.to_string(),
                source_namespace: catalog::SOURCE_NAMESPACE.to_string(),
            },
        );
        subscription.metadata.namespace = Some(namespace.to_string());
        subscription
    }

    pub fn with_approval(mut self, approval: InstallPlanApproval) -> Self {
        self.spec.install_plan_approval = Some(approval);
        self
    }
}
