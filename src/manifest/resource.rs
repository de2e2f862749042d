// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Untyped resource descriptor and its identity

use crate::error::{PlatformError, Result};
use crate::types::{OperatorGroup, Subscription};
use k8s_openapi::api::core::v1::Namespace;
use k8s_openapi::{ClusterResourceScope, NamespaceResourceScope};
use kube::Resource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Whether a kube resource scope requires `metadata.namespace`
pub trait ScopeKind {
    const NAMESPACED: bool;
}

impl ScopeKind for NamespaceResourceScope {
    const NAMESPACED: bool = true;
}

impl ScopeKind for ClusterResourceScope {
    const NAMESPACED: bool = false;
}

fn scope_if<K>(api_version: &str, kind: &str) -> Option<bool>
where
    K: Resource<DynamicType = ()>,
    K::Scope: ScopeKind,
{
    (K::api_version(&()) == api_version && K::kind(&()) == kind)
        .then_some(<K::Scope as ScopeKind>::NAMESPACED)
}

/// Scope of the kinds this crate declares, `None` for anything else
pub fn known_scope(api_version: &str, kind: &str) -> Option<bool> {
    scope_if::<Namespace>(api_version, kind)
        .or_else(|| scope_if::<OperatorGroup>(api_version, kind))
        .or_else(|| scope_if::<Subscription>(api_version, kind))
}

/// Spec keys that must hold a non-empty string, with their reported path
fn required_spec_fields(api_version: &str, kind: &str) -> &'static [(&'static str, &'static str)] {
    if Subscription::api_version(&()) == api_version && Subscription::kind(&()) == kind {
        &[
            ("name", "spec.name"),
            ("source", "spec.source"),
            ("sourceNamespace", "spec.sourceNamespace"),
        ]
    } else {
        &[]
    }
}

/// Identity of a resource within a manifest set
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId {
    pub kind: String,
    pub namespace: Option<String>,
    pub name: String,
}

impl ResourceId {
    pub fn new(kind: &str, namespace: Option<&str>, name: &str) -> Self {
        Self {
            kind: kind.to_string(),
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
        }
    }

    /// Identity of a typed resource, without checking required fields
    pub fn of<K>(resource: &K) -> Self
    where
        K: Resource<DynamicType = ()>,
    {
        Self {
            kind: K::kind(&()).to_string(),
            namespace: resource.meta().namespace.clone(),
            name: resource.meta().name.clone().unwrap_or_default(),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}/{}/{}", self.kind, ns, self.name),
            None => write!(f, "{}/{}", self.kind, self.name),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ResourceMeta {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
}

/// A single manifest document: apiVersion, kind, metadata and spec.
///
/// Built from a typed resource and read-only afterwards. Spec keys are kept
/// sorted so rendering does not depend on field declaration order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpec {
    api_version: String,
    kind: String,
    metadata: ResourceMeta,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    spec: BTreeMap<String, Value>,
}

impl ResourceSpec {
    /// Capture a typed resource, failing fast on missing required fields
    pub fn from_resource<K>(resource: &K) -> Result<Self>
    where
        K: Resource<DynamicType = ()> + Serialize,
        K::Scope: ScopeKind,
    {
        let namespaced = <K::Scope as ScopeKind>::NAMESPACED;
        let meta = resource.meta();

        let spec = match serde_json::to_value(resource)? {
            Value::Object(mut object) => match object.remove("spec") {
                Some(Value::Object(fields)) => fields.into_iter().collect(),
                _ => BTreeMap::new(),
            },
            _ => BTreeMap::new(),
        };

        let captured = Self {
            api_version: K::api_version(&()).to_string(),
            kind: K::kind(&()).to_string(),
            metadata: ResourceMeta {
                name: meta.name.clone().unwrap_or_default(),
                namespace: if namespaced { meta.namespace.clone() } else { None },
            },
            spec,
        };
        captured.validate(Some(namespaced))?;
        Ok(captured)
    }

    /// Check required fields. `namespaced` is the scope of the kind when known;
    /// unknown kinds only need a name.
    pub fn validate(&self, namespaced: Option<bool>) -> Result<()> {
        let missing = |field: &'static str| PlatformError::MissingField {
            kind: self.kind.clone(),
            field,
        };

        if self.metadata.name.is_empty() {
            return Err(missing("metadata.name"));
        }
        if namespaced == Some(true) && self.namespace().map_or(true, str::is_empty) {
            return Err(missing("metadata.namespace"));
        }

        for &(key, field) in required_spec_fields(&self.api_version, &self.kind) {
            if self.spec_str(key).map_or(true, str::is_empty) {
                return Err(missing(field));
            }
        }
        Ok(())
    }

    pub fn id(&self) -> ResourceId {
        ResourceId::new(&self.kind, self.namespace(), &self.metadata.name)
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata.namespace.as_deref()
    }

    pub fn spec(&self) -> &BTreeMap<String, Value> {
        &self.spec
    }

    /// A spec field as a string, if it is one
    pub fn spec_str(&self, key: &str) -> Option<&str> {
        self.spec.get(key).and_then(Value::as_str)
    }

    /// True for core/v1 Namespace descriptors
    pub fn is_namespace(&self) -> bool {
        self.kind == "Namespace" && self.api_version == "v1"
    }
}
