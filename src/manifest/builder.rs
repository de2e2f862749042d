// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Accumulates resource descriptors and orders them by their dependencies

use super::resource::{ResourceId, ResourceSpec, ScopeKind};
use super::set::ManifestSet;
use crate::error::{PlatformError, Result};
use kube::Resource;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, instrument};

#[derive(Debug)]
struct Node {
    resource: ResourceSpec,
    depends_on: Vec<ResourceId>,
}

/// Builder for a [`ManifestSet`].
///
/// Identities are checked on insertion, so a duplicate fails before anything
/// is rendered. On [`build`](Self::build) every namespaced resource also gets
/// an edge to the Namespace it lives in, when that Namespace is declared.
#[derive(Debug, Default)]
pub struct ManifestBuilder {
    nodes: Vec<Node>,
    index: HashMap<ResourceId, usize>,
}

impl ManifestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a typed resource
    pub fn add<K>(&mut self, resource: &K) -> Result<ResourceId>
    where
        K: Resource<DynamicType = ()> + Serialize,
        K::Scope: ScopeKind,
    {
        self.push(ResourceSpec::from_resource(resource)?, Vec::new())
    }

    /// Declare a typed resource that must be applied after `deps`
    pub fn add_after<K>(&mut self, resource: &K, deps: &[ResourceId]) -> Result<ResourceId>
    where
        K: Resource<DynamicType = ()> + Serialize,
        K::Scope: ScopeKind,
    {
        self.push(ResourceSpec::from_resource(resource)?, deps.to_vec())
    }

    /// Declare an already captured descriptor
    pub fn push(&mut self, resource: ResourceSpec, depends_on: Vec<ResourceId>) -> Result<ResourceId> {
        let id = resource.id();
        if self.index.contains_key(&id) {
            return Err(PlatformError::DuplicateResource(id));
        }

        debug!("Declared {}", id);
        self.index.insert(id.clone(), self.nodes.len());
        self.nodes.push(Node {
            resource,
            depends_on,
        });
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Order the declared resources so every resource follows its
    /// dependencies. Ties keep declaration order.
    #[instrument(skip(self), fields(resources = self.nodes.len()))]
    pub fn build(self) -> Result<ManifestSet> {
        let count = self.nodes.len();
        let dependencies = self.resolve_dependencies()?;

        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); count];
        let mut pending = vec![0usize; count];
        for (node, deps) in dependencies.iter().enumerate() {
            pending[node] = deps.len();
            for &dep in deps {
                dependents[dep].push(node);
            }
        }

        let mut ready: BTreeSet<usize> = (0..count).filter(|&i| pending[i] == 0).collect();
        let mut order = Vec::with_capacity(count);
        while let Some(next) = ready.pop_first() {
            order.push(next);
            for &dependent in &dependents[next] {
                pending[dependent] -= 1;
                if pending[dependent] == 0 {
                    ready.insert(dependent);
                }
            }
        }

        if order.len() < count {
            let cycle = (0..count)
                .filter(|&i| pending[i] > 0)
                .map(|i| self.nodes[i].resource.id())
                .collect();
            return Err(PlatformError::DependencyCycle(cycle));
        }

        let mut slots: Vec<Option<ResourceSpec>> =
            self.nodes.into_iter().map(|n| Some(n.resource)).collect();
        let resources = order
            .into_iter()
            .filter_map(|i| slots[i].take())
            .collect();

        info!("Built manifest set with {} resources", count);
        Ok(ManifestSet::new(resources))
    }

    /// Indices each node depends on, explicit and implicit
    fn resolve_dependencies(&self) -> Result<Vec<BTreeSet<usize>>> {
        let namespaces: HashMap<&str, usize> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.resource.is_namespace())
            .map(|(i, n)| (n.resource.name(), i))
            .collect();

        self.nodes
            .iter()
            .map(|node| {
                let mut deps = BTreeSet::new();

                if let Some(&ns) = node.resource.namespace().and_then(|ns| namespaces.get(ns)) {
                    deps.insert(ns);
                }

                for dep in &node.depends_on {
                    let Some(&idx) = self.index.get(dep) else {
                        return Err(PlatformError::UnknownDependency {
                            resource: node.resource.id(),
                            dependency: dep.clone(),
                        });
                    };
                    deps.insert(idx);
                }

                Ok(deps)
            })
            .collect()
    }
}
