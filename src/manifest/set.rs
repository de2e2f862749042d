// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The ordered manifest set and its rendering

use super::resource::{known_scope, ResourceId, ResourceSpec};
use crate::error::{PlatformError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

const DOCUMENT_SEPARATOR: &str = "---\n";

/// Resources in apply order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ManifestSet {
    resources: Vec<ResourceSpec>,
}

impl ManifestSet {
    pub(crate) fn new(resources: Vec<ResourceSpec>) -> Self {
        Self { resources }
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceSpec> {
        self.resources.iter()
    }

    pub fn resources(&self) -> &[ResourceSpec] {
        &self.resources
    }

    pub fn get(&self, id: &ResourceId) -> Option<&ResourceSpec> {
        self.resources.iter().find(|r| &r.id() == id)
    }

    /// All resources of the given kind, in set order
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a ResourceSpec> + 'a {
        self.resources.iter().filter(move |r| r.kind() == kind)
    }

    /// Render as a multi-document YAML stream, one document per resource
    pub fn to_yaml(&self) -> Result<String> {
        let documents = self
            .resources
            .iter()
            .map(serde_yaml::to_string)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(documents.join(DOCUMENT_SEPARATOR))
    }

    /// Parse a multi-document YAML stream back into a set, keeping order.
    ///
    /// Empty documents are skipped, so the rendering of an empty set parses
    /// back to an empty set. Every document is checked for required fields.
    pub fn from_yaml(input: &str) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut resources = Vec::new();

        if input.trim().is_empty() {
            return Ok(Self { resources });
        }

        for document in serde_yaml::Deserializer::from_str(input) {
            let Some(resource) = Option::<ResourceSpec>::deserialize(document)? else {
                continue;
            };
            resource.validate(known_scope(resource.api_version(), resource.kind()))?;
            if !seen.insert(resource.id()) {
                return Err(PlatformError::DuplicateResource(resource.id()));
            }
            resources.push(resource);
        }

        Ok(Self { resources })
    }

    /// Write the YAML rendering to `path`.
    ///
    /// The stream is rendered before anything touches the disk and is moved
    /// into place with a rename, so `path` holds either the complete set or
    /// whatever it held before.
    #[instrument(skip(self), fields(resources = self.resources.len()))]
    pub fn write(&self, path: &Path) -> Result<()> {
        let rendered = self.to_yaml()?;
        let io_err = |source: std::io::Error| PlatformError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let staging = path.with_extension("yaml.tmp");
        debug!("Staging manifest at {}", staging.display());
        if let Err(e) = fs::write(&staging, rendered.as_bytes()) {
            let _ = fs::remove_file(&staging);
            return Err(io_err(e));
        }
        if let Err(e) = fs::rename(&staging, path) {
            let _ = fs::remove_file(&staging);
            return Err(io_err(e));
        }

        info!("Wrote {} bytes to {}", rendered.len(), path.display());
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ManifestSet {
    type Item = &'a ResourceSpec;
    type IntoIter = std::slice::Iter<'a, ResourceSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.iter()
    }
}
