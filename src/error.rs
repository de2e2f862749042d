// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::manifest::ResourceId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Duplicate resource: {0}")]
    DuplicateResource(ResourceId),

    #[error("Missing required field {field} on {kind}")]
    MissingField { kind: String, field: &'static str },

    #[error("Resource {resource} depends on undeclared resource {dependency}")]
    UnknownDependency {
        resource: ResourceId,
        dependency: ResourceId,
    },

    #[error("Dependency cycle between: {}", format_ids(.0))]
    DependencyCycle(Vec<ResourceId>),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("YAML serialization failed: {0}")]
    Serialization(#[from] serde_yaml::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn format_ids(ids: &[ResourceId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, PlatformError>;
