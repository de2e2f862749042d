// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource descriptors, the builder that orders them, and the rendered set.

pub mod builder;
pub mod resource;
pub mod set;

pub use builder::ManifestBuilder;
pub use resource::{ResourceId, ResourceMeta, ResourceSpec, ScopeKind};
pub use set::ManifestSet;
