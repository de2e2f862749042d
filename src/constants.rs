// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// OLM catalog every subscription installs from
pub mod catalog {
    /// CatalogSource serving the operatorhub.io index
    pub const SOURCE: &str = "operatorhubio-catalog";
    /// Namespace the CatalogSource lives in
    pub const SOURCE_NAMESPACE: &str = "olm";
}

/// Namespaces referenced by the platform chart
pub mod namespaces {
    pub const FLUX_SYSTEM: &str = "flux-system";
    pub const DEFAULT: &str = "default";
    /// Created by the OLM install together with its global OperatorGroup
    pub const OPERATORS: &str = "operators";
}

/// Output defaults
pub mod output {
    pub const DEFAULT_DIR: &str = "dist";
    pub const DEFAULT_CHART_NAME: &str = "platform";
    /// Appended to the chart name to form the manifest file name
    pub const FILE_SUFFIX: &str = ".k8s.yaml";
}
