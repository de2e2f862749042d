// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::output;
use crate::error::{PlatformError, Result};
use std::env;
use std::path::PathBuf;

/// Synthesis configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory the manifest file is written to
    pub output_dir: PathBuf,
    /// Chart name, used as the manifest file stem
    pub chart_name: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let output_dir = lookup("PLATFORM_OUTPUT_DIR")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| output::DEFAULT_DIR.to_string());
        let chart_name = lookup("PLATFORM_CHART_NAME")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| output::DEFAULT_CHART_NAME.to_string());
        validate_chart_name(&chart_name)?;

        Ok(Config {
            output_dir: PathBuf::from(output_dir),
            chart_name,
        })
    }

    /// Path of the synthesized manifest file, always directly inside `output_dir`
    pub fn manifest_path(&self) -> Result<PathBuf> {
        validate_chart_name(&self.chart_name)?;
        Ok(self
            .output_dir
            .join(format!("{}{}", self.chart_name, output::FILE_SUFFIX)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output_dir: PathBuf::from(output::DEFAULT_DIR),
            chart_name: output::DEFAULT_CHART_NAME.to_string(),
        }
    }
}

/// The chart name becomes a file name, so it must be a single plain component
fn validate_chart_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(PlatformError::InvalidConfig(format!(
            "chart name {:?} must be a plain file name",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.output_dir, PathBuf::from("dist"));
        assert_eq!(config.chart_name, "platform");
        assert_eq!(
            config.manifest_path().unwrap(),
            PathBuf::from("dist/platform.k8s.yaml")
        );
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PLATFORM_OUTPUT_DIR", "/tmp/out"),
            ("PLATFORM_CHART_NAME", "bootstrap"),
        ]))
        .unwrap();
        assert_eq!(
            config.manifest_path().unwrap(),
            PathBuf::from("/tmp/out/bootstrap.k8s.yaml")
        );
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("PLATFORM_OUTPUT_DIR", ""),
            ("PLATFORM_CHART_NAME", ""),
        ]))
        .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_chart_name_with_path_components_is_rejected() {
        for name in ["../x", "a/b", "a\\b", "..", "."] {
            let result = Config::from_lookup(lookup_from(&[("PLATFORM_CHART_NAME", name)]));
            assert!(
                matches!(result, Err(PlatformError::InvalidConfig(_))),
                "{name}"
            );
        }
    }

    #[test]
    fn test_manifest_path_rejects_invalid_chart_name() {
        let config = Config {
            chart_name: "../escape".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.manifest_path(),
            Err(PlatformError::InvalidConfig(_))
        ));
    }
}
