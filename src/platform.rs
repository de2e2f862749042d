// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The platform chart: OLM namespaces, operator groups and subscriptions for
//! the cluster add-ons.

use crate::constants::namespaces::{DEFAULT, FLUX_SYSTEM, OPERATORS};
use crate::error::Result;
use crate::manifest::{ManifestBuilder, ManifestSet};
use crate::types::{namespace, InstallPlanApproval, OperatorGroup, Subscription};
use tracing::instrument;

/// Build the platform manifest set
#[instrument]
pub fn build() -> Result<ManifestSet> {
    let mut chart = ManifestBuilder::new();
    declare(&mut chart)?;
    chart.build()
}

/// Declare every platform resource on `chart`
pub fn declare(chart: &mut ManifestBuilder) -> Result<()> {
    chart.add(&namespace(FLUX_SYSTEM))?;

    let flux_group = chart.add(&OperatorGroup::targeting(
        "flux-operator-group",
        FLUX_SYSTEM,
        &[FLUX_SYSTEM],
    ))?;
    chart.add(&OperatorGroup::targeting(
        "prometheus-operator-group",
        DEFAULT,
        &[DEFAULT],
    ))?;

    chart.add_after(
        &Subscription::from_catalog("flux-subscription", FLUX_SYSTEM, "flux", "stable")
            .with_approval(InstallPlanApproval::Automatic),
        &[flux_group],
    )?;

    // The `operators` namespace and its global OperatorGroup come with OLM
    chart.add(&Subscription::from_catalog(
        "grafana-subscription",
        OPERATORS,
        "grafana-operator",
        "v5",
    ))?;
    chart.add(
        &Subscription::from_catalog("prometheus-subscription", OPERATORS, "prometheus", "beta")
            .with_approval(InstallPlanApproval::Automatic),
    )?;
    chart.add(&Subscription::from_catalog(
        "loki-operator",
        OPERATORS,
        "loki-operator",
        "alpha",
    ))?;
    chart.add(&Subscription::from_catalog(
        "strimzi-kafka-operator",
        OPERATORS,
        "strimzi-kafka-operator",
        "stable",
    ))?;
    chart.add(&Subscription::from_catalog(
        "minio-operator",
        OPERATORS,
        "minio-operator",
        "stable",
    ))?;
    chart.add(&Subscription::from_catalog(
        "my-elastic-cloud-eck",
        OPERATORS,
        "elastic-cloud-eck",
        "stable",
    ))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlatformError;
    use crate::manifest::{ResourceId, ResourceSpec};
    use serde_json::json;

    fn subscription<'a>(set: &'a ManifestSet, namespace: &str, name: &str) -> &'a ResourceSpec {
        set.get(&ResourceId::new("Subscription", Some(namespace), name))
            .unwrap_or_else(|| panic!("subscription {namespace}/{name} not declared"))
    }

    #[test]
    fn test_resource_counts() {
        let set = build().unwrap();

        assert_eq!(set.len(), 10);
        assert_eq!(set.of_kind("Namespace").count(), 1);
        assert_eq!(set.of_kind("OperatorGroup").count(), 2);
        assert_eq!(set.of_kind("Subscription").count(), 7);
    }

    #[test]
    fn test_output_follows_declaration_order() {
        let set = build().unwrap();
        let names: Vec<&str> = set.iter().map(|r| r.name()).collect();

        assert_eq!(
            names,
            vec![
                "flux-system",
                "flux-operator-group",
                "prometheus-operator-group",
                "flux-subscription",
                "grafana-subscription",
                "prometheus-subscription",
                "loki-operator",
                "strimzi-kafka-operator",
                "minio-operator",
                "my-elastic-cloud-eck",
            ]
        );
    }

    #[test]
    fn test_flux_namespace() {
        let set = build().unwrap();
        let ns: Vec<_> = set.of_kind("Namespace").collect();

        assert_eq!(ns.len(), 1);
        assert_eq!(ns[0].name(), "flux-system");
        assert_eq!(ns[0].api_version(), "v1");
    }

    #[test]
    fn test_operator_groups() {
        let set = build().unwrap();

        let flux = set
            .get(&ResourceId::new("OperatorGroup", Some("flux-system"), "flux-operator-group"))
            .unwrap();
        assert_eq!(flux.spec().get("targetNamespaces"), Some(&json!(["flux-system"])));

        let prometheus = set
            .get(&ResourceId::new("OperatorGroup", Some("default"), "prometheus-operator-group"))
            .unwrap();
        assert_eq!(prometheus.spec().get("targetNamespaces"), Some(&json!(["default"])));
    }

    #[test]
    fn test_subscription_fields() {
        let set = build().unwrap();
        let expected = [
            ("flux-system", "flux-subscription", "flux", "stable"),
            ("operators", "grafana-subscription", "grafana-operator", "v5"),
            ("operators", "prometheus-subscription", "prometheus", "beta"),
            ("operators", "loki-operator", "loki-operator", "alpha"),
            ("operators", "strimzi-kafka-operator", "strimzi-kafka-operator", "stable"),
            ("operators", "minio-operator", "minio-operator", "stable"),
            ("operators", "my-elastic-cloud-eck", "elastic-cloud-eck", "stable"),
        ];

        for (namespace, name, package, channel) in expected {
            let sub = subscription(&set, namespace, name);
            assert_eq!(sub.api_version(), "operators.coreos.com/v1alpha1");
            assert_eq!(sub.spec_str("name"), Some(package), "{name}");
            assert_eq!(sub.spec_str("channel"), Some(channel), "{name}");
        }
    }

    #[test]
    fn test_every_subscription_uses_operatorhub_catalog() {
        let set = build().unwrap();

        for sub in set.of_kind("Subscription") {
            assert_eq!(sub.spec_str("source"), Some("operatorhubio-catalog"));
            assert_eq!(sub.spec_str("sourceNamespace"), Some("olm"));
        }
    }

    #[test]
    fn test_install_plan_approval_is_pinned_per_subscription() {
        let set = build().unwrap();

        for name in ["flux-subscription", "prometheus-subscription"] {
            let ns = if name == "flux-subscription" { "flux-system" } else { "operators" };
            assert_eq!(
                subscription(&set, ns, name).spec_str("installPlanApproval"),
                Some("Automatic"),
                "{name}"
            );
        }

        for name in [
            "grafana-subscription",
            "loki-operator",
            "strimzi-kafka-operator",
            "minio-operator",
            "my-elastic-cloud-eck",
        ] {
            assert!(
                !subscription(&set, "operators", name)
                    .spec()
                    .contains_key("installPlanApproval"),
                "{name}"
            );
        }
    }

    #[test]
    fn test_identities_are_unique() {
        let set = build().unwrap();
        let mut ids: Vec<_> = set.iter().map(|r| r.id()).collect();
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), set.len());
    }

    #[test]
    fn test_duplicate_appended_resource_fails_before_rendering() {
        let mut chart = ManifestBuilder::new();
        declare(&mut chart).unwrap();

        let err = chart
            .add(&Subscription::from_catalog(
                "grafana-subscription",
                OPERATORS,
                "grafana-operator",
                "v5",
            ))
            .unwrap_err();

        assert!(matches!(err, PlatformError::DuplicateResource(_)));
        assert_eq!(chart.len(), 10);
    }

    #[test]
    fn test_declaring_twice_fails() {
        let mut chart = ManifestBuilder::new();
        declare(&mut chart).unwrap();

        assert!(matches!(
            declare(&mut chart),
            Err(PlatformError::DuplicateResource(_))
        ));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let first = build().unwrap().to_yaml().unwrap();
        let second = build().unwrap().to_yaml().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_rendered_output_round_trips() {
        let set = build().unwrap();
        let parsed = ManifestSet::from_yaml(&set.to_yaml().unwrap()).unwrap();

        assert_eq!(parsed, set);
    }
}
