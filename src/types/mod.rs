// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed Kubernetes resources declared by the platform chart.

pub mod namespace;
pub mod operator_group;
pub mod subscription;

pub use namespace::namespace;
pub use operator_group::{OperatorGroup, OperatorGroupSpec};
pub use subscription::{InstallPlanApproval, Subscription, SubscriptionSpec};
