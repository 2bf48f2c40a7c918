//! The scheduling spec is both a kind of its own and embedded in every `AppWrapper`, so it's
//! declared once here.
use crate::k8s_types::workload_codeflare_dev::v1beta1;
use crate::k8s_types::K8sType;
use crate::resource::CustomResourceKind;
use crate::schema::{Attribute, ElementType};

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingSpecSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_available: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requeuing: Option<Requeuing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_scheduling: Option<ClusterScheduling>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatch_duration: Option<DispatchDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatching_window: Option<DispatchingWindow>,
}

impl SchedulingSpecSpec {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::int64("min_available", "minAvailable")
                .description("The minimum number of pods that must be scheduled together for the app wrapper to be dispatched."),
            Attribute::object("requeuing", "requeuing", Requeuing::attributes())
                .description("Controls how an app wrapper is requeued when it could not be dispatched."),
            Attribute::string_map("node_selector", "nodeSelector"),
            Attribute::object(
                "cluster_scheduling",
                "clusterScheduling",
                ClusterScheduling::attributes(),
            ),
            Attribute::object(
                "dispatch_duration",
                "dispatchDuration",
                DispatchDuration::attributes(),
            ),
            Attribute::object(
                "dispatching_window",
                "dispatchingWindow",
                DispatchingWindow::attributes(),
            ),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requeuing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_time_in_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_time_in_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_requeuings: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_num_requeuings: Option<i64>,
}

impl Requeuing {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::int64("initial_time_in_seconds", "initialTimeInSeconds"),
            Attribute::int64("time_in_seconds", "timeInSeconds"),
            Attribute::int64("max_time_in_seconds", "maxTimeInSeconds"),
            Attribute::string("growth_type", "growthType")
                .description("How the requeuing time grows, one of exponential, linear or none."),
            Attribute::int64("num_requeuings", "numRequeuings"),
            Attribute::int64("max_num_requeuings", "maxNumRequeuings"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterScheduling {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clusters: Option<Vec<ClusterReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_selector: Option<LabelSelector>,
}

impl ClusterScheduling {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::list_nested("clusters", "clusters", ClusterReference::attributes()),
            Attribute::object(
                "cluster_selector",
                "clusterSelector",
                LabelSelector::attributes(),
            ),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ClusterReference {
    pub fn attributes() -> Vec<Attribute> {
        vec![Attribute::string("name", "name").required()]
    }
}

/// A standard Kubernetes label selector
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_labels: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_expressions: Option<Vec<LabelSelectorRequirement>>,
}

impl LabelSelector {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::string_map("match_labels", "matchLabels"),
            Attribute::list_nested(
                "match_expressions",
                "matchExpressions",
                LabelSelectorRequirement::attributes(),
            ),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelectorRequirement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

impl LabelSelectorRequirement {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::string("key", "key").required(),
            Attribute::string("operator", "operator")
                .required()
                .description("One of In, NotIn, Exists and DoesNotExist."),
            Attribute::list("values", "values", ElementType::String),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchDuration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrun: Option<bool>,
}

impl DispatchDuration {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::int64("expected", "expected"),
            Attribute::int64("limit", "limit"),
            Attribute::bool("overrun", "overrun"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchingWindow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<WindowTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<WindowTime>,
}

impl DispatchingWindow {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::object("start", "start", WindowTime::attributes()),
            Attribute::object("end", "end", WindowTime::attributes()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_timestamp: Option<String>,
}

impl WindowTime {
    pub fn attributes() -> Vec<Attribute> {
        vec![Attribute::string("desired_timestamp", "desiredTimestamp")
            .description("An RFC 3339 timestamp.")]
    }
}

pub struct SchedulingSpec;

impl CustomResourceKind for SchedulingSpec {
    type Spec = SchedulingSpecSpec;
    const TYPE: &'static K8sType = v1beta1::SchedulingSpec;
    const TYPE_NAME: &'static str = "workload_codeflare_dev_scheduling_spec_v1beta1";
    const DESCRIPTION: &'static str =
        "SchedulingSpec declares how the pods of an AppWrapper are scheduled as a group.";

    fn spec_attributes() -> Vec<Attribute> {
        SchedulingSpecSpec::attributes()
    }
}
