//! An `AppWrapper` bundles arbitrary Kubernetes objects (the `generictemplate` of each item) so
//! that they are queued, dispatched and scheduled as a single unit. The wrapped objects have no
//! schema, so they are exposed as dynamic attributes.
use super::scheduling_spec::{LabelSelector, SchedulingSpecSpec};
use crate::k8s_types::workload_codeflare_dev::v1beta1;
use crate::k8s_types::K8sType;
use crate::resource::CustomResourceKind;
use crate::schema::Attribute;

use serde_json::Value;

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppWrapperSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priorityslope: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<AppWrapperService>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<AppWrapperResources>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduling_spec: Option<SchedulingSpecSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
}

impl AppWrapperSpec {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::int64("priority", "priority")
                .description("The priority of the app wrapper in the dispatch queue."),
            Attribute::float64("priorityslope", "priorityslope")
                .description("How fast the priority grows while the app wrapper waits in the queue."),
            Attribute::object("service", "service", AppWrapperService::attributes()),
            Attribute::object("resources", "resources", AppWrapperResources::attributes())
                .description("The wrapped objects."),
            Attribute::object(
                "scheduling_spec",
                "schedulingSpec",
                SchedulingSpecSpec::attributes(),
            ),
            Attribute::object("selector", "selector", LabelSelector::attributes()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppWrapperService {
    /// A `ServiceSpec`, passed through as is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<Value>,
}

impl AppWrapperService {
    pub fn attributes() -> Vec<Attribute> {
        vec![Attribute::dynamic("spec", "spec")
            .description("The spec of a Service that's created along with the wrapped objects.")]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppWrapperResources {
    #[serde(rename = "GenericItems", skip_serializing_if = "Option::is_none")]
    pub generic_items: Option<Vec<GenericItem>>,
}

impl AppWrapperResources {
    pub fn attributes() -> Vec<Attribute> {
        vec![Attribute::list_nested(
            "generic_items",
            "GenericItems",
            GenericItem::attributes(),
        )]
    }
}

/// The wire names of these fields are all lowercase
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenericItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minavailable: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocated: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priorityslope: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completionstatus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generictemplate: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custompodresources: Option<Vec<CustomPodResources>>,
}

impl GenericItem {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::int64("replicas", "replicas"),
            Attribute::int64("minavailable", "minavailable"),
            Attribute::int64("allocated", "allocated"),
            Attribute::int64("priority", "priority"),
            Attribute::float64("priorityslope", "priorityslope"),
            Attribute::string("completionstatus", "completionstatus")
                .description("The condition of the wrapped object that marks it as completed, for example Complete or Failed."),
            Attribute::dynamic("generictemplate", "generictemplate")
                .description("The wrapped Kubernetes object."),
            Attribute::list_nested(
                "custompodresources",
                "custompodresources",
                CustomPodResources::attributes(),
            )
            .description("The resources requested by the pods of the wrapped object, used when they can't be derived from the object itself."),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomPodResources {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requests: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<BTreeMap<String, String>>,
}

impl CustomPodResources {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::int64("replicas", "replicas").required(),
            Attribute::string_map("requests", "requests").required(),
            Attribute::string_map("limits", "limits"),
        ]
    }
}

pub struct AppWrapper;

impl CustomResourceKind for AppWrapper {
    type Spec = AppWrapperSpec;
    const TYPE: &'static K8sType = v1beta1::AppWrapper;
    const TYPE_NAME: &'static str = "workload_codeflare_dev_app_wrapper_v1beta1";
    const DESCRIPTION: &'static str =
        "AppWrapper is used to queue, dispatch and schedule a group of Kubernetes objects as a single unit.";

    fn spec_attributes() -> Vec<Attribute> {
        AppWrapperSpec::attributes()
    }
}
