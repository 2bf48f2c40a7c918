//! Types shared by all of the kubedl training jobs. Every job spec embeds the `RunPolicy` fields
//! at its top level and has a map of replica type (for example `Worker` or `PS`) to
//! `ReplicaSpec`.
use super::pod_template::PodTemplateSpec;
use crate::schema::Attribute;

use serde_json::Value;

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_deadline_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backoff_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clean_pod_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_seconds_after_finished: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduling_policy: Option<SchedulingPolicy>,
}

impl RunPolicy {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::int64("active_deadline_seconds", "activeDeadlineSeconds")
                .description("Duration in seconds relative to the start time that the job may be active before the system tries to terminate it."),
            Attribute::int64("backoff_limit", "backoffLimit")
                .description("Number of retries before marking this job failed."),
            Attribute::string("clean_pod_policy", "cleanPodPolicy")
                .description("Defines the policy to kill pods after the job completes. One of All, Running, None."),
            Attribute::int64("ttl_seconds_after_finished", "ttlSecondsAfterFinished")
                .description("Limits the lifetime of a job that has finished execution."),
            Attribute::object(
                "scheduling_policy",
                "schedulingPolicy",
                SchedulingPolicy::attributes(),
            )
            .description("Encapsulates various scheduling policies of the distributed training job, for example gang-scheduling."),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_available: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_class_name: Option<String>,
}

impl SchedulingPolicy {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::int64("min_available", "minAvailable"),
            Attribute::string("queue", "queue"),
            Attribute::string("priority_class_name", "priorityClassName"),
        ]
    }
}

/// Describes how to build a model image from the output of a successful job
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelVersionSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_repo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<Value>,
}

impl ModelVersionSpec {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::string("model_name", "modelName"),
            Attribute::string("created_by", "createdBy"),
            Attribute::string("image_repo", "imageRepo"),
            Attribute::dynamic("storage", "storage")
                .description("The storage where the model is stored, for example an nfs or a local host path."),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<i64>,
}

impl CronPolicy {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::string("schedule", "schedule")
                .required()
                .description("The schedule in Cron format."),
            Attribute::string("concurrency_policy", "concurrencyPolicy"),
            Attribute::bool("suspend", "suspend"),
            Attribute::string("deadline", "deadline"),
            Attribute::int64("history_limit", "historyLimit"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PodTemplateSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot_replica_spec: Option<SpotReplicaSpec>,
}

impl ReplicaSpec {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::int64("replicas", "replicas")
                .description("Desired number of replicas of the given template."),
            Attribute::string("restart_policy", "restartPolicy")
                .description("Restart policy for all replicas within the job. One of Always, OnFailure, Never and ExitCode."),
            Attribute::object("template", "template", PodTemplateSpec::attributes())
                .description("The pod template that's used to create the replicas."),
            Attribute::object("spot_replica_spec", "spotReplicaSpec", SpotReplicaSpec::attributes()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotReplicaSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot_replica_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
}

impl SpotReplicaSpec {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::int64("spot_replica_number", "spotReplicaNumber"),
            Attribute::string("priority_class_name", "priorityClassName"),
            Attribute::string_map("labels", "labels"),
        ]
    }
}

/// The attributes that every kubedl job spec has in addition to its replica specs
pub fn job_attributes() -> Vec<Attribute> {
    let mut attributes = RunPolicy::attributes();
    attributes.push(
        Attribute::string("success_policy", "successPolicy")
            .description("Defines the policy to mark the job as succeeded when a subset of replicas succeed."),
    );
    attributes.push(Attribute::object(
        "model_version",
        "modelVersion",
        ModelVersionSpec::attributes(),
    ));
    attributes.push(
        Attribute::object("cron_policy", "cronPolicy", CronPolicy::attributes())
            .description("Turns the job into a cron job, which is scheduled periodically."),
    );
    attributes.push(
        Attribute::dynamic("cache_backend", "cacheBackend")
            .description("The dataset cache that's mounted into every replica, as a kubedl CacheBackendSpec."),
    );
    attributes
}

/// Declares the spec struct of a kubedl job, which has the common job fields plus the given
/// replica specs field and any extra fields.
macro_rules! kubedl_job_spec {
    ($spec:ident, $replica_specs:ident, $replica_specs_json:literal $(, $field:ident : $field_json:literal => $field_ty:ty)*) => {
        #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $spec {
            #[serde(flatten)]
            pub run_policy: crate::crds::kubedl::RunPolicy,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub success_policy: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub model_version: Option<crate::crds::kubedl::ModelVersionSpec>,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub cron_policy: Option<crate::crds::kubedl::CronPolicy>,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub cache_backend: Option<serde_json::Value>,
            #[serde(rename = $replica_specs_json, skip_serializing_if = "Option::is_none")]
            pub $replica_specs: Option<std::collections::BTreeMap<String, crate::crds::kubedl::ReplicaSpec>>,
            $(
                #[serde(rename = $field_json, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$field_ty>,
            )*
        }
    };
}
