//! The Kubernetes `PodTemplateSpec` that's embedded in the replica specs of every kubedl job.
//!
//! Every field of `PodSpec`, `Container` and `Volume` is declared. The small, flat types are
//! declared field by field. Deeply nested core types, like affinity, health checks, security
//! contexts and the less common volume sources, are dynamic attributes that carry the object
//! exactly as the api server returns it.
use crate::schema::Attribute;

use serde_json::Value;

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodTemplateSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TemplateMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<PodSpec>,
}

impl PodTemplateSpec {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::object("metadata", "metadata", TemplateMetadata::attributes())
                .description("Metadata that's applied to every pod created from this template."),
            Attribute::object("spec", "spec", PodSpec::attributes())
                .description("Specification of the desired behavior of the pod."),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalizers: Option<Vec<String>>,
}

impl TemplateMetadata {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::string("name", "name"),
            Attribute::string("namespace", "namespace"),
            Attribute::string_map("labels", "labels"),
            Attribute::string_map("annotations", "annotations"),
            Attribute::string_list("finalizers", "finalizers"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_deadline_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affinity: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automount_service_account_token: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub containers: Option<Vec<Container>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_config: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_service_links: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ephemeral_containers: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_aliases: Option<Vec<HostAlias>>,
    #[serde(rename = "hostIPC", skip_serializing_if = "Option::is_none")]
    pub host_ipc: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_network: Option<bool>,
    #[serde(rename = "hostPID", skip_serializing_if = "Option::is_none")]
    pub host_pid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_users: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_pull_secrets: Option<Vec<LocalObjectReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_containers: Option<Vec<Container>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<PodOS>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overhead: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preemption_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readiness_gates: Option<Vec<PodReadinessGate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_claims: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduler_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduling_gates: Option<Vec<LocalObjectReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_context: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_account_name: Option<String>,
    #[serde(rename = "setHostnameAsFQDN", skip_serializing_if = "Option::is_none")]
    pub set_hostname_as_fqdn: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_process_namespace: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination_grace_period_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerations: Option<Vec<Toleration>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topology_spread_constraints: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<Volume>>,
}

impl PodSpec {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::int64("active_deadline_seconds", "activeDeadlineSeconds"),
            Attribute::dynamic("affinity", "affinity")
                .description("The pod's scheduling constraints, as a Kubernetes Affinity object."),
            Attribute::bool("automount_service_account_token", "automountServiceAccountToken"),
            Attribute::list_nested("containers", "containers", Container::attributes())
                .required()
                .description("List of containers belonging to the pod. There must be at least one."),
            Attribute::dynamic("dns_config", "dnsConfig"),
            Attribute::string("dns_policy", "dnsPolicy"),
            Attribute::bool("enable_service_links", "enableServiceLinks"),
            Attribute::dynamic("ephemeral_containers", "ephemeralContainers"),
            Attribute::list_nested("host_aliases", "hostAliases", HostAlias::attributes()),
            Attribute::bool("host_ipc", "hostIPC"),
            Attribute::bool("host_network", "hostNetwork"),
            Attribute::bool("host_pid", "hostPID"),
            Attribute::bool("host_users", "hostUsers"),
            Attribute::string("hostname", "hostname"),
            Attribute::list_nested(
                "image_pull_secrets",
                "imagePullSecrets",
                LocalObjectReference::attributes(),
            ),
            Attribute::list_nested("init_containers", "initContainers", Container::attributes())
                .description("List of initialization containers, which are run in order before the app containers are started."),
            Attribute::string("node_name", "nodeName"),
            Attribute::string_map("node_selector", "nodeSelector")
                .description("A selector which must match a node's labels for the pod to be scheduled on that node."),
            Attribute::object("os", "os", PodOS::attributes()),
            Attribute::string_map("overhead", "overhead"),
            Attribute::string("preemption_policy", "preemptionPolicy"),
            Attribute::int64("priority", "priority"),
            Attribute::string("priority_class_name", "priorityClassName"),
            Attribute::list_nested(
                "readiness_gates",
                "readinessGates",
                PodReadinessGate::attributes(),
            ),
            Attribute::dynamic("resource_claims", "resourceClaims"),
            Attribute::string("restart_policy", "restartPolicy")
                .description("Restart policy for all containers within the pod. One of Always, OnFailure, Never."),
            Attribute::string("runtime_class_name", "runtimeClassName"),
            Attribute::string("scheduler_name", "schedulerName"),
            Attribute::list_nested(
                "scheduling_gates",
                "schedulingGates",
                LocalObjectReference::attributes(),
            ),
            Attribute::dynamic("security_context", "securityContext"),
            Attribute::string("service_account", "serviceAccount"),
            Attribute::string("service_account_name", "serviceAccountName"),
            Attribute::bool("set_hostname_as_fqdn", "setHostnameAsFQDN"),
            Attribute::bool("share_process_namespace", "shareProcessNamespace"),
            Attribute::string("subdomain", "subdomain"),
            Attribute::int64(
                "termination_grace_period_seconds",
                "terminationGracePeriodSeconds",
            ),
            Attribute::list_nested("tolerations", "tolerations", Toleration::attributes()),
            Attribute::dynamic("topology_spread_constraints", "topologySpreadConstraints"),
            Attribute::list_nested("volumes", "volumes", Volume::attributes()),
        ]
    }
}

/// Used for `imagePullSecrets` and `schedulingGates`, which both only have a name
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocalObjectReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl LocalObjectReference {
    pub fn attributes() -> Vec<Attribute> {
        vec![Attribute::string("name", "name")]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HostAlias {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostnames: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

impl HostAlias {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::string_list("hostnames", "hostnames"),
            Attribute::string("ip", "ip").required(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PodOS {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PodOS {
    pub fn attributes() -> Vec<Attribute> {
        vec![Attribute::string("name", "name").required()]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodReadinessGate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_type: Option<String>,
}

impl PodReadinessGate {
    pub fn attributes() -> Vec<Attribute> {
        vec![Attribute::string("condition_type", "conditionType").required()]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<EnvVar>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_from: Option<Vec<EnvFromSource>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liveness_probe: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<ContainerPort>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readiness_probe: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize_policy: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_context: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startup_probe: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdin_once: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination_message_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination_message_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tty: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_devices: Option<Vec<VolumeDevice>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_mounts: Option<Vec<VolumeMount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
}

impl Container {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::string_list("args", "args"),
            Attribute::string_list("command", "command")
                .description("Entrypoint array. Not executed within a shell."),
            Attribute::list_nested("env", "env", EnvVar::attributes()),
            Attribute::list_nested("env_from", "envFrom", EnvFromSource::attributes()),
            Attribute::string("image", "image"),
            Attribute::string("image_pull_policy", "imagePullPolicy"),
            Attribute::dynamic("lifecycle", "lifecycle"),
            Attribute::dynamic("liveness_probe", "livenessProbe"),
            Attribute::string("name", "name")
                .required()
                .description("Name of the container specified as a DNS_LABEL."),
            Attribute::list_nested("ports", "ports", ContainerPort::attributes()),
            Attribute::dynamic("readiness_probe", "readinessProbe"),
            Attribute::dynamic("resize_policy", "resizePolicy"),
            Attribute::object("resources", "resources", ResourceRequirements::attributes()),
            Attribute::string("restart_policy", "restartPolicy"),
            Attribute::dynamic("security_context", "securityContext"),
            Attribute::dynamic("startup_probe", "startupProbe"),
            Attribute::bool("stdin", "stdin"),
            Attribute::bool("stdin_once", "stdinOnce"),
            Attribute::string("termination_message_path", "terminationMessagePath"),
            Attribute::string("termination_message_policy", "terminationMessagePolicy"),
            Attribute::bool("tty", "tty"),
            Attribute::list_nested("volume_devices", "volumeDevices", VolumeDevice::attributes()),
            Attribute::list_nested("volume_mounts", "volumeMounts", VolumeMount::attributes()),
            Attribute::string("working_dir", "workingDir"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// A `EnvVarSource`, which is passed through as is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_from: Option<Value>,
}

impl EnvVar {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::string("name", "name").required(),
            Attribute::string("value", "value"),
            Attribute::dynamic("value_from", "valueFrom")
                .description("Source for the environment variable's value. Cannot be used if value is not empty."),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvFromSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_map_ref: Option<OptionalReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<OptionalReference>,
}

impl EnvFromSource {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::object("config_map_ref", "configMapRef", OptionalReference::attributes()),
            Attribute::string("prefix", "prefix"),
            Attribute::object("secret_ref", "secretRef", OptionalReference::attributes()),
        ]
    }
}

/// A reference to a config map or secret that may be allowed to not exist
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OptionalReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

impl OptionalReference {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::string("name", "name"),
            Attribute::bool("optional", "optional"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPort {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_port: Option<i64>,
    #[serde(rename = "hostIP", skip_serializing_if = "Option::is_none")]
    pub host_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

impl ContainerPort {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::int64("container_port", "containerPort").required(),
            Attribute::string("host_ip", "hostIP"),
            Attribute::int64("host_port", "hostPort"),
            Attribute::string("name", "name"),
            Attribute::string("protocol", "protocol"),
        ]
    }
}

/// Quantities are kept as strings, exactly as the api server returns them
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequirements {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claims: Option<Vec<ResourceClaim>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requests: Option<BTreeMap<String, String>>,
}

impl ResourceRequirements {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::list_nested("claims", "claims", ResourceClaim::attributes()),
            Attribute::string_map("limits", "limits")
                .description("The maximum amount of compute resources allowed."),
            Attribute::string_map("requests", "requests")
                .description("The minimum amount of compute resources required."),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourceClaim {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<String>,
}

impl ResourceClaim {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::string("name", "name").required(),
            Attribute::string("request", "request"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeDevice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl VolumeDevice {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::string("device_path", "devicePath").required(),
            Attribute::string("name", "name").required(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount_propagation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recursive_read_only: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_path_expr: Option<String>,
}

impl VolumeMount {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::string("mount_path", "mountPath").required(),
            Attribute::string("mount_propagation", "mountPropagation"),
            Attribute::string("name", "name").required(),
            Attribute::bool("read_only", "readOnly"),
            Attribute::string("recursive_read_only", "recursiveReadOnly"),
            Attribute::string("sub_path", "subPath"),
            Attribute::string("sub_path_expr", "subPathExpr"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toleration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toleration_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Toleration {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::string("effect", "effect"),
            Attribute::string("key", "key"),
            Attribute::string("operator", "operator"),
            Attribute::int64("toleration_seconds", "tolerationSeconds"),
            Attribute::string("value", "value"),
        ]
    }
}

/// The common volume sources are declared field by field, the rest are dynamic
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_elastic_block_store: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_disk: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_file: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cephfs: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cinder: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_map: Option<ConfigMapVolumeSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csi: Option<Value>,
    #[serde(rename = "downwardAPI", skip_serializing_if = "Option::is_none")]
    pub downward_api: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_dir: Option<EmptyDirVolumeSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ephemeral: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fc: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_volume: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flocker: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gce_persistent_disk: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_repo: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glusterfs: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_path: Option<HostPathVolumeSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iscsi: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nfs: Option<NFSVolumeSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persistent_volume_claim: Option<PersistentVolumeClaimVolumeSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photon_persistent_disk: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portworx_volume: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projected: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quobyte: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rbd: Option<Value>,
    #[serde(rename = "scaleIO", skip_serializing_if = "Option::is_none")]
    pub scale_io: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<SecretVolumeSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storageos: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vsphere_volume: Option<Value>,
}

impl Volume {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::dynamic("aws_elastic_block_store", "awsElasticBlockStore"),
            Attribute::dynamic("azure_disk", "azureDisk"),
            Attribute::dynamic("azure_file", "azureFile"),
            Attribute::dynamic("cephfs", "cephfs"),
            Attribute::dynamic("cinder", "cinder"),
            Attribute::object("config_map", "configMap", ConfigMapVolumeSource::attributes()),
            Attribute::dynamic("csi", "csi"),
            Attribute::dynamic("downward_api", "downwardAPI"),
            Attribute::object("empty_dir", "emptyDir", EmptyDirVolumeSource::attributes()),
            Attribute::dynamic("ephemeral", "ephemeral"),
            Attribute::dynamic("fc", "fc"),
            Attribute::dynamic("flex_volume", "flexVolume"),
            Attribute::dynamic("flocker", "flocker"),
            Attribute::dynamic("gce_persistent_disk", "gcePersistentDisk"),
            Attribute::dynamic("git_repo", "gitRepo"),
            Attribute::dynamic("glusterfs", "glusterfs"),
            Attribute::object("host_path", "hostPath", HostPathVolumeSource::attributes()),
            Attribute::dynamic("image", "image"),
            Attribute::dynamic("iscsi", "iscsi"),
            Attribute::string("name", "name").required(),
            Attribute::object("nfs", "nfs", NFSVolumeSource::attributes()),
            Attribute::object(
                "persistent_volume_claim",
                "persistentVolumeClaim",
                PersistentVolumeClaimVolumeSource::attributes(),
            ),
            Attribute::dynamic("photon_persistent_disk", "photonPersistentDisk"),
            Attribute::dynamic("portworx_volume", "portworxVolume"),
            Attribute::dynamic("projected", "projected"),
            Attribute::dynamic("quobyte", "quobyte"),
            Attribute::dynamic("rbd", "rbd"),
            Attribute::dynamic("scale_io", "scaleIO"),
            Attribute::object("secret", "secret", SecretVolumeSource::attributes()),
            Attribute::dynamic("storageos", "storageos"),
            Attribute::dynamic("vsphere_volume", "vsphereVolume"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeyToPath {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl KeyToPath {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::string("key", "key").required(),
            Attribute::int64("mode", "mode"),
            Attribute::string("path", "path").required(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapVolumeSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_mode: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<KeyToPath>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

impl ConfigMapVolumeSource {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::int64("default_mode", "defaultMode"),
            Attribute::list_nested("items", "items", KeyToPath::attributes()),
            Attribute::string("name", "name"),
            Attribute::bool("optional", "optional"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretVolumeSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_mode: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<KeyToPath>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,
}

impl SecretVolumeSource {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::int64("default_mode", "defaultMode"),
            Attribute::list_nested("items", "items", KeyToPath::attributes()),
            Attribute::bool("optional", "optional"),
            Attribute::string("secret_name", "secretName"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyDirVolumeSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_limit: Option<String>,
}

impl EmptyDirVolumeSource {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::string("medium", "medium"),
            Attribute::string("size_limit", "sizeLimit"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HostPathVolumeSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub path_type: Option<String>,
}

impl HostPathVolumeSource {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::string("path", "path").required(),
            Attribute::string("type", "type"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NFSVolumeSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
}

impl NFSVolumeSource {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::string("path", "path").required(),
            Attribute::bool("read_only", "readOnly"),
            Attribute::string("server", "server").required(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentVolumeClaimVolumeSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
}

impl PersistentVolumeClaimVolumeSource {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::string("claim_name", "claimName").required(),
            Attribute::bool("read_only", "readOnly"),
        ]
    }
}
