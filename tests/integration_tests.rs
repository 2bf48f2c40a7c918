use crdprovider::client::Error as ClientError;
use crdprovider::prelude::*;
use crdprovider::serde_json::{json, Value};

use futures::future::{self, BoxFuture};
use futures::FutureExt;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const TF_JOB: &str = "k8s_training_kubedl_io_tf_job_v1alpha1";
const APP_WRAPPER_MANIFEST: &str = "k8s_workload_codeflare_dev_app_wrapper_v1beta1_manifest";

/// Serves objects from memory, keyed by `<apiVersion>/<plural>/<namespace>/<name>`
#[derive(Default)]
struct FakeCluster {
    objects: Mutex<HashMap<String, Value>>,
    requests: AtomicUsize,
}

impl FakeCluster {
    fn insert(&self, k8s_type: &K8sType, namespace: &str, name: &str, object: Value) {
        self.objects
            .lock()
            .unwrap()
            .insert(key(k8s_type, namespace, name), object);
    }

    fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

fn key(k8s_type: &K8sType, namespace: &str, name: &str) -> String {
    format!("{}/{}/{}", k8s_type, namespace, name)
}

impl DynamicClient for FakeCluster {
    fn get<'a>(
        &'a self,
        k8s_type: &'a K8sType,
        namespace: &'a str,
        name: &'a str,
    ) -> BoxFuture<'a, Result<Value, ClientError>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let result = self
            .objects
            .lock()
            .unwrap()
            .get(&key(k8s_type, namespace, name))
            .cloned()
            .ok_or_else(|| ClientError::http(http::StatusCode::NOT_FOUND));
        future::ready(result).boxed()
    }
}

fn setup() -> (Provider, Arc<FakeCluster>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let cluster = Arc::new(FakeCluster::default());
    let mut provider = Provider::new("0.1.0");
    provider.configure_with_client(cluster.clone());
    (provider, cluster)
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("failed to create runtime");
    runtime.block_on(future)
}

fn summaries(diags: &Diagnostics) -> Vec<String> {
    diags.errors().map(|d| d.summary.clone()).collect()
}

#[test]
fn data_source_reads_object_from_cluster() {
    let (provider, cluster) = setup();
    cluster.insert(
        k8s_types::training_kubedl_io::v1alpha1::TFJob,
        "kubedl",
        "mnist",
        json!({
            "apiVersion": "training.kubedl.io/v1alpha1",
            "kind": "TFJob",
            "metadata": {
                "name": "mnist",
                "namespace": "kubedl",
                "resourceVersion": "1234",
                "annotations": { "owner": "ml-team" }
            },
            "spec": {
                "cleanPodPolicy": "None",
                "tfReplicaSpecs": {
                    "Worker": {
                        "replicas": 2,
                        "restartPolicy": "Never",
                        "template": {
                            "spec": {
                                "affinity": {
                                    "nodeAffinity": {
                                        "requiredDuringSchedulingIgnoredDuringExecution": {
                                            "nodeSelectorTerms": [ { "matchExpressions": [ { "key": "gpu", "operator": "Exists" } ] } ]
                                        }
                                    }
                                },
                                "imagePullSecrets": [ { "name": "registry-credentials" } ],
                                "containers": [
                                    {
                                        "name": "tensorflow",
                                        "image": "kubedl/tf-mnist:1.0",
                                        "securityContext": { "runAsNonRoot": true },
                                        "envFrom": [ { "configMapRef": { "name": "training-defaults" } } ]
                                    }
                                ]
                            }
                        }
                    }
                }
            },
            "status": { "conditions": [] }
        }),
    );

    let config = json!({
        "id": null,
        "api_version": null,
        "kind": null,
        "metadata": { "name": "mnist", "namespace": "kubedl", "labels": null, "annotations": null },
        "spec": null
    });
    let resp = block_on(provider.read_data_source(TF_JOB, config));
    assert!(resp.diagnostics.is_empty(), "{:?}", resp.diagnostics);
    assert_eq!(1, cluster.request_count());

    let state = resp.state.expect("state should be set");
    assert_eq!("mnist/kubedl", state["id"]);
    assert_eq!("training.kubedl.io/v1alpha1", state["api_version"]);
    assert_eq!("TFJob", state["kind"]);
    assert_eq!(json!({ "owner": "ml-team" }), state["metadata"]["annotations"]);
    assert_eq!(Value::Null, state["metadata"]["labels"]);
    assert_eq!("None", state["spec"]["clean_pod_policy"]);
    assert_eq!(Value::Null, state["spec"]["backoff_limit"]);

    let worker = &state["spec"]["tf_replica_specs"]["Worker"];
    assert_eq!(2, worker["replicas"]);
    assert_eq!("Never", worker["restart_policy"]);
    assert_eq!(
        "kubedl/tf-mnist:1.0",
        worker["template"]["spec"]["containers"][0]["image"]
    );
    assert_eq!(
        Value::Null,
        worker["template"]["spec"]["containers"][0]["image_pull_policy"]
    );

    let pod = &worker["template"]["spec"];
    assert_eq!(
        json!("Exists"),
        pod["affinity"]["nodeAffinity"]["requiredDuringSchedulingIgnoredDuringExecution"]
            ["nodeSelectorTerms"][0]["matchExpressions"][0]["operator"]
    );
    assert_eq!("registry-credentials", pod["image_pull_secrets"][0]["name"]);
    let container = &pod["containers"][0];
    assert_eq!(json!({ "runAsNonRoot": true }), container["security_context"]);
    assert_eq!(
        "training-defaults",
        container["env_from"][0]["config_map_ref"]["name"]
    );
    assert_eq!(Value::Null, container["env_from"][0]["secret_ref"]);
}

#[test]
fn missing_object_is_a_get_error() {
    let (provider, cluster) = setup();
    let config = json!({
        "metadata": { "name": "does-not-exist", "namespace": "kubedl" }
    });
    let resp = block_on(provider.read_data_source(TF_JOB, config));
    assert!(resp.state.is_none());
    assert_eq!(vec!["Unable to GET resource"], summaries(&resp.diagnostics));
    let detail = &resp.diagnostics.iter().next().unwrap().detail;
    assert!(detail.contains("GET Error (Http): Http Error: 404 Not Found"), "detail: {}", detail);
    assert_eq!(1, cluster.request_count());
}

#[test]
fn invalid_config_never_reaches_the_cluster() {
    let (provider, cluster) = setup();
    let config = json!({
        "metadata": { "name": "mnist" },
        "spec": { "backoff_limit": 3 }
    });
    let resp = block_on(provider.read_data_source(TF_JOB, config));
    assert!(resp.state.is_none());
    assert_eq!(
        vec!["Missing required argument", "Invalid Configuration for Read-Only Attribute"],
        summaries(&resp.diagnostics)
    );
    assert_eq!(0, cluster.request_count());
}

#[test]
fn offline_provider_renders_manifests_but_reads_nothing() {
    let mut provider = Provider::new("0.1.0");
    let diags = provider.configure(&json!({ "offline": true }));
    assert!(diags.is_empty());

    let resp = block_on(provider.read_data_source(
        TF_JOB,
        json!({ "metadata": { "name": "mnist", "namespace": "kubedl" } }),
    ));
    assert_eq!(vec!["Provider in Offline Mode"], summaries(&resp.diagnostics));

    let config = json!({
        "id": null,
        "yaml": null,
        "metadata": { "name": "x", "namespace": "y", "labels": null, "annotations": null },
        "spec": { "priority": 3 }
    });
    let resp = block_on(provider.read_data_source(APP_WRAPPER_MANIFEST, config.clone()));
    assert!(resp.diagnostics.is_empty(), "{:?}", resp.diagnostics);
    let state = resp.state.unwrap();
    let yaml = state["yaml"].as_str().unwrap();
    assert!(yaml.contains("apiVersion: workload.codeflare.dev/v1beta1"));
    assert!(yaml.contains("kind: AppWrapper"));
    assert!(yaml.contains("priority: 3"));
    assert_eq!("x/y", state["id"]);
    assert_eq!(config["spec"], state["spec"]);
    assert_eq!(config["metadata"], state["metadata"]);
}

#[test]
fn manifest_never_uses_the_client() {
    let (provider, cluster) = setup();
    let config = json!({
        "metadata": { "name": "wrapper", "namespace": "default", "labels": { "app": "demo" } },
        "spec": {
            "resources": {
                "generic_items": [
                    {
                        "replicas": 1,
                        "generictemplate": {
                            "apiVersion": "batch/v1",
                            "kind": "Job",
                            "metadata": { "name": "wrapped" }
                        }
                    }
                ]
            }
        }
    });
    let resp = block_on(provider.read_data_source(APP_WRAPPER_MANIFEST, config));
    assert!(resp.diagnostics.is_empty(), "{:?}", resp.diagnostics);
    assert_eq!(0, cluster.request_count());

    let yaml = resp.state.unwrap()["yaml"].as_str().unwrap().to_owned();
    let rendered: Value = crdprovider::serde_yaml::from_str(&yaml).unwrap();
    let expected = json!({
        "apiVersion": "workload.codeflare.dev/v1beta1",
        "kind": "AppWrapper",
        "metadata": { "name": "wrapper", "namespace": "default", "labels": { "app": "demo" } },
        "spec": {
            "resources": {
                "GenericItems": [
                    {
                        "replicas": 1,
                        "generictemplate": {
                            "apiVersion": "batch/v1",
                            "kind": "Job",
                            "metadata": { "name": "wrapped" }
                        }
                    }
                ]
            }
        }
    });
    assert_eq!(expected, rendered);
}

#[test]
fn every_kind_is_available_as_data_source_and_manifest() {
    let (provider, _) = setup();
    let types: Vec<&str> = provider.data_source_types().collect();
    for kind in &[
        "workload_codeflare_dev_app_wrapper_v1beta1",
        "workload_codeflare_dev_scheduling_spec_v1beta1",
        "training_kubedl_io_tf_job_v1alpha1",
        "training_kubedl_io_py_torch_job_v1alpha1",
        "training_kubedl_io_xg_boost_job_v1alpha1",
    ] {
        let data_source = format!("k8s_{}", kind);
        let manifest = format!("k8s_{}_manifest", kind);
        assert!(types.contains(&data_source.as_str()), "missing {}", data_source);
        assert!(types.contains(&manifest.as_str()), "missing {}", manifest);
    }
    assert_eq!(10, types.len());
}
