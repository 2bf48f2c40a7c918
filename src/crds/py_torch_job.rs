//! PyTorch jobs are the only kubedl jobs that support elastic training, where the number of
//! workers may change between `minReplicas` and `maxReplicas` while the job is running.
use super::kubedl::{self, ReplicaSpec};
use crate::k8s_types::training_kubedl_io::v1alpha1;
use crate::k8s_types::K8sType;
use crate::resource::CustomResourceKind;
use crate::schema::Attribute;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElasticPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_replicas: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_replicas: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_proc_per_node: Option<i64>,
}

impl ElasticPolicy {
    pub fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::int64("min_replicas", "minReplicas")
                .description("Lower limit for the number of replicas to which the job can scale down."),
            Attribute::int64("max_replicas", "maxReplicas")
                .description("Upper limit for the number of replicas to which the job can scale up."),
            Attribute::int64("n_proc_per_node", "nProcPerNode"),
        ]
    }
}

kubedl_job_spec!(
    PyTorchJobSpec,
    pytorch_replica_specs,
    "pytorchReplicaSpecs",
    enable_elastic: "enableElastic" => bool,
    elastic_policy: "elasticPolicy" => ElasticPolicy
);

pub struct PyTorchJob;

impl CustomResourceKind for PyTorchJob {
    type Spec = PyTorchJobSpec;
    const TYPE: &'static K8sType = v1alpha1::PyTorchJob;
    const TYPE_NAME: &'static str = "training_kubedl_io_py_torch_job_v1alpha1";
    const DESCRIPTION: &'static str =
        "PyTorchJob represents the configuration of a distributed PyTorch training job.";

    fn spec_attributes() -> Vec<Attribute> {
        let mut attributes = kubedl::job_attributes();
        attributes.push(
            Attribute::map_nested(
                "pytorch_replica_specs",
                "pytorchReplicaSpecs",
                ReplicaSpec::attributes(),
            )
            .required()
            .description("A map of replica type (one of Master, Worker) to the replica spec for that type."),
        );
        attributes.push(
            Attribute::bool("enable_elastic", "enableElastic")
                .description("Enables elastic training, which is controlled by the elastic_policy."),
        );
        attributes.push(Attribute::object(
            "elastic_policy",
            "elasticPolicy",
            ElasticPolicy::attributes(),
        ));
        attributes
    }
}
