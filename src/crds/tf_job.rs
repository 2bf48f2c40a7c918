use super::kubedl::{self, ReplicaSpec};
use crate::k8s_types::training_kubedl_io::v1alpha1;
use crate::k8s_types::K8sType;
use crate::resource::CustomResourceKind;
use crate::schema::Attribute;

kubedl_job_spec!(TFJobSpec, tf_replica_specs, "tfReplicaSpecs");

/// A distributed TensorFlow training job
pub struct TFJob;

impl CustomResourceKind for TFJob {
    type Spec = TFJobSpec;
    const TYPE: &'static K8sType = v1alpha1::TFJob;
    const TYPE_NAME: &'static str = "training_kubedl_io_tf_job_v1alpha1";
    const DESCRIPTION: &'static str =
        "TFJob represents the configuration of a distributed TensorFlow training job.";

    fn spec_attributes() -> Vec<Attribute> {
        let mut attributes = kubedl::job_attributes();
        attributes.push(
            Attribute::map_nested(
                "tf_replica_specs",
                "tfReplicaSpecs",
                ReplicaSpec::attributes(),
            )
            .required()
            .description("A map of replica type (one of PS, Worker, Chief, Evaluator) to the replica spec for that type."),
        );
        attributes
    }
}
