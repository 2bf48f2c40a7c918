use super::kubedl::{self, ReplicaSpec};
use crate::k8s_types::training_kubedl_io::v1alpha1;
use crate::k8s_types::K8sType;
use crate::resource::CustomResourceKind;
use crate::schema::Attribute;

kubedl_job_spec!(XGBoostJobSpec, xgb_replica_specs, "xgbReplicaSpecs");

pub struct XGBoostJob;

impl CustomResourceKind for XGBoostJob {
    type Spec = XGBoostJobSpec;
    const TYPE: &'static K8sType = v1alpha1::XGBoostJob;
    const TYPE_NAME: &'static str = "training_kubedl_io_xg_boost_job_v1alpha1";
    const DESCRIPTION: &'static str =
        "XGBoostJob represents the configuration of a distributed XGBoost training job.";

    fn spec_attributes() -> Vec<Attribute> {
        let mut attributes = kubedl::job_attributes();
        attributes.push(
            Attribute::map_nested(
                "xgb_replica_specs",
                "xgbReplicaSpecs",
                ReplicaSpec::attributes(),
            )
            .required()
            .description("A map of replica type (one of Master, Worker) to the replica spec for that type."),
        );
        attributes
    }
}
