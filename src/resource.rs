mod object_id;

pub use self::object_id::{ObjectId, ObjectIdRef};

use crate::k8s_types::K8sType;
use crate::schema::Attribute;

use serde::de::DeserializeOwned;
use serde::Serialize;

use std::collections::BTreeMap;
use std::fmt::Debug;

/// The subset of `ObjectMeta` that's exposed in Terraform. Labels and annotations use a
/// `BTreeMap` so that rendered manifests are stable.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

impl ObjectMeta {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> ObjectMeta {
        ObjectMeta {
            name: name.into(),
            namespace: namespace.into(),
            labels: None,
            annotations: None,
        }
    }

    pub fn object_id(&self) -> ObjectIdRef<'_> {
        ObjectIdRef::new(self.namespace.as_str(), self.name.as_str())
    }
}

/// A custom resource, as it's sent to and received from the api server. Everything other than
/// the `metadata` is optional, since all of it may be absent from a user's configuration.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Object<S> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub metadata: ObjectMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<S>,
}

impl<S> Object<S> {
    pub fn new(metadata: ObjectMeta, spec: Option<S>) -> Object<S> {
        Object {
            api_version: None,
            kind: None,
            metadata,
            spec,
        }
    }

    /// Sets `apiVersion` and `kind` to those of the given type. These are never taken from user
    /// configuration or from the api server response.
    pub fn with_type(mut self, k8s_type: &K8sType) -> Object<S> {
        self.api_version = Some(k8s_type.api_version.to_owned());
        self.kind = Some(k8s_type.kind.to_owned());
        self
    }

    pub fn object_id(&self) -> ObjectIdRef<'_> {
        self.metadata.object_id()
    }
}

/// Everything that's specific to a single custom resource kind. The data source and the manifest
/// for each kind are generic over an implementation of this trait, so adding a kind only requires
/// declaring its spec struct and its attributes.
pub trait CustomResourceKind: Send + Sync + 'static {
    /// The `spec` of the custom resource
    type Spec: Serialize + DeserializeOwned + Debug + Clone + PartialEq + Send + Sync;

    const TYPE: &'static K8sType;

    /// The suffix that's appended to the provider's type name, for example
    /// `training_kubedl_io_tf_job_v1alpha1`
    const TYPE_NAME: &'static str;

    const DESCRIPTION: &'static str;

    /// The attributes of the `spec`, with the presence declared by the CRD. These are the
    /// attributes used by the manifest, the data source turns all of them into computed ones.
    fn spec_attributes() -> Vec<Attribute>;
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::k8s_types::workload_codeflare_dev::v1beta1::AppWrapper;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct TestSpec {
        #[serde(skip_serializing_if = "Option::is_none")]
        min_available: Option<i64>,
    }

    #[test]
    fn absent_fields_are_left_out_of_the_wire_format() {
        let object: Object<TestSpec> = Object::new(ObjectMeta::new("ns", "foo"), None);
        let json = serde_json::to_value(&object).unwrap();
        assert_eq!(json!({ "metadata": { "name": "foo", "namespace": "ns" } }), json);

        let decoded: Object<TestSpec> = serde_json::from_value(json).unwrap();
        assert_eq!(object, decoded);
    }

    #[test]
    fn with_type_sets_api_version_and_kind() {
        let spec = TestSpec {
            min_available: Some(2),
        };
        let object = Object::new(ObjectMeta::new("ns", "foo"), Some(spec)).with_type(AppWrapper);
        let json = serde_json::to_value(&object).unwrap();
        let expected = json!({
            "apiVersion": "workload.codeflare.dev/v1beta1",
            "kind": "AppWrapper",
            "metadata": { "name": "foo", "namespace": "ns" },
            "spec": { "minAvailable": 2 }
        });
        assert_eq!(expected, json);
    }

    #[test]
    fn remote_objects_with_extra_fields_are_decoded() {
        let json = json!({
            "apiVersion": "workload.codeflare.dev/v1beta1",
            "kind": "AppWrapper",
            "metadata": {
                "name": "foo",
                "namespace": "ns",
                "uid": "1234",
                "resourceVersion": "99",
                "labels": { "team": "ml" }
            },
            "spec": { "minAvailable": 1 },
            "status": { "state": "Running" }
        });
        let object: Object<TestSpec> = serde_json::from_value(json).unwrap();
        assert_eq!("foo/ns", object.object_id().to_string());
        assert_eq!(Some("ml"), object.metadata.labels.as_ref().and_then(|l| l.get("team")).map(String::as_str));
    }
}
