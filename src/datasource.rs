//! The two kinds of data sources that exist for every custom resource kind. Both are generic over
//! a `CustomResourceKind`, which supplies the type information and the spec attributes.
//!
//! - `KindDataSource` reads a live object from the cluster and exposes its fields as computed
//!   attributes.
//! - `KindManifest` renders the user's configuration as a YAML manifest, without ever touching
//!   the cluster.
use crate::client::DynamicClient;
use crate::diag::Diagnostics;
use crate::resource::{CustomResourceKind, Object, ObjectMeta};
use crate::schema::{Attribute, Schema, Validator};
use crate::state;

use futures::future::{self, BoxFuture};
use futures::FutureExt;
use serde_json::{Map, Value};

use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::sync::Arc;

pub const OFFLINE_SUMMARY: &str = "Provider in Offline Mode";
const OFFLINE_DETAIL: &str = "This provider is running in offline mode. Data sources that read from a Kubernetes cluster cannot be used in this mode, use the corresponding manifest instead.";
const UNCONFIGURED_SUMMARY: &str = "Unconfigured Kubernetes Client";
const UNCONFIGURED_DETAIL: &str = "Expected a configured Kubernetes client. Please report this issue to the provider developers.";

/// Creates a new, unconfigured data source. The provider creates a new instance for every request.
pub type DataSourceFactory = fn() -> Box<dyn DataSource>;

#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRequest {
    pub provider_type_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetadataResponse {
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadRequest {
    /// The configuration in Terraform state format, with snake_case attribute names
    pub config: Value,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadResponse {
    /// The new state, which is only ever set if there are no error diagnostics
    pub state: Option<Value>,
    pub diagnostics: Diagnostics,
}

impl ReadResponse {
    pub fn failed(diagnostics: Diagnostics) -> ReadResponse {
        ReadResponse {
            state: None,
            diagnostics,
        }
    }

    pub fn success(state: Value) -> ReadResponse {
        ReadResponse {
            state: Some(state),
            diagnostics: Diagnostics::new(),
        }
    }
}

/// What the provider hands to every data source when it's configured. The client is shared by
/// all data sources and is never mutated after the provider is configured.
#[derive(Clone)]
pub struct ProviderData {
    pub offline: bool,
    pub client: Option<Arc<dyn DynamicClient>>,
}

impl ProviderData {
    pub fn offline() -> ProviderData {
        ProviderData {
            offline: true,
            client: None,
        }
    }

    pub fn online(client: Arc<dyn DynamicClient>) -> ProviderData {
        ProviderData {
            offline: false,
            client: Some(client),
        }
    }
}

impl Debug for ProviderData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ProviderData")
            .field("offline", &self.offline)
            .field("client", &self.client.is_some())
            .finish()
    }
}

pub trait DataSource: Send + Sync {
    fn metadata(&self, req: &MetadataRequest) -> MetadataResponse;

    fn schema(&self) -> Schema;

    /// Called with `None` before the provider itself is configured
    fn configure(&mut self, provider_data: Option<&ProviderData>) -> Diagnostics;

    fn read<'a>(&'a self, req: &'a ReadRequest) -> BoxFuture<'a, ReadResponse>;

    fn validate_config(&self, config: &Value) -> Diagnostics {
        self.schema().validate_config(config)
    }
}

fn metadata_attribute(for_manifest: bool) -> Attribute {
    let name = Attribute::string("name", "name")
        .required()
        .description("Unique name of this object within its namespace.")
        .validator(Validator::Name);
    let namespace = Attribute::string("namespace", "namespace")
        .required()
        .description("The namespace this object lives in.")
        .validator(Validator::Namespace);
    let labels = Attribute::string_map("labels", "labels").description(
        "Map of string keys and values that can be used to organize and categorize objects.",
    );
    let annotations = Attribute::string_map("annotations", "annotations").description(
        "Unstructured key value map stored with a resource that may be set by external tools to store and retrieve arbitrary metadata.",
    );
    let (labels, annotations) = if for_manifest {
        (
            labels.validator(Validator::Labels),
            annotations.validator(Validator::Annotations),
        )
    } else {
        (labels.computed(), annotations.computed())
    };

    Attribute::object("metadata", "metadata", vec![name, namespace, labels, annotations])
        .required()
        .description("Data that helps uniquely identify this object.")
}

fn spec_attribute<K: CustomResourceKind>() -> Attribute {
    Attribute::object("spec", "spec", K::spec_attributes())
        .description("The desired state of the object.")
}

/// The schema of the data source for the given kind
pub fn data_source_schema<K: CustomResourceKind>() -> Schema {
    Schema::new(
        K::DESCRIPTION,
        vec![
            Attribute::string("id", "id")
                .state_only()
                .computed()
                .description("Contains the value 'metadata.name/metadata.namespace'."),
            Attribute::string("api_version", "apiVersion")
                .computed()
                .description("The API group and version of the object, always the same for this data source."),
            Attribute::string("kind", "kind")
                .computed()
                .description("The kind of the object, always the same for this data source."),
            metadata_attribute(false),
            spec_attribute::<K>().into_computed(),
        ],
    )
}

/// The schema of the manifest for the given kind
pub fn manifest_schema<K: CustomResourceKind>() -> Schema {
    Schema::new(
        K::DESCRIPTION,
        vec![
            Attribute::string("id", "id")
                .state_only()
                .computed()
                .description("Contains the value 'metadata.name/metadata.namespace'."),
            Attribute::string("yaml", "yaml")
                .state_only()
                .computed()
                .description("The generated manifest in YAML format."),
            metadata_attribute(true),
            spec_attribute::<K>(),
        ],
    )
}

fn set_state_attribute(state: &mut Value, name: &str, value: String) {
    if let Some(obj) = state.as_object_mut() {
        obj.insert(name.to_owned(), Value::String(value));
    }
}

#[derive(Clone)]
enum ClientState {
    Unconfigured,
    Offline,
    Online(Arc<dyn DynamicClient>),
}

/// Reads a single object of kind `K` from the cluster
pub struct KindDataSource<K> {
    client: ClientState,
    _kind: PhantomData<fn() -> K>,
}

impl<K: CustomResourceKind> Default for KindDataSource<K> {
    fn default() -> Self {
        KindDataSource::new()
    }
}

impl<K: CustomResourceKind> KindDataSource<K> {
    pub fn new() -> KindDataSource<K> {
        KindDataSource {
            client: ClientState::Unconfigured,
            _kind: PhantomData,
        }
    }

    pub fn boxed() -> Box<dyn DataSource> {
        Box::new(KindDataSource::<K>::new())
    }

    async fn read_remote(&self, req: &ReadRequest) -> ReadResponse {
        let schema = data_source_schema::<K>();
        let mut diags = Diagnostics::new();

        let metadata = match decode_metadata(&schema, &req.config) {
            Ok(metadata) => metadata,
            Err(err) => {
                diags.add_error(
                    "Unable to decode configuration",
                    format!("Decode Error: {}", err),
                );
                return ReadResponse::failed(diags);
            }
        };

        let client = match &self.client {
            ClientState::Online(client) => client,
            ClientState::Offline => {
                diags.add_error(OFFLINE_SUMMARY, OFFLINE_DETAIL);
                return ReadResponse::failed(diags);
            }
            ClientState::Unconfigured => {
                diags.add_error(UNCONFIGURED_SUMMARY, UNCONFIGURED_DETAIL);
                return ReadResponse::failed(diags);
            }
        };

        let id = metadata.object_id().to_string();
        log::debug!("Reading {} '{}'", K::TYPE, id);
        let response = match client
            .get(K::TYPE, metadata.namespace.as_str(), metadata.name.as_str())
            .await
        {
            Ok(response) => response,
            Err(err) => {
                log::debug!("Failed to read {} '{}': {}", K::TYPE, id, err);
                diags.add_error(
                    "Unable to GET resource",
                    format!(
                        "An unexpected error occurred while reading the resource. Please report this issue to the provider developers.\n\nGET Error ({}): {}",
                        err.kind(),
                        err
                    ),
                );
                return ReadResponse::failed(diags);
            }
        };

        let object = match serde_json::from_value::<Object<K::Spec>>(response) {
            Ok(object) => object.with_type(K::TYPE),
            Err(err) => {
                diags.add_error(
                    "Unable to unmarshal resource",
                    format!(
                        "An unexpected error occurred while parsing the resource read response. Please report this issue to the provider developers.\n\nUnmarshal Error: {}",
                        err
                    ),
                );
                return ReadResponse::failed(diags);
            }
        };

        let wire = match serde_json::to_value(&object) {
            Ok(wire) => wire,
            Err(err) => {
                diags.add_error(
                    "Unable to marshal resource",
                    format!(
                        "An unexpected error occurred while converting the resource to state. Please report this issue to the provider developers.\n\nJSON Error: {}",
                        err
                    ),
                );
                return ReadResponse::failed(diags);
            }
        };

        let mut state = state::from_wire(&schema.attributes, &wire);
        set_state_attribute(&mut state, "id", id);
        ReadResponse {
            state: Some(state),
            diagnostics: diags,
        }
    }
}

fn decode_metadata(schema: &Schema, config: &Value) -> Result<ObjectMeta, serde_json::Error> {
    let wire = state::to_wire(&schema.attributes, config);
    let metadata = wire.get("metadata").cloned().unwrap_or(Value::Null);
    serde_json::from_value(metadata)
}

impl<K: CustomResourceKind> DataSource for KindDataSource<K> {
    fn metadata(&self, req: &MetadataRequest) -> MetadataResponse {
        MetadataResponse {
            type_name: format!("{}_{}", req.provider_type_name, K::TYPE_NAME),
        }
    }

    fn schema(&self) -> Schema {
        data_source_schema::<K>()
    }

    fn configure(&mut self, provider_data: Option<&ProviderData>) -> Diagnostics {
        let mut diags = Diagnostics::new();
        let data = match provider_data {
            Some(data) => data,
            None => return diags,
        };

        if data.offline {
            self.client = ClientState::Offline;
            diags.add_error(OFFLINE_SUMMARY, OFFLINE_DETAIL);
            return diags;
        }
        match data.client.as_ref() {
            Some(client) => self.client = ClientState::Online(client.clone()),
            None => diags.add_error(UNCONFIGURED_SUMMARY, UNCONFIGURED_DETAIL),
        }
        diags
    }

    fn read<'a>(&'a self, req: &'a ReadRequest) -> BoxFuture<'a, ReadResponse> {
        self.read_remote(req).boxed()
    }
}

/// Renders a manifest of kind `K` from configuration alone
pub struct KindManifest<K> {
    _kind: PhantomData<fn() -> K>,
}

impl<K: CustomResourceKind> Default for KindManifest<K> {
    fn default() -> Self {
        KindManifest::new()
    }
}

impl<K: CustomResourceKind> KindManifest<K> {
    pub fn new() -> KindManifest<K> {
        KindManifest { _kind: PhantomData }
    }

    pub fn boxed() -> Box<dyn DataSource> {
        Box::new(KindManifest::<K>::new())
    }

    /// Renders the manifest. This is a pure function of the configuration.
    pub fn render(&self, req: &ReadRequest) -> ReadResponse {
        let schema = manifest_schema::<K>();
        let mut diags = Diagnostics::new();

        let wire = state::to_wire(&schema.attributes, &req.config);
        let object = match serde_json::from_value::<Object<K::Spec>>(wire) {
            Ok(object) => object.with_type(K::TYPE),
            Err(err) => {
                diags.add_error(
                    "Unable to decode configuration",
                    format!("Decode Error: {}", err),
                );
                return ReadResponse::failed(diags);
            }
        };

        let yaml = match serde_yaml::to_string(&object) {
            Ok(yaml) => yaml,
            Err(err) => {
                diags.add_error(
                    "Unable to marshal resource",
                    format!(
                        "An unexpected error occurred while marshalling the resource. Please report this issue to the provider developers.\n\nYAML Error: {}",
                        err
                    ),
                );
                return ReadResponse::failed(diags);
            }
        };

        let mut state = match req.config.clone() {
            Value::Object(config) => Value::Object(config),
            _ => Value::Object(Map::new()),
        };
        set_state_attribute(&mut state, "id", object.object_id().to_string());
        set_state_attribute(&mut state, "yaml", yaml);
        ReadResponse {
            state: Some(state),
            diagnostics: diags,
        }
    }
}

impl<K: CustomResourceKind> DataSource for KindManifest<K> {
    fn metadata(&self, req: &MetadataRequest) -> MetadataResponse {
        MetadataResponse {
            type_name: format!("{}_{}_manifest", req.provider_type_name, K::TYPE_NAME),
        }
    }

    fn schema(&self) -> Schema {
        manifest_schema::<K>()
    }

    fn configure(&mut self, _provider_data: Option<&ProviderData>) -> Diagnostics {
        Diagnostics::new()
    }

    fn read<'a>(&'a self, req: &'a ReadRequest) -> BoxFuture<'a, ReadResponse> {
        future::ready(self.render(req)).boxed()
    }
}
