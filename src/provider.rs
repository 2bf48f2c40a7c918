//! The provider ties everything together. It owns the registry of data sources, decodes the
//! provider block, and creates the single client that's shared by every data source.
//!
//! A new data source instance is created for every request, and configured with the provider
//! data before it's used, so requests never share any state other than the client.
use crate::client::metrics::Metrics;
use crate::client::{Client, DynamicClient};
use crate::config::ProviderConfig;
use crate::crds;
use crate::datasource::{
    DataSource, DataSourceFactory, MetadataRequest, ProviderData, ReadRequest, ReadResponse,
};
use crate::diag::Diagnostics;
use crate::schema::{Attribute, Schema};

use serde_json::Value;

use std::collections::BTreeMap;
use std::sync::Arc;

pub const DEFAULT_TYPE_NAME: &str = "k8s";

pub struct Provider {
    type_name: String,
    version: String,
    data_sources: BTreeMap<String, DataSourceFactory>,
    data: Option<ProviderData>,
    metrics: Metrics,
}

impl Provider {
    pub fn new(version: impl Into<String>) -> Provider {
        Provider::with_type_name(DEFAULT_TYPE_NAME, version)
    }

    /// Creates a provider that prefixes all of its data source type names with the given name
    pub fn with_type_name(type_name: impl Into<String>, version: impl Into<String>) -> Provider {
        let type_name = type_name.into();
        let req = MetadataRequest {
            provider_type_name: type_name.clone(),
        };
        let data_sources = crds::data_sources()
            .into_iter()
            .map(|factory| (factory().metadata(&req).type_name, factory))
            .collect();
        Provider {
            type_name,
            version: version.into(),
            data_sources,
            data: None,
            metrics: Metrics::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        self.type_name.as_str()
    }

    pub fn version(&self) -> &str {
        self.version.as_str()
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// The schema of the provider block
    pub fn schema(&self) -> Schema {
        Schema::new(
            "Provider for Kubernetes custom resources. Data sources read objects from a cluster, while manifests render them as YAML without any cluster access.",
            vec![
                Attribute::bool("offline", "offline").description(
                    "Whether the provider runs without a connection to a cluster. Only manifests can be used when this is true.",
                ),
                Attribute::string("kubeconfig", "kubeconfig").description(
                    "Path to a kubeconfig file. Defaults to the in-cluster service account, then the KUBECONFIG environment variable, then ~/.kube/config.",
                ),
                Attribute::string("context", "context")
                    .description("The kubeconfig context to use instead of its current-context."),
                Attribute::bool("insecure", "insecure").description(
                    "Whether the api server's certificate is used without verification.",
                ),
            ],
        )
    }

    /// The full type names of all data sources and manifests, sorted
    pub fn data_source_types(&self) -> impl Iterator<Item = &str> {
        self.data_sources.keys().map(String::as_str)
    }

    /// Returns a new, unconfigured instance of the given data source
    pub fn data_source(&self, type_name: &str) -> Option<Box<dyn DataSource>> {
        self.data_sources.get(type_name).map(|factory| factory())
    }

    pub fn is_configured(&self) -> bool {
        self.data.is_some()
    }

    pub fn configure(&mut self, config: &Value) -> Diagnostics {
        let mut diags = self.schema().validate_config(config);
        if diags.has_error() {
            return diags;
        }

        let provider_config = match serde_json::from_value::<ProviderConfig>(config.clone()) {
            Ok(provider_config) => provider_config,
            Err(err) => {
                diags.add_error(
                    "Unable to decode provider configuration",
                    format!("Decode Error: {}", err),
                );
                return diags;
            }
        };

        if provider_config.is_offline() {
            log::info!("Provider is running in offline mode, only manifests are available");
            self.data = Some(ProviderData::offline());
            return diags;
        }

        let user_agent = format!("terraform-provider-{}/{}", self.type_name, self.version);
        let client_config = match provider_config.client_config(user_agent.as_str()) {
            Ok(client_config) => client_config,
            Err(err) => {
                log::error!("Failed to load Kubernetes client configuration: {}", err);
                diags.add_error(
                    "Unable to load Kubernetes configuration",
                    format!(
                        "The provider could not find usable credentials for a Kubernetes cluster. Set the kubeconfig attribute, or offline = true to only use manifests.\n\nConfiguration Error: {}",
                        err
                    ),
                );
                return diags;
            }
        };
        log::info!(
            "Using Kubernetes api server at {}",
            client_config.api_server_endpoint
        );

        match Client::new(client_config, self.metrics.client_metrics()) {
            Ok(client) => self.data = Some(ProviderData::online(Arc::new(client))),
            Err(err) => {
                log::error!("Failed to create Kubernetes client: {}", err);
                diags.add_error(
                    "Unable to create Kubernetes client",
                    format!(
                        "An unexpected error occurred while creating the Kubernetes client.\n\nClient Error: {}",
                        err
                    ),
                );
            }
        }
        diags
    }

    /// Configures the provider with an existing client, bypassing the provider block
    pub fn configure_with_client(&mut self, client: Arc<dyn DynamicClient>) {
        self.data = Some(ProviderData::online(client));
    }

    pub fn validate_data_source_config(&self, type_name: &str, config: &Value) -> Diagnostics {
        match self.data_source(type_name) {
            Some(data_source) => data_source.validate_config(config),
            None => unknown_data_source(type_name),
        }
    }

    /// Validates the configuration, then configures a new instance of the data source and reads
    /// it. Warnings from validation and configuration are included in the response.
    pub async fn read_data_source(&self, type_name: &str, config: Value) -> ReadResponse {
        let mut data_source = match self.data_source(type_name) {
            Some(data_source) => data_source,
            None => return ReadResponse::failed(unknown_data_source(type_name)),
        };

        let mut diags = data_source.validate_config(&config);
        if diags.has_error() {
            return ReadResponse::failed(diags);
        }
        diags.extend(data_source.configure(self.data.as_ref()));
        if diags.has_error() {
            return ReadResponse::failed(diags);
        }

        let req = ReadRequest { config };
        let mut resp = data_source.read(&req).await;
        diags.extend(resp.diagnostics);
        resp.diagnostics = diags;
        resp
    }
}

fn unknown_data_source(type_name: &str) -> Diagnostics {
    let mut diags = Diagnostics::new();
    diags.add_error(
        "Unknown Data Source",
        format!(
            "The data source type '{}' is not supported by this provider.",
            type_name
        ),
    );
    diags
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::datasource::OFFLINE_SUMMARY;
    use serde_json::json;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("failed to create runtime");
        runtime.block_on(future)
    }

    fn error_summaries(diags: &Diagnostics) -> Vec<String> {
        diags.errors().map(|d| d.summary.clone()).collect()
    }

    #[test]
    fn data_source_types_are_prefixed_with_type_name() {
        let provider = Provider::with_type_name("kubernetes", "0.1.0");
        let types: Vec<&str> = provider.data_source_types().collect();
        assert_eq!(10, types.len());
        assert!(types.iter().all(|t| t.starts_with("kubernetes_")));
        assert!(types.contains(&"kubernetes_training_kubedl_io_tf_job_v1alpha1_manifest"));
    }

    #[test]
    fn offline_configuration_creates_no_client() {
        let mut provider = Provider::new("0.1.0");
        let diags = provider.configure(&json!({ "offline": true, "kubeconfig": null }));
        assert!(diags.is_empty(), "{:?}", diags);
        assert!(provider.is_configured());

        let config = json!({
            "metadata": { "name": "mnist", "namespace": "kubedl" }
        });
        let resp = block_on(
            provider.read_data_source("k8s_training_kubedl_io_tf_job_v1alpha1", config),
        );
        assert!(resp.state.is_none());
        assert_eq!(vec![OFFLINE_SUMMARY], error_summaries(&resp.diagnostics));
    }

    #[test]
    fn manifests_work_in_offline_mode() {
        let mut provider = Provider::new("0.1.0");
        provider.configure(&json!({ "offline": true }));
        let config = json!({
            "metadata": { "name": "x", "namespace": "y" },
            "spec": { "priority": 3 }
        });
        let resp = block_on(provider.read_data_source(
            "k8s_workload_codeflare_dev_app_wrapper_v1beta1_manifest",
            config,
        ));
        assert!(resp.diagnostics.is_empty(), "{:?}", resp.diagnostics);
        let yaml = resp.state.unwrap()["yaml"].as_str().unwrap().to_owned();
        assert!(yaml.contains("kind: AppWrapper"));
    }

    #[test]
    fn invalid_provider_config_is_rejected() {
        let mut provider = Provider::new("0.1.0");
        let diags = provider.configure(&json!({ "offline": "yes", "namespace": "default" }));
        assert_eq!(
            vec!["Unsupported argument", "Incorrect attribute value type"],
            error_summaries(&diags)
        );
        assert!(!provider.is_configured());
    }

    #[test]
    fn missing_kubeconfig_file_is_reported() {
        let mut provider = Provider::new("0.1.0");
        let diags = provider.configure(&json!({
            "kubeconfig": "/this/path/does/not/exist/kubeconfig.yaml"
        }));
        assert_eq!(
            vec!["Unable to load Kubernetes configuration"],
            error_summaries(&diags)
        );
        assert!(!provider.is_configured());
    }

    #[test]
    fn kubeconfig_file_is_used_to_create_client() {
        let mut provider = Provider::new("0.1.0");
        let diags = provider.configure(&json!({
            "kubeconfig": "src/config/test-data/kubeconfig-insecure.yaml",
            "context": "dev"
        }));
        assert!(diags.is_empty(), "{:?}", diags);
        assert!(provider.is_configured());
    }

    #[test]
    fn unknown_data_source_is_reported() {
        let provider = Provider::new("0.1.0");
        let diags = provider.validate_data_source_config("k8s_nope", &json!({}));
        assert_eq!(vec!["Unknown Data Source"], error_summaries(&diags));

        let resp = block_on(provider.read_data_source("k8s_nope", json!({})));
        assert_eq!(vec!["Unknown Data Source"], error_summaries(&resp.diagnostics));
    }

    #[test]
    fn read_validates_before_reading() {
        let provider = Provider::new("0.1.0");
        let config = json!({
            "metadata": { "name": "Not Valid", "namespace": "kubedl" },
            "spec": { "priority": 3 }
        });
        let resp = block_on(provider.read_data_source(
            "k8s_workload_codeflare_dev_app_wrapper_v1beta1_manifest",
            config,
        ));
        assert!(resp.state.is_none());
        assert_eq!(vec!["Invalid Attribute Value"], error_summaries(&resp.diagnostics));
    }
}
