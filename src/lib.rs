//! Exposes Kubernetes custom resources to Terraform. Every custom resource kind gets two data
//! sources:
//!
//! - `<provider>_<group>_<kind>_<version>` reads a single object from the cluster, looked up by its
//!   `metadata.name` and `metadata.namespace`, and exposes all of its fields as computed
//!   attributes.
//! - `<provider>_<group>_<kind>_<version>_manifest` renders the configured object as YAML,
//!   without connecting to a cluster, so it can be passed on to anything that applies manifests.
//!
//! The `Provider` is the entry point for a plugin host:
//!
//! ```no_run
//! use crdprovider::prelude::*;
//! use crdprovider::serde_json::json;
//!
//! let mut provider = Provider::new(env!("CARGO_PKG_VERSION"));
//! let diagnostics = provider.configure(&json!({ "offline": true }));
//! assert!(diagnostics.is_empty());
//!
//! let config = json!({
//!     "metadata": { "name": "my-wrapper", "namespace": "default" },
//!     "spec": { "priority": 3 }
//! });
//! let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! let response = runtime.block_on(provider.read_data_source(
//!     "k8s_workload_codeflare_dev_app_wrapper_v1beta1_manifest",
//!     config,
//! ));
//! println!("{}", response.state.unwrap()["yaml"]);
//! ```
//!
//! Nothing here implements the Terraform plugin protocol itself. Schemas, configuration and
//! state are plain `serde_json::Value`s, which a host converts to and from its wire format.

#[macro_use]
extern crate serde_derive;

pub mod client;
pub mod config;
pub mod crds;
pub mod datasource;
pub mod diag;
pub mod error;
pub mod k8s_types;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod state;

pub use serde;
pub use serde_json;
pub use serde_yaml;

pub mod prelude {
    pub use crate::client::DynamicClient;
    pub use crate::config::{ClientConfig, ProviderConfig};
    pub use crate::datasource::{DataSource, ProviderData, ReadRequest, ReadResponse};
    pub use crate::diag::{Diagnostic, Diagnostics, Severity};
    pub use crate::error::Error;
    pub use crate::k8s_types::{self, K8sType};
    pub use crate::provider::Provider;
    pub use crate::resource::{CustomResourceKind, Object, ObjectMeta};
    pub use serde::{Deserialize, Serialize};
}
