pub mod kubeconfig;

use crate::error::Error;

use std::fmt::Display;
use std::path::{Path, PathBuf};

pub use self::kubeconfig::{KubeConfig, KubeConfigError};

const SERVICE_ACCOUNT_TOKEN_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";
const SERVICE_ACCOUNT_CA_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/ca.crt";
const API_SERVER_HOSTNAME: &str = "kubernetes.default.svc";

/// The decoded provider block. Every field is optional because Terraform sends `null` for any
/// attribute the user didn't set.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ProviderConfig {
    /// When true, no cluster connection is made. Only manifests can be used in this mode.
    pub offline: Option<bool>,
    /// Path to a kubeconfig file. When absent, the in-cluster service account is tried, and then
    /// the `KUBECONFIG` env variable or `~/.kube/config`.
    pub kubeconfig: Option<PathBuf>,
    /// Overrides the `current-context` of the kubeconfig file
    pub context: Option<String>,
    /// Disables verification of the api server's TLS certificate
    pub insecure: Option<bool>,
}

impl ProviderConfig {
    pub fn is_offline(&self) -> bool {
        self.offline.unwrap_or(false)
    }

    /// Resolves the `ClientConfig` that should be used to talk to the api server
    pub fn client_config(&self, user_agent: &str) -> Result<ClientConfig, Error> {
        let mut config = if let Some(path) = self.kubeconfig.as_ref() {
            log::debug!("Loading explicitly configured kubeconfig: {}", path.display());
            kubeconfig::load_kubeconfig(user_agent.to_owned(), path, self.context.as_deref())?
        } else if Path::new(SERVICE_ACCOUNT_TOKEN_PATH).exists() && self.context.is_none() {
            log::debug!("Using in-cluster service account credentials");
            ClientConfig::from_service_account(user_agent)?
        } else {
            kubeconfig::load_from_kubeconfig(user_agent.to_owned(), self.context.as_deref())?
        };
        if self.insecure.unwrap_or(false) {
            config.verify_ssl_certs = false;
        }
        Ok(config)
    }
}

/// Certificate authority data, either inline as base64 encoded pem, or as a path to a pem file
#[derive(Debug, Clone, PartialEq)]
pub enum CAData {
    File(String),
    Contents(String),
}

/// The mechanism used to authenticate with the api server
#[derive(Debug, Clone, PartialEq)]
pub enum Credentials {
    /// The complete value of the `Authorization` header
    Header(String),
    /// Client certificate and key as base64 encoded pem data
    Pem {
        certificate_base64: String,
        private_key_base64: String,
    },
    /// Client certificate and key as paths to pem files
    PemPath {
        certificate_path: String,
        private_key_path: String,
    },
}

impl Credentials {
    pub fn base64_bearer_token(token: impl Display) -> Credentials {
        Credentials::Header(format!("Bearer {}", token))
    }

    pub fn basic(username: &str, password: &str) -> Credentials {
        let encoded = base64::encode(format!("{}:{}", username, password));
        Credentials::Header(format!("Basic {}", encoded))
    }

    pub fn header_value(&self) -> Option<&str> {
        match self {
            Credentials::Header(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Everything that's needed to connect to and authenticate with the Kubernetes api server
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_server_endpoint: String,
    pub credentials: Credentials,
    pub ca_data: Option<CAData>,
    pub verify_ssl_certs: bool,
    pub user_agent: String,
    pub impersonate: Option<String>,
    pub impersonate_groups: Vec<String>,
}

impl ClientConfig {
    pub fn new(
        api_server_endpoint: impl Into<String>,
        credentials: Credentials,
        user_agent: impl Into<String>,
    ) -> ClientConfig {
        ClientConfig {
            api_server_endpoint: api_server_endpoint.into(),
            credentials,
            ca_data: None,
            verify_ssl_certs: true,
            user_agent: user_agent.into(),
            impersonate: None,
            impersonate_groups: Vec::new(),
        }
    }

    /// Creates a config from the service account that's mounted into every pod. This is what
    /// is used when terraform itself runs inside the cluster.
    pub fn from_service_account(user_agent: &str) -> Result<ClientConfig, Error> {
        let token = std::fs::read_to_string(SERVICE_ACCOUNT_TOKEN_PATH)?;
        let ca_data = if Path::new(SERVICE_ACCOUNT_CA_PATH).exists() {
            Some(CAData::File(SERVICE_ACCOUNT_CA_PATH.to_owned()))
        } else {
            None
        };

        let mut config = ClientConfig::new(
            format!("https://{}", API_SERVER_HOSTNAME),
            Credentials::base64_bearer_token(token.trim()),
            user_agent,
        );
        config.ca_data = ca_data;
        Ok(config)
    }

    /// Loads the config from the kubeconfig file, using the `KUBECONFIG` env variable or else the
    /// default `~/.kube/config` path.
    pub fn from_kubeconfig(user_agent: &str) -> Result<ClientConfig, KubeConfigError> {
        kubeconfig::load_from_kubeconfig(user_agent.to_owned(), None)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn provider_config_decodes_null_attributes() {
        let json = serde_json::json!({
            "offline": null,
            "kubeconfig": null,
            "context": null,
            "insecure": null,
        });
        let config: ProviderConfig = serde_json::from_value(json).unwrap();
        assert_eq!(ProviderConfig::default(), config);
        assert!(!config.is_offline());
    }

    #[test]
    fn provider_config_decodes_offline_flag() {
        let json = serde_json::json!({ "offline": true });
        let config: ProviderConfig = serde_json::from_value(json).unwrap();
        assert!(config.is_offline());
    }

    #[test]
    fn basic_credentials_are_base64_encoded() {
        let creds = Credentials::basic("admin", "secret");
        assert_eq!(Some("Basic YWRtaW46c2VjcmV0"), creds.header_value());
    }

    #[test]
    fn explicit_kubeconfig_is_used_and_insecure_disables_verification() {
        let config = ProviderConfig {
            kubeconfig: Some(PathBuf::from("src/config/test-data/kubeconfig-with-ca-file.yaml")),
            insecure: Some(true),
            ..Default::default()
        };
        let client_config = config
            .client_config("test-agent")
            .expect("failed to resolve client config");
        assert_eq!("https://localhost:6443", client_config.api_server_endpoint);
        assert!(!client_config.verify_ssl_certs);
        assert_eq!("test-agent", client_config.user_agent);
    }
}
