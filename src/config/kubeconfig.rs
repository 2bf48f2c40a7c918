//! Just enough of the kubeconfig file format to build a `ClientConfig` from it. Only a single
//! context is ever resolved, which is either the one that's named in the provider block or the
//! file's `current-context`.
use super::{CAData, ClientConfig, Credentials};

use dirs::home_dir;

use std::fmt::{self, Display};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

const MISSING_CREDENTIAL_MESSAGE: &str = "No supported credentials found in kubeconfig file for the selected context. Only token, username/password, client certificate, and exec are currently supported";
const NO_HOME_DIR_MESSAGE: &str = "Unable to determine HOME directory to load ~/.kube/config";

/// Error representing a problem with loading a kubeconfig file, or creating a `ClientConfig`
/// from it.
#[derive(Debug)]
pub enum KubeConfigError {
    Io(io::Error),
    Format(serde_yaml::Error),
    MissingCredentials,
    NoHomeDir,
    InvalidKubeconfig(String),
    ExecErr(String),
}

impl From<serde_yaml::Error> for KubeConfigError {
    fn from(err: serde_yaml::Error) -> KubeConfigError {
        KubeConfigError::Format(err)
    }
}

impl From<io::Error> for KubeConfigError {
    fn from(err: io::Error) -> KubeConfigError {
        KubeConfigError::Io(err)
    }
}

impl Display for KubeConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            KubeConfigError::Io(ref e) => write!(f, "IO error: {}", e),
            KubeConfigError::Format(ref e) => write!(f, "Kubeconfig format error: {}", e),
            KubeConfigError::MissingCredentials => f.write_str(MISSING_CREDENTIAL_MESSAGE),
            KubeConfigError::NoHomeDir => f.write_str(NO_HOME_DIR_MESSAGE),
            KubeConfigError::InvalidKubeconfig(ref msg) => {
                write!(f, "Invalid kubeconfig file: {}", msg)
            }
            KubeConfigError::ExecErr(ref msg) => write!(f, "exec error: {}", msg),
        }
    }
}
impl std::error::Error for KubeConfigError {}

fn invalid(message: String) -> KubeConfigError {
    KubeConfigError::InvalidKubeconfig(message)
}

/// Returns the path from the `KUBECONFIG` env variable, falling back to `~/.kube/config`
pub fn default_kubeconfig_path() -> Result<PathBuf, KubeConfigError> {
    std::env::var_os("KUBECONFIG")
        .map(PathBuf::from)
        .or_else(|| home_dir().map(|home| home.join(".kube").join("config")))
        .ok_or(KubeConfigError::NoHomeDir)
}

/// Loads the kubeconfig file at the given path and resolves a `ClientConfig` for the given
/// context, or the file's `current-context` when none is given.
pub fn load_kubeconfig(
    user_agent: String,
    file_path: impl AsRef<Path>,
    context: Option<&str>,
) -> Result<ClientConfig, KubeConfigError> {
    let path = file_path.as_ref();
    let kubeconfig = KubeConfig::load_file(path)?;
    let dir = path.parent().ok_or_else(|| {
        invalid(format!(
            "Cannot determine parent directory of kube config file at path: '{}'",
            path.display()
        ))
    })?;
    kubeconfig.resolve(user_agent, dir, context)
}

pub fn load_from_kubeconfig(
    user_agent: String,
    context: Option<&str>,
) -> Result<ClientConfig, KubeConfigError> {
    let path = default_kubeconfig_path()?;
    load_kubeconfig(user_agent, path, context)
}

fn resolve_path(dir: &Path, path: &str) -> String {
    dir.join(path).to_string_lossy().to_string()
}

fn get_credentials(user: &UserInfo, dir: &Path) -> Result<Credentials, KubeConfigError> {
    if let Some(token) = user.token.as_ref() {
        log::debug!("Using auth token from kubeconfig");
        return Ok(Credentials::base64_bearer_token(token));
    }
    if let Some(username) = user.username.as_ref() {
        let pass = user.password.as_ref().ok_or_else(|| {
            invalid("Username is specified but not password".to_owned())
        })?;
        log::debug!("Using username/password from kubeconfig");
        return Ok(Credentials::basic(username, pass));
    }
    if let Some(exec) = user.exec.as_ref() {
        return get_exec_token(exec).map(Credentials::Header);
    }

    match (user.client_certificate.as_ref(), user.client_key.as_ref()) {
        (Some(cert), Some(key)) => {
            return Ok(Credentials::PemPath {
                certificate_path: resolve_path(dir, cert),
                private_key_path: resolve_path(dir, key),
            });
        }
        (Some(_), None) => {
            return Err(invalid(
                "'client-certificate' is specified, but 'client-key' is missing".to_owned(),
            ));
        }
        _ => {}
    }

    match (
        user.client_certificate_data.as_ref(),
        user.client_key_data.as_ref(),
    ) {
        (Some(cert), Some(key)) => Ok(Credentials::Pem {
            certificate_base64: cert.clone(),
            private_key_base64: key.clone(),
        }),
        (Some(_), None) => Err(invalid(
            "'client-certificate-data' is specified, but 'client-key-data' is missing".to_owned(),
        )),
        _ => Err(KubeConfigError::MissingCredentials),
    }
}

fn get_exec_token(exec: &Exec) -> Result<String, KubeConfigError> {
    use std::process::Command;

    log::debug!("Getting credentials from: {:?}", exec);
    let output = Command::new(exec.command.as_str())
        .args(exec.args.iter())
        .envs(exec.env.iter().map(|var| (var.name.as_str(), var.value.as_str())))
        .output()?;
    if !output.status.success() {
        return Err(KubeConfigError::ExecErr(format!(
            "command '{}' exited with: {}",
            exec.command, output.status
        )));
    }
    let credential: ExecCredential =
        serde_yaml::from_slice(output.stdout.as_slice()).map_err(|err| {
            KubeConfigError::ExecErr(format!(
                "Invalid stdout from exec command: '{}' : err: {}",
                exec.command, err
            ))
        })?;

    log::info!(
        "Got token from command: '{}' with expiration: {:?}",
        exec.command,
        credential.status.expiration_timestamp
    );
    Ok(format!("Bearer {}", credential.status.token))
}

/// used only for deserializing the output of the `exec` command for retrieving credentials
#[derive(Deserialize, Clone, Debug)]
struct ExecCredential {
    status: ExecCredentialStatus,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct ExecCredentialStatus {
    token: String,
    expiration_timestamp: Option<String>,
}

// below are struct definitions that are used only for deserializing the kubeconfig. These are NOT
// complete definitions, so should not be exposed outside of this module.

#[derive(Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "kebab-case")]
struct ClusterInfo {
    server: String,
    certificate_authority_data: Option<String>,
    certificate_authority: Option<String>,
    #[serde(default)]
    insecure_skip_tls_verify: bool,
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
struct Cluster {
    name: String,
    cluster: ClusterInfo,
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "kebab-case")]
struct UserInfo {
    username: Option<String>,
    password: Option<String>,
    token: Option<String>,
    client_certificate_data: Option<String>,
    client_key_data: Option<String>,
    client_certificate: Option<String>,
    client_key: Option<String>,
    #[serde(rename = "as")]
    as_user: Option<String>,
    #[serde(default)]
    as_groups: Vec<String>,
    exec: Option<Exec>,
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
struct ExecEnv {
    name: String,
    value: String,
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
struct Exec {
    command: String,
    #[serde(default)]
    args: Vec<String>,
    #[serde(default)]
    env: Vec<ExecEnv>,
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
struct User {
    name: String,
    user: UserInfo,
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
struct ContextInfo {
    cluster: String,
    user: String,
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
struct Context {
    name: String,
    context: ContextInfo,
}

/// A kubeconfig file that's been loaded into memory
#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct KubeConfig {
    #[serde(rename = "current-context")]
    current_context: String,
    clusters: Vec<Cluster>,
    users: Vec<User>,
    contexts: Vec<Context>,
}

impl KubeConfig {
    /// Attempts to load the kube config file from the specified path. Returns an error if
    /// the file is missing, or if it is syntactically or structurally invalid.
    pub fn load_file(path: &Path) -> Result<KubeConfig, KubeConfigError> {
        let reader = File::open(path)?;
        let conf = serde_yaml::from_reader(reader)?;
        Ok(conf)
    }

    /// Names of all the contexts in the file
    pub fn context_names(&self) -> impl Iterator<Item = &str> {
        self.contexts.iter().map(|ctx| ctx.name.as_str())
    }

    /// Creates a `ClientConfig` for the given context. Relative file paths in the kubeconfig are
    /// resolved against `kube_config_dir`.
    pub fn resolve(
        &self,
        user_agent: String,
        kube_config_dir: &Path,
        context: Option<&str>,
    ) -> Result<ClientConfig, KubeConfigError> {
        let context_name = context.unwrap_or(self.current_context.as_str());
        log::debug!("Resolving kubeconfig context: '{}'", context_name);

        let found_context = self
            .contexts
            .iter()
            .find(|ctx| ctx.name == context_name)
            .ok_or_else(|| invalid(format!("No context found for name: '{}'", context_name)))?;
        let found_cluster = self
            .clusters
            .iter()
            .find(|cluster| cluster.name == found_context.context.cluster)
            .ok_or_else(|| {
                invalid(format!(
                    "No cluster found for name: '{}'",
                    found_context.context.cluster
                ))
            })?;
        let found_user = self
            .users
            .iter()
            .find(|user| user.name == found_context.context.user)
            .ok_or_else(|| {
                invalid(format!(
                    "No user found for name: '{}'",
                    found_context.context.user
                ))
            })?;

        let cluster = &found_cluster.cluster;
        let ca_data = match (
            cluster.certificate_authority_data.as_ref(),
            cluster.certificate_authority.as_ref(),
        ) {
            (Some(data), _) => Some(CAData::Contents(data.clone())),
            (None, Some(path)) => {
                let resolved = resolve_path(kube_config_dir, path);
                log::debug!(
                    "Resolved cluster certificate-authority path '{}' to '{}'",
                    path,
                    resolved
                );
                Some(CAData::File(resolved))
            }
            (None, None) => None,
        };

        Ok(ClientConfig {
            api_server_endpoint: cluster.server.clone(),
            credentials: get_credentials(&found_user.user, kube_config_dir)?,
            ca_data,
            verify_ssl_certs: !cluster.insecure_skip_tls_verify,
            user_agent,
            impersonate: found_user.user.as_user.clone(),
            impersonate_groups: found_user.user.as_groups.clone(),
        })
    }
}
