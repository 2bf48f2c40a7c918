//! The http client used by data sources to read objects from the Kubernetes api server. Data
//! sources only ever depend on the `DynamicClient` trait, which is what allows them to be tested
//! without a cluster.
pub mod metrics;
mod request;

use crate::config::{CAData, ClientConfig, Credentials};
use crate::k8s_types::K8sType;

use self::metrics::ClientMetrics;

use bytes::Buf;
use futures::future::BoxFuture;
use futures::FutureExt;
use http::{Request, Response};
use hyper::client::Client as HyperClient;
use hyper::client::HttpConnector;
use hyper::Body;
use hyper_openssl::HttpsConnector;
use openssl::pkey::PKey;
use openssl::ssl::{SslConnector, SslConnectorBuilder, SslMethod};
use openssl::x509::X509;
use serde_json::Value;

use std::io;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug)]
pub enum Error {
    Io(hyper::Error),
    Serde(serde_json::Error),
    Http(http::StatusCode),
    Api(ApiError),
    Request(http::Error),
    InvalidUrl(String),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e as &(dyn std::error::Error + 'static)),
            Error::Serde(e) => Some(e as &(dyn std::error::Error + 'static)),
            Error::Api(e) => Some(e as &(dyn std::error::Error + 'static)),
            Error::Request(e) => Some(e as &(dyn std::error::Error + 'static)),
            Error::Http(_) | Error::InvalidUrl(_) => None,
        }
    }
}

impl Error {
    pub fn http(status: http::StatusCode) -> Error {
        Error::Http(status)
    }

    pub fn is_http_status(&self, code: u16) -> bool {
        match self {
            Error::Http(ref status) => status.as_u16() == code,
            Error::Api(ref api) => api.code == code,
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.is_http_status(404)
    }

    /// A short name for the kind of error, which is included in diagnostics so that users can
    /// tell transport problems apart from api server rejections.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Io(_) => "Io",
            Error::Serde(_) => "Serde",
            Error::Http(_) => "Http",
            Error::Api(_) => "Api",
            Error::Request(_) => "Request",
            Error::InvalidUrl(_) => "InvalidUrl",
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::Io(ref e) => write!(f, "Io Error: {}", e),
            Error::Serde(ref e) => write!(f, "(De)Serialization error: {}", e),
            Error::Http(ref e) => write!(f, "Http Error: {}", e),
            Error::Api(ref e) => write!(f, "{}", e),
            Error::Request(ref e) => write!(f, "Invalid request: {}", e),
            Error::InvalidUrl(ref e) => write!(f, "Invalid api server url: {}", e),
        }
    }
}

impl From<hyper::Error> for Error {
    fn from(e: hyper::Error) -> Error {
        Error::Io(e)
    }
}
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}
impl From<http::Error> for Error {
    fn from(e: http::Error) -> Error {
        Error::Request(e)
    }
}

/// The body of a non-successful response from the api server, which is a `Status` object
#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
pub struct ApiError {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub reason: String,
    pub code: u16,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Api Error: status: '{}', code: {}, reason: '{}', message: '{}'",
            self.status, self.code, self.reason, self.message
        )
    }
}
impl std::error::Error for ApiError {}

/// A client that can read arbitrary resources, addressed only by their `K8sType`, namespace and
/// name. Implementations must perform exactly one request per call, with no retries.
pub trait DynamicClient: Send + Sync {
    fn get<'a>(
        &'a self,
        k8s_type: &'a K8sType,
        namespace: &'a str,
        name: &'a str,
    ) -> BoxFuture<'a, Result<Value, Error>>;
}

#[derive(Debug)]
struct ClientInner {
    http_client: HyperClient<HttpsConnector<HttpConnector>>,
    config: ClientConfig,
    metrics: ClientMetrics,
}

#[derive(Debug, Clone)]
pub struct Client(Arc<ClientInner>);

fn invalid_data(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

fn decode_base64(value: &str, field: &str) -> Result<Vec<u8>, io::Error> {
    base64::decode(value)
        .map_err(|err| invalid_data(format!("Invalid base64 content of {}: {}", field, err)))
}

fn set_client_certificate(
    ssl: &mut SslConnectorBuilder,
    cert_pem: &[u8],
    key_pem: &[u8],
) -> Result<(), io::Error> {
    let cert = X509::from_pem(cert_pem)?;
    let pkey = PKey::private_key_from_pem(key_pem)?;
    ssl.set_certificate(&cert)?;
    ssl.set_private_key(&pkey)?;
    // ensures that the provided private key and certificate actually go together
    ssl.check_private_key()?;
    Ok(())
}

impl Client {
    pub fn new(config: ClientConfig, metrics: ClientMetrics) -> Result<Client, io::Error> {
        let mut http = HttpConnector::new();
        http.enforce_http(false);

        let mut ssl = SslConnector::builder(SslMethod::tls())?;
        // enable http2 using alpn
        ssl.set_alpn_protos(b"\x02h2\x08http/1.1")?;
        match config.ca_data.as_ref() {
            Some(CAData::Contents(certs)) => {
                // inline CA data has to be parsed and added to the cert store manually
                let decoded = decode_base64(certs, "certificate-authority-data")?;
                let cert_store = ssl.cert_store_mut();
                for cert in X509::stack_from_pem(decoded.as_slice())? {
                    cert_store.add_cert(cert)?;
                }
            }
            Some(CAData::File(path)) => {
                ssl.set_ca_file(path.as_str())?;
            }
            None => {}
        }

        match config.credentials {
            Credentials::PemPath {
                ref certificate_path,
                ref private_key_path,
            } => {
                let cert = std::fs::read(certificate_path)?;
                let key = std::fs::read(private_key_path)?;
                set_client_certificate(&mut ssl, &cert, &key)?;
            }
            Credentials::Pem {
                ref certificate_base64,
                ref private_key_base64,
            } => {
                let cert = decode_base64(certificate_base64, "client-certificate-data")?;
                let key = decode_base64(private_key_base64, "client-key-data")?;
                set_client_certificate(&mut ssl, &cert, &key)?;
            }
            Credentials::Header(_) => {}
        }

        if config.verify_ssl_certs {
            ssl.set_verify(openssl::ssl::SslVerifyMode::PEER);
        } else {
            log::warn!("TLS Certificate verification has been disabled! All connections to the Kubernetes api server will be insecure!");
            ssl.set_verify(openssl::ssl::SslVerifyMode::NONE);
        }

        let https = HttpsConnector::with_connector(http, ssl)?;
        let http_client = HyperClient::builder().build(https);

        let inner = ClientInner {
            http_client,
            config,
            metrics,
        };
        Ok(Client(Arc::new(inner)))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.0.config
    }

    /// GETs a single namespaced resource. A 404 is returned as an error, same as any other
    /// non-successful status.
    pub async fn get_resource(
        &self,
        k8s_type: &K8sType,
        namespace: &str,
        name: &str,
    ) -> Result<Value, Error> {
        let req = request::get_request(&self.0.config, k8s_type, namespace, name)?;
        let result = self.get_response_body(k8s_type, req).await;
        if result.is_err() {
            self.0.metrics.request_failed(k8s_type);
        }
        result
    }

    async fn get_response_body(
        &self,
        k8s_type: &K8sType,
        req: Request<Body>,
    ) -> Result<Value, Error> {
        let method = req.method().to_string();
        let uri = req.uri().to_string();
        let start_time = Instant::now();

        log::debug!("Starting {} request to: {}", method, uri);
        let timer = self.0.metrics.request_started(k8s_type);
        let result = self.0.http_client.request(req).await;
        timer.observe_duration();

        let response = match result {
            Ok(resp) => resp,
            Err(err) => {
                log::error!("Failed to execute {} request to: {}, err: {}", method, uri, err);
                return Err(err.into());
            }
        };

        let status_code = response.status().as_u16();
        let result = Client::read_body(response).await;
        log::debug!(
            "Finished {} request to: {}, status: {}, total_duration: {}ms, success: {}",
            method,
            uri,
            status_code,
            start_time.elapsed().as_millis(),
            result.is_ok()
        );
        result
    }

    async fn read_body(response: Response<Body>) -> Result<Value, Error> {
        let status = response.status();
        if !status.is_success() {
            let body = hyper::body::to_bytes(response.into_body()).await?;
            return Err(match serde_json::from_slice::<ApiError>(body.as_ref()) {
                Ok(api_error) => Error::Api(api_error),
                Err(_) => Error::http(status),
            });
        }

        let deserialized = if log::log_enabled!(log::Level::Trace) {
            // if we're logging the response body, then we'll need to read it all into a
            // single buffer, since we can't read a response body twice without copying
            let body = hyper::body::to_bytes(response.into_body()).await?;
            log::trace!("Got response body: {}", String::from_utf8_lossy(body.as_ref()));
            serde_json::from_slice(body.as_ref())?
        } else {
            let body = hyper::body::aggregate(response.into_body()).await?;
            serde_json::from_reader(body.reader())?
        };
        Ok(deserialized)
    }
}

impl DynamicClient for Client {
    fn get<'a>(
        &'a self,
        k8s_type: &'a K8sType,
        namespace: &'a str,
        name: &'a str,
    ) -> BoxFuture<'a, Result<Value, Error>> {
        self.get_resource(k8s_type, namespace, name).boxed()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::client::metrics::Metrics;

    #[test]
    fn error_kind_and_status_checks() {
        let not_found = Error::http(http::StatusCode::NOT_FOUND);
        assert!(not_found.is_not_found());
        assert_eq!("Http", not_found.kind());

        let api = Error::Api(ApiError {
            status: "Failure".to_owned(),
            message: "tfjobs.training.kubedl.io \"x\" not found".to_owned(),
            reason: "NotFound".to_owned(),
            code: 404,
        });
        assert!(api.is_not_found());
        assert_eq!("Api", api.kind());
        assert!(api.to_string().contains("NotFound"));
    }

    #[test]
    fn api_error_is_decoded_from_status_body() {
        let body = r#"{"kind":"Status","apiVersion":"v1","status":"Failure","message":"forbidden","reason":"Forbidden","code":403}"#;
        let err: ApiError = serde_json::from_str(body).unwrap();
        assert_eq!(403, err.code);
        assert_eq!("Forbidden", err.reason);
    }

    #[test]
    fn client_is_created_with_token_credentials() {
        let config = ClientConfig::new(
            "https://localhost:6443",
            Credentials::base64_bearer_token("abc"),
            "test-agent",
        );
        let client = Client::new(config.clone(), Metrics::new().client_metrics())
            .expect("failed to create client");
        assert_eq!(&config, client.config());
    }

    #[test]
    fn client_creation_fails_for_invalid_inline_ca_data() {
        let mut config = ClientConfig::new(
            "https://localhost:6443",
            Credentials::base64_bearer_token("abc"),
            "test-agent",
        );
        config.ca_data = Some(CAData::Contents("not base64!".to_owned()));
        let result = Client::new(config, Metrics::new().client_metrics());
        assert!(result.is_err());
    }
}
