use crate::client::Error;
use crate::config::ClientConfig;
use crate::k8s_types::K8sType;

use http::{header, Method, Request};
use hyper::Body;
use url::Url;

const IMPERSONATE_USER_HEADER: &str = "Impersonate-User";
const IMPERSONATE_GROUP_HEADER: &str = "Impersonate-Group";

/// Builds the request to GET a single namespaced resource by name
pub fn get_request(
    client_config: &ClientConfig,
    k8s_type: &K8sType,
    namespace: &str,
    name: &str,
) -> Result<Request<Body>, Error> {
    let url = make_url(client_config, k8s_type, Some(namespace), Some(name))?;
    let req = make_req(url, Method::GET, client_config)
        .header(header::ACCEPT, "application/json")
        .body(Body::empty())?;
    Ok(req)
}

fn make_req(url: Url, method: Method, client_config: &ClientConfig) -> http::request::Builder {
    let mut builder = Request::builder()
        .method(method)
        .uri(url.as_str())
        .header(header::USER_AGENT, client_config.user_agent.as_str());
    if let Some(auth) = client_config.credentials.header_value() {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    if let Some(user) = client_config.impersonate.as_ref() {
        builder = builder.header(IMPERSONATE_USER_HEADER, user.as_str());
        for group in client_config.impersonate_groups.iter() {
            builder = builder.header(IMPERSONATE_GROUP_HEADER, group.as_str());
        }
    }
    builder
}

pub(crate) fn make_url(
    client_config: &ClientConfig,
    k8s_type: &K8sType,
    namespace: Option<&str>,
    name: Option<&str>,
) -> Result<Url, Error> {
    let endpoint = client_config.api_server_endpoint.as_str();
    let mut url = Url::parse(endpoint)
        .map_err(|err| Error::InvalidUrl(format!("'{}': {}", endpoint, err)))?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| Error::InvalidUrl(format!("'{}' cannot be a base url", endpoint)))?;
        segments.pop_if_empty();

        let (group, version) = k8s_type.as_group_and_version();
        if group.is_empty() {
            segments.push("api");
        } else {
            segments.push("apis");
            segments.push(group);
        }
        segments.push(version);
        if let Some(ns) = namespace {
            segments.push("namespaces");
            segments.push(ns);
        }
        segments.push(k8s_type.plural_kind);

        if let Some(n) = name {
            segments.push(n);
        }
    }
    Ok(url)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Credentials;
    use crate::k8s_types::training_kubedl_io::v1alpha1::TFJob;

    fn client_config(endpoint: &str) -> ClientConfig {
        ClientConfig::new(
            endpoint,
            Credentials::base64_bearer_token("abc"),
            "test-agent",
        )
    }

    #[test]
    fn url_for_grouped_namespaced_resource() {
        let conf = client_config("https://cluster.example.com:6443");
        let url = make_url(&conf, TFJob, Some("ml"), Some("mnist")).unwrap();
        assert_eq!(
            "https://cluster.example.com:6443/apis/training.kubedl.io/v1alpha1/namespaces/ml/tfjobs/mnist",
            url.as_str()
        );
    }

    #[test]
    fn url_for_core_resource_keeps_endpoint_path_prefix() {
        let conf = client_config("https://proxy.example.com/k8s/");
        let pods = K8sType {
            api_version: "v1",
            kind: "Pod",
            plural_kind: "pods",
        };
        let url = make_url(&conf, &pods, Some("default"), Some("web-0")).unwrap();
        assert_eq!(
            "https://proxy.example.com/k8s/api/v1/namespaces/default/pods/web-0",
            url.as_str()
        );
    }

    #[test]
    fn invalid_endpoint_is_an_error() {
        let conf = client_config("not a url");
        let result = make_url(&conf, TFJob, Some("ml"), Some("mnist"));
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn get_request_sets_auth_and_impersonation_headers() {
        let mut conf = client_config("https://cluster.example.com");
        conf.impersonate = Some("jane".to_owned());
        conf.impersonate_groups = vec!["admins".to_owned(), "devs".to_owned()];
        let req = get_request(&conf, TFJob, "ml", "mnist").unwrap();

        assert_eq!(Method::GET, req.method());
        assert_eq!("Bearer abc", req.headers()[header::AUTHORIZATION]);
        assert_eq!("test-agent", req.headers()[header::USER_AGENT]);
        assert_eq!("jane", req.headers()[IMPERSONATE_USER_HEADER]);
        let groups = req
            .headers()
            .get_all(IMPERSONATE_GROUP_HEADER)
            .iter()
            .collect::<Vec<_>>();
        assert_eq!(2, groups.len());
    }
}
