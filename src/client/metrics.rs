use crate::k8s_types::K8sType;

use prometheus::{
    exponential_buckets, Histogram, HistogramOpts, IntCounterVec, Opts, Registry,
};

use std::fmt::{self, Debug};

const API_VERSION_AND_KIND: &[&str] = &["apiVersion", "kind"];

/// Metrics about the requests the provider makes to the api server. These are kept in their own
/// registry so that a plugin host can expose them however it likes.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    api_server_request_times: Histogram,
    requests_by_type: IntCounterVec,
    request_errors_by_type: IntCounterVec,
}

impl Debug for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Metrics")
    }
}

impl Default for Metrics {
    fn default() -> Metrics {
        Metrics::new()
    }
}

impl Metrics {
    pub fn new() -> Metrics {
        let registry = Registry::new();

        // 5ms, 10ms, 20ms ... 10.24s
        let request_time_opts = HistogramOpts::new(
            "api_server_request_time",
            "Total time from sending the request to receiving the response headers",
        )
        .subsystem("client")
        .buckets(exponential_buckets(0.005, 2.0, 12).unwrap());
        let api_server_request_times = Histogram::with_opts(request_time_opts).unwrap();
        registry
            .register(Box::new(api_server_request_times.clone()))
            .unwrap();

        let requests_opts = Opts::new("requests", "number of GET requests by resource type")
            .subsystem("client")
            .variable_label("apiVersion")
            .variable_label("kind");
        let requests_by_type = IntCounterVec::new(requests_opts, API_VERSION_AND_KIND).unwrap();
        registry.register(Box::new(requests_by_type.clone())).unwrap();

        let errors_opts = Opts::new("request_errors", "number of failed GET requests by resource type")
            .subsystem("client")
            .variable_label("apiVersion")
            .variable_label("kind");
        let request_errors_by_type = IntCounterVec::new(errors_opts, API_VERSION_AND_KIND).unwrap();
        registry
            .register(Box::new(request_errors_by_type.clone()))
            .unwrap();

        Metrics {
            registry,
            api_server_request_times,
            requests_by_type,
            request_errors_by_type,
        }
    }

    pub fn client_metrics(&self) -> ClientMetrics {
        ClientMetrics {
            api_server_request_times: self.api_server_request_times.clone(),
            requests_by_type: self.requests_by_type.clone(),
            request_errors_by_type: self.request_errors_by_type.clone(),
        }
    }

    pub fn encode_as_text(&self) -> Result<Vec<u8>, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::with_capacity(4096);
        encoder.encode(self.registry.gather().as_slice(), &mut buffer)?;
        Ok(buffer)
    }
}

pub struct ClientMetrics {
    api_server_request_times: Histogram,
    requests_by_type: IntCounterVec,
    request_errors_by_type: IntCounterVec,
}

impl Debug for ClientMetrics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("ClientMetrics")
    }
}

impl ClientMetrics {
    pub fn request_started(&self, k8s_type: &K8sType) -> prometheus::HistogramTimer {
        self.requests_by_type
            .with_label_values(&[k8s_type.api_version, k8s_type.kind])
            .inc();
        self.api_server_request_times.start_timer()
    }

    pub fn request_failed(&self, k8s_type: &K8sType) {
        self.request_errors_by_type
            .with_label_values(&[k8s_type.api_version, k8s_type.kind])
            .inc();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::k8s_types::training_kubedl_io::v1alpha1::TFJob;

    #[test]
    fn metrics_are_created_successfully() {
        let _metrics = Metrics::new();
    }

    #[test]
    fn request_counts_are_encoded_by_type() {
        let metrics = Metrics::new();
        let client_metrics = metrics.client_metrics();
        let timer = client_metrics.request_started(TFJob);
        timer.observe_duration();
        client_metrics.request_failed(TFJob);

        let text = String::from_utf8(metrics.encode_as_text().unwrap()).unwrap();
        assert!(text.contains("client_requests"), "metrics text: {}", text);
        assert!(text.contains("kind=\"TFJob\""), "metrics text: {}", text);
        assert!(text.contains("client_request_errors"), "metrics text: {}", text);
    }
}
