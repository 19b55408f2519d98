use axum::response::IntoResponse;
use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, Encoder, HistogramVec,
    IntCounter, IntCounterVec, TextEncoder,
};

lazy_static! {
    /// Requests answered, by endpoint and HTTP status
    pub static ref REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "gateway_requests_total",
        "Total number of requests answered",
        &["endpoint", "status"]
    )
    .unwrap();

    /// Backend round-trip time in seconds
    pub static ref BACKEND_DURATION: HistogramVec = register_histogram_vec!(
        "gateway_backend_duration_seconds",
        "Inference backend round-trip time in seconds",
        &["endpoint"],
        vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]
    )
    .unwrap();

    /// Commands answered with the search fallback
    pub static ref PARSE_FALLBACKS: IntCounter = register_int_counter!(
        "gateway_parse_fallbacks_total",
        "Commands whose model output could not be parsed and fell back to a web search"
    )
    .unwrap();
}

pub fn record_request(endpoint: &str, status: u16) {
    let status = status.to_string();
    REQUESTS_TOTAL
        .with_label_values(&[endpoint, status.as_str()])
        .inc();
}

/// Export metrics in Prometheus text format
pub fn export_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

pub async fn metrics_handler() -> axum::response::Response {
    match export_metrics() {
        Ok(metrics) => (
            axum::http::StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4",
            )],
            metrics,
        )
            .into_response(),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to export metrics: {}", e),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_requests_show_up_in_export() {
        record_request("chat", 200);
        PARSE_FALLBACKS.inc();

        let text = export_metrics().unwrap();
        assert!(text.contains("gateway_requests_total"));
        assert!(text.contains("endpoint=\"chat\""));
        assert!(text.contains("gateway_parse_fallbacks_total"));
    }
}
