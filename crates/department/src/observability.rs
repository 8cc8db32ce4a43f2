use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static AGGREGATIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "department_aggregations_total",
        "Total with-employees aggregation requests"
    )
    .expect("register aggregations_total")
});

pub static REMOTE_LOOKUPS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "department_remote_lookups_total",
        "Total employee-service lookups issued by the aggregator"
    )
    .expect("register remote_lookups_total")
});

pub static REMOTE_LOOKUP_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "department_remote_lookup_errors_total",
        "Total failed employee-service lookups"
    )
    .expect("register remote_lookup_errors_total")
});

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
