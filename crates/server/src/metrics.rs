//! Prometheus counters for the student API (default registry).
use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};
use tracing::error;

static STUDENT_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "student_requests_total",
        "Student API requests by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("register student_requests_total")
});

/// Count one request; `outcome` is `ok` or the error status code.
pub fn record<T, E>(operation: &str, res: &Result<T, E>, status: impl Fn(&E) -> StatusCode) {
    let outcome = match res {
        Ok(_) => "ok".to_string(),
        Err(e) => status(e).as_u16().to_string(),
    };
    STUDENT_REQUESTS_TOTAL.with_label_values(&[operation, &outcome]).inc();
}

pub fn count(operation: &str, outcome: &str) -> u64 {
    STUDENT_REQUESTS_TOTAL.with_label_values(&[operation, outcome]).get()
}

pub async fn metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!("encode metrics error: {e}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "metrics encode error".to_string());
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
