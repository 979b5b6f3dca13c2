use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};
use service::RegistryError;

pub static REGISTRY_OPS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "phrasebook_registry_ops_total",
        "Registry operations by operation and outcome",
        &["op", "outcome"]
    )
    .expect("register registry_ops_total")
});

pub fn outcome<T>(res: &Result<T, RegistryError>) -> &'static str {
    match res {
        Ok(_) => "ok",
        Err(RegistryError::Validation(_)) => "validation",
        Err(RegistryError::Conflict(_)) => "conflict",
        Err(RegistryError::NotFound(_)) => "not_found",
        Err(RegistryError::Unauthorized) => "unauthorized",
        Err(RegistryError::Hash(_) | RegistryError::Store(_)) => "error",
    }
}

/// Count one registry call.
pub fn observe<T>(op: &str, res: &Result<T, RegistryError>) {
    REGISTRY_OPS_TOTAL.with_label_values(&[op, outcome(res)]).inc();
}

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
